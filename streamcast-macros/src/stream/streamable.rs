//! Streamable derive macro implementation.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput};

use super::{from_stream, reader_ident, struct_members, writer_ident};

/// Derive the framed `Streamable` contract for a struct.
pub fn derive_streamable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match derive_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

fn derive_impl(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let generics = &input.generics;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            input,
            "Streamable derive is only supported for structs; \
             derive ToStream/FromStream for enums.",
        ));
    };

    let members = struct_members(&data.fields);

    let field_writes: Vec<_> = members
        .iter()
        .map(|(member, _)| {
            quote! {
                streamcast::ToStream::to_stream(&self.#member, w)?;
            }
        })
        .collect();

    let field_reads: Vec<_> = members
        .iter()
        .map(|(member, ty)| {
            quote! {
                self.#member = <#ty as streamcast::FromStream>::from_stream(r)?;
            }
        })
        .collect();

    let field_sizes: Vec<_> = members
        .iter()
        .map(|(member, _)| quote! { streamcast::ToStream::parse_size(&self.#member) })
        .collect();

    let (framed_reads, constructor) = from_stream::generate_struct(name, &data.fields);
    let writer = writer_ident(!members.is_empty());
    let reader = reader_ident(!members.is_empty());
    let framed_reader = reader_ident(from_stream::reads_use_reader(&data.fields));

    Ok(quote! {
        impl #impl_generics streamcast::Streamable for #name #ty_generics #where_clause {
            fn to_stream(&self, #writer: &mut streamcast::StreamWriter<'_>) -> streamcast::Result<()> {
                #(#field_writes)*
                Ok(())
            }

            fn from_stream(&mut self, #reader: &mut streamcast::StreamReader<'_>) -> streamcast::Result<()> {
                #(#field_reads)*
                Ok(())
            }

            fn find_parse_size(&self) -> usize {
                0 #(+ #field_sizes)*
            }
        }

        impl #impl_generics streamcast::ToStream for #name #ty_generics #where_clause {
            fn parse_size(&self) -> usize {
                let body = streamcast::Streamable::find_parse_size(self);
                streamcast::count::encoded_size(body as u64) + body
            }

            fn to_stream(&self, w: &mut streamcast::StreamWriter<'_>) -> streamcast::Result<()> {
                w.write_streamable(self)?;
                Ok(())
            }
        }

        impl #impl_generics streamcast::FromStream for #name #ty_generics #where_clause {
            fn from_stream(r: &mut streamcast::StreamReader<'_>) -> streamcast::Result<Self> {
                r.read_framed(|#framed_reader| {
                    #framed_reads
                    Ok(#constructor)
                })
            }
        }
    })
}
