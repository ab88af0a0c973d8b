//! ToStream derive macro implementation.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields};

use super::{reject_enum_field_attrs, struct_members, tag_lit, writer_ident};

/// Derive the `ToStream` trait for a struct or enum.
pub fn derive_to_stream(input: TokenStream) -> TokenStream {
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

    let (parse_size_body, to_stream_body, uses_writer) = match &input.data {
        Data::Struct(data) => (
            generate_struct_parse_size(&data.fields),
            generate_struct_to_stream(&data.fields),
            !struct_members(&data.fields).is_empty(),
        ),
        Data::Enum(data) => {
            reject_enum_field_attrs(data)?;
            (
                generate_enum_parse_size(data),
                generate_enum_to_stream(data),
                true,
            )
        }
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                input,
                "ToStream derive is not supported for unions.",
            ));
        }
    };

    let writer = writer_ident(uses_writer);

    Ok(quote! {
        impl #impl_generics streamcast::ToStream for #name #ty_generics #where_clause {
            fn parse_size(&self) -> usize {
                #parse_size_body
            }

            fn to_stream(&self, #writer: &mut streamcast::StreamWriter<'_>) -> streamcast::Result<()> {
                #to_stream_body
                Ok(())
            }
        }
    })
}

// Struct serialization: fields back to back, declaration order, no frame.

fn generate_struct_parse_size(fields: &Fields) -> TokenStream2 {
    let sizes: Vec<_> = struct_members(fields)
        .into_iter()
        .map(|(member, _)| quote! { streamcast::ToStream::parse_size(&self.#member) })
        .collect();

    quote! { 0 #(+ #sizes)* }
}

fn generate_struct_to_stream(fields: &Fields) -> TokenStream2 {
    let writes: Vec<_> = struct_members(fields)
        .into_iter()
        .map(|(member, _)| {
            quote! {
                streamcast::ToStream::to_stream(&self.#member, w)?;
            }
        })
        .collect();

    quote! { #(#writes)* }
}

// Enum serialization: the variant index travels as a count, then the
// active variant's fields.

fn variant_bindings(fields: &Fields) -> (TokenStream2, Vec<syn::Ident>) {
    match fields {
        Fields::Unit => (quote! {}, Vec::new()),
        Fields::Unnamed(unnamed) => {
            let names: Vec<_> = (0..unnamed.unnamed.len())
                .map(|i| syn::Ident::new(&format!("field_{i}"), proc_macro2::Span::call_site()))
                .collect();
            (quote! { (#(#names),*) }, names)
        }
        Fields::Named(named) => {
            let names: Vec<_> = named
                .named
                .iter()
                .map(|f| f.ident.clone().unwrap())
                .collect();
            (quote! { { #(#names),* } }, names)
        }
    }
}

fn generate_enum_parse_size(data: &syn::DataEnum) -> TokenStream2 {
    let arms: Vec<_> = data
        .variants
        .iter()
        .enumerate()
        .map(|(idx, variant)| {
            let variant_name = &variant.ident;
            let tag = tag_lit(idx);
            let (pattern, names) = variant_bindings(&variant.fields);
            let sizes: Vec<_> = names
                .iter()
                .map(|name| quote! { streamcast::ToStream::parse_size(#name) })
                .collect();

            quote! {
                Self::#variant_name #pattern => {
                    streamcast::count::encoded_size(#tag) #(+ #sizes)*
                }
            }
        })
        .collect();

    quote! {
        match self {
            #(#arms)*
        }
    }
}

fn generate_enum_to_stream(data: &syn::DataEnum) -> TokenStream2 {
    let arms: Vec<_> = data
        .variants
        .iter()
        .enumerate()
        .map(|(idx, variant)| {
            let variant_name = &variant.ident;
            let tag = tag_lit(idx);
            let (pattern, names) = variant_bindings(&variant.fields);
            let writes: Vec<_> = names
                .iter()
                .map(|name| {
                    quote! {
                        streamcast::ToStream::to_stream(#name, w)?;
                    }
                })
                .collect();

            quote! {
                Self::#variant_name #pattern => {
                    w.write_count(#tag);
                    #(#writes)*
                }
            }
        })
        .collect();

    quote! {
        match self {
            #(#arms)*
        }
    }
}
