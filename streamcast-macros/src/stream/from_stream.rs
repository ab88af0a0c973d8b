//! FromStream derive macro implementation.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields};

use super::{has_skip_attr, reader_ident, reject_enum_field_attrs, tag_lit};

/// Derive the `FromStream` trait for a struct or enum.
pub fn derive_from_stream(input: TokenStream) -> TokenStream {
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

    let (body, uses_reader) = match &input.data {
        Data::Struct(data) => {
            let (reads, constructor) = generate_struct(name, &data.fields);
            let body = quote! {
                #reads
                Ok(#constructor)
            };
            (body, reads_use_reader(&data.fields))
        }
        Data::Enum(data) => {
            reject_enum_field_attrs(data)?;
            (generate_enum(name, data), true)
        }
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                input,
                "FromStream derive is not supported for unions.",
            ));
        }
    };

    let reader = reader_ident(uses_reader);

    Ok(quote! {
        impl #impl_generics streamcast::FromStream for #name #ty_generics #where_clause {
            fn from_stream(#reader: &mut streamcast::StreamReader<'_>) -> streamcast::Result<Self> {
                #body
            }
        }
    })
}

/// Whether any field actually decodes from the reader (skipped fields
/// only take defaults).
pub(super) fn reads_use_reader(fields: &Fields) -> bool {
    fields.iter().any(|f| !has_skip_attr(f))
}

// Struct deserialization: one read per field, declaration order; skipped
// fields come back as their defaults.

pub(super) fn generate_struct(
    name: &syn::Ident,
    fields: &Fields,
) -> (TokenStream2, TokenStream2) {
    match fields {
        Fields::Named(named) => {
            let reads: Vec<_> = named
                .named
                .iter()
                .map(|f| {
                    let field_name = &f.ident;
                    let field_type = &f.ty;
                    if has_skip_attr(f) {
                        quote! {
                            let #field_name: #field_type = Default::default();
                        }
                    } else {
                        quote! {
                            let #field_name =
                                <#field_type as streamcast::FromStream>::from_stream(r)?;
                        }
                    }
                })
                .collect();

            let names: Vec<_> = named.named.iter().map(|f| &f.ident).collect();
            let constructor = quote! { #name { #(#names),* } };

            (quote! { #(#reads)* }, constructor)
        }
        Fields::Unnamed(unnamed) => {
            let reads: Vec<_> = unnamed
                .unnamed
                .iter()
                .enumerate()
                .map(|(i, f)| {
                    let field_name =
                        syn::Ident::new(&format!("field_{i}"), proc_macro2::Span::call_site());
                    let field_type = &f.ty;
                    if has_skip_attr(f) {
                        quote! {
                            let #field_name: #field_type = Default::default();
                        }
                    } else {
                        quote! {
                            let #field_name =
                                <#field_type as streamcast::FromStream>::from_stream(r)?;
                        }
                    }
                })
                .collect();

            let names: Vec<_> = (0..unnamed.unnamed.len())
                .map(|i| syn::Ident::new(&format!("field_{i}"), proc_macro2::Span::call_site()))
                .collect();
            let constructor = quote! { #name(#(#names),*) };

            (quote! { #(#reads)* }, constructor)
        }
        Fields::Unit => (quote! {}, quote! { #name }),
    }
}

// Enum deserialization: read the count tag, then the matching variant's
// fields; an out-of-range tag surfaces InvalidTag.

fn generate_enum(name: &syn::Ident, data: &syn::DataEnum) -> TokenStream2 {
    let arity = tag_lit(data.variants.len());

    let arms: Vec<_> = data
        .variants
        .iter()
        .enumerate()
        .map(|(idx, variant)| {
            let variant_name = &variant.ident;
            let tag = tag_lit(idx);

            match &variant.fields {
                Fields::Unit => {
                    quote! {
                        #tag => Ok(#name::#variant_name)
                    }
                }
                Fields::Unnamed(fields) => {
                    let reads: Vec<_> = fields
                        .unnamed
                        .iter()
                        .enumerate()
                        .map(|(i, f)| {
                            let field_name = syn::Ident::new(
                                &format!("field_{i}"),
                                proc_macro2::Span::call_site(),
                            );
                            let field_type = &f.ty;
                            quote! {
                                let #field_name =
                                    <#field_type as streamcast::FromStream>::from_stream(r)?;
                            }
                        })
                        .collect();

                    let names: Vec<_> = (0..fields.unnamed.len())
                        .map(|i| {
                            syn::Ident::new(&format!("field_{i}"), proc_macro2::Span::call_site())
                        })
                        .collect();

                    quote! {
                        #tag => {
                            #(#reads)*
                            Ok(#name::#variant_name(#(#names),*))
                        }
                    }
                }
                Fields::Named(fields) => {
                    let reads: Vec<_> = fields
                        .named
                        .iter()
                        .map(|f| {
                            let field_name = &f.ident;
                            let field_type = &f.ty;
                            quote! {
                                let #field_name =
                                    <#field_type as streamcast::FromStream>::from_stream(r)?;
                            }
                        })
                        .collect();

                    let names: Vec<_> = fields.named.iter().map(|f| &f.ident).collect();

                    quote! {
                        #tag => {
                            #(#reads)*
                            Ok(#name::#variant_name { #(#names),* })
                        }
                    }
                }
            }
        })
        .collect();

    quote! {
        match r.read_count()? {
            #(#arms,)*
            tag => Err(streamcast::StreamError::InvalidTag { tag, limit: #arity }),
        }
    }
}
