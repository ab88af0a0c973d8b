//! Derive macro implementations.

mod from_stream;
mod streamable;
mod to_stream;

pub use from_stream::derive_from_stream;
pub use streamable::derive_streamable;
pub use to_stream::derive_to_stream;

/// Check if a field has `#[streamcast(name)]` for the given attribute
/// name.
fn has_streamcast_attr(field: &syn::Field, name: &str) -> bool {
    field.attrs.iter().any(|attr| {
        if !attr.path().is_ident("streamcast") {
            return false;
        }
        let mut found = false;
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident(name) {
                found = true;
            }
            Ok(())
        });
        found
    })
}

pub fn has_skip_attr(field: &syn::Field) -> bool {
    has_streamcast_attr(field, "skip") || is_phantom_data(&field.ty)
}

/// Check if a type is `PhantomData` (with any generic args).
fn is_phantom_data(ty: &syn::Type) -> bool {
    let syn::Type::Path(type_path) = ty else {
        return false;
    };
    type_path
        .path
        .segments
        .last()
        .is_some_and(|seg| seg.ident == "PhantomData")
}

/// Reject `#[streamcast(skip)]` on enum variant fields; the attribute is
/// only supported on struct fields.
pub fn reject_enum_field_attrs(data: &syn::DataEnum) -> syn::Result<()> {
    for variant in &data.variants {
        for field in variant.fields.iter() {
            if has_streamcast_attr(field, "skip") {
                return Err(syn::Error::new_spanned(
                    field,
                    "#[streamcast(skip)] is not supported on enum variant fields",
                ));
            }
        }
    }
    Ok(())
}

/// The variant-index tag literal for position `idx`.
fn tag_lit(idx: usize) -> syn::LitInt {
    syn::LitInt::new(&format!("{idx}u64"), proc_macro2::Span::call_site())
}

/// The writer parameter ident, underscored when the body never touches it
/// (fieldless types).
fn writer_ident(used: bool) -> syn::Ident {
    syn::Ident::new(if used { "w" } else { "_w" }, proc_macro2::Span::call_site())
}

/// The reader parameter ident, underscored when the body never touches it.
fn reader_ident(used: bool) -> syn::Ident {
    syn::Ident::new(if used { "r" } else { "_r" }, proc_macro2::Span::call_site())
}

/// Accessors (`self.name` / `self.0`) for the non-skipped fields of a
/// struct, paired with their types.
fn struct_members(fields: &syn::Fields) -> Vec<(proc_macro2::TokenStream, &syn::Type)> {
    use quote::quote;

    match fields {
        syn::Fields::Named(named) => named
            .named
            .iter()
            .filter(|f| !has_skip_attr(f))
            .map(|f| {
                let name = &f.ident;
                (quote! { #name }, &f.ty)
            })
            .collect(),
        syn::Fields::Unnamed(unnamed) => unnamed
            .unnamed
            .iter()
            .enumerate()
            .filter(|(_, f)| !has_skip_attr(f))
            .map(|(i, f)| {
                let index = syn::Index::from(i);
                (quote! { #index }, &f.ty)
            })
            .collect(),
        syn::Fields::Unit => Vec::new(),
    }
}
