//! Derive macros for streamcast.

use proc_macro::TokenStream;

mod stream;

/// Derive `ToStream`: unframed field concatenation for structs, tagged
/// variants for enums.
#[proc_macro_derive(ToStream, attributes(streamcast))]
pub fn derive_to_stream(input: TokenStream) -> TokenStream {
    stream::derive_to_stream(input)
}

/// Derive `FromStream`.
#[proc_macro_derive(FromStream, attributes(streamcast))]
pub fn derive_from_stream(input: TokenStream) -> TokenStream {
    stream::derive_from_stream(input)
}

/// Derive the framed `Streamable` contract for a struct, plus the
/// matching `ToStream`/`FromStream` impls.
#[proc_macro_derive(Streamable, attributes(streamcast))]
pub fn derive_streamable(input: TokenStream) -> TokenStream {
    stream::derive_streamable(input)
}
