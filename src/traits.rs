//! Serialization traits. The impl set doubles as the type classifier:
//! exactly one structural category applies to any supported type, and the
//! size finder, writer, and reader all dispatch through the same impl, so
//! they cannot disagree. A type with no impl is rejected at compile time.

use alloc::boxed::Box;

use crate::{Result, StreamReader, StreamWriter};

/// Serialize a value into a stream.
///
/// # Example
///
/// ```
/// use streamcast::{Stream, StreamWriter, ToStream};
///
/// let value = 42u32;
/// assert_eq!(value.parse_size(), 4);
///
/// let mut stream = Stream::new();
/// StreamWriter::new(&mut stream).write(&value).unwrap();
/// assert_eq!(stream.len(), value.parse_size());
/// ```
pub trait ToStream {
    /// Nesting depth of iterable types; 0 for anything that is not a
    /// range. A string has rank 1, `Vec<Vec<String>>` has rank 3.
    const RANK: usize = 0;

    /// Exact number of bytes [`to_stream`](Self::to_stream) will emit.
    fn parse_size(&self) -> usize;

    /// Emit the value.
    fn to_stream(&self, w: &mut StreamWriter<'_>) -> Result<()>;
}

/// Deserialize a value from a stream.
pub trait FromStream: Sized {
    /// Consume and reconstruct a value.
    fn from_stream(r: &mut StreamReader<'_>) -> Result<Self>;
}

/// A user compound with an ordered field list.
///
/// On the wire a streamable is framed as `count(body) || body`, where the
/// body is the concatenation of its fields; the prefix lets a reader
/// isolate the object's bytes for bounded decoding and polymorphic
/// dispatch. `#[derive(Streamable)]` wires a struct's fields into all
/// three methods and supplies the framed
/// [`ToStream`]/[`FromStream`] impls.
pub trait Streamable {
    /// Write all fields in declaration order.
    fn to_stream(&self, w: &mut StreamWriter<'_>) -> Result<()>;

    /// Read all fields in declaration order.
    fn from_stream(&mut self, r: &mut StreamReader<'_>) -> Result<()>;

    /// Byte length of the fields, excluding the frame prefix.
    fn find_parse_size(&self) -> usize;
}

/// Factory for polymorphic decode through a base-type pointer.
///
/// Implemented for `dyn Base`. Called inside the object's frame before any
/// field decoding; reads the leading discriminant that the concrete type's
/// `to_stream` wrote, and returns a freshly constructed instance of the
/// matching type. The reader then fills that instance with
/// [`Streamable::from_stream`], which therefore must *not* re-read the
/// discriminant.
///
/// An unknown discriminant should surface
/// [`InvalidTag`](crate::StreamError::InvalidTag); a factory that cannot
/// produce an instance surfaces
/// [`DowncastFailed`](crate::StreamError::DowncastFailed).
pub trait FindDerived: Streamable {
    /// Construct the concrete instance the stream describes.
    fn find_derived(r: &mut StreamReader<'_>) -> Result<Box<Self>>;
}

/// Marker for types serialized as their raw native-endian byte image,
/// `size_of::<Self>()` bytes wide. Implemented through the
/// [`bit_copy!`](crate::bit_copy) macro.
///
/// # Safety
///
/// Implementors must contain no padding and no pointers, and every bit
/// pattern must be a valid value.
pub unsafe trait BitCopy: Copy {}
