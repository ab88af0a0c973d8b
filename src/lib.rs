//! Length-framed binary serialization for compound, polymorphic object
//! graphs.
//!
//! Values are written and read by structural category: bit-copyable
//! scalars travel as their raw native-endian image, ranges carry a
//! variable-length count prefix, optionals and variants a tag, and user
//! compounds ([`Streamable`]) are framed with their exact byte length so
//! readers can isolate them — which is what makes decoding through a
//! `Box<dyn Base>` possible via a user-supplied [`FindDerived`] factory.
//!
//! # Writing and reading
//!
//! ```
//! use streamcast::{Stream, StreamReader, StreamWriter};
//!
//! let mut stream = Stream::new();
//! let mut writer = StreamWriter::new(&mut stream);
//! writer.write(&12.34f64).unwrap().write("cariceps").unwrap();
//!
//! let mut reader = StreamReader::new(&mut stream);
//! let d: f64 = reader.read().unwrap();
//! let s: String = reader.read().unwrap();
//! assert_eq!((d, s.as_str()), (12.34, "cariceps"));
//! ```
//!
//! # Compounds
//!
//! ```
//! use streamcast::{DeriveStreamable, Stream, StreamReader, StreamWriter, ToStream};
//!
//! #[derive(DeriveStreamable, Debug, Default, PartialEq)]
//! struct Login {
//!     name: String,
//!     attempts: u32,
//! }
//!
//! let login = Login { name: "ferris".into(), attempts: 3 };
//!
//! let mut stream = Stream::new();
//! StreamWriter::new(&mut stream).write(&login).unwrap();
//! assert_eq!(stream.len(), login.parse_size());
//!
//! let back: Login = StreamReader::new(&mut stream).read().unwrap();
//! assert_eq!(back, login);
//! ```

#![no_std]

extern crate alloc;

pub mod count;

mod error;
mod impls;
mod reader;
mod stream;
mod traits;
mod wide;
mod writer;

#[cfg(test)]
mod tests;

pub use error::{Result, StreamError};
pub use reader::StreamReader;
pub use stream::Stream;
pub use traits::{BitCopy, FindDerived, FromStream, Streamable, ToStream};
pub use wide::WideString;
pub use writer::StreamWriter;

#[cfg(feature = "derive")]
pub use streamcast_macros::{
    FromStream as DeriveFromStream, Streamable as DeriveStreamable, ToStream as DeriveToStream,
};
