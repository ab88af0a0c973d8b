//! Stream writer: linearizes values per their structural category.

use crate::{count, BitCopy, Result, Stream, Streamable, ToStream};

/// Borrow of a [`Stream`] for appending encoded values.
///
/// The writer only appends; it never re-reads the stream.
///
/// # Example
///
/// ```
/// use streamcast::{Stream, StreamWriter};
///
/// let mut stream = Stream::new();
/// let mut writer = StreamWriter::new(&mut stream);
/// writer.write(&12.34f64).unwrap().write("cariceps").unwrap();
/// ```
#[derive(Debug)]
pub struct StreamWriter<'a> {
    stream: &'a mut Stream,
}

impl<'a> StreamWriter<'a> {
    pub fn new(stream: &'a mut Stream) -> Self {
        Self { stream }
    }

    /// Append one value. Chains.
    pub fn write<T: ToStream + ?Sized>(&mut self, value: &T) -> Result<&mut Self> {
        value.to_stream(self)?;
        Ok(self)
    }

    /// Append raw bytes, no prefix.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.stream.write(bytes);
        self
    }

    /// Append a count in its variable-length encoding.
    pub fn write_count(&mut self, n: u64) -> &mut Self {
        let mut buf = [0u8; 9];
        let len = count::encode(n, &mut buf);
        self.stream.write(&buf[..len]);
        self
    }

    /// Append the raw native-endian byte image of a bit-copyable value.
    pub fn write_bit_copy<T: BitCopy>(&mut self, value: &T) -> &mut Self {
        // SAFETY: BitCopy guarantees no padding and no pointers, so every
        // byte of the image is initialized.
        let image = unsafe {
            core::slice::from_raw_parts((value as *const T).cast::<u8>(), core::mem::size_of::<T>())
        };
        self.stream.write(image);
        self
    }

    /// Frame and append a streamable: `count(body) || fields`.
    ///
    /// Reserves the full frame up front, so a root object costs at most
    /// one buffer growth.
    pub fn write_streamable(&mut self, value: &(impl Streamable + ?Sized)) -> Result<&mut Self> {
        let body = value.find_parse_size();
        self.stream.reserve(count::encoded_size(body as u64) + body);
        self.write_count(body as u64);
        value.to_stream(self)?;
        Ok(self)
    }

    /// Frame and append a streamable through a raw pointer.
    ///
    /// # Safety
    ///
    /// `value` must be non-null, aligned, and point to a live object for
    /// the duration of the call.
    pub unsafe fn write_streamable_raw<T: Streamable + ?Sized>(
        &mut self,
        value: *const T,
    ) -> Result<&mut Self> {
        self.write_streamable(&*value)
    }
}

/// Write several values left-to-right; equivalent to writing each
/// separately.
///
/// ```
/// use streamcast::{write_all, Stream, StreamWriter};
///
/// let mut stream = Stream::new();
/// let mut writer = StreamWriter::new(&mut stream);
/// write_all!(writer, 22i32, 14.0f32).unwrap();
/// ```
#[macro_export]
macro_rules! write_all {
    ($writer:expr, $($value:expr),+ $(,)?) => {
        (|| -> $crate::Result<()> {
            $( $writer.write(&$value)?; )+
            Ok(())
        })()
    };
}
