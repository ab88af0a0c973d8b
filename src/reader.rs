//! Stream reader: reconstructs values per their structural category.

use alloc::boxed::Box;

use crate::{count, BitCopy, FindDerived, FromStream, Result, Stream, StreamError, Streamable};

/// Borrow of a [`Stream`] for decoding, bounded to a byte limit.
///
/// The root reader is unbounded. Framed decodes (streamables, polymorphic
/// pointers) run in a child reader limited to the frame length, so a
/// buggy or hostile payload can never read past its own frame.
///
/// # Example
///
/// ```
/// use streamcast::{read_all, write_all, Stream, StreamReader, StreamWriter};
///
/// let mut stream = Stream::new();
/// let mut writer = StreamWriter::new(&mut stream);
/// write_all!(writer, 12.34f64, String::from("cariceps")).unwrap();
///
/// let mut reader = StreamReader::new(&mut stream);
/// let (mut d, mut s) = (0.0f64, String::new());
/// read_all!(reader, d, s).unwrap();
/// assert_eq!((d, s.as_str()), (12.34, "cariceps"));
/// ```
pub struct StreamReader<'a> {
    stream: &'a mut Stream,
    limit: usize,
}

impl<'a> StreamReader<'a> {
    pub fn new(stream: &'a mut Stream) -> Self {
        Self {
            stream,
            limit: usize::MAX,
        }
    }

    /// Bytes this reader may still consume.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.limit.min(self.stream.remaining())
    }

    /// Decode one value.
    pub fn read<T: FromStream>(&mut self) -> Result<T> {
        T::from_stream(self)
    }

    /// Decode one value into an existing place. Chains.
    pub fn read_into<T: FromStream>(&mut self, place: &mut T) -> Result<&mut Self> {
        *place = T::from_stream(self)?;
        Ok(self)
    }

    /// View of exactly `n` bytes, advancing the cursor.
    pub fn read_view(&mut self, n: usize) -> Result<&[u8]> {
        let available = self.remaining();
        if n > available {
            return Err(StreamError::Truncated {
                needed: n,
                available,
            });
        }
        self.limit -= n;
        Ok(self.stream.read(n))
    }

    /// Look-ahead without advancing, clipped to this reader's limit.
    #[must_use]
    pub fn current(&self) -> &[u8] {
        let ahead = self.stream.current();
        &ahead[..ahead.len().min(self.limit)]
    }

    /// Decode a count prefix.
    pub fn read_count(&mut self) -> Result<u64> {
        let first = *self.current().first().ok_or(StreamError::Truncated {
            needed: 1,
            available: 0,
        })?;
        let view = self.read_view(count::required_bytes(first))?;
        let (n, _) = count::decode(view)?;
        Ok(n)
    }

    /// Decode the raw native-endian byte image of a bit-copyable value.
    pub fn read_bit_copy<T: BitCopy>(&mut self) -> Result<T> {
        let view = self.read_view(core::mem::size_of::<T>())?;
        // SAFETY: the view is exactly size_of::<T>() bytes, and BitCopy
        // guarantees every bit pattern is a valid T.
        Ok(unsafe { core::ptr::read_unaligned(view.as_ptr().cast::<T>()) })
    }

    /// Capacity worth reserving for `len` upcoming elements, clipped to
    /// the bytes actually remaining so a corrupt count cannot force a
    /// large allocation.
    #[must_use]
    pub fn reserve_hint(&self, len: u64) -> usize {
        (len as usize).min(self.remaining())
    }

    /// Run `f` with the cursor restored afterwards, on every exit path.
    /// The frame limit is unaffected by whatever `f` consumes.
    pub fn peek<R>(&mut self, f: impl FnOnce(&mut StreamReader<'_>) -> R) -> R {
        self.peek_at(0, f)
    }

    /// [`peek`](Self::peek) after advancing the cursor by `offset`.
    pub fn peek_at<R>(&mut self, offset: usize, f: impl FnOnce(&mut StreamReader<'_>) -> R) -> R {
        let limit = self.limit;
        self.stream.peek_at(offset, move |stream| {
            let mut inner = StreamReader { stream, limit };
            f(&mut inner)
        })
    }

    /// Consume the next frame (`count(body) || body`) and decode inside
    /// it.
    ///
    /// `f` sees a reader bounded to the frame body; any bytes it leaves
    /// unread are skipped, so the cursor always lands just past the frame.
    pub fn read_framed<R>(
        &mut self,
        f: impl FnOnce(&mut StreamReader<'_>) -> Result<R>,
    ) -> Result<R> {
        let body = self.read_count()? as usize;
        let available = self.remaining();
        if body > available {
            return Err(StreamError::Truncated {
                needed: body,
                available,
            });
        }

        let mut inner = StreamReader {
            stream: &mut *self.stream,
            limit: body,
        };
        let out = f(&mut inner);
        let leftover = inner.limit;

        let _ = self.stream.read(leftover);
        self.limit -= body;
        out
    }

    /// Decode a framed streamable into an existing instance. Chains.
    pub fn read_streamable_into<T: Streamable + ?Sized>(
        &mut self,
        value: &mut T,
    ) -> Result<&mut Self> {
        self.read_framed(|inner| value.from_stream(inner))?;
        Ok(self)
    }

    /// Decode a framed streamable from scratch.
    pub fn read_streamable<T: Streamable + Default>(&mut self) -> Result<T> {
        let mut value = T::default();
        self.read_streamable_into(&mut value)?;
        Ok(value)
    }

    /// Decode a polymorphic streamable through its base-type factory.
    ///
    /// The frame count is consumed once; [`FindDerived::find_derived`]
    /// reads the discriminant and constructs the concrete instance, then
    /// [`Streamable::from_stream`] fills in the remaining fields.
    pub fn read_streamable_ptr<T: FindDerived + ?Sized>(&mut self) -> Result<Box<T>> {
        self.read_framed(|inner| {
            let mut value = T::find_derived(inner)?;
            value.from_stream(inner)?;
            Ok(value)
        })
    }

    /// Decode a polymorphic streamable, transferring ownership through a
    /// raw pointer.
    ///
    /// # Safety
    ///
    /// The caller owns the allocation and must release it with
    /// [`Box::from_raw`].
    pub unsafe fn read_streamable_raw<T: FindDerived + ?Sized>(&mut self) -> Result<*mut T> {
        Ok(Box::into_raw(self.read_streamable_ptr::<T>()?))
    }
}

/// Read several values left-to-right into existing places; mirrors
/// [`write_all!`](crate::write_all).
#[macro_export]
macro_rules! read_all {
    ($reader:expr, $($place:expr),+ $(,)?) => {
        (|| -> $crate::Result<()> {
            $( $place = $reader.read()?; )+
            Ok(())
        })()
    };
}
