mod macros;

pub mod alloc;
mod ptr;

#[cfg(feature = "std")]
mod std_impls;

use crate::{count, FromStream, Result, StreamError, StreamReader, StreamWriter, ToStream};

// bool and char are validated on decode rather than bit-copied: Rust must
// never materialize an invalid value of either.

impl ToStream for bool {
    #[inline]
    fn parse_size(&self) -> usize {
        1
    }

    #[inline]
    fn to_stream(&self, w: &mut StreamWriter<'_>) -> Result<()> {
        w.write_bit_copy(&(*self as u8));
        Ok(())
    }
}

impl FromStream for bool {
    #[inline]
    fn from_stream(r: &mut StreamReader<'_>) -> Result<Self> {
        match r.read_bit_copy::<u8>()? {
            0 => Ok(false),
            1 => Ok(true),
            tag => Err(StreamError::InvalidTag {
                tag: u64::from(tag),
                limit: 2,
            }),
        }
    }
}

impl ToStream for char {
    #[inline]
    fn parse_size(&self) -> usize {
        4
    }

    #[inline]
    fn to_stream(&self, w: &mut StreamWriter<'_>) -> Result<()> {
        w.write_bit_copy(&(*self as u32));
        Ok(())
    }
}

impl FromStream for char {
    #[inline]
    fn from_stream(r: &mut StreamReader<'_>) -> Result<Self> {
        let code = r.read_bit_copy::<u32>()?;
        char::from_u32(code).ok_or(StreamError::Transcode {
            message: "invalid char scalar value",
        })
    }
}

impl ToStream for () {
    #[inline]
    fn parse_size(&self) -> usize {
        0
    }

    #[inline]
    fn to_stream(&self, _w: &mut StreamWriter<'_>) -> Result<()> {
        Ok(())
    }
}

impl FromStream for () {
    #[inline]
    fn from_stream(_r: &mut StreamReader<'_>) -> Result<Self> {
        Ok(())
    }
}

// A nullable slot: count(0) empty, count(1) followed by the payload.

impl<T: ToStream> ToStream for Option<T> {
    fn parse_size(&self) -> usize {
        match self {
            None => count::encoded_size(0),
            Some(value) => count::encoded_size(1) + value.parse_size(),
        }
    }

    fn to_stream(&self, w: &mut StreamWriter<'_>) -> Result<()> {
        match self {
            None => {
                w.write_count(0);
                Ok(())
            }
            Some(value) => {
                w.write_count(1);
                value.to_stream(w)
            }
        }
    }
}

impl<T: FromStream> FromStream for Option<T> {
    fn from_stream(r: &mut StreamReader<'_>) -> Result<Self> {
        match r.read_count()? {
            0 => Ok(None),
            1 => Ok(Some(T::from_stream(r)?)),
            tag => Err(StreamError::InvalidTag { tag, limit: 2 }),
        }
    }
}

// Heterogeneous products: components back to back, first-then-second, no
// prefix. Pairs are the two-element case.

macro_rules! impl_stream_tuple {
    ($(($($name:ident : $idx:tt),+)),+ $(,)?) => { $(
        impl<$($name: ToStream),+> ToStream for ($($name,)+) {
            fn parse_size(&self) -> usize {
                0 $(+ self.$idx.parse_size())+
            }

            fn to_stream(&self, w: &mut StreamWriter<'_>) -> Result<()> {
                $( self.$idx.to_stream(w)?; )+
                Ok(())
            }
        }

        impl<$($name: FromStream),+> FromStream for ($($name,)+) {
            fn from_stream(r: &mut StreamReader<'_>) -> Result<Self> {
                Ok(($($name::from_stream(r)?,)+))
            }
        }
    )+ };
}

impl_stream_tuple! {
    (A:0),
    (A:0, B:1),
    (A:0, B:1, C:2),
    (A:0, B:1, C:2, D:3),
    (A:0, B:1, C:2, D:3, E:4),
    (A:0, B:1, C:2, D:3, E:4, F:5),
    (A:0, B:1, C:2, D:3, E:4, F:5, G:6),
    (A:0, B:1, C:2, D:3, E:4, F:5, G:6, H:7),
}

// Fixed arrays are product-shaped too: the arity is in the type, so no
// count prefix is written.

impl<T: ToStream, const N: usize> ToStream for [T; N] {
    fn parse_size(&self) -> usize {
        self.iter().map(ToStream::parse_size).sum()
    }

    fn to_stream(&self, w: &mut StreamWriter<'_>) -> Result<()> {
        for item in self {
            item.to_stream(w)?;
        }
        Ok(())
    }
}

impl<T: FromStream, const N: usize> FromStream for [T; N] {
    fn from_stream(r: &mut StreamReader<'_>) -> Result<Self> {
        let mut arr: [core::mem::MaybeUninit<T>; N] =
            unsafe { core::mem::MaybeUninit::uninit().assume_init() };

        for slot in arr.iter_mut() {
            slot.write(T::from_stream(r)?);
        }

        // SAFETY: All elements initialized
        Ok(unsafe { core::mem::transmute_copy::<_, [T; N]>(&arr) })
    }
}
