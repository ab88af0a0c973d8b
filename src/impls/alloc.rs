//! Range impls for the alloc containers: a count prefix, then each
//! element in iteration order. The prefix is written at every nesting
//! level, including empty sub-ranges.

use alloc::collections::{BTreeMap, BTreeSet, LinkedList, VecDeque};
use alloc::string::String;
use alloc::vec::Vec;

use crate::{count, FromStream, Result, StreamError, StreamReader, StreamWriter, ToStream};

macro_rules! impl_stream_seq {
    ($($container:ident $(: $reserve:ident)?),+ $(,)?) => { $(
        impl<T: ToStream> ToStream for $container<T> {
            const RANK: usize = 1 + T::RANK;

            fn parse_size(&self) -> usize {
                count::encoded_size(self.len() as u64)
                    + self.iter().map(ToStream::parse_size).sum::<usize>()
            }

            fn to_stream(&self, w: &mut StreamWriter<'_>) -> Result<()> {
                w.write_count(self.len() as u64);
                for item in self {
                    item.to_stream(w)?;
                }
                Ok(())
            }
        }

        impl<T: FromStream> FromStream for $container<T> {
            fn from_stream(r: &mut StreamReader<'_>) -> Result<Self> {
                let len = r.read_count()?;
                let mut out = $container::new();
                $( out.$reserve(r.reserve_hint(len)); )?
                for _ in 0..len {
                    let item = T::from_stream(r)?;
                    out.extend(core::iter::once(item));
                }
                Ok(out)
            }
        }
    )+ };
}

impl_stream_seq!(Vec: reserve, VecDeque: reserve, LinkedList);

impl ToStream for str {
    const RANK: usize = 1;

    fn parse_size(&self) -> usize {
        count::encoded_size(self.len() as u64) + self.len()
    }

    fn to_stream(&self, w: &mut StreamWriter<'_>) -> Result<()> {
        w.write_count(self.len() as u64).write_bytes(self.as_bytes());
        Ok(())
    }
}

impl ToStream for String {
    const RANK: usize = 1;

    fn parse_size(&self) -> usize {
        self.as_str().parse_size()
    }

    fn to_stream(&self, w: &mut StreamWriter<'_>) -> Result<()> {
        self.as_str().to_stream(w)
    }
}

impl FromStream for String {
    fn from_stream(r: &mut StreamReader<'_>) -> Result<Self> {
        let len = r.read_count()? as usize;
        let view = r.read_view(len)?;
        let text = core::str::from_utf8(view).map_err(|_| StreamError::Transcode {
            message: "invalid UTF-8",
        })?;
        Ok(text.into())
    }
}

// Associative ranges iterate as key/value pairs; a pair has rank 0, so a
// map is always rank 1.

impl<K: ToStream, V: ToStream> ToStream for BTreeMap<K, V> {
    const RANK: usize = 1;

    fn parse_size(&self) -> usize {
        count::encoded_size(self.len() as u64)
            + self
                .iter()
                .map(|(key, value)| key.parse_size() + value.parse_size())
                .sum::<usize>()
    }

    fn to_stream(&self, w: &mut StreamWriter<'_>) -> Result<()> {
        w.write_count(self.len() as u64);
        for (key, value) in self {
            key.to_stream(w)?;
            value.to_stream(w)?;
        }
        Ok(())
    }
}

impl<K: FromStream + Ord, V: FromStream> FromStream for BTreeMap<K, V> {
    fn from_stream(r: &mut StreamReader<'_>) -> Result<Self> {
        let len = r.read_count()?;
        let mut out = BTreeMap::new();
        for _ in 0..len {
            let key = K::from_stream(r)?;
            let value = V::from_stream(r)?;
            out.insert(key, value);
        }
        Ok(out)
    }
}

impl<T: ToStream> ToStream for BTreeSet<T> {
    const RANK: usize = 1 + T::RANK;

    fn parse_size(&self) -> usize {
        count::encoded_size(self.len() as u64)
            + self.iter().map(ToStream::parse_size).sum::<usize>()
    }

    fn to_stream(&self, w: &mut StreamWriter<'_>) -> Result<()> {
        w.write_count(self.len() as u64);
        for item in self {
            item.to_stream(w)?;
        }
        Ok(())
    }
}

impl<T: FromStream + Ord> FromStream for BTreeSet<T> {
    fn from_stream(r: &mut StreamReader<'_>) -> Result<Self> {
        let len = r.read_count()?;
        let mut out = BTreeSet::new();
        for _ in 0..len {
            out.insert(T::from_stream(r)?);
        }
        Ok(out)
    }
}
