//! Impls that need the standard library: filesystem paths and the hashed
//! containers.

extern crate std;

use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::path::{Path, PathBuf};

use alloc::string::String;

use crate::{count, FromStream, Result, StreamError, StreamReader, StreamWriter, ToStream};

// A path travels as its native string, which on the wire is the same
// UTF-8 form a String uses. Non-UTF-8 paths are refused rather than
// written lossily.

impl ToStream for Path {
    const RANK: usize = 1;

    fn parse_size(&self) -> usize {
        let len = self.to_str().map_or(0, str::len);
        count::encoded_size(len as u64) + len
    }

    fn to_stream(&self, w: &mut StreamWriter<'_>) -> Result<()> {
        let text = self.to_str().ok_or(StreamError::Transcode {
            message: "path is not valid UTF-8",
        })?;
        text.to_stream(w)
    }
}

impl ToStream for PathBuf {
    const RANK: usize = 1;

    fn parse_size(&self) -> usize {
        self.as_path().parse_size()
    }

    fn to_stream(&self, w: &mut StreamWriter<'_>) -> Result<()> {
        self.as_path().to_stream(w)
    }
}

impl FromStream for PathBuf {
    fn from_stream(r: &mut StreamReader<'_>) -> Result<Self> {
        Ok(PathBuf::from(String::from_stream(r)?))
    }
}

impl<K: ToStream, V: ToStream> ToStream for HashMap<K, V> {
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

impl<K: FromStream + Eq + Hash, V: FromStream> FromStream for HashMap<K, V> {
    fn from_stream(r: &mut StreamReader<'_>) -> Result<Self> {
        let len = r.read_count()?;
        let mut out = HashMap::with_capacity(r.reserve_hint(len));
        for _ in 0..len {
            let key = K::from_stream(r)?;
            let value = V::from_stream(r)?;
            out.insert(key, value);
        }
        Ok(out)
    }
}

impl<T: ToStream> ToStream for HashSet<T> {
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

impl<T: FromStream + Eq + Hash> FromStream for HashSet<T> {
    fn from_stream(r: &mut StreamReader<'_>) -> Result<Self> {
        let len = r.read_count()?;
        let mut out = HashSet::with_capacity(r.reserve_hint(len));
        for _ in 0..len {
            out.insert(T::from_stream(r)?);
        }
        Ok(out)
    }
}
