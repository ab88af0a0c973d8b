//! Wide strings and their UTF-8 wire form.

use alloc::string::String;
use alloc::vec::Vec;

use crate::{count, FromStream, Result, StreamError, StreamReader, StreamWriter, ToStream};

/// A UTF-16 string, transcoded to UTF-8 on the wire.
///
/// The on-wire count is the UTF-8 byte length, so the encoded form is
/// identical to the same text written as a [`String`]. Unpaired
/// surrogates fail the write with
/// [`Transcode`](crate::StreamError::Transcode); invalid UTF-8 fails the
/// read the same way.
///
/// # Example
///
/// ```
/// use streamcast::WideString;
///
/// let wide = WideString::from("déjà vu");
/// assert_eq!(wide.to_utf8().unwrap(), "déjà vu");
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct WideString(Vec<u16>);

impl WideString {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap raw UTF-16 code units, unvalidated.
    #[must_use]
    pub fn from_units(units: Vec<u16>) -> Self {
        Self(units)
    }

    #[must_use]
    pub fn as_units(&self) -> &[u16] {
        &self.0
    }

    #[must_use]
    pub fn into_units(self) -> Vec<u16> {
        self.0
    }

    /// Length in UTF-16 code units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Transcode to UTF-8.
    pub fn to_utf8(&self) -> Result<String> {
        core::char::decode_utf16(self.0.iter().copied())
            .collect::<core::result::Result<String, _>>()
            .map_err(|_| StreamError::Transcode {
                message: "unpaired surrogate in wide string",
            })
    }

    /// UTF-8 byte length of the transcoded form.
    pub fn utf8_len(&self) -> Result<usize> {
        let mut len = 0;
        for unit in core::char::decode_utf16(self.0.iter().copied()) {
            match unit {
                Ok(c) => len += c.len_utf8(),
                Err(_) => {
                    return Err(StreamError::Transcode {
                        message: "unpaired surrogate in wide string",
                    })
                }
            }
        }
        Ok(len)
    }
}

impl From<&str> for WideString {
    fn from(text: &str) -> Self {
        Self(text.encode_utf16().collect())
    }
}

impl ToStream for WideString {
    const RANK: usize = 1;

    fn parse_size(&self) -> usize {
        // An unpaired surrogate fails the write before any bytes are
        // emitted, so the failing case never reaches the stream.
        let len = self.utf8_len().unwrap_or(0);
        count::encoded_size(len as u64) + len
    }

    fn to_stream(&self, w: &mut StreamWriter<'_>) -> Result<()> {
        let utf8 = self.to_utf8()?;
        w.write_count(utf8.len() as u64).write_bytes(utf8.as_bytes());
        Ok(())
    }
}

impl FromStream for WideString {
    fn from_stream(r: &mut StreamReader<'_>) -> Result<Self> {
        let len = r.read_count()? as usize;
        let view = r.read_view(len)?;
        let text = core::str::from_utf8(view).map_err(|_| StreamError::Transcode {
            message: "invalid UTF-8",
        })?;
        Ok(Self(text.encode_utf16().collect()))
    }
}
