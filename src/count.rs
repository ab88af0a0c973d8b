//! Variable-length encoding for counts, tags, and presence flags.
//!
//! The first byte's top two bits select the total width (`00` = 1 byte,
//! `01` = 3, `10` = 5, `11` = 9). A one-byte count carries the value in the
//! low six bits of that same byte; wider counts carry it little-endian in
//! the trailing bytes. The encoder always picks the smallest width that
//! fits, so the first byte alone determines how many bytes to consume.

use crate::{Result, StreamError};

/// Largest encodable count.
pub const MAX: u64 = u64::MAX;

const WIDTH_2: u8 = 0b01 << 6;
const WIDTH_4: u8 = 0b10 << 6;
const WIDTH_8: u8 = 0b11 << 6;

/// Bytes [`encode`] will use for `n`.
#[inline]
#[must_use]
pub const fn encoded_size(n: u64) -> usize {
    if n < 1 << 6 {
        1
    } else if n < 1 << 16 {
        3
    } else if n < 1 << 32 {
        5
    } else {
        9
    }
}

/// Total encoded length, determined from the first byte alone.
#[inline]
#[must_use]
pub const fn required_bytes(first: u8) -> usize {
    match first >> 6 {
        0 => 1,
        1 => 3,
        2 => 5,
        _ => 9,
    }
}

/// Encode `n` into the front of `buf`, returning the bytes used.
pub fn encode(n: u64, buf: &mut [u8; 9]) -> usize {
    if n < 1 << 6 {
        buf[0] = n as u8;
        1
    } else if n < 1 << 16 {
        buf[0] = WIDTH_2;
        buf[1..3].copy_from_slice(&(n as u16).to_le_bytes());
        3
    } else if n < 1 << 32 {
        buf[0] = WIDTH_4;
        buf[1..5].copy_from_slice(&(n as u32).to_le_bytes());
        5
    } else {
        buf[0] = WIDTH_8;
        buf[1..9].copy_from_slice(&n.to_le_bytes());
        9
    }
}

/// Decode a count from the front of `bytes`, returning it and the bytes
/// consumed. Fails with [`StreamError::Truncated`] when fewer bytes remain
/// than the first byte announces.
pub fn decode(bytes: &[u8]) -> Result<(u64, usize)> {
    let first = *bytes.first().ok_or(StreamError::Truncated {
        needed: 1,
        available: 0,
    })?;
    let len = required_bytes(first);
    if bytes.len() < len {
        return Err(StreamError::Truncated {
            needed: len,
            available: bytes.len(),
        });
    }

    let n = match len {
        1 => u64::from(first & 0x3F),
        3 => u64::from(u16::from_le_bytes([bytes[1], bytes[2]])),
        5 => u64::from(u32::from_le_bytes([bytes[1], bytes[2], bytes[3], bytes[4]])),
        _ => {
            // The length check above guarantees 9 bytes, so this slice is
            // exactly 8 bytes and try_into() cannot fail.
            let Ok(tail) = bytes[1..9].try_into() else {
                unreachable!()
            };
            u64::from_le_bytes(tail)
        }
    };
    Ok((n, len))
}
