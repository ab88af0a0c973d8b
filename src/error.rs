use core::fmt;

/// Errors surfaced by encoding and decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamError {
    /// A read requested more bytes than the stream holds.
    Truncated { needed: usize, available: usize },
    /// An optional, variant, or factory discriminant was out of range.
    InvalidTag { tag: u64, limit: u64 },
    /// A text payload failed UTF-8 or UTF-16 transcoding.
    Transcode { message: &'static str },
    /// A polymorphic factory could not produce an instance.
    DowncastFailed,
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated { needed, available } => {
                write!(
                    f,
                    "truncated stream: needed {needed} bytes, only {available} available"
                )
            }
            Self::InvalidTag { tag, limit } => {
                write!(f, "invalid tag {tag}: expected a value below {limit}")
            }
            Self::Transcode { message } => write!(f, "transcode failed: {message}"),
            Self::DowncastFailed => write!(f, "factory returned no derived instance"),
        }
    }
}

// Rust 1.81+
impl core::error::Error for StreamError {}

pub type Result<T> = core::result::Result<T, StreamError>;
