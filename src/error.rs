//! Error types for decoding and cursor positioning.
//!
//! The failure taxonomy is deliberately small:
//!
//! - Malformed input (a bounded frame declaring more bytes than remain, a
//!   broken length prefix, a payload of the wrong width) surfaces as a
//!   [`DecodeError`]. Decode errors always propagate to the caller; no
//!   operation substitutes a default value for undecodable input.
//! - Seeking a [`Reader`](crate::Reader) outside the readable range is a
//!   caller bug and is rejected with a [`SeekError`].
//! - Reading past the end of a stream is *not* an error: reads return a
//!   short count, eventually zero.
//! - Allocation failure aborts, as everywhere else in Rust; no error value
//!   models it.

use thiserror::Error;

/// Errors produced when decoding values or bounded frames from a
/// [`Bytes`](crate::Bytes) stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A bounded frame declared more payload bytes than remain.
    #[error("bounded frame declares {declared} bytes but only {available} remain")]
    FrameUnderflow {
        /// Payload length announced by the frame's prefix.
        declared: u64,
        /// Bytes actually remaining after the prefix.
        available: u64,
    },

    /// The stream ended in the middle of a length prefix.
    #[error("stream ended inside a length prefix")]
    TruncatedPrefix,

    /// A length prefix did not fit in the 64-bit range.
    #[error("length prefix exceeds the 64-bit range")]
    LengthOverflow,

    /// The payload size does not match the fixed width of the target type.
    #[error("expected {expected} bytes for {type_name}, found {actual}")]
    SizeMismatch {
        /// Width required by the target type.
        expected: usize,
        /// Size of the payload that was offered.
        actual: usize,
        /// Name of the target type, for diagnostics.
        type_name: &'static str,
    },

    /// The payload is not valid UTF-8.
    #[error("payload is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// Bytes were left over after the last expected frame.
    #[error("{remaining} bytes left after the last expected frame")]
    TrailingBytes {
        /// Number of unconsumed bytes.
        remaining: usize,
    },

    /// Free-form failure reported by a custom codec.
    #[error("{0}")]
    Message(String),
}

/// Error returned when a seek targets a position outside `0..=len`.
///
/// Out-of-range seeks are rejected, never clamped; the cursor keeps its
/// previous position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("seek target {target} is outside the readable range 0..={len}")]
pub struct SeekError {
    /// The requested absolute position (may be negative for relative seeks).
    pub target: i128,
    /// Size of the buffer being read.
    pub len: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_display() {
        let err = DecodeError::FrameUnderflow {
            declared: 12,
            available: 3,
        };
        assert_eq!(
            err.to_string(),
            "bounded frame declares 12 bytes but only 3 remain"
        );

        let err = DecodeError::SizeMismatch {
            expected: 4,
            actual: 7,
            type_name: "u32",
        };
        assert_eq!(err.to_string(), "expected 4 bytes for u32, found 7");
    }

    #[test]
    fn seek_error_display() {
        let err = SeekError { target: -2, len: 10 };
        assert_eq!(
            err.to_string(),
            "seek target -2 is outside the readable range 0..=10"
        );
    }
}
