//! Unsigned LEB128 length prefixes for bounded frames.
//!
//! A bounded frame is `[uleb128 length][length bytes of payload]`. The
//! length is encoded least-significant group first, seven data bits per
//! byte, continuation bit `0x80`, using the minimal number of bytes. A
//! `u64` never needs more than ten bytes.

use crate::bytes::Reader;
use crate::error::DecodeError;

/// Maximum encoded size of a `u64` length prefix.
pub(crate) const MAX_LEN: usize = 10;

/// Encode `value` into `buf`, returning the number of bytes written.
///
/// The encoding is always minimal: no padding continuation bytes.
pub(crate) fn encode(mut value: u64, buf: &mut [u8; MAX_LEN]) -> usize {
    let mut written = 0;
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            buf[written] = byte;
            return written + 1;
        }
        buf[written] = byte | 0x80;
        written += 1;
    }
}

/// Decode a length prefix from `reader`, advancing it past the prefix.
///
/// Fails with [`DecodeError::TruncatedPrefix`] if the stream ends before
/// the terminating byte, and [`DecodeError::LengthOverflow`] if the value
/// does not fit in 64 bits.
pub(crate) fn decode(reader: &mut Reader<'_>) -> Result<u64, DecodeError> {
    let mut value: u64 = 0;
    let mut shift: u32 = 0;
    loop {
        let Some(byte) = reader.read_byte() else {
            return Err(DecodeError::TruncatedPrefix);
        };
        let group = u64::from(byte & 0x7f);
        if shift >= 64 || (shift == 63 && group > 1) {
            return Err(DecodeError::LengthOverflow);
        }
        value |= group << shift;
        if byte & 0x80 == 0 {
            return Ok(value);
        }
        shift += 7;
    }
}
