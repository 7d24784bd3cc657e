//! Shared read cursor with sequential and random access.

use super::bytes::Bytes;
use crate::error::{DecodeError, SeekError};
use crate::varint;
use std::io;

/// Read cursor over a [`Bytes`] value.
///
/// The cursor tracks an absolute position in `[0, len]` and walks the
/// fragment list transparently: reads cross fragment boundaries without
/// the caller noticing. Readers borrow the stream immutably, so any number
/// can be used side by side; a single reader is meant to stay on one
/// thread.
///
/// Reading past the end is not an error — [`read`](Reader::read) returns a
/// short count, eventually zero. Only a bounded frame that announces more
/// bytes than remain is malformed.
///
/// # Examples
///
/// ```
/// use chainbuf::Bytes;
///
/// let b = Bytes::from(vec![0u8, 1, 2, 3, 4]);
/// let mut reader = b.reader();
///
/// let mut out = [0u8; 2];
/// assert_eq!(reader.read(&mut out), 2);
/// assert_eq!(out, [0, 1]);
/// assert_eq!(reader.tell(), 2);
///
/// reader.seek_from_end(-1).unwrap();
/// assert_eq!(reader.read(&mut out), 1);
/// assert_eq!(out[0], 4);
/// ```
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    bytes: &'a Bytes,
    /// Index of the fragment holding the cursor.
    frag: usize,
    /// Offset of the cursor within that fragment.
    offset: usize,
    /// Absolute position in the stream.
    pos: usize,
}

impl<'a> Reader<'a> {
    pub(super) fn new(bytes: &'a Bytes) -> Self {
        Reader {
            bytes,
            frag: 0,
            offset: 0,
            pos: 0,
        }
    }

    /// Returns the current absolute position.
    #[inline]
    #[must_use]
    pub const fn tell(&self) -> usize {
        self.pos
    }

    /// Returns the number of bytes between the cursor and the end.
    #[inline]
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    /// Copy up to `dst.len()` bytes into `dst`, advancing the cursor.
    ///
    /// Returns the number of bytes copied: less than requested when the
    /// stream runs out, zero once the cursor sits at the end. Fragment
    /// boundaries are crossed transparently.
    pub fn read(&mut self, dst: &mut [u8]) -> usize {
        let mut copied = 0;
        while copied < dst.len() {
            let Some(frag) = self.bytes.fragments.get(self.frag) else {
                break;
            };
            let chunk = &frag.as_slice()[self.offset..];
            let n = chunk.len().min(dst.len() - copied);
            dst[copied..copied + n].copy_from_slice(&chunk[..n]);
            copied += n;
            self.offset += n;
            self.pos += n;
            if self.offset == frag.len() {
                self.frag += 1;
                self.offset = 0;
            }
        }
        copied
    }

    /// Reposition the cursor to an absolute offset.
    ///
    /// Targets outside `[0, len]` are rejected with [`SeekError`]; the
    /// cursor is left where it was.
    pub fn seek_from_start(&mut self, offset: usize) -> Result<(), SeekError> {
        self.seek_to(offset as i128)
    }

    /// Move the cursor by `delta` relative to its current position.
    pub fn seek_from_current(&mut self, delta: isize) -> Result<(), SeekError> {
        self.seek_to(self.pos as i128 + delta as i128)
    }

    /// Move the cursor by `delta` relative to the end of the stream.
    ///
    /// `seek_from_end(0)` positions at the end; negative deltas move
    /// backwards, so `seek_from_end(-k)` equals `seek_from_start(len - k)`.
    pub fn seek_from_end(&mut self, delta: isize) -> Result<(), SeekError> {
        self.seek_to(self.bytes.len() as i128 + delta as i128)
    }

    /// Read the next bounded frame: a ULEB128 length prefix followed by
    /// exactly that many payload bytes.
    ///
    /// The payload comes back as a zero-copy sub-stream sharing storage
    /// with this one, and the cursor lands right after the frame, ready
    /// for whatever follows. A prefix announcing more bytes than remain is
    /// a [`DecodeError::FrameUnderflow`].
    ///
    /// # Examples
    ///
    /// ```
    /// use chainbuf::Bytes;
    ///
    /// let mut b = Bytes::new();
    /// let mut writer = b.writer();
    /// writer.append_bounded(String::from("abcd"));
    /// writer.write_all(&[0xff]);
    /// drop(writer);
    ///
    /// let mut reader = b.reader();
    /// let frame = reader.read_bounded().unwrap();
    /// assert_eq!(frame.deserialize::<String>().unwrap(), "abcd");
    /// assert_eq!(reader.remaining(), 1);
    /// ```
    pub fn read_bounded(&mut self) -> Result<Bytes, DecodeError> {
        let declared = varint::decode(self)?;
        let available = self.remaining();
        if (available as u64) < declared {
            return Err(DecodeError::FrameUnderflow {
                declared,
                available: available as u64,
            });
        }
        let frame_len = declared as usize;
        let frame = self.bytes.slice(self.pos..self.pos + frame_len);
        self.set_position(self.pos + frame_len);
        Ok(frame)
    }

    /// Read one byte, or `None` at end of stream.
    pub(crate) fn read_byte(&mut self) -> Option<u8> {
        let mut byte = [0u8; 1];
        (self.read(&mut byte) == 1).then(|| byte[0])
    }

    fn seek_to(&mut self, target: i128) -> Result<(), SeekError> {
        if target < 0 || target > self.bytes.len() as i128 {
            return Err(SeekError {
                target,
                len: self.bytes.len(),
            });
        }
        self.set_position(target as usize);
        Ok(())
    }

    /// Move to an absolute position, re-deriving the fragment cursor.
    ///
    /// Walks the fragment list from the front: O(fragments), no payload
    /// copies.
    fn set_position(&mut self, pos: usize) {
        debug_assert!(pos <= self.bytes.len());
        self.pos = pos;
        self.frag = 0;
        self.offset = 0;
        let mut rest = pos;
        while rest > 0 {
            let frag_len = self.bytes.fragments[self.frag].len();
            if rest < frag_len {
                self.offset = rest;
                break;
            }
            rest -= frag_len;
            self.frag += 1;
        }
    }
}

impl io::Read for Reader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(Reader::read(self, buf))
    }
}

impl io::Seek for Reader<'_> {
    fn seek(&mut self, pos: io::SeekFrom) -> io::Result<u64> {
        let target = match pos {
            io::SeekFrom::Start(offset) => offset as i128,
            io::SeekFrom::Current(delta) => self.pos as i128 + i128::from(delta),
            io::SeekFrom::End(delta) => self.bytes.len() as i128 + i128::from(delta),
        };
        self.seek_to(target)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        Ok(self.pos as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::init_test_logging;

    fn init_test(name: &str) {
        init_test_logging();
        crate::test_phase!(name);
    }

    fn sample() -> Bytes {
        let data: Vec<u8> = (0..10).collect();
        let mut b = Bytes::new();
        let mut writer = b.writer();
        writer.write_all(&data[..5]);
        writer.write_all(&data[5..]);
        b
    }

    #[test]
    fn read_crosses_fragment_boundaries() {
        init_test("read_crosses_fragment_boundaries");
        let b = sample();
        let mut reader = b.reader();

        let mut out = [0u8; 3];
        let n = reader.read(&mut out);
        crate::assert_with_log!(n == 3, "first read", 3, n);
        crate::assert_with_log!(out == [0, 1, 2], "first bytes", [0, 1, 2], out);

        let mut out = [0u8; 10];
        let n = reader.read(&mut out);
        crate::assert_with_log!(n == 7, "second read", 7, n);
        let expected = [3, 4, 5, 6, 7, 8, 9];
        let got = &out[..7];
        crate::assert_with_log!(got == expected, "second bytes", expected, got);

        let n = reader.read(&mut out);
        crate::assert_with_log!(n == 0, "end of stream", 0, n);
        let n = reader.read(&mut out);
        crate::assert_with_log!(n == 0, "end of stream again", 0, n);
        crate::test_complete!("read_crosses_fragment_boundaries");
    }

    #[test]
    fn seek_and_tell() {
        let b = sample();
        let mut reader = b.reader();
        let mut byte = [0u8; 1];

        assert_eq!(reader.tell(), 0);
        reader.read(&mut byte);
        assert_eq!(byte[0], 0);
        assert_eq!(reader.tell(), 1);

        reader.seek_from_current(5).unwrap();
        assert_eq!(reader.tell(), 6);
        reader.read(&mut byte);
        assert_eq!(byte[0], 6);

        reader.seek_from_start(3).unwrap();
        assert_eq!(reader.tell(), 3);
        reader.read(&mut byte);
        assert_eq!(byte[0], 3);

        reader.seek_from_end(-3).unwrap();
        assert_eq!(reader.tell(), 7);
        reader.read(&mut byte);
        assert_eq!(byte[0], 7);

        reader.seek_from_current(-2).unwrap();
        assert_eq!(reader.tell(), 6);
        reader.read(&mut byte);
        assert_eq!(byte[0], 6);
    }

    #[test]
    fn seek_to_both_ends() {
        let b = sample();
        let mut reader = b.reader();

        reader.seek_from_start(10).unwrap();
        assert_eq!(reader.tell(), 10);
        assert_eq!(reader.remaining(), 0);

        reader.seek_from_end(-10).unwrap();
        assert_eq!(reader.tell(), 0);
        assert_eq!(reader.remaining(), 10);
    }

    #[test]
    fn out_of_range_seeks_are_rejected() {
        let b = sample();
        let mut reader = b.reader();
        reader.seek_from_start(4).unwrap();

        assert_eq!(
            reader.seek_from_start(11),
            Err(SeekError { target: 11, len: 10 })
        );
        assert_eq!(
            reader.seek_from_current(-5),
            Err(SeekError { target: -1, len: 10 })
        );
        assert_eq!(
            reader.seek_from_end(1),
            Err(SeekError { target: 11, len: 10 })
        );
        // A failed seek leaves the cursor untouched.
        assert_eq!(reader.tell(), 4);
    }

    #[test]
    fn read_bounded_is_zero_copy_and_positions_after_frame() {
        let mut b = Bytes::new();
        let mut writer = b.writer();
        writer.append_bounded(vec![1u8, 2, 3]);
        writer.write_all(&[0xaa, 0xbb]);
        drop(writer);

        let mut reader = b.reader();
        let frame = reader.read_bounded().unwrap();
        assert_eq!(frame.to_vec(), vec![1, 2, 3]);
        assert_eq!(reader.tell(), 4);

        let mut rest = [0u8; 2];
        assert_eq!(reader.read(&mut rest), 2);
        assert_eq!(rest, [0xaa, 0xbb]);
    }

    #[test]
    fn read_bounded_underflow() {
        // Prefix declares five bytes, only two follow.
        let b = Bytes::from(vec![5u8, 1, 2]);
        let mut reader = b.reader();
        assert_eq!(
            reader.read_bounded(),
            Err(DecodeError::FrameUnderflow {
                declared: 5,
                available: 2
            })
        );
    }

    #[test]
    fn read_bounded_empty_stream() {
        let b = Bytes::new();
        let mut reader = b.reader();
        assert_eq!(reader.read_bounded(), Err(DecodeError::TruncatedPrefix));
    }

    #[test]
    fn io_read_and_seek() {
        use std::io::{Read, Seek, SeekFrom};

        let b = sample();
        let mut reader = b.reader();

        let pos = reader.seek(SeekFrom::End(-2)).unwrap();
        assert_eq!(pos, 8);

        let mut out = Vec::new();
        reader.read_to_end(&mut out).unwrap();
        assert_eq!(out, vec![8, 9]);

        assert!(reader.seek(SeekFrom::Current(5)).is_err());
    }

    #[test]
    fn independent_readers() {
        let b = sample();
        let mut first = b.reader();
        let mut second = b.reader();

        let mut out = [0u8; 4];
        first.read(&mut out);
        assert_eq!(second.tell(), 0);
        second.read(&mut out);
        assert_eq!(out, [0, 1, 2, 3]);
    }
}
