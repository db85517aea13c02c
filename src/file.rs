//! The binary accessor and its cell codecs

use crate::error::Error;
use crate::Result;
use std::io::{self, Read, Seek, SeekFrom, Write};

/// Typed reader/writer over a seekable byte stream.
///
/// `BinaryFile` does not own the underlying resource's lifecycle: pass a
/// `&mut File` (the io traits are implemented for mutable references) to keep
/// ownership at the call site, or move an in-memory `io::Cursor` in.
///
/// All cells are little-endian. Integers are two's-complement signed with a
/// caller-chosen byte width; strings carry a 2-byte unsigned length prefix
/// followed by UTF-8 bytes, no terminator.
#[derive(Debug)]
pub struct BinaryFile<S> {
    stream: S,
}

impl<S> BinaryFile<S> {
    /// Wrap an already-open stream.
    pub fn new(stream: S) -> Self {
        Self { stream }
    }

    pub fn get_ref(&self) -> &S {
        &self.stream
    }

    pub fn get_mut(&mut self) -> &mut S {
        &mut self.stream
    }

    /// Unwrap, returning the underlying stream.
    pub fn into_inner(self) -> S {
        self.stream
    }

    /// Move the cursor to an absolute position.
    ///
    /// Non-negative `pos` counts from the start of the stream, negative `pos`
    /// from the end. No bounds check is made; seeking past end-of-stream is
    /// allowed and surfaces on the next read or write.
    pub fn goto(&mut self, pos: i64) -> Result<()>
    where
        S: Seek,
    {
        if pos >= 0 {
            self.stream.seek(SeekFrom::Start(pos as u64))?;
        } else {
            self.stream.seek(SeekFrom::End(pos))?;
        }
        Ok(())
    }

    /// Total byte length of the stream. The cursor is left where it was.
    pub fn size(&mut self) -> Result<u64>
    where
        S: Seek,
    {
        let saved = self.stream.stream_position()?;
        let end = self.stream.seek(SeekFrom::End(0))?;
        self.stream.seek(SeekFrom::Start(saved))?;
        Ok(end)
    }

    /// Write `n` as a `size`-byte signed little-endian cell at the cursor.
    /// Returns the number of bytes written (always `size`).
    ///
    /// Fails with an encoding error if `n` is not representable in `size`
    /// signed bytes; widths past 8 are sign-extension padding and accept any
    /// `i64`.
    pub fn write_integer(&mut self, n: i64, size: usize) -> Result<usize>
    where
        S: Write,
    {
        let cell = encode_integer(n, size)?;
        self.stream.write_all(&cell)?;
        Ok(size)
    }

    /// Write an integer cell at `pos`, leaving the cursor where it was.
    pub fn write_integer_at(&mut self, n: i64, size: usize, pos: i64) -> Result<usize>
    where
        S: Write + Seek,
    {
        self.with_cursor(pos, |f| f.write_integer(n, size))
    }

    /// Write `s` as a length-prefixed UTF-8 cell at the cursor. Returns the
    /// number of bytes written (`s.len() + 2`).
    ///
    /// Fails with an encoding error if the UTF-8 byte length exceeds 65535,
    /// the most the 2-byte prefix can carry.
    pub fn write_string(&mut self, s: &str) -> Result<usize>
    where
        S: Write,
    {
        let length = s.len();
        if length > u16::MAX as usize {
            return Err(Error::StringTooLong { length });
        }
        // The prefix is unsigned: the full 16-bit range is a valid length.
        self.stream.write_all(&(length as u16).to_le_bytes())?;
        self.stream.write_all(s.as_bytes())?;
        Ok(length + 2)
    }

    /// Write a string cell at `pos`, leaving the cursor where it was.
    pub fn write_string_at(&mut self, s: &str, pos: i64) -> Result<usize>
    where
        S: Write + Seek,
    {
        self.with_cursor(pos, |f| f.write_string(s))
    }

    /// Read a `size`-byte signed little-endian cell at the cursor.
    ///
    /// Fails with a stream error if fewer than `size` bytes remain, and with
    /// an encoding error if a cell wider than 8 bytes holds a value outside
    /// the `i64` range.
    pub fn read_integer(&mut self, size: usize) -> Result<i64>
    where
        S: Read,
    {
        if size == 0 {
            return Err(Error::InvalidWidth);
        }
        let mut cell = vec![0u8; size];
        self.fill_exact(&mut cell)?;
        decode_integer(&cell)
    }

    /// Read an integer cell at `pos`, leaving the cursor where it was.
    pub fn read_integer_at(&mut self, size: usize, pos: i64) -> Result<i64>
    where
        S: Read + Seek,
    {
        self.with_cursor(pos, |f| f.read_integer(size))
    }

    /// Read a length-prefixed UTF-8 cell at the cursor.
    pub fn read_string(&mut self) -> Result<String>
    where
        S: Read,
    {
        let mut prefix = [0u8; 2];
        self.fill_exact(&mut prefix)?;
        let length = u16::from_le_bytes(prefix) as usize;
        let mut data = vec![0u8; length];
        self.fill_exact(&mut data)?;
        Ok(String::from_utf8(data)?)
    }

    /// Read a string cell at `pos`, leaving the cursor where it was.
    pub fn read_string_at(&mut self, pos: i64) -> Result<String>
    where
        S: Read + Seek,
    {
        self.with_cursor(pos, |f| f.read_string())
    }

    /// Save the cursor, run `op` at `pos`, and restore the cursor on every
    /// exit path, success or failure.
    fn with_cursor<T, F>(&mut self, pos: i64, op: F) -> Result<T>
    where
        S: Seek,
        F: FnOnce(&mut Self) -> Result<T>,
    {
        let saved = self.stream.stream_position()?;
        self.goto(pos)?;
        let result = op(self);
        let restored = self.stream.seek(SeekFrom::Start(saved));
        match result {
            Ok(value) => {
                restored?;
                Ok(value)
            }
            // The operation's own error outranks a failed restore.
            Err(err) => Err(err),
        }
    }

    fn fill_exact(&mut self, buf: &mut [u8]) -> Result<()>
    where
        S: Read,
    {
        self.stream.read_exact(buf).map_err(|e| match e.kind() {
            io::ErrorKind::UnexpectedEof => Error::ShortRead { wanted: buf.len() },
            _ => Error::Io(e),
        })
    }
}

fn encode_integer(n: i64, size: usize) -> Result<Vec<u8>> {
    if size == 0 {
        return Err(Error::InvalidWidth);
    }
    if size < 8 {
        let bits = 8 * size as u32 - 1;
        let min = -(1i64 << bits);
        let max = (1i64 << bits) - 1;
        if n < min || n > max {
            return Err(Error::IntegerOverflow { value: n, size });
        }
    }
    let fill = if n < 0 { 0xFF } else { 0x00 };
    let mut cell = vec![fill; size];
    let take = size.min(8);
    cell[..take].copy_from_slice(&n.to_le_bytes()[..take]);
    Ok(cell)
}

fn decode_integer(cell: &[u8]) -> Result<i64> {
    let size = cell.len();
    if size == 0 {
        return Err(Error::InvalidWidth);
    }
    let negative = cell[size - 1] & 0x80 != 0;
    let fill = if negative { 0xFF } else { 0x00 };
    let mut raw = [fill; 8];
    let take = size.min(8);
    raw[..take].copy_from_slice(&cell[..take]);
    if size > 8 {
        // Bytes past the eighth must be sign extension of bit 63.
        let fits = cell[8..].iter().all(|&b| b == fill) && (raw[7] & 0x80 != 0) == negative;
        if !fits {
            return Err(Error::IntegerTooWide { size });
        }
    }
    Ok(i64::from_le_bytes(raw))
}
