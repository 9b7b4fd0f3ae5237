//! Reading and writing the flat argument buffers exchanged with the host.
//!
//! An argument buffer is not self-describing: each extension function knows
//! its own fixed field sequence and decodes it field by field with a
//! [`FieldCursor`]. The encode side, used by hosts and tests, is
//! [`ArgWriter`]. Both sides use 4-byte integers and floats in host byte
//! order and NUL-terminated strings with no length prefix.

use crate::error::{ArgumentFault, Result};

/// A bounds-checked forward reader over an argument buffer.
///
/// Each `read_*` method consumes one field and advances the cursor by the
/// field's width. Running past the end of the buffer, or scanning for a NUL
/// terminator that is not there, is a recoverable
/// [`MalformedArguments`](crate::error::Error::MalformedArguments) failure,
/// never an out-of-bounds read.
///
/// ```
/// use ext_ray_rs::args::{ArgWriter, FieldCursor};
///
/// let mut args = ArgWriter::new();
/// args.push_i32(640);
/// args.push_cstring("hello");
///
/// let mut cursor = FieldCursor::new(args.as_bytes());
/// assert_eq!(cursor.read_i32().unwrap(), 640);
/// assert_eq!(cursor.read_cstring().unwrap(), "hello");
/// assert_eq!(cursor.remaining(), 0);
/// ```
#[derive(Debug)]
pub struct FieldCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> FieldCursor<'a> {
    /// Creates a cursor at the start of `data`.
    ///
    /// The cursor borrows the buffer; nothing decoded from it may outlive
    /// the invocation that supplied it.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current offset into the buffer.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N]> {
        let remaining = self.remaining();
        if remaining < N {
            return Err(ArgumentFault::Truncated {
                needed: N,
                remaining,
            }
            .into());
        }
        let mut field = [0u8; N];
        field.copy_from_slice(&self.data[self.pos..self.pos + N]);
        self.pos += N;
        Ok(field)
    }

    /// Reads a 4-byte signed integer and advances past it.
    ///
    /// # Errors
    ///
    /// Fewer than 4 bytes remaining.
    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(i32::from_ne_bytes(self.take()?))
    }

    /// Reads a 4-byte IEEE float and advances past it.
    ///
    /// # Errors
    ///
    /// Fewer than 4 bytes remaining.
    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(f32::from_ne_bytes(self.take()?))
    }

    /// Reads a single byte and advances past it.
    ///
    /// # Errors
    ///
    /// No bytes remaining.
    pub fn read_u8(&mut self) -> Result<u8> {
        let [byte] = self.take()?;
        Ok(byte)
    }

    /// Reads a NUL-terminated string field and advances past its
    /// terminator (`text length + 1` bytes).
    ///
    /// # Errors
    ///
    /// No NUL byte before the end of the buffer, or the bytes before it
    /// are not valid UTF-8.
    pub fn read_cstring(&mut self) -> Result<String> {
        let rest = &self.data[self.pos..];
        let nul = rest
            .iter()
            .position(|&b| b == 0)
            .ok_or(ArgumentFault::UnterminatedString)?;
        let text = std::str::from_utf8(&rest[..nul])
            .map_err(|_| ArgumentFault::InvalidStringEncoding)?;
        self.pos += nul + 1;
        Ok(text.to_owned())
    }
}

/// Builds an argument buffer, field by field, in the order the receiving
/// function's schema declares.
///
/// This is the encode side of [`FieldCursor`] and produces byte sequences
/// the cursor round-trips exactly.
#[derive(Debug, Default)]
pub struct ArgWriter {
    buf: Vec<u8>,
}

impl ArgWriter {
    /// Creates an empty writer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a 4-byte signed integer.
    pub fn push_i32(&mut self, value: i32) -> &mut Self {
        self.buf.extend_from_slice(&value.to_ne_bytes());
        self
    }

    /// Appends a 4-byte IEEE float.
    pub fn push_f32(&mut self, value: f32) -> &mut Self {
        self.buf.extend_from_slice(&value.to_ne_bytes());
        self
    }

    /// Appends a string field: its UTF-8 bytes followed by the NUL
    /// terminator the decoder relies on.
    ///
    /// Interior NUL bytes would truncate the field on the other side, so
    /// everything from the first NUL onwards is dropped here.
    pub fn push_cstring(&mut self, text: &str) -> &mut Self {
        let bytes = text.as_bytes();
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        self.buf.extend_from_slice(&bytes[..end]);
        self.buf.push(0);
        self
    }

    /// The encoded buffer.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the writer and returns the encoded buffer.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}
