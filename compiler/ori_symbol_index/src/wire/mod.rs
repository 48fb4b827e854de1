//! Primitive Object Streams
//!
//! The symbol index is written as a flat sequence of primitives. `ObjectWrite`
//! and `ObjectRead` are the seams records are encoded through; `BinaryWriter`
//! and `BinaryReader` implement them over any `std::io` stream.
//!
//! # Encoding
//!
//! | Primitive | Bytes |
//! |-----------|-------|
//! | string    | `u32` byte length, then UTF-8 bytes |
//! | byte      | 1 |
//! | `i32`     | 4, little-endian |
//! | `u16`     | 2, little-endian |
//! | `u32`     | 4, little-endian |

use std::io::{self, Read, Write};

use crate::kind::InvalidKind;
use crate::span::SpanError;

/// Default cap on a single string's byte length (1 MiB).
pub const DEFAULT_MAX_STRING_LEN: u32 = 1 << 20;

/// Bounds applied while decoding.
///
/// A corrupted length prefix must not turn into a multi-gigabyte allocation,
/// so every string read is checked against `max_string_len` first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderLimits {
    /// Largest accepted string, in bytes.
    pub max_string_len: u32,
}

impl Default for ReaderLimits {
    fn default() -> Self {
        Self {
            max_string_len: DEFAULT_MAX_STRING_LEN,
        }
    }
}

impl ReaderLimits {
    /// Set the maximum string length.
    #[must_use]
    pub fn with_max_string_len(mut self, len: u32) -> Self {
        self.max_string_len = len;
        self
    }
}

/// Failure while reading primitives or reconstructing a record.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// Truncated or failing stream.
    #[error("failed to read symbol data: {0}")]
    Io(#[from] io::Error),
    /// Kind byte outside the known range.
    #[error(transparent)]
    InvalidKind(#[from] InvalidKind),
    /// String bytes are not UTF-8.
    #[error("symbol string is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
    /// Length prefix above `ReaderLimits::max_string_len`.
    #[error("string length {len} exceeds limit of {max} bytes")]
    StringTooLong { len: u32, max: u32 },
    /// Negative span start or length.
    #[error(transparent)]
    InvalidSpan(#[from] SpanError),
}

impl DecodeError {
    /// True if the offending field was read in full, leaving the stream at
    /// the start of the next field.
    pub fn keeps_alignment(&self) -> bool {
        matches!(
            self,
            DecodeError::InvalidKind(_) | DecodeError::InvalidUtf8(_) | DecodeError::InvalidSpan(_)
        )
    }
}

/// Sink for the primitives a record is made of.
///
/// Errors from the underlying stream are returned unchanged.
pub trait ObjectWrite {
    fn write_string(&mut self, value: &str) -> io::Result<()>;
    fn write_byte(&mut self, value: u8) -> io::Result<()>;
    fn write_i32(&mut self, value: i32) -> io::Result<()>;
    fn write_u16(&mut self, value: u16) -> io::Result<()>;
    fn write_u32(&mut self, value: u32) -> io::Result<()>;
}

/// Source of primitives, the inverse of `ObjectWrite`.
pub trait ObjectRead {
    fn read_string(&mut self) -> Result<String, DecodeError>;
    fn read_byte(&mut self) -> Result<u8, DecodeError>;
    fn read_i32(&mut self) -> Result<i32, DecodeError>;
    fn read_u16(&mut self) -> Result<u16, DecodeError>;
    fn read_u32(&mut self) -> Result<u32, DecodeError>;
}

/// `ObjectWrite` over a byte stream.
#[derive(Debug)]
pub struct BinaryWriter<W> {
    inner: W,
}

impl<W: Write> BinaryWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Flush the underlying stream.
    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> ObjectWrite for BinaryWriter<W> {
    fn write_string(&mut self, value: &str) -> io::Result<()> {
        let len = u32::try_from(value.len()).map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("string of {} bytes does not fit a u32 length", value.len()),
            )
        })?;
        self.write_u32(len)?;
        self.inner.write_all(value.as_bytes())
    }

    fn write_byte(&mut self, value: u8) -> io::Result<()> {
        self.inner.write_all(&[value])
    }

    fn write_i32(&mut self, value: i32) -> io::Result<()> {
        self.inner.write_all(&value.to_le_bytes())
    }

    fn write_u16(&mut self, value: u16) -> io::Result<()> {
        self.inner.write_all(&value.to_le_bytes())
    }

    fn write_u32(&mut self, value: u32) -> io::Result<()> {
        self.inner.write_all(&value.to_le_bytes())
    }
}

/// `ObjectRead` over a byte stream.
#[derive(Debug)]
pub struct BinaryReader<R> {
    inner: R,
    limits: ReaderLimits,
}

impl<R: Read> BinaryReader<R> {
    pub fn new(inner: R) -> Self {
        Self::with_limits(inner, ReaderLimits::default())
    }

    pub fn with_limits(inner: R, limits: ReaderLimits) -> Self {
        Self { inner, limits }
    }

    pub fn limits(&self) -> ReaderLimits {
        self.limits
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut buf = [0u8; N];
        self.inner.read_exact(&mut buf)?;
        Ok(buf)
    }
}

impl<R: Read> ObjectRead for BinaryReader<R> {
    fn read_string(&mut self) -> Result<String, DecodeError> {
        let len = self.read_u32()?;
        let max = self.limits.max_string_len;
        if len > max {
            return Err(DecodeError::StringTooLong { len, max });
        }

        // `take` keeps a lying prefix from reading past the string; the
        // buffer only grows as bytes actually arrive.
        let mut bytes = Vec::new();
        let read = (&mut self.inner)
            .take(u64::from(len))
            .read_to_end(&mut bytes)?;
        if read != len as usize {
            return Err(DecodeError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("string truncated: expected {len} bytes, got {read}"),
            )));
        }

        Ok(String::from_utf8(bytes)?)
    }

    fn read_byte(&mut self) -> Result<u8, DecodeError> {
        let [byte] = self.read_array::<1>()?;
        Ok(byte)
    }

    fn read_i32(&mut self) -> Result<i32, DecodeError> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }

    fn read_u16(&mut self) -> Result<u16, DecodeError> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    fn read_u32(&mut self) -> Result<u32, DecodeError> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }
}

#[cfg(test)]
mod tests;
