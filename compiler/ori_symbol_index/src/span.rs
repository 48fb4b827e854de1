//! Recorded source spans.
//!
//! Unlike the compiler's `start..end` span, a recorded span is stored the way
//! it goes on the wire: a signed 32-bit start and length. Both are
//! non-negative for any span produced by a declaration walk.

use std::fmt;

/// Error when a span component is negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SpanError {
    /// Span start is below zero.
    #[error("span start {0} is negative")]
    NegativeStart(i32),
    /// Span length is below zero.
    #[error("span length {0} is negative")]
    NegativeLength(i32),
}

/// A half-open `(start, length)` range into a source text.
///
/// Layout: 8 bytes total.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct TextSpan {
    start: i32,
    length: i32,
}

impl TextSpan {
    /// Empty span at offset 0.
    pub const EMPTY: TextSpan = TextSpan {
        start: 0,
        length: 0,
    };

    /// Create a new span.
    ///
    /// Callers pass non-negative components; use `try_new` for values read
    /// from untrusted input.
    #[inline]
    pub const fn new(start: i32, length: i32) -> Self {
        debug_assert!(start >= 0 && length >= 0);
        TextSpan { start, length }
    }

    /// Create a span, rejecting negative components.
    #[inline]
    pub const fn try_new(start: i32, length: i32) -> Result<Self, SpanError> {
        if start < 0 {
            return Err(SpanError::NegativeStart(start));
        }
        if length < 0 {
            return Err(SpanError::NegativeLength(length));
        }
        Ok(TextSpan { start, length })
    }

    #[inline]
    pub const fn start(&self) -> i32 {
        self.start
    }

    #[inline]
    pub const fn length(&self) -> i32 {
        self.length
    }

    /// Exclusive end offset.
    ///
    /// Widened to `i64` because `start + length` can exceed `i32::MAX`.
    #[inline]
    pub fn end(&self) -> i64 {
        i64::from(self.start) + i64::from(self.length)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Check if an offset is within this span.
    #[inline]
    pub fn contains(&self, offset: i32) -> bool {
        offset >= self.start && i64::from(offset) < self.end()
    }

    /// Check if another span is fully contained within this span.
    #[inline]
    pub fn contains_span(&self, other: TextSpan) -> bool {
        self.start <= other.start && other.end() <= self.end()
    }

    /// Convert to a byte range.
    #[inline]
    pub fn to_range(&self) -> std::ops::Range<usize> {
        let start = usize::try_from(self.start).unwrap_or(0);
        let length = usize::try_from(self.length).unwrap_or(0);
        start..start.saturating_add(length)
    }
}

impl fmt::Debug for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end())
    }
}

impl fmt::Display for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end())
    }
}
