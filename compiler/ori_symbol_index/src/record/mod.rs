//! Declared Symbol Records
//!
//! One record per declaration found while indexing a source file. Records
//! are plain immutable values: they hold no reference into the document they
//! came from, and a "changed" record is always a new value.
//!
//! # Field Order
//!
//! `write_to` and `try_read_from` agree on this order, which is the wire
//! format:
//!
//! 1. name (string)
//! 2. container (string)
//! 3. kind (byte)
//! 4. span start (`i32`)
//! 5. span length (`i32`)
//! 6. parameter count (`u16`)
//! 7. type parameter count (`u16`)

use std::fmt;
use std::io;

use crate::cancel::CancellationToken;
use crate::kind::DeclaredSymbolKind;
use crate::resolve::{self, ResolveError, SemanticModel, SymbolDocument};
use crate::span::TextSpan;
use crate::wire::{DecodeError, ObjectRead, ObjectWrite};

/// A persisted declared symbol.
///
/// `Default` is the zero-valued record: empty name and container, `Class`,
/// an empty span at offset 0, and no parameters. Decoding falls back to it
/// when a record is unreadable.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct DeclaredSymbolRecord {
    name: String,
    container: String,
    kind: DeclaredSymbolKind,
    span: TextSpan,
    parameter_count: u16,
    type_parameter_count: u16,
}

impl DeclaredSymbolRecord {
    /// Create a record with no parameters or type parameters.
    pub fn new(
        name: impl Into<String>,
        container: impl Into<String>,
        kind: DeclaredSymbolKind,
        span: TextSpan,
    ) -> Self {
        DeclaredSymbolRecord {
            name: name.into(),
            container: container.into(),
            kind,
            span,
            parameter_count: 0,
            type_parameter_count: 0,
        }
    }

    /// Same record with a different parameter count.
    #[must_use]
    pub fn with_parameter_count(mut self, count: u16) -> Self {
        self.parameter_count = count;
        self
    }

    /// Same record with a different type parameter count.
    #[must_use]
    pub fn with_type_parameter_count(mut self, count: u16) -> Self {
        self.type_parameter_count = count;
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Qualified name of the enclosing scope.
    #[inline]
    pub fn container(&self) -> &str {
        &self.container
    }

    #[inline]
    pub fn kind(&self) -> DeclaredSymbolKind {
        self.kind
    }

    #[inline]
    pub fn span(&self) -> TextSpan {
        self.span
    }

    #[inline]
    pub fn parameter_count(&self) -> u16 {
        self.parameter_count
    }

    #[inline]
    pub fn type_parameter_count(&self) -> u16 {
        self.type_parameter_count
    }

    /// Encode this record.
    ///
    /// Writer errors are returned as-is.
    pub fn write_to<W: ObjectWrite + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_string(&self.name)?;
        writer.write_string(&self.container)?;
        writer.write_byte(self.kind.as_byte())?;
        writer.write_i32(self.span.start())?;
        writer.write_i32(self.span.length())?;
        writer.write_u16(self.parameter_count)?;
        writer.write_u16(self.type_parameter_count)
    }

    /// Decode a record, reporting the first failure.
    ///
    /// All seven fields are consumed before any of them is validated, so a
    /// record rejected for its content still leaves the reader at the start
    /// of the next one. Only stream failures and oversized strings stop early.
    pub fn try_read_from<R: ObjectRead + ?Sized>(reader: &mut R) -> Result<Self, DecodeError> {
        let name = deferred(reader.read_string())?;
        let container = deferred(reader.read_string())?;
        let kind_byte = reader.read_byte()?;
        let span_start = reader.read_i32()?;
        let span_length = reader.read_i32()?;
        let parameter_count = reader.read_u16()?;
        let type_parameter_count = reader.read_u16()?;

        let name = name?;
        let container = container?;
        let kind = DeclaredSymbolKind::try_from(kind_byte)?;
        let span = TextSpan::try_new(span_start, span_length)?;
        Ok(DeclaredSymbolRecord::new(name, container, kind, span)
            .with_parameter_count(parameter_count)
            .with_type_parameter_count(type_parameter_count))
    }

    /// Decode a record, substituting the default record on failure.
    ///
    /// An unreadable record must not abort loading the rest of an index, so
    /// the error is logged and dropped. Callers that need to tell an empty
    /// record from a failed one use `try_read_from`.
    pub fn read_from<R: ObjectRead + ?Sized>(reader: &mut R) -> Self {
        Self::try_read_from(reader).unwrap_or_else(|error| {
            tracing::warn!(%error, "unreadable declared symbol record, using placeholder");
            DeclaredSymbolRecord::default()
        })
    }

    /// Map this record back to a live symbol in `document`.
    ///
    /// See [`resolve::resolve_symbol`].
    pub async fn resolve_symbol<D: SymbolDocument>(
        &self,
        document: &D,
        cancel: &CancellationToken,
    ) -> Result<Option<<D::Model as SemanticModel>::Symbol>, ResolveError<D::Error>> {
        resolve::resolve_symbol(self.span, document, cancel).await
    }
}

/// Hold back a field error that left the stream aligned; return the rest.
fn deferred<T>(result: Result<T, DecodeError>) -> Result<Result<T, DecodeError>, DecodeError> {
    match result {
        Err(error) if !error.keeps_alignment() => Err(error),
        field => Ok(field),
    }
}

impl fmt::Display for DeclaredSymbolRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.kind)?;
        if !self.container.is_empty() {
            write!(f, "{}.", self.container)?;
        }
        f.write_str(&self.name)?;
        if self.type_parameter_count > 0 {
            write!(f, "<{}>", self.type_parameter_count)?;
        }
        if self.parameter_count > 0 {
            write!(f, "({})", self.parameter_count)?;
        }
        write!(f, " @ {}", self.span)
    }
}
