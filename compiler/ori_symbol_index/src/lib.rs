//! Ori Symbol Index - Persisted Declared-Symbol Records
//!
//! This crate holds the compact record the tooling keeps for every declared
//! symbol (name, container, kind, span, arity) and the binary format used to
//! persist those records in an index:
//! - `DeclaredSymbolRecord` and its fixed-order encode/decode
//! - `ObjectWrite`/`ObjectRead` primitive streams over `std::io`
//! - Batch framing with per-record corruption recovery
//! - Async resolution of a record back into a live symbol
//!
//! # Wire Format
//!
//! Each record is written without a header, field by field:
//!
//! ```text
//! [u32 len][name][u32 len][container][u8 kind][i32 start][i32 length][u16 params][u16 type params]
//! ```
//!
//! Integers are little-endian. The kind byte is the pinned discriminant of
//! `DeclaredSymbolKind`; reordering variants must never change it.
//!
//! # Debugging
//!
//! Enable tracing with environment variables:
//! - `RUST_LOG=ori_symbol_index=debug` - batch loads and symbol resolution
//! - `RUST_LOG=ori_symbol_index=warn` - only swallowed decode failures

pub mod batch;
pub mod cancel;
mod kind;
mod record;
pub mod resolve;
mod span;
pub mod tracing_setup;
pub mod wire;

pub use batch::{
    decode_batch, encode_batch, read_batch, write_batch, BatchError, BatchLoad, FORMAT_VERSION,
};
pub use cancel::CancellationToken;
pub use kind::{DeclaredSymbolKind, InvalidKind};
pub use record::DeclaredSymbolRecord;
pub use resolve::{resolve_symbol, ResolveError, SemanticModel, SymbolDocument, SyntaxRoot};
pub use span::{SpanError, TextSpan};
pub use wire::{BinaryReader, BinaryWriter, DecodeError, ObjectRead, ObjectWrite, ReaderLimits};
