//! Symbol Batches
//!
//! Records carry no framing of their own. A batch supplies it: a magic tag,
//! a format version, and the record count, followed by the records.
//!
//! ```text
//! [4 bytes "OSYM"][u16 version][u32 count][record]*count
//! ```
//!
//! # Corrupt Records
//!
//! A bad header makes the whole batch unusable and is an error. A bad record
//! is not: it is replaced by `DeclaredSymbolRecord::default()`, logged, and
//! counted in `BatchLoad::corrupt`, and loading carries on with the next
//! record. The declared count is always honoured, so a good record keeps its
//! position in the batch.

use crate::record::DeclaredSymbolRecord;
use crate::wire::{
    BinaryReader, BinaryWriter, DecodeError, ObjectRead, ObjectWrite, ReaderLimits,
};

/// Tag at the start of every batch.
pub const MAGIC: [u8; 4] = *b"OSYM";

/// Version of the batch and record layout.
///
/// Bump when the record field order, a field width, or a
/// `DeclaredSymbolKind` byte changes.
pub const FORMAT_VERSION: u16 = 1;

/// Upper bound on up-front allocation from a declared count.
const PREALLOC_LIMIT: usize = 4096;

/// Error reading or writing a batch as a whole.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    /// The underlying stream failed while writing.
    #[error("failed to write symbol batch: {0}")]
    Io(#[from] std::io::Error),
    /// The header could not be read.
    #[error("failed to read symbol batch header: {0}")]
    Header(#[from] DecodeError),
    /// The stream does not start with `MAGIC`.
    #[error("not a symbol batch (found magic {found:02x?})")]
    BadMagic { found: [u8; 4] },
    /// Written by an incompatible version.
    #[error(
        "unsupported symbol batch version {found} (expected {expected})",
        expected = FORMAT_VERSION
    )]
    UnsupportedVersion { found: u16 },
    /// More records than a `u32` count can describe.
    #[error("batch of {0} records is too large")]
    TooManyRecords(usize),
}

/// Result of loading a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchLoad {
    /// Every record, with placeholders where decoding failed.
    pub records: Vec<DeclaredSymbolRecord>,
    /// How many of `records` are placeholders.
    pub corrupt: usize,
}

impl BatchLoad {
    /// True if every record decoded.
    pub fn is_clean(&self) -> bool {
        self.corrupt == 0
    }
}

/// Write a framed batch.
#[tracing::instrument(level = "debug", skip_all, fields(count = records.len()))]
pub fn write_batch<W: ObjectWrite + ?Sized>(
    records: &[DeclaredSymbolRecord],
    writer: &mut W,
) -> Result<(), BatchError> {
    let count =
        u32::try_from(records.len()).map_err(|_| BatchError::TooManyRecords(records.len()))?;

    for byte in MAGIC {
        writer.write_byte(byte)?;
    }
    writer.write_u16(FORMAT_VERSION)?;
    writer.write_u32(count)?;

    for record in records {
        record.write_to(writer)?;
    }
    Ok(())
}

/// Read a framed batch, substituting placeholders for corrupt records.
#[tracing::instrument(level = "debug", skip_all)]
pub fn read_batch<R: ObjectRead + ?Sized>(reader: &mut R) -> Result<BatchLoad, BatchError> {
    let count = read_header(reader)?;

    let capacity = usize::try_from(count).map_or(PREALLOC_LIMIT, |n| n.min(PREALLOC_LIMIT));
    let mut load = BatchLoad {
        records: Vec::with_capacity(capacity),
        corrupt: 0,
    };
    for index in 0..count {
        match DeclaredSymbolRecord::try_read_from(reader) {
            Ok(record) => load.records.push(record),
            Err(error) => {
                tracing::warn!(index, %error, "corrupt symbol record, using placeholder");
                load.corrupt += 1;
                load.records.push(DeclaredSymbolRecord::default());
            }
        }
    }

    tracing::debug!(count, corrupt = load.corrupt, "loaded symbol batch");
    Ok(load)
}

fn read_header<R: ObjectRead + ?Sized>(reader: &mut R) -> Result<u32, BatchError> {
    let mut found = [0u8; 4];
    for byte in &mut found {
        *byte = reader.read_byte()?;
    }
    if found != MAGIC {
        return Err(BatchError::BadMagic { found });
    }

    let version = reader.read_u16()?;
    if version != FORMAT_VERSION {
        return Err(BatchError::UnsupportedVersion { found: version });
    }

    Ok(reader.read_u32()?)
}

/// Encode a batch into a byte buffer.
pub fn encode_batch(records: &[DeclaredSymbolRecord]) -> Result<Vec<u8>, BatchError> {
    let mut writer = BinaryWriter::new(Vec::new());
    write_batch(records, &mut writer)?;
    Ok(writer.into_inner())
}

/// Decode a batch from a byte buffer.
pub fn decode_batch(bytes: &[u8], limits: ReaderLimits) -> Result<BatchLoad, BatchError> {
    read_batch(&mut BinaryReader::with_limits(bytes, limits))
}
