use super::*;
use pretty_assertions::assert_eq;

fn written(f: impl FnOnce(&mut BinaryWriter<Vec<u8>>) -> io::Result<()>) -> Vec<u8> {
    let mut writer = BinaryWriter::new(Vec::new());
    f(&mut writer).unwrap_or_else(|e| panic!("write failed: {e}"));
    writer.into_inner()
}

#[test]
fn test_primitives_are_little_endian() {
    let bytes = written(|w| {
        w.write_byte(0xAB)?;
        w.write_i32(-2)?;
        w.write_u16(0x0102)?;
        w.write_u32(0x0A0B_0C0D)
    });
    assert_eq!(
        bytes,
        vec![0xAB, 0xFE, 0xFF, 0xFF, 0xFF, 0x02, 0x01, 0x0D, 0x0C, 0x0B, 0x0A]
    );
}

#[test]
fn test_string_is_length_prefixed() {
    let bytes = written(|w| w.write_string("héllo"));
    // "héllo" is 6 UTF-8 bytes
    assert_eq!(&bytes[..4], &[6, 0, 0, 0]);
    assert_eq!(&bytes[4..], "héllo".as_bytes());
}

#[test]
fn test_empty_string() {
    let bytes = written(|w| w.write_string(""));
    assert_eq!(bytes, vec![0, 0, 0, 0]);

    let mut reader = BinaryReader::new(bytes.as_slice());
    let s = reader
        .read_string()
        .unwrap_or_else(|e| panic!("read failed: {e}"));
    assert_eq!(s, "");
}

#[test]
fn test_reader_inverts_writer() {
    let bytes = written(|w| {
        w.write_string("Foo")?;
        w.write_byte(7)?;
        w.write_i32(i32::MIN)?;
        w.write_u16(u16::MAX)?;
        w.write_u32(u32::MAX)
    });

    let mut reader = BinaryReader::new(bytes.as_slice());
    let mut read_all = || -> Result<_, DecodeError> {
        Ok((
            reader.read_string()?,
            reader.read_byte()?,
            reader.read_i32()?,
            reader.read_u16()?,
            reader.read_u32()?,
        ))
    };
    let values = read_all().unwrap_or_else(|e| panic!("read failed: {e}"));
    assert_eq!(
        values,
        ("Foo".to_string(), 7, i32::MIN, u16::MAX, u32::MAX)
    );
}

#[test]
fn test_truncated_primitive_is_io_error() {
    let mut reader = BinaryReader::new([1u8, 2].as_slice());
    let err = reader.read_i32().err();
    assert!(matches!(err, Some(DecodeError::Io(ref e)) if e.kind() == io::ErrorKind::UnexpectedEof));
}

#[test]
fn test_truncated_string_body() {
    // Prefix claims 10 bytes, only 3 follow
    let bytes = [10u8, 0, 0, 0, b'a', b'b', b'c'];
    let mut reader = BinaryReader::new(bytes.as_slice());
    let err = reader.read_string().err();
    assert!(matches!(err, Some(DecodeError::Io(ref e)) if e.kind() == io::ErrorKind::UnexpectedEof));
}

#[test]
fn test_string_over_limit_is_rejected_before_reading() {
    let bytes = written(|w| w.write_string("abcdef"));
    let limits = ReaderLimits::default().with_max_string_len(4);
    let mut reader = BinaryReader::with_limits(bytes.as_slice(), limits);
    let err = reader.read_string().err();
    assert!(matches!(
        err,
        Some(DecodeError::StringTooLong { len: 6, max: 4 })
    ));
}

#[test]
fn test_huge_length_prefix_does_not_allocate() {
    let bytes = [0xFFu8, 0xFF, 0xFF, 0x7F];
    let limits = ReaderLimits::default().with_max_string_len(u32::MAX);
    let mut reader = BinaryReader::with_limits(bytes.as_slice(), limits);
    assert!(matches!(reader.read_string(), Err(DecodeError::Io(_))));
}

#[test]
fn test_invalid_utf8() {
    let bytes = [2u8, 0, 0, 0, 0xC3, 0x28];
    let mut reader = BinaryReader::new(bytes.as_slice());
    assert!(matches!(
        reader.read_string(),
        Err(DecodeError::InvalidUtf8(_))
    ));
}

#[test]
fn test_invalid_utf8_consumes_string_body() {
    let bytes = [2u8, 0, 0, 0, 0xC3, 0x28, 7];
    let mut reader = BinaryReader::new(bytes.as_slice());
    let err = reader.read_string().err();
    assert!(err.as_ref().is_some_and(DecodeError::keeps_alignment));
    assert_eq!(reader.read_byte().ok(), Some(7));
}

#[test]
fn test_stream_errors_break_alignment() {
    let truncated = DecodeError::Io(io::Error::from(io::ErrorKind::UnexpectedEof));
    assert!(!truncated.keeps_alignment());
    assert!(!DecodeError::StringTooLong { len: 9, max: 4 }.keeps_alignment());
    assert!(DecodeError::InvalidKind(crate::InvalidKind(99)).keeps_alignment());
}

#[test]
fn test_default_limits() {
    assert_eq!(
        BinaryReader::new([0u8; 0].as_slice()).limits().max_string_len,
        DEFAULT_MAX_STRING_LEN
    );
}

struct FailingSink;

impl Write for FailingSink {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_writer_error_propagates_unchanged() {
    let mut writer = BinaryWriter::new(FailingSink);
    let err = writer.write_u16(1).err();
    let Some(err) = err else {
        panic!("expected write to fail");
    };
    assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    assert_eq!(err.to_string(), "read-only");
}
