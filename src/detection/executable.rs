//! Secondary classification for MZ executable containers.
//!
//! A legacy MS-DOS executable can embed a newer executable behind the
//! extended-header offset stored at `0x3C`. The cascade reads that offset,
//! seeks to it, and compares exactly four bytes against the nested-format
//! signatures in fixed order: New Executable, Linear Executable (`LE` or
//! `LX`), then Portable Executable.
//!
//! The stream is a scoped resource for the duration of the call: its read
//! position is mutated, and on a recognized nested format it is left at the
//! cascade target so a full model construction can follow. Callers must not
//! assume any particular position afterwards and must re-seek before
//! subsequent reads.

use crate::error::Result;
use crate::types::ExecutableClass;
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{ErrorKind, Read, Seek, SeekFrom};

/// Legacy 2-byte executable marker.
pub const DOS_MAGIC: [u8; 2] = [b'M', b'Z'];

/// New Executable signature.
pub const NE_MAGIC: [u8; 2] = [b'N', b'E'];

/// Linear Executable signature, LE variant.
pub const LE_MAGIC: [u8; 2] = [b'L', b'E'];

/// Linear Executable signature, LX variant.
pub const LX_MAGIC: [u8; 2] = [b'L', b'X'];

/// Portable Executable signature.
pub const PE_MAGIC: [u8; 4] = [b'P', b'E', 0, 0];

/// Position of the extended-header offset inside the legacy header.
const NEW_HEADER_FIELD: u64 = 0x3C;

/// Classify an MZ executable container, cascading into its nested format.
///
/// Returns `Ok(None)` when the stream does not start with the legacy
/// marker. Otherwise:
/// - no usable extended-header offset (short header, or offset at or past
///   the end of the stream) resolves to [`ExecutableClass::Legacy`];
/// - four bytes at the offset matching a nested signature resolve to that
///   nested class, with the stream positioned at the offset;
/// - four readable but unmatched bytes resolve to
///   [`ExecutableClass::Unrecognized`].
///
/// IO failures other than a short read surface as errors; classification
/// misses never do.
pub fn classify_executable<R: Read + Seek>(stream: &mut R) -> Result<Option<ExecutableClass>> {
    let stream_len = stream.seek(SeekFrom::End(0))?;
    stream.seek(SeekFrom::Start(0))?;

    let mut marker = [0u8; 2];
    match stream.read_exact(&mut marker) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e.into()),
    }
    if marker != DOS_MAGIC {
        return Ok(None);
    }

    // A header too short to carry the extended-header field is legacy-only.
    if stream_len < NEW_HEADER_FIELD + 4 {
        return Ok(Some(ExecutableClass::Legacy));
    }

    stream.seek(SeekFrom::Start(NEW_HEADER_FIELD))?;
    let ext_offset = u64::from(stream.read_u32::<LittleEndian>()?);
    if ext_offset >= stream_len {
        return Ok(Some(ExecutableClass::Legacy));
    }

    stream.seek(SeekFrom::Start(ext_offset))?;
    let mut magic = [0u8; 4];
    match stream.read_exact(&mut magic) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
            return Ok(Some(ExecutableClass::Legacy));
        }
        Err(e) => return Err(e.into()),
    }

    let nested = if magic[..2] == NE_MAGIC {
        Some(ExecutableClass::NewExecutable)
    } else if magic[..2] == LE_MAGIC || magic[..2] == LX_MAGIC {
        Some(ExecutableClass::LinearExecutable)
    } else if magic == PE_MAGIC {
        Some(ExecutableClass::PortableExecutable)
    } else {
        None
    };

    match nested {
        Some(class) => {
            // Leave the stream at the cascade target for a subsequent full
            // model construction.
            stream.seek(SeekFrom::Start(ext_offset))?;
            Ok(Some(class))
        }
        None => Ok(Some(ExecutableClass::Unrecognized)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn mz_with_nested(nested_magic: &[u8]) -> Vec<u8> {
        let mut data = vec![0u8; 0x80];
        data[0..2].copy_from_slice(&DOS_MAGIC);
        data[0x3C..0x40].copy_from_slice(&0x40u32.to_le_bytes());
        data[0x40..0x40 + nested_magic.len()].copy_from_slice(nested_magic);
        data
    }

    #[test]
    fn test_not_an_executable() {
        let mut cursor = Cursor::new(vec![0x7Fu8, b'E', b'L', b'F']);
        assert_eq!(classify_executable(&mut cursor).unwrap(), None);
    }

    #[test]
    fn test_empty_stream() {
        let mut cursor = Cursor::new(Vec::<u8>::new());
        assert_eq!(classify_executable(&mut cursor).unwrap(), None);
    }

    #[test]
    fn test_short_header_is_legacy() {
        let mut cursor = Cursor::new(b"MZ\x90\x00".to_vec());
        assert_eq!(
            classify_executable(&mut cursor).unwrap(),
            Some(ExecutableClass::Legacy)
        );
    }

    #[test]
    fn test_offset_past_end_is_legacy() {
        let mut data = vec![0u8; 0x40];
        data[0..2].copy_from_slice(&DOS_MAGIC);
        data[0x3C..0x40].copy_from_slice(&0x4000u32.to_le_bytes());
        let mut cursor = Cursor::new(data);
        assert_eq!(
            classify_executable(&mut cursor).unwrap(),
            Some(ExecutableClass::Legacy)
        );
    }

    #[test]
    fn test_portable_executable() {
        let mut cursor = Cursor::new(mz_with_nested(&PE_MAGIC));
        assert_eq!(
            classify_executable(&mut cursor).unwrap(),
            Some(ExecutableClass::PortableExecutable)
        );
        // Stream is left at the cascade target.
        assert_eq!(cursor.position(), 0x40);
    }

    #[test]
    fn test_new_executable() {
        let mut cursor = Cursor::new(mz_with_nested(b"NE\x05\x01"));
        assert_eq!(
            classify_executable(&mut cursor).unwrap(),
            Some(ExecutableClass::NewExecutable)
        );
    }

    #[test]
    fn test_linear_executable_both_variants() {
        for magic in [b"LE\x00\x00", b"LX\x00\x00"] {
            let mut cursor = Cursor::new(mz_with_nested(magic));
            assert_eq!(
                classify_executable(&mut cursor).unwrap(),
                Some(ExecutableClass::LinearExecutable)
            );
        }
    }

    #[test]
    fn test_unmatched_nested_bytes() {
        let mut cursor = Cursor::new(mz_with_nested(b"ZZ\x00\x00"));
        assert_eq!(
            classify_executable(&mut cursor).unwrap(),
            Some(ExecutableClass::Unrecognized)
        );
    }

    #[test]
    fn test_pe_signature_requires_all_four_bytes() {
        // "PE" followed by nonzero padding is not a Portable Executable.
        let mut cursor = Cursor::new(mz_with_nested(b"PE\x01\x00"));
        assert_eq!(
            classify_executable(&mut cursor).unwrap(),
            Some(ExecutableClass::Unrecognized)
        );
    }
}
