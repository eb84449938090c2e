//! Path table loading
//!
//! The path table flattens the whole directory hierarchy into a list of
//! `(name, first sector, parent number)` records. Records are numbered from
//! 1 in table order and the root directory is always record 1, so the list
//! forms a tree through parent numbers alone.

pub mod resolve;

pub use resolve::resolve_directory;

use crate::device::SectorRead;
use crate::error::{Iso9660Error, Result};
use crate::types::MAX_DIRECTORY_NAME_LEN;
use crate::utils::endian::{read_u16_le, read_u32_le};
use crate::utils::sector::sector_span;
use crate::volume::VolumeDescriptor;
use alloc::string::String;
use alloc::vec::Vec;

/// Fixed part of a path table record, before the directory identifier
const RECORD_HEADER_LEN: usize = 8;

/// One decoded path table record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTableRecord {
    /// 1-based position in the table (root is 1)
    pub record_index: u16,

    /// Directory identifier exactly as recorded, case and padding preserved
    pub name: String,

    /// First sector of the directory's records
    pub directory_first_sector: u32,

    /// Record number of the enclosing directory (root points at itself)
    pub parent_record_index: u16,
}

/// Read and decode the type L path table of a volume
///
/// Whole sectors covering `path_table_length` bytes are read in one request;
/// bytes past the declared length are ignored. A zero-length table yields
/// no records.
///
/// # Errors
/// * `OutOfMemory` - the sector buffer could not be allocated
/// * `IoError` - any path table sector could not be read
/// * `InvalidPathTableRecord`, `PathTableLengthMismatch` - see [`decode_path_table`]
pub fn read_path_table<S: SectorRead>(
    device: &mut S,
    volume: &VolumeDescriptor,
) -> Result<Vec<PathTableRecord>> {
    let length = volume.path_table_length as usize;
    if length == 0 {
        log::debug!("Volume has no path table");
        return Ok(Vec::new());
    }

    let sector_count = volume.path_table_sector_count();
    let buffer_len = sector_span(sector_count);
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(buffer_len)
        .map_err(|_| Iso9660Error::OutOfMemory)?;
    buffer.resize(buffer_len, 0);

    log::trace!(
        "Reading path table: {}b in {} sector(s) from {}",
        length,
        sector_count,
        volume.primary_path_table_sector
    );
    device
        .read_sectors(volume.primary_path_table_sector, sector_count, false, &mut buffer)
        .map_err(|e| {
            log::warn!(
                "Failed to read path table at sector {}: {:?}",
                volume.primary_path_table_sector,
                e
            );
            Iso9660Error::IoError
        })?;

    decode_path_table(&buffer, length)
}

/// Decode `length` bytes of a little-endian path table
///
/// `data` may extend past `length` (sector padding). Decoding is strict:
/// every directory identifier must be 1 to 31 bytes long and the last record
/// must end exactly at `length`.
pub fn decode_path_table(data: &[u8], length: usize) -> Result<Vec<PathTableRecord>> {
    let mut records = Vec::new();
    let mut offset = 0;

    while offset < length {
        let name_len = data.get(offset).copied().ok_or(mismatch(length, offset))? as usize;
        if name_len == 0 || name_len > MAX_DIRECTORY_NAME_LEN {
            log::warn!("Path table record at {} has name length {}", offset, name_len);
            return Err(Iso9660Error::InvalidPathTableRecord {
                offset,
                name_len: name_len as u8,
            });
        }

        // Identifiers are padded to an even length
        let record_len = RECORD_HEADER_LEN + name_len + (name_len & 1);
        let name_start = offset + RECORD_HEADER_LEN;
        let name = data
            .get(name_start..name_start + name_len)
            .ok_or(mismatch(length, offset + record_len))?;

        // Byte 1 is the extended attribute record length, unused here
        let directory_first_sector =
            read_u32_le(data, offset + 2).ok_or(mismatch(length, offset))?;
        let parent_record_index = read_u16_le(data, offset + 6).ok_or(mismatch(length, offset))?;

        let record_index = u16::try_from(records.len() + 1).map_err(|_| mismatch(length, offset))?;
        records.push(PathTableRecord {
            record_index,
            name: String::from_utf8_lossy(name).into_owned(),
            directory_first_sector,
            parent_record_index,
        });

        offset += record_len;
    }

    if offset != length {
        log::warn!("Path table decode overran: ended at {}, declared {}", offset, length);
        return Err(mismatch(length, offset));
    }

    log::trace!("Decoded {} path table records", records.len());
    Ok(records)
}

fn mismatch(expected: usize, actual: usize) -> Iso9660Error {
    Iso9660Error::PathTableLengthMismatch { expected, actual }
}
