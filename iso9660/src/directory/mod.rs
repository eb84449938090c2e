//! Directory record parsing and searching

pub mod flags;
pub mod record;
pub mod scanner;

pub use record::DirectoryRecordView;
pub use scanner::DirectoryScanner;

use crate::device::SectorRead;
use crate::error::{Iso9660Error, Result};
use crate::types::{DirectoryEntry, FileLocation};
use crate::utils::string::{identifier_to_string, strip_version};
use alloc::vec::Vec;

/// Find a file in the directory whose records begin at `first_sector`
///
/// Records are examined in on-disk order and the first file whose
/// identifier matches `name` (ignoring case and any `;version` suffix) is
/// returned. Subdirectories are never returned.
///
/// # Example
/// ```ignore
/// let ifo = search_directory(&mut device, video_ts_sector, "VIDEO_TS.IFO")?;
/// println!("VIDEO_TS.IFO: sector {}, {} bytes", ifo.sector, ifo.size);
/// ```
pub fn search_directory<S: SectorRead>(
    device: &mut S,
    first_sector: u32,
    name: &str,
) -> Result<FileLocation> {
    let mut scanner = DirectoryScanner::new(device, first_sector)?;

    while let Some(record) = scanner.next_record()? {
        if record.matches_file_name(name) {
            return Ok(FileLocation::new(record.extent_sector, record.data_length));
        }
    }

    Err(Iso9660Error::NotFound)
}

/// List the entries of the directory whose records begin at `first_sector`
///
/// The "." and ".." entries are skipped; names have their `;version`
/// suffix removed.
pub fn list_directory<S: SectorRead>(
    device: &mut S,
    first_sector: u32,
) -> Result<Vec<DirectoryEntry>> {
    let mut scanner = DirectoryScanner::new(device, first_sector)?;
    let mut entries = Vec::new();

    while let Some(record) = scanner.next_record()? {
        if record.is_self() || record.is_parent() {
            continue;
        }

        let name = identifier_to_string(record.identifier);
        entries.push(DirectoryEntry {
            name: strip_version(&name).into(),
            extent_sector: record.extent_sector,
            data_length: record.data_length,
            flags: record.flags,
        });
    }

    Ok(entries)
}
