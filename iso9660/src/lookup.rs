//! Path lookup entry points

use crate::device::SectorRead;
use crate::directory::search_directory;
use crate::error::{Iso9660Error, Result};
use crate::path_table::{read_path_table, resolve_directory};
use crate::types::FileLocation;
use crate::utils::string::split_file_path;
use crate::volume::read_volume_descriptor;

/// Locate a file by absolute path
///
/// The directory part of `path` is resolved through the path table and the
/// file name is then searched for in that directory. Directory and file
/// names are matched case-insensitively, and on-disk `;version` suffixes are
/// ignored. No `.` or `..` handling is performed.
///
/// # Arguments
/// * `device` - Sector device holding the volume
/// * `path` - Path to find (e.g., "/VIDEO_TS/VTS_01_1.IFO")
///
/// # Errors
/// Every structural, I/O and lookup failure is reported as the matching
/// [`Iso9660Error`]; a missing file is `NotFound`.
pub fn locate_file<S: SectorRead>(device: &mut S, path: &str) -> Result<FileLocation> {
    if path.is_empty() {
        return Err(Iso9660Error::InvalidPath);
    }

    let (directory, name) = split_file_path(path);
    if name.is_empty() {
        return Err(Iso9660Error::InvalidPath);
    }

    let volume = read_volume_descriptor(device)?;
    let directory_sector = {
        let records = read_path_table(device, &volume)?;
        let record = resolve_directory(&records, directory).ok_or(Iso9660Error::NotFound)?;
        record.directory_first_sector
    };
    log::debug!("Directory {:?} starts at sector {}", directory, directory_sector);

    let location = search_directory(device, directory_sector, name)?;
    log::debug!(
        "Found {:?} at sector {} ({} bytes)",
        path,
        location.sector,
        location.size
    );
    Ok(location)
}

/// Find a file by absolute path
///
/// Same lookup as [`locate_file`], with every failure reported as
/// [`FileLocation::NOT_FOUND`] (sector 0). A missing file and an unreadable
/// or malformed volume are indistinguishable here.
///
/// # Example
/// ```ignore
/// use dvd_iso9660::{find_file, BlockIoDevice};
///
/// let mut device = BlockIoDevice::new(block_io);
/// let ifo = find_file(&mut device, "/VIDEO_TS/VIDEO_TS.IFO");
/// if ifo.is_found() {
///     println!("VMG IFO at sector {}, {} bytes", ifo.sector, ifo.size);
/// }
/// ```
pub fn find_file<S: SectorRead>(device: &mut S, path: &str) -> FileLocation {
    locate_file(device, path).unwrap_or_else(|e| {
        log::debug!("Lookup of {:?} failed: {}", path, e);
        FileLocation::NOT_FOUND
    })
}
