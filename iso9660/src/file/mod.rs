//! File content reading

use crate::device::SectorRead;
use crate::error::{Iso9660Error, Result};
use crate::types::{FileLocation, SECTOR_SIZE};
use alloc::vec::Vec;

/// Read file contents
///
/// # Arguments
/// * `device` - Sector device
/// * `file` - Location returned by a lookup
/// * `buffer` - Buffer to read into, at least `file.size` bytes
///
/// # Returns
/// Number of bytes read
pub fn read_file<S: SectorRead>(
    device: &mut S,
    file: &FileLocation,
    buffer: &mut [u8],
) -> Result<usize> {
    if !file.is_found() {
        return Err(Iso9660Error::NotFound);
    }

    let file_size = file.size as usize;
    if buffer.len() < file_size {
        return Err(Iso9660Error::ReadFailed);
    }

    // Full sectors go straight into the destination; only the tail bounces
    let full_sectors = file_size / SECTOR_SIZE;
    if full_sectors > 0 {
        device
            .read_sectors(
                file.sector,
                full_sectors as u32,
                false,
                &mut buffer[..full_sectors * SECTOR_SIZE],
            )
            .map_err(|e| {
                log::warn!("Failed to read file extent at {}: {:?}", file.sector, e);
                Iso9660Error::IoError
            })?;
    }

    let tail = file_size % SECTOR_SIZE;
    if tail > 0 {
        let mut sector = [0u8; SECTOR_SIZE];
        let tail_sector = file.sector + full_sectors as u32;
        device
            .read_sectors(tail_sector, 1, false, &mut sector)
            .map_err(|e| {
                log::warn!("Failed to read file sector {}: {:?}", tail_sector, e);
                Iso9660Error::IoError
            })?;

        let offset = full_sectors * SECTOR_SIZE;
        buffer[offset..offset + tail].copy_from_slice(&sector[..tail]);
    }

    log::trace!("Read {}b from sector {}", file_size, file.sector);
    Ok(file_size)
}

/// Read file into new Vec
pub fn read_file_vec<S: SectorRead>(device: &mut S, file: &FileLocation) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(file.size as usize)
        .map_err(|_| Iso9660Error::OutOfMemory)?;
    buffer.resize(file.size as usize, 0);
    read_file(device, file, &mut buffer)?;
    Ok(buffer)
}
