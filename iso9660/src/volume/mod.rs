//! Volume descriptor reading
//!
//! ISO9660 volume descriptors start at sector 16. A DVD-Video disc keeps its
//! primary descriptor in sector 16 or, behind a boot record, in sector 17;
//! those are the only two sectors examined.

pub mod primary;

pub use primary::VolumeDescriptor;

use crate::device::SectorRead;
use crate::error::{Iso9660Error, Result};
use crate::types::{SECTOR_SIZE, VOLUME_DESCRIPTOR_END, VOLUME_DESCRIPTOR_START};

/// Locate and decode the primary volume descriptor
///
/// Sectors are read one at a time in ascending order; the first sector
/// carrying the primary signature wins. A read failure ends the scan
/// immediately.
///
/// # Errors
/// * `IoError` - a descriptor sector could not be read
/// * `InvalidSignature` - no primary descriptor in sectors 16-17
/// * `UnsupportedBlockSize` - the descriptor declares a block size other than 2048
pub fn read_volume_descriptor<S: SectorRead>(device: &mut S) -> Result<VolumeDescriptor> {
    let mut buffer = [0u8; SECTOR_SIZE];

    for sector in VOLUME_DESCRIPTOR_START..=VOLUME_DESCRIPTOR_END {
        device
            .read_sectors(sector, 1, false, &mut buffer)
            .map_err(|e| {
                log::warn!("Failed to read volume descriptor sector {}: {:?}", sector, e);
                Iso9660Error::IoError
            })?;

        if !VolumeDescriptor::is_primary(&buffer) {
            log::trace!("Sector {} is not a primary volume descriptor", sector);
            continue;
        }

        let descriptor = VolumeDescriptor::parse(&buffer).inspect_err(|e| {
            log::warn!("Rejecting primary volume descriptor in sector {}: {}", sector, e);
        })?;
        log::debug!(
            "Primary volume descriptor in sector {}: volume {:?}, {} sectors, path table {}b at {}",
            sector,
            descriptor.volume_id,
            descriptor.sector_count,
            descriptor.path_table_length,
            descriptor.primary_path_table_sector
        );
        return Ok(descriptor);
    }

    log::warn!(
        "No primary volume descriptor in sectors {}-{}",
        VOLUME_DESCRIPTOR_START,
        VOLUME_DESCRIPTOR_END
    );
    Err(Iso9660Error::InvalidSignature)
}
