//! Sector alignment and calculation utilities

use crate::types::SECTOR_SIZE;

/// Calculate number of sectors needed for byte count
pub fn sectors_for_bytes(byte_count: u32) -> u32 {
    byte_count.div_ceil(SECTOR_SIZE as u32)
}

/// Length in bytes of `sector_count` whole sectors
pub fn sector_span(sector_count: u32) -> usize {
    sector_count as usize * SECTOR_SIZE
}
