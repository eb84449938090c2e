//! Primary Volume Descriptor decoding
//!
//! The Primary Volume Descriptor (PVD) describes the basic ISO9660
//! filesystem structure. See ECMA-119 8.4 for the full layout; only the
//! fields needed to reach the path table are decoded here.

use crate::error::{Iso9660Error, Result};
use crate::types::SECTOR_SIZE;
use crate::utils::endian::{read_u16_le, read_u32_be, read_u32_le};
use crate::utils::sector::sectors_for_bytes;
use crate::utils::string::identifier_to_string;
use alloc::string::String;

/// Descriptor header: type 1 (primary), "CD001", version 1
pub const PRIMARY_SIGNATURE: [u8; 7] = [1, b'C', b'D', b'0', b'0', b'1', 1];

// Byte offsets within the descriptor sector
const SYSTEM_ID: usize = 8;
const VOLUME_ID: usize = 40;
const IDENTIFIER_LEN: usize = 32;
const VOLUME_SPACE_SIZE: usize = 80;
const LOGICAL_BLOCK_SIZE: usize = 128;
const PATH_TABLE_SIZE: usize = 132;
const TYPE_L_PATH_TABLE: usize = 140;
const TYPE_M_PATH_TABLE: usize = 148;

/// Decoded primary volume descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeDescriptor {
    /// System identifier, trailing spaces removed
    pub system_id: String,

    /// Volume identifier, trailing spaces removed
    pub volume_id: String,

    /// Volume space size (total sectors)
    pub sector_count: u32,

    /// Logical block size (always 2048 once decoded)
    pub logical_block_size: u16,

    /// Path table size in bytes
    pub path_table_length: u32,

    /// Type L (little-endian) path table location
    pub primary_path_table_sector: u32,

    /// Type M (big-endian) path table location
    pub secondary_path_table_sector: u32,
}

impl VolumeDescriptor {
    /// Whether a sector starts with the primary volume descriptor header
    pub fn is_primary(sector: &[u8]) -> bool {
        sector.starts_with(&PRIMARY_SIGNATURE)
    }

    /// Decode a primary volume descriptor sector
    pub fn parse(sector: &[u8]) -> Result<Self> {
        if sector.len() < SECTOR_SIZE || !Self::is_primary(sector) {
            return Err(Iso9660Error::InvalidSignature);
        }

        let field = |offset| read_u32_le(sector, offset).ok_or(Iso9660Error::InvalidSignature);

        let logical_block_size =
            read_u16_le(sector, LOGICAL_BLOCK_SIZE).ok_or(Iso9660Error::InvalidSignature)?;
        if logical_block_size as usize != SECTOR_SIZE {
            return Err(Iso9660Error::UnsupportedBlockSize(logical_block_size));
        }

        Ok(Self {
            system_id: identifier_to_string(&sector[SYSTEM_ID..SYSTEM_ID + IDENTIFIER_LEN]),
            volume_id: identifier_to_string(&sector[VOLUME_ID..VOLUME_ID + IDENTIFIER_LEN]),
            sector_count: field(VOLUME_SPACE_SIZE)?,
            logical_block_size,
            path_table_length: field(PATH_TABLE_SIZE)?,
            primary_path_table_sector: field(TYPE_L_PATH_TABLE)?,
            secondary_path_table_sector: read_u32_be(sector, TYPE_M_PATH_TABLE)
                .ok_or(Iso9660Error::InvalidSignature)?,
        })
    }

    /// Number of whole sectors covering the path table
    pub fn path_table_sector_count(&self) -> u32 {
        sectors_for_bytes(self.path_table_length)
    }
}
