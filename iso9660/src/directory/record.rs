//! Directory Record view
//!
//! Directory records describe files and subdirectories. Layout (ECMA-119 9.1):
//!
//! | Offset | Size | Field                              |
//! |--------|------|------------------------------------|
//! | 0      | 1    | Record length                      |
//! | 1      | 1    | Extended attribute record length   |
//! | 2      | 8    | Extent location (both-endian)      |
//! | 10     | 8    | Data length (both-endian)          |
//! | 18     | 7    | Recording date and time            |
//! | 25     | 1    | File flags                         |
//! | 26     | 6    | Unit size, gap, volume sequence    |
//! | 32     | 1    | File identifier length             |
//! | 33     | n    | File identifier                    |

use crate::types::FileFlags;
use crate::utils::endian::read_u32_le;
use crate::utils::string::file_identifier_matches;

const EXTENT_LOCATION: usize = 2;
const DATA_LENGTH: usize = 10;
const FILE_FLAGS: usize = 25;
const FILE_ID_LEN: usize = 32;
const FILE_ID: usize = 33;

/// Borrowed view of one directory record inside a sector buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectoryRecordView<'a> {
    /// Total record length in bytes
    pub record_length: u8,

    /// Extended attribute record length
    pub extended_attr_length: u8,

    /// First sector of the extent
    pub extent_sector: u32,

    /// Extent size in bytes
    pub data_length: u32,

    /// Attribute flags
    pub flags: FileFlags,

    /// File identifier, including any `;version` suffix
    pub identifier: &'a [u8],
}

impl<'a> DirectoryRecordView<'a> {
    /// Length of the fixed part before the identifier
    pub const HEADER_LENGTH: usize = FILE_ID;

    /// Decode the record at the start of `data`
    ///
    /// Returns `None` when the length byte is zero (sector padding), the
    /// record runs past `data`, or the identifier does not fit the record.
    pub fn parse(data: &'a [u8]) -> Option<Self> {
        let record_length = *data.first()?;
        let length = record_length as usize;
        if length < Self::HEADER_LENGTH || length > data.len() {
            return None;
        }

        let id_len = data[FILE_ID_LEN] as usize;
        if FILE_ID + id_len > length {
            return None;
        }

        Some(Self {
            record_length,
            extended_attr_length: data[1],
            extent_sector: read_u32_le(data, EXTENT_LOCATION)?,
            data_length: read_u32_le(data, DATA_LENGTH)?,
            flags: FileFlags::from_byte(data[FILE_FLAGS]),
            identifier: &data[FILE_ID..FILE_ID + id_len],
        })
    }

    /// Is this a directory?
    pub fn is_directory(&self) -> bool {
        self.flags.directory
    }

    /// The "." entry describing the directory itself
    pub fn is_self(&self) -> bool {
        self.identifier == [0x00]
    }

    /// The ".." entry describing the parent directory
    pub fn is_parent(&self) -> bool {
        self.identifier == [0x01]
    }

    /// Whether this record is the file `name`
    ///
    /// Directories never match. The identifier may carry a `;version`
    /// suffix; case is ignored.
    pub fn matches_file_name(&self, name: &str) -> bool {
        !self.is_directory() && file_identifier_matches(self.identifier, name.as_bytes())
    }
}
