//! Common types and constants for ISO9660

use alloc::string::String;

/// ISO9660 sector size (always 2048 bytes)
pub const SECTOR_SIZE: usize = 2048;

/// First sector checked for the primary volume descriptor
pub const VOLUME_DESCRIPTOR_START: u32 = 16;

/// Last sector checked for the primary volume descriptor
pub const VOLUME_DESCRIPTOR_END: u32 = 17;

/// Longest directory identifier accepted in a path table record
pub const MAX_DIRECTORY_NAME_LEN: usize = 31;

/// Location of a file on the volume
///
/// A sector of 0 means the file was not found; sector 0 is inside the
/// system area and can never hold file data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FileLocation {
    /// First sector of the file extent
    pub sector: u32,

    /// File size in bytes
    pub size: u32,
}

impl FileLocation {
    /// The "not found" location
    pub const NOT_FOUND: Self = Self { sector: 0, size: 0 };

    /// Create a new location
    pub fn new(sector: u32, size: u32) -> Self {
        Self { sector, size }
    }

    /// Whether this names an actual file
    pub fn is_found(&self) -> bool {
        self.sector != 0
    }

    /// Number of sectors (2048 bytes each) the file occupies
    pub fn sector_count(&self) -> u32 {
        crate::utils::sector::sectors_for_bytes(self.size)
    }

    /// End sector (exclusive)
    pub fn end_sector(&self) -> u32 {
        self.sector.saturating_add(self.sector_count())
    }
}

impl From<FileLocation> for (u32, u32) {
    fn from(location: FileLocation) -> Self {
        (location.sector, location.size)
    }
}

/// File flags from directory record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FileFlags {
    /// Hidden file
    pub hidden: bool,

    /// Directory (not a file)
    pub directory: bool,

    /// Associated file
    pub associated: bool,

    /// Extended attribute record format
    pub extended_format: bool,

    /// Owner/group permissions in extended attributes
    pub extended_permissions: bool,

    /// Not final directory record for this file
    pub not_final: bool,
}

/// Owned directory entry, as returned by [`list_directory`](crate::directory::list_directory)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// Entry name with any `;version` suffix removed
    pub name: String,

    /// First sector of the entry's extent
    pub extent_sector: u32,

    /// Size in bytes
    pub data_length: u32,

    /// Attribute flags
    pub flags: FileFlags,
}

impl DirectoryEntry {
    /// Location of this entry's data
    pub fn location(&self) -> FileLocation {
        FileLocation::new(self.extent_sector, self.data_length)
    }

    /// Is this a directory?
    pub fn is_directory(&self) -> bool {
        self.flags.directory
    }
}
