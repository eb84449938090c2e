//! Error types for ISO9660 lookups

/// Result type for ISO9660 operations
pub type Result<T> = core::result::Result<T, Iso9660Error>;

/// Errors that can occur while locating a file on an ISO9660 volume
///
/// The public [`find_file`](crate::find_file) entry point collapses all of
/// these into a "not found" location; [`locate_file`](crate::locate_file)
/// keeps them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Iso9660Error {
    /// The sector device failed to deliver a requested sector
    #[error("I/O error reading sector device")]
    IoError,

    /// No primary volume descriptor in the scanned sectors
    #[error("no primary volume descriptor signature found")]
    InvalidSignature,

    /// The volume declares a logical block size other than 2048
    #[error("unsupported logical block size {0}, expected 2048")]
    UnsupportedBlockSize(u16),

    /// A path table record declared a directory name length outside 1..=31
    #[error("invalid path table record at offset {offset} (name length {name_len})")]
    InvalidPathTableRecord {
        /// Byte offset of the record within the path table
        offset: usize,
        /// Declared directory identifier length
        name_len: u8,
    },

    /// Decoding did not end exactly on the declared path table length
    #[error("path table decode ended at byte {actual}, expected {expected}")]
    PathTableLengthMismatch {
        /// Declared path table length
        expected: usize,
        /// Cursor position when decoding stopped
        actual: usize,
    },

    /// The path table working buffer could not be allocated
    #[error("out of memory allocating path table buffer")]
    OutOfMemory,

    /// A directory record does not fit its sector or its own length
    #[error("corrupted directory record in sector {sector} at offset {offset}")]
    InvalidDirectoryRecord {
        /// Directory sector being scanned
        sector: u32,
        /// Byte offset of the record within that sector
        offset: usize,
    },

    /// Empty or otherwise unusable lookup path
    #[error("invalid path format")]
    InvalidPath,

    /// The path or file name does not exist on the volume
    #[error("file or directory not found")]
    NotFound,

    /// Destination buffer too small for the file being read
    #[error("destination buffer too small for file")]
    ReadFailed,
}
