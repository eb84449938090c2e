//! ISO9660 File Locator for DVD-Video Discs
//!
//! A `no_std` reader for the ISO9660 side of hybrid ISO9660/UDF DVD images.
//! Given an absolute path such as `/VIDEO_TS/VTS_01_1.IFO` it reports the
//! file's first sector and byte size.
//!
//! # Overview
//!
//! The lookup is layered:
//! 1. **Volume layer** - Finds the primary volume descriptor in sectors 16-17
//! 2. **Path table layer** - Loads the type L path table and resolves the
//!    directory part of the path against it
//! 3. **Directory layer** - Scans the resolved directory's records, sector by
//!    sector, for the file name
//! 4. **File layer** - Optionally reads the located extent
//!
//! Sectors come from a [`SectorRead`] implementation; [`BlockIoDevice`]
//! adapts any `gpt_disk_io::BlockIo`.
//!
//! # Usage
//!
//! ```ignore
//! use dvd_iso9660::{find_file, read_file_vec, BlockIoDevice};
//!
//! let mut device = BlockIoDevice::new(block_io);
//!
//! // Sector 0 means "not found"
//! let ifo = find_file(&mut device, "/VIDEO_TS/VIDEO_TS.IFO");
//! if ifo.is_found() {
//!     let data = read_file_vec(&mut device, &ifo)?;
//! }
//! ```
//!
//! Rock Ridge, Joliet and the UDF file structures are not interpreted.

#![no_std]
#![warn(missing_docs)]

extern crate alloc;

pub mod device;
pub mod directory;
pub mod error;
pub mod file;
pub mod lookup;
pub mod path_table;
pub mod types;
pub mod utils;
pub mod volume;

pub use device::{BlockIoDevice, DeviceError, SectorRead};
pub use error::{Iso9660Error, Result};
pub use types::{DirectoryEntry, FileFlags, FileLocation, SECTOR_SIZE};

// High-level API exports
pub use directory::{list_directory, search_directory};
pub use file::{read_file, read_file_vec};
pub use lookup::{find_file, locate_file};
pub use path_table::{read_path_table, resolve_directory, PathTableRecord};
pub use volume::{read_volume_descriptor, VolumeDescriptor};
