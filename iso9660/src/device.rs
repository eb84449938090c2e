//! Sector device abstraction
//!
//! The filesystem reader consumes whole 2048-byte sectors through
//! [`SectorRead`]. [`BlockIoDevice`] adapts any `gpt_disk_io::BlockIo`
//! (raw images, UEFI block devices, chunked ISO storage) to that interface.

use crate::types::SECTOR_SIZE;
use core::fmt;
use gpt_disk_io::BlockIo;
use gpt_disk_types::Lba;

/// Source of 2048-byte sectors
pub trait SectorRead {
    /// Error reported by the device
    type Error: fmt::Debug;

    /// Read `sector_count` sectors starting at `first_sector` into `dst`
    ///
    /// `dst` must be exactly `sector_count * 2048` bytes long. When
    /// `encrypted` is set the device is expected to descramble the payload
    /// before returning it.
    fn read_sectors(
        &mut self,
        first_sector: u32,
        sector_count: u32,
        encrypted: bool,
        dst: &mut [u8],
    ) -> Result<(), Self::Error>;
}

impl<S: SectorRead + ?Sized> SectorRead for &mut S {
    type Error = S::Error;

    fn read_sectors(
        &mut self,
        first_sector: u32,
        sector_count: u32,
        encrypted: bool,
        dst: &mut [u8],
    ) -> Result<(), Self::Error> {
        (**self).read_sectors(first_sector, sector_count, encrypted, dst)
    }
}

/// Errors from [`BlockIoDevice`]
#[derive(Debug, thiserror::Error)]
pub enum DeviceError<E: fmt::Debug + fmt::Display> {
    /// The underlying block device failed
    #[error("block device error: {0}")]
    Io(E),

    /// Device block size cannot be combined into 2048-byte sectors
    #[error("block size {0} does not divide the 2048-byte sector size")]
    UnsupportedBlockSize(u64),

    /// Destination length does not match the requested sector count
    #[error("buffer of {actual} bytes cannot hold {expected} bytes")]
    BufferSize {
        /// Bytes required by the request
        expected: usize,
        /// Bytes provided
        actual: usize,
    },

    /// Scrambled sectors were requested from a device without descrambling
    #[error("device cannot descramble encrypted sectors")]
    ScrambledRead,
}

/// `SectorRead` adapter over a `gpt_disk_io::BlockIo`
///
/// `start_sector` is the ISO sector at which the volume begins on the block
/// device (0 for a raw image).
pub struct BlockIoDevice<B: BlockIo> {
    block_io: B,
    start_sector: u64,
}

impl<B: BlockIo> BlockIoDevice<B> {
    /// Wrap a block device holding a raw ISO image
    pub fn new(block_io: B) -> Self {
        Self::with_start_sector(block_io, 0)
    }

    /// Wrap a block device whose ISO volume starts at `start_sector`
    pub fn with_start_sector(block_io: B, start_sector: u64) -> Self {
        Self {
            block_io,
            start_sector,
        }
    }

    /// Borrow the underlying block device
    pub fn get_ref(&self) -> &B {
        &self.block_io
    }

    /// Unwrap the underlying block device
    pub fn into_inner(self) -> B {
        self.block_io
    }

    /// Number of device blocks making up one ISO sector
    fn blocks_per_sector(&self) -> Result<u64, DeviceError<B::Error>> {
        let block_size = self.block_io.block_size().to_u64();
        if block_size == 0
            || block_size > SECTOR_SIZE as u64
            || SECTOR_SIZE as u64 % block_size != 0
        {
            return Err(DeviceError::UnsupportedBlockSize(block_size));
        }
        Ok(SECTOR_SIZE as u64 / block_size)
    }
}

impl<B: BlockIo> SectorRead for BlockIoDevice<B> {
    type Error = DeviceError<B::Error>;

    fn read_sectors(
        &mut self,
        first_sector: u32,
        sector_count: u32,
        encrypted: bool,
        dst: &mut [u8],
    ) -> Result<(), Self::Error> {
        if encrypted {
            return Err(DeviceError::ScrambledRead);
        }

        let expected = sector_count as usize * SECTOR_SIZE;
        if dst.len() != expected {
            return Err(DeviceError::BufferSize {
                expected,
                actual: dst.len(),
            });
        }

        let blocks_per_sector = self.blocks_per_sector()?;
        let lba = (self.start_sector + first_sector as u64) * blocks_per_sector;
        log::trace!(
            "Reading {} sector(s) at {} (device LBA {})",
            sector_count,
            first_sector,
            lba
        );

        self.block_io
            .read_blocks(Lba(lba), dst)
            .map_err(DeviceError::Io)
    }
}
