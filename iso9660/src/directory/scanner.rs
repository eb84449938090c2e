//! Sector-by-sector directory walk
//!
//! Directory records never straddle a sector boundary; the unused tail of a
//! sector is zero-filled. The scanner keeps exactly one sector in memory and
//! moves to the next one when it reaches the end of the current sector or a
//! zero length byte, as long as the directory extends that far.

use crate::device::SectorRead;
use crate::directory::record::DirectoryRecordView;
use crate::error::{Iso9660Error, Result};
use crate::types::SECTOR_SIZE;

/// Cursor over the records of one directory
pub struct DirectoryScanner<'d, S: SectorRead> {
    device: &'d mut S,
    buffer: [u8; SECTOR_SIZE],
    sector: u32,
    position: usize,
    remaining: u32,
}

impl<'d, S: SectorRead> DirectoryScanner<'d, S> {
    /// Start scanning the directory whose records begin at `first_sector`
    ///
    /// The directory is assumed to be one sector long until its "." entry
    /// reports the real size.
    pub fn new(device: &'d mut S, first_sector: u32) -> Result<Self> {
        let mut scanner = Self {
            device,
            buffer: [0u8; SECTOR_SIZE],
            sector: first_sector,
            position: 0,
            remaining: SECTOR_SIZE as u32,
        };
        scanner.load_sector()?;
        Ok(scanner)
    }

    /// Sector currently held in the buffer
    pub fn current_sector(&self) -> u32 {
        self.sector
    }

    /// Return the next record, or `None` once the directory is exhausted
    pub fn next_record(&mut self) -> Result<Option<DirectoryRecordView<'_>>> {
        while self.position >= SECTOR_SIZE || self.buffer[self.position] == 0 {
            if self.remaining as usize <= SECTOR_SIZE {
                return Ok(None);
            }
            self.sector += 1;
            self.remaining -= SECTOR_SIZE as u32;
            self.position = 0;
            self.load_sector()?;
        }

        let offset = self.position;
        let record = DirectoryRecordView::parse(&self.buffer[offset..]).ok_or_else(|| {
            log::warn!("Corrupted directory record in sector {} at {}", self.sector, offset);
            Iso9660Error::InvalidDirectoryRecord {
                sector: self.sector,
                offset,
            }
        })?;

        if record.is_self() {
            if !record.is_directory() {
                log::warn!(
                    "Self entry in sector {} is not flagged as a directory",
                    self.sector
                );
            }
            log::trace!("Directory at {} is {}b long", self.sector, record.data_length);
            self.remaining = record.data_length;
        }

        self.position += record.record_length as usize;
        Ok(Some(record))
    }

    fn load_sector(&mut self) -> Result<()> {
        log::trace!("Loading directory sector {}", self.sector);
        self.device
            .read_sectors(self.sector, 1, false, &mut self.buffer)
            .map_err(|e| {
                log::warn!("Failed to read directory sector {}: {:?}", self.sector, e);
                Iso9660Error::IoError
            })
    }
}
