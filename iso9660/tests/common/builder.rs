//! Synthetic ISO9660 image builder

use crate::common::MemoryBlockDevice;
use dvd_iso9660::{BlockIoDevice, FileLocation};

/// Index of the root directory in an [`IsoBuilder`]
pub const ROOT: usize = 0;

const SECTOR: usize = 2048;

enum Child {
    Dir(usize),
    File(usize),
}

struct DirLayout {
    name: String,
    parent: usize,
    self_size: Option<u32>,
    children: Vec<Child>,
}

struct FileLayout {
    identifier: String,
    content: Vec<u8>,
}

/// Builds a volume with a primary descriptor, both path tables, a
/// directory tree and file data.
pub struct IsoBuilder {
    dirs: Vec<DirLayout>,
    files: Vec<FileLayout>,
    system_id: String,
    volume_id: String,
    logical_block_size: u16,
    boot_record_first: bool,
    path_table_length_delta: i64,
}

/// A built image plus where everything landed
pub struct BuiltIso {
    pub image: MemoryBlockDevice,
    pub dir_sectors: Vec<u32>,
    pub dir_sizes: Vec<u32>,
    pub files: Vec<FileLocation>,
    pub path_table_sector: u32,
    pub path_table_length: u32,
}

impl BuiltIso {
    /// Wrap the image as a sector device
    pub fn device(&self) -> BlockIoDevice<MemoryBlockDevice> {
        BlockIoDevice::new(self.image.clone())
    }
}

impl IsoBuilder {
    pub fn new() -> Self {
        Self {
            dirs: vec![DirLayout {
                name: String::new(),
                parent: ROOT,
                self_size: None,
                children: Vec::new(),
            }],
            files: Vec::new(),
            system_id: String::from("TEST SYSTEM"),
            volume_id: String::from("TEST_DVD"),
            logical_block_size: 2048,
            boot_record_first: false,
            path_table_length_delta: 0,
        }
    }

    /// Add a subdirectory, returning its index
    pub fn add_dir(&mut self, parent: usize, name: &str) -> usize {
        let index = self.dirs.len();
        self.dirs.push(DirLayout {
            name: name.to_string(),
            parent,
            self_size: None,
            children: Vec::new(),
        });
        self.dirs[parent].children.push(Child::Dir(index));
        index
    }

    /// Add a file with the given on-disk identifier, returning its index
    pub fn add_file(&mut self, dir: usize, identifier: &str, content: &[u8]) -> usize {
        let index = self.files.len();
        self.files.push(FileLayout {
            identifier: identifier.to_string(),
            content: content.to_vec(),
        });
        self.dirs[dir].children.push(Child::File(index));
        index
    }

    /// Make the directory's "." entry report `size` instead of its real size
    pub fn self_size(&mut self, dir: usize, size: u32) -> &mut Self {
        self.dirs[dir].self_size = Some(size);
        self
    }

    pub fn volume_id(&mut self, id: &str) -> &mut Self {
        self.volume_id = id.to_string();
        self
    }

    pub fn system_id(&mut self, id: &str) -> &mut Self {
        self.system_id = id.to_string();
        self
    }

    pub fn logical_block_size(&mut self, size: u16) -> &mut Self {
        self.logical_block_size = size;
        self
    }

    /// Put a boot record in sector 16 and the primary descriptor in 17
    pub fn boot_record_first(&mut self) -> &mut Self {
        self.boot_record_first = true;
        self
    }

    /// Declare a path table length that differs from the encoded one
    pub fn path_table_length_delta(&mut self, delta: i64) -> &mut Self {
        self.path_table_length_delta = delta;
        self
    }

    pub fn build(&self) -> BuiltIso {
        let pvd_sector = if self.boot_record_first { 17 } else { 16 };
        let terminator_sector = pvd_sector + 1;

        let path_table_l = self.path_table(false);
        let path_table_m = self.path_table(true);
        let path_table_sectors = path_table_l.len().div_ceil(SECTOR).max(1) as u32;
        let path_table_sector = terminator_sector + 1;
        let path_table_m_sector = path_table_sector + path_table_sectors;

        // Directory placement
        let mut next_sector = path_table_m_sector + path_table_sectors;
        let mut dir_sectors = Vec::new();
        let mut dir_sizes = Vec::new();
        for dir in 0..self.dirs.len() {
            let sectors = self.dir_layout(dir).1;
            dir_sectors.push(next_sector);
            dir_sizes.push(sectors * SECTOR as u32);
            next_sector += sectors;
        }

        // File placement
        let mut files = Vec::new();
        for file in &self.files {
            let size = file.content.len() as u32;
            files.push(FileLocation::new(next_sector, size));
            next_sector += size.div_ceil(SECTOR as u32).max(1);
        }

        let total_sectors = next_sector;
        let mut data = vec![0u8; total_sectors as usize * SECTOR];

        // Volume descriptors
        if self.boot_record_first {
            let offset = 16 * SECTOR;
            data[offset] = 0; // Boot record
            data[offset + 1..offset + 6].copy_from_slice(b"CD001");
            data[offset + 6] = 1;
            data[offset + 7..offset + 30].copy_from_slice(b"EL TORITO SPECIFICATION");
        }

        let declared_length = (path_table_l.len() as i64 + self.path_table_length_delta) as u32;
        let pvd = pvd_sector as usize * SECTOR;
        data[pvd] = 1;
        data[pvd + 1..pvd + 6].copy_from_slice(b"CD001");
        data[pvd + 6] = 1;
        Self::write_padded(&mut data[pvd + 8..pvd + 40], &self.system_id);
        Self::write_padded(&mut data[pvd + 40..pvd + 72], &self.volume_id);
        Self::write_both_endian_u32(&mut data[pvd + 80..], total_sectors);
        Self::write_both_endian_u16(&mut data[pvd + 120..], 1); // Volume set size
        Self::write_both_endian_u16(&mut data[pvd + 124..], 1); // Volume sequence number
        Self::write_both_endian_u16(&mut data[pvd + 128..], self.logical_block_size);
        Self::write_both_endian_u32(&mut data[pvd + 132..], declared_length);
        data[pvd + 140..pvd + 144].copy_from_slice(&path_table_sector.to_le_bytes());
        data[pvd + 148..pvd + 152].copy_from_slice(&path_table_m_sector.to_be_bytes());
        let mut root_record = pvd + 156;
        Self::write_dir_entry(
            &mut data,
            &mut root_record,
            dir_sectors[ROOT],
            dir_sizes[ROOT],
            0x02,
            &[0],
        );

        let terminator = terminator_sector as usize * SECTOR;
        data[terminator] = 255;
        data[terminator + 1..terminator + 6].copy_from_slice(b"CD001");
        data[terminator + 6] = 1;

        // Path tables
        let offset = path_table_sector as usize * SECTOR;
        data[offset..offset + path_table_l.len()].copy_from_slice(&path_table_l);
        let offset = path_table_m_sector as usize * SECTOR;
        data[offset..offset + path_table_m.len()].copy_from_slice(&path_table_m);

        // Directory records
        for index in 0..self.dirs.len() {
            let entries = self.dir_entries(index, &dir_sectors, &dir_sizes, &files);
            let (positions, _) = self.dir_layout(index);
            for ((sector, in_sector), (lba, size, flags, identifier)) in
                positions.into_iter().zip(entries)
            {
                let mut offset = (dir_sectors[index] + sector) as usize * SECTOR + in_sector;
                Self::write_dir_entry(&mut data, &mut offset, lba, size, flags, &identifier);
            }
        }

        // File data
        for (file, location) in self.files.iter().zip(&files) {
            let offset = location.sector as usize * SECTOR;
            data[offset..offset + file.content.len()].copy_from_slice(&file.content);
        }

        BuiltIso {
            image: MemoryBlockDevice::new(data),
            dir_sectors,
            dir_sizes,
            files,
            path_table_sector,
            path_table_length: declared_length,
        }
    }

    fn path_table(&self, big_endian: bool) -> Vec<u8> {
        let mut out = Vec::new();
        for (index, dir) in self.dirs.iter().enumerate() {
            let name: Vec<u8> = if index == ROOT {
                vec![0]
            } else {
                dir.name.as_bytes().to_vec()
            };
            let extent = self.dir_sector_hint(index);
            let parent = dir.parent as u16 + 1;

            out.push(name.len() as u8);
            out.push(0);
            if big_endian {
                out.extend_from_slice(&extent.to_be_bytes());
                out.extend_from_slice(&parent.to_be_bytes());
            } else {
                out.extend_from_slice(&extent.to_le_bytes());
                out.extend_from_slice(&parent.to_le_bytes());
            }
            out.extend_from_slice(&name);
            if name.len() % 2 == 1 {
                out.push(0);
            }
        }
        out
    }

    /// Sector a directory will occupy; mirrors the placement in `build`
    fn dir_sector_hint(&self, dir: usize) -> u32 {
        let pvd_sector = if self.boot_record_first { 17 } else { 16 };
        let table_len: usize = self
            .dirs
            .iter()
            .enumerate()
            .map(|(index, d)| {
                let len = if index == ROOT { 1 } else { d.name.len() };
                8 + len + len % 2
            })
            .sum();
        let path_table_sectors = table_len.div_ceil(SECTOR).max(1) as u32;
        let mut sector = pvd_sector + 2 + 2 * path_table_sectors;
        for index in 0..dir {
            sector += self.dir_layout(index).1;
        }
        sector
    }

    /// Identifiers in on-disk order: ".", "..", then children as added
    fn dir_identifiers(&self, dir: usize) -> Vec<Vec<u8>> {
        let mut identifiers = vec![vec![0u8], vec![1u8]];
        for child in &self.dirs[dir].children {
            identifiers.push(match child {
                Child::Dir(index) => self.dirs[*index].name.as_bytes().to_vec(),
                Child::File(index) => self.files[*index].identifier.as_bytes().to_vec(),
            });
        }
        identifiers
    }

    /// (sector, offset) of each record and the number of sectors used
    fn dir_layout(&self, dir: usize) -> (Vec<(u32, usize)>, u32) {
        let mut positions = Vec::new();
        let mut sector = 0u32;
        let mut offset = 0usize;
        for identifier in self.dir_identifiers(dir) {
            let length = Self::entry_length(identifier.len());
            if offset + length > SECTOR {
                sector += 1;
                offset = 0;
            }
            positions.push((sector, offset));
            offset += length;
        }
        (positions, sector + 1)
    }

    fn dir_entries(
        &self,
        dir: usize,
        dir_sectors: &[u32],
        dir_sizes: &[u32],
        files: &[FileLocation],
    ) -> Vec<(u32, u32, u8, Vec<u8>)> {
        let layout = &self.dirs[dir];
        let self_size = layout.self_size.unwrap_or(dir_sizes[dir]);
        let mut entries = vec![
            (dir_sectors[dir], self_size, 0x02, vec![0u8]),
            (dir_sectors[layout.parent], dir_sizes[layout.parent], 0x02, vec![1u8]),
        ];
        for child in &layout.children {
            entries.push(match child {
                Child::Dir(index) => (
                    dir_sectors[*index],
                    dir_sizes[*index],
                    0x02,
                    self.dirs[*index].name.as_bytes().to_vec(),
                ),
                Child::File(index) => (
                    files[*index].sector,
                    files[*index].size,
                    0x00,
                    self.files[*index].identifier.as_bytes().to_vec(),
                ),
            });
        }
        entries
    }

    fn entry_length(identifier_len: usize) -> usize {
        let length = 33 + identifier_len;
        length + length % 2
    }

    fn write_padded(dst: &mut [u8], value: &str) {
        dst.fill(b' ');
        dst[..value.len()].copy_from_slice(value.as_bytes());
    }

    fn write_both_endian_u32(dst: &mut [u8], value: u32) {
        dst[0..4].copy_from_slice(&value.to_le_bytes());
        dst[4..8].copy_from_slice(&value.to_be_bytes());
    }

    fn write_both_endian_u16(dst: &mut [u8], value: u16) {
        dst[0..2].copy_from_slice(&value.to_le_bytes());
        dst[2..4].copy_from_slice(&value.to_be_bytes());
    }

    fn write_dir_entry(
        data: &mut [u8],
        offset: &mut usize,
        lba: u32,
        size: u32,
        flags: u8,
        name: &[u8],
    ) {
        let entry_len = Self::entry_length(name.len());
        let start = *offset;
        data[start] = entry_len as u8;
        data[start + 1] = 0; // Ext attr len
        Self::write_both_endian_u32(&mut data[start + 2..], lba);
        Self::write_both_endian_u32(&mut data[start + 10..], size);
        // Date (7 bytes) - all zero is fine for test
        data[start + 25] = flags;
        Self::write_both_endian_u16(&mut data[start + 28..], 1); // Volume seq
        data[start + 32] = name.len() as u8;
        data[start + 33..start + 33 + name.len()].copy_from_slice(name);
        *offset += entry_len;
    }
}
