//! Fixed-offset field decoding
//!
//! ISO9660 stores most numbers "both-endian": a little-endian copy followed
//! by a big-endian copy. Only the little-endian half is read here, except
//! for fields that exist solely in big-endian form (type M path table
//! locations).

/// Read a little-endian `u16` at `offset`
pub fn read_u16_le(data: &[u8], offset: usize) -> Option<u16> {
    let bytes = data.get(offset..offset + 2)?;
    Some(u16::from_le_bytes([bytes[0], bytes[1]]))
}

/// Read a little-endian `u32` at `offset`
pub fn read_u32_le(data: &[u8], offset: usize) -> Option<u32> {
    let bytes = data.get(offset..offset + 4)?;
    Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// Read a big-endian `u32` at `offset`
pub fn read_u32_be(data: &[u8], offset: usize) -> Option<u32> {
    let bytes = data.get(offset..offset + 4)?;
    Some(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}
