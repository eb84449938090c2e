//! Byte-level helpers shared by the decoders

pub mod endian;
pub mod sector;
pub mod string;
