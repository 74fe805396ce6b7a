//! WOFF2 file header packing
//!
//! <https://www.w3.org/TR/WOFF2/#woff20Header>

use bytes::BufMut;
use font_types::Tag;

pub const WOFF2_SIGNATURE: Tag = Tag::new(b"wOF2");

/// Size of the serialized WOFF2 header in bytes
pub const WOFF2_HEADER_SIZE: usize = 48;

/// The fixed-size record at the start of a WOFF2 file
///
/// All fields are stored big-endian in declaration order.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Woff2Header {
    /// b"wOF2"
    pub signature: Tag,
    /// The "sfnt version" of the input font
    pub flavor: Tag,
    /// Total size of the WOFF file
    pub length: u32,
    /// Number of entries in the table directory
    pub num_tables: u16,
    /// Reserved; set to 0
    pub reserved: u16,
    /// Total size needed for the uncompressed font data, including the sfnt
    /// header, directory, and font tables (including padding)
    pub total_sfnt_size: u32,
    /// Total length of the compressed data block
    pub total_compressed_size: u32,
    /// Major version of the WOFF file
    pub major_version: u16,
    /// Minor version of the WOFF file
    pub minor_version: u16,
    /// Offset to the metadata block, from the beginning of the WOFF file
    pub meta_offset: u32,
    /// Length of the compressed metadata block
    pub meta_length: u32,
    /// Uncompressed size of the metadata block
    pub meta_orig_length: u32,
    /// Offset to the private data block, from the beginning of the WOFF file
    pub priv_offset: u32,
    /// Length of the private data block
    pub priv_length: u32,
}

impl Default for Woff2Header {
    fn default() -> Self {
        Self {
            signature: WOFF2_SIGNATURE,
            flavor: crate::types::TRUETYPE_SFNT_VERSION,
            length: 0,
            num_tables: 0,
            reserved: 0,
            total_sfnt_size: 0,
            total_compressed_size: 0,
            major_version: 0,
            minor_version: 0,
            meta_offset: 0,
            meta_length: 0,
            meta_orig_length: 0,
            priv_offset: 0,
            priv_length: 0,
        }
    }
}

impl Woff2Header {
    pub fn write(&self, out: &mut impl BufMut) {
        out.put_slice(&self.signature.to_be_bytes());
        out.put_slice(&self.flavor.to_be_bytes());
        out.put_u32(self.length);
        out.put_u16(self.num_tables);
        out.put_u16(self.reserved);
        out.put_u32(self.total_sfnt_size);
        out.put_u32(self.total_compressed_size);
        out.put_u16(self.major_version);
        out.put_u16(self.minor_version);
        out.put_u32(self.meta_offset);
        out.put_u32(self.meta_length);
        out.put_u32(self.meta_orig_length);
        out.put_u32(self.priv_offset);
        out.put_u32(self.priv_length);
    }
}
