use bytes::BufMut;
use font_types::Tag;

pub const CFF_SFNT_VERSION: Tag = Tag::new(b"OTTO");
pub const TRUETYPE_SFNT_VERSION: Tag = Tag::new(&[0x00, 0x01, 0x00, 0x00]);

/// The outline flavor of a font, which determines its sfnt version tag.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Flavor {
    /// CFF outlines ("OTTO")
    Cff,
    /// TrueType outlines (version 1.0)
    TrueType,
}

impl Flavor {
    pub fn sfnt_version(self) -> Tag {
        match self {
            Flavor::Cff => CFF_SFNT_VERSION,
            Flavor::TrueType => TRUETYPE_SFNT_VERSION,
        }
    }
}

/// Index format of the "loca" table
///
/// See <https://learn.microsoft.com/en-us/typography/opentype/spec/loca>
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum IndexFormat {
    /// Offsets are stored divided by 2 as u16s
    #[default]
    Short = 0,
    /// Offsets are stored directly as u32s
    Long = 1,
}

/// A glyph outline point in absolute coordinates
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
    pub on_curve: bool,
}

impl Point {
    pub fn new(x: i32, y: i32, on_curve: bool) -> Self {
        Self { x, y, on_curve }
    }
}

/// A single glyph from the "glyf" table, as supplied by the font model.
///
/// Only simple glyphs can be encoded. A negative `number_of_contours`
/// marks a composite glyph, which the encoder rejects.
#[derive(Debug, Clone, Default)]
pub struct GlyphRecord {
    pub number_of_contours: i16,
    /// Index of the last point of each contour, ascending
    pub end_pts_of_contours: Vec<u16>,
    /// All points of the glyph in document order, across contours
    pub points: Vec<Point>,
    /// TrueType instruction bytecode. Must be empty (emission is unsupported).
    pub instructions: Vec<u8>,
}

impl GlyphRecord {
    pub fn is_composite(&self) -> bool {
        self.number_of_contours < 0
    }
}

/// One entry of an SFNT table directory.
///
/// Offsets and lengths are supplied by the caller; the packer serializes
/// them as-is and only validates that entries do not overlap.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TableEntry {
    /// 4-byte table tag
    pub tag: Tag,
    /// Byte offset of the table data from the start of the font file
    pub offset: u32,
    /// Length of the table data in bytes, before padding
    pub length: u32,
    /// Checksum of the table data
    pub checksum: u32,
}

impl TableEntry {
    /// Serialize the 16-byte directory entry record
    pub fn write(&self, out: &mut impl BufMut) {
        out.put_slice(&self.tag.to_be_bytes());
        out.put_u32(self.checksum);
        out.put_u32(self.offset);
        out.put_u32(self.length);
    }
}
