use font_types::Tag;
use thiserror::Error;

/// Errors produced while packing a font.
///
/// All errors are fatal to the pack call that produced them: no partial
/// output is ever returned alongside an error.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PackError {
    /// A value too large for the 255UInt16 encoding.
    #[error("value {0} does not fit in a 255UInt16")]
    Value255OutOfRange(u32),

    /// A coordinate delta too large for any triplet size class.
    #[error("point delta ({dx}, {dy}) does not fit in a coordinate triplet")]
    DeltaOutOfRange { dx: i32, dy: i32 },

    /// Composite glyph encoding is not implemented.
    #[error("glyph {0} is a composite glyph, which is not supported")]
    CompositeGlyph(u16),

    /// Instruction stream emission is not implemented.
    #[error("glyph {glyph} carries {len} bytes of instructions, which is not supported")]
    Instructions { glyph: u16, len: usize },

    /// Contour end-point indices must be ascending within a glyph.
    #[error("glyph {0}: contour end points are not in ascending order")]
    UnorderedContourEnds(u16),

    /// The transformed glyf header stores the glyph count as a u16.
    #[error("font has {0} glyphs, which does not fit in a u16")]
    TooManyGlyphs(usize),

    /// The SFNT directory references a table with no supplied data.
    #[error("directory lists table '{0}' but no data was supplied for it")]
    MissingTableData(Tag),

    /// Two directory entries claim overlapping byte ranges.
    #[error("table '{tag}' at offset {offset} overlaps the previous table ending at {prev_end}")]
    OverlappingTables { tag: Tag, offset: u32, prev_end: u32 },

    /// A transformed table must record its transformed length.
    #[error("transformed table '{0}' has no transform length")]
    MissingTransformLength(Tag),

    /// The head table must be big enough to hold checkSumAdjustment.
    #[error("'head' table is {0} bytes, too short to hold checkSumAdjustment")]
    HeadTableTooShort(usize),
}
