//! Pure Rust SFNT and WOFF2 font packing
//!
//! The encoding-direction counterpart of a WOFF decoder: raw font tables
//! and glyph outlines go in, valid container bytes come out.
//!
//! - [`sfnt::pack_sfnt`] assembles a plain SFNT (TrueType/OpenType) file
//!   from a table directory and per-table data, fixing up the head table's
//!   checkSumAdjustment on the way.
//! - [`woff::glyf_encoder::transform_glyf`] re-encodes TrueType glyph
//!   outlines into the WOFF2 "transformed glyf" multi-stream layout.
//! - [`woff::directory::pack_directory`] serializes a WOFF2 table
//!   directory using the known-tag registry and base-128 lengths.
//!
//! Parsing input fonts into table bytes and glyph records is the caller's
//! job; this crate only ever produces bytes.

pub mod checksum;
pub mod error;
pub mod sfnt;
pub mod table_tags;
pub mod types;
pub mod variable_length;
pub mod woff;

#[cfg(feature = "brotli")]
pub mod compress;

pub use error::PackError;
pub use types::{Flavor, GlyphRecord, IndexFormat, Point, TableEntry};

/// Round a value up to the nearest multiple of 4, saturating rather than
/// overflowing at the top of the range.
pub(crate) fn round4(value: usize) -> usize {
    match value.checked_add(3) {
        Some(value_plus_3) => value_plus_3 & !3,
        None => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round4_rounds_up() {
        assert_eq!(round4(0), 0);
        assert_eq!(round4(1), 4);
        assert_eq!(round4(4), 4);
        assert_eq!(round4(5), 8);
        assert_eq!(round4(usize::MAX), usize::MAX);
    }
}
