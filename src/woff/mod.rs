//! WOFF2 packing: table directory, file header and the glyf transform

pub mod directory;
pub mod glyf_encoder;
pub mod header;

use font_types::Tag;

use crate::error::PackError;
use crate::round4;
use crate::types::{GlyphRecord, IndexFormat};

/// Produce the (original, transformed) data pair for one table.
///
/// glyf is re-encoded through the stream transformer, loca collapses to
/// empty (its offsets are reconstructible from the transformed glyf), and
/// every other table passes through unchanged.
pub fn transform_table(
    tag: Tag,
    orig_data: &[u8],
    glyphs: &[GlyphRecord],
    index_format: IndexFormat,
) -> Result<(Vec<u8>, Vec<u8>), PackError> {
    let transformed = match tag.as_ref() {
        b"glyf" => glyf_encoder::transform_glyf(glyphs, index_format)?,
        b"loca" => Vec::new(),
        _ => orig_data.to_vec(),
    };
    Ok((orig_data.to_vec(), transformed))
}

/// Prepare an already-compressed metadata block for the file.
///
/// Metadata is a pure pass-through, but when a private data block follows
/// it the metadata must be padded out to a 4-byte boundary. Private data
/// itself is appended verbatim, unpadded.
pub fn pack_metadata(compressed_metadata: &[u8], have_private_data: bool) -> Vec<u8> {
    let mut out = compressed_metadata.to_vec();
    if have_private_data {
        out.resize(round4(out.len()), 0);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loca_transforms_to_empty() {
        let (orig, transformed) =
            transform_table(Tag::new(b"loca"), &[1, 2, 3, 4], &[], IndexFormat::Short).unwrap();
        assert_eq!(orig, vec![1, 2, 3, 4]);
        assert!(transformed.is_empty());
    }

    #[test]
    fn other_tables_pass_through() {
        let data = [9u8, 8, 7];
        let (orig, transformed) =
            transform_table(Tag::new(b"cmap"), &data, &[], IndexFormat::Short).unwrap();
        assert_eq!(orig, data);
        assert_eq!(transformed, data);
    }

    #[test]
    fn metadata_padding_depends_on_private_data() {
        assert_eq!(pack_metadata(&[1, 2, 3], false), vec![1, 2, 3]);
        assert_eq!(pack_metadata(&[1, 2, 3], true), vec![1, 2, 3, 0]);
        assert_eq!(pack_metadata(&[1, 2, 3, 4], true), vec![1, 2, 3, 4]);
    }
}
