//! WOFF2 table directory packing
//!
//! <https://www.w3.org/TR/WOFF2/#table_dir_format>

use bytes::BufMut;
use font_types::Tag;

use crate::error::PackError;
use crate::table_tags::{UNKNOWN_TABLE_TAG_FLAG, is_transformed_tag, known_tag_index};
use crate::variable_length::BufMutVariableExt as _;

/// One entry of a WOFF2 table directory
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Woff2DirectoryEntry {
    /// 4-byte table tag
    pub tag: Tag,
    /// Length of the original (untransformed) table data
    pub orig_length: u32,
    /// Length of the transformed data. Required for transformed tables
    /// (glyf and loca), meaningless for everything else.
    pub transform_length: Option<u32>,
}

/// Serialize a WOFF2 table directory.
///
/// Entries are emitted in input order; a known tag is stored as its 1-byte
/// registry index, any other tag as the sentinel byte 63 followed by the
/// raw tag bytes.
pub fn pack_directory(directory: &[Woff2DirectoryEntry]) -> Result<Vec<u8>, PackError> {
    let mut out: Vec<u8> = Vec::with_capacity(directory.len() * 10);
    for entry in directory {
        match known_tag_index(entry.tag) {
            Some(index) => out.put_u8(index),
            None => {
                out.put_u8(UNKNOWN_TABLE_TAG_FLAG);
                out.put_slice(&entry.tag.to_be_bytes());
            }
        }
        out.put_base128(entry.orig_length);
        if is_transformed_tag(entry.tag) {
            let transform_length = entry
                .transform_length
                .ok_or(PackError::MissingTransformLength(entry.tag))?;
            out.put_base128(transform_length);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tag_packs_as_registry_index() {
        let directory = [Woff2DirectoryEntry {
            tag: Tag::new(b"glyf"),
            orig_length: 100,
            transform_length: Some(80),
        }];
        let out = pack_directory(&directory).unwrap();
        // index 10, base128(100), base128(80)
        assert_eq!(out, vec![10, 100, 80]);
    }

    #[test]
    fn unknown_tag_packs_as_sentinel_plus_raw_tag() {
        let directory = [Woff2DirectoryEntry {
            tag: Tag::new(b"XXXX"),
            orig_length: 300,
            transform_length: None,
        }];
        let out = pack_directory(&directory).unwrap();
        assert_eq!(out, vec![63, b'X', b'X', b'X', b'X', 0x82, 0x2c]);
    }

    #[test]
    fn untransformed_table_has_no_transform_length() {
        let directory = [Woff2DirectoryEntry {
            tag: Tag::new(b"head"),
            orig_length: 54,
            // Ignored for an untransformed table
            transform_length: Some(54),
        }];
        let out = pack_directory(&directory).unwrap();
        assert_eq!(out, vec![1, 54]);
    }

    #[test]
    fn transformed_table_requires_transform_length() {
        let directory = [Woff2DirectoryEntry {
            tag: Tag::new(b"loca"),
            orig_length: 24,
            transform_length: None,
        }];
        assert_eq!(
            pack_directory(&directory),
            Err(PackError::MissingTransformLength(Tag::new(b"loca")))
        );
    }

    #[test]
    fn entries_keep_input_order() {
        let directory = [
            Woff2DirectoryEntry {
                tag: Tag::new(b"head"),
                orig_length: 54,
                transform_length: None,
            },
            Woff2DirectoryEntry {
                tag: Tag::new(b"cmap"),
                orig_length: 20,
                transform_length: None,
            },
        ];
        let out = pack_directory(&directory).unwrap();
        assert_eq!(out, vec![1, 54, 0, 20]);
    }
}
