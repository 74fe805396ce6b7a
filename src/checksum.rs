//! Font checksums and the head table checkSumAdjustment fixup
//!
//! <https://learn.microsoft.com/en-us/typography/opentype/spec/otff#calculating-checksums>

use std::collections::HashMap;

use font_types::Tag;

use crate::error::PackError;
use crate::sfnt::{SFNT_ENTRY_SIZE, SFNT_HEADER_SIZE, SfntHeader};
use crate::types::TableEntry;

/// The whole-font checksum must come out to this value once
/// checkSumAdjustment is applied.
pub const CHECKSUM_MAGIC: u32 = 0xB1B0_AFBA;

/// Byte offset of checkSumAdjustment within the head table
const CHECKSUM_ADJUSTMENT_OFFSET: usize = 8;

const HEAD: Tag = Tag::new(b"head");

/// Compute a checksum over `buf`
///
/// The sum of the buffer interpreted as big-endian u32 words, wrapping on
/// overflow. A tail shorter than 4 bytes is treated as if zero-padded.
pub fn compute_checksum(buf: &[u8]) -> u32 {
    let mut checksum: u32 = 0;
    let mut iter = buf.chunks_exact(4);
    for chunk in &mut iter {
        checksum = checksum.wrapping_add(
            ((chunk[0] as u32) << 24)
                | ((chunk[1] as u32) << 16)
                | ((chunk[2] as u32) << 8)
                | (chunk[3] as u32),
        );
    }

    // The zero padding itself contributes nothing; it only lets the
    // trailing unaligned bytes take effect.
    let word = match *iter.remainder() {
        [a, b, c] => ((a as u32) << 24) | ((b as u32) << 16) | ((c as u32) << 8),
        [a, b] => ((a as u32) << 24) | ((b as u32) << 16),
        [a] => (a as u32) << 24,
        _ => 0,
    };
    checksum.wrapping_add(word)
}

/// Rewrite the head table's checkSumAdjustment field in place.
///
/// Zeroes the field, sums the serialized header, the directory entries and
/// every table's data, and stores `0xB1B0AFBA - sum` back into the head
/// table inside `table_data`. A font without a head table is left alone.
///
/// The directory entry sum is independent of entry order, so the value is
/// valid whether or not the packer later sorts the directory.
pub fn adjust_head_checksum(
    directory: &[TableEntry],
    table_data: &mut HashMap<Tag, Vec<u8>>,
    flavor: Tag,
) -> Result<(), PackError> {
    if !directory.iter().any(|entry| entry.tag == HEAD) {
        return Ok(());
    }

    // checkSumAdjustment = 0
    let head = table_data
        .get_mut(&HEAD)
        .ok_or(PackError::MissingTableData(HEAD))?;
    if head.len() < CHECKSUM_ADJUSTMENT_OFFSET + 4 {
        return Err(PackError::HeadTableTooShort(head.len()));
    }
    head[CHECKSUM_ADJUSTMENT_OFFSET..CHECKSUM_ADJUSTMENT_OFFSET + 4].fill(0);

    // Sum header, directory entries and table data
    let header = SfntHeader::new(flavor, directory.len() as u16);
    let mut header_bytes: Vec<u8> = Vec::with_capacity(SFNT_HEADER_SIZE);
    header.write(&mut header_bytes);
    let mut font_checksum = compute_checksum(&header_bytes);

    for entry in directory {
        let mut entry_bytes: Vec<u8> = Vec::with_capacity(SFNT_ENTRY_SIZE);
        entry.write(&mut entry_bytes);
        font_checksum = font_checksum.wrapping_add(compute_checksum(&entry_bytes));

        let data = table_data
            .get(&entry.tag)
            .ok_or(PackError::MissingTableData(entry.tag))?;
        font_checksum = font_checksum.wrapping_add(compute_checksum(data));
    }

    let adjustment = CHECKSUM_MAGIC.wrapping_sub(font_checksum);
    let head = table_data.get_mut(&HEAD).expect("presence checked above");
    head[CHECKSUM_ADJUSTMENT_OFFSET..CHECKSUM_ADJUSTMENT_OFFSET + 4]
        .copy_from_slice(&adjustment.to_be_bytes());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TRUETYPE_SFNT_VERSION;

    #[test]
    fn checksum_of_aligned_words() {
        let buf = [0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x02];
        assert_eq!(compute_checksum(&buf), 3);
    }

    #[test]
    fn checksum_pads_tail_with_zeros() {
        // [1, 2, 3] reads as the word 0x01020300
        assert_eq!(compute_checksum(&[1, 2, 3]), 0x0102_0300);
        assert_eq!(compute_checksum(&[1, 2, 3]), compute_checksum(&[1, 2, 3, 0]));
    }

    #[test]
    fn checksum_wraps() {
        let buf = [0xff; 8];
        assert_eq!(
            compute_checksum(&buf),
            0xffff_ffffu32.wrapping_add(0xffff_ffff)
        );
    }

    #[test]
    fn adjustment_makes_whole_font_sum_to_magic() {
        // A minimal font: a head table and one other table
        let head_data = vec![0u8; 54];
        let other_data = vec![1u8, 2, 3, 4];
        let directory = [
            TableEntry {
                tag: Tag::new(b"head"),
                offset: 44,
                length: head_data.len() as u32,
                checksum: compute_checksum(&head_data),
            },
            TableEntry {
                tag: Tag::new(b"maxp"),
                offset: 100,
                length: other_data.len() as u32,
                checksum: compute_checksum(&other_data),
            },
        ];
        let mut table_data = HashMap::new();
        table_data.insert(Tag::new(b"head"), head_data);
        table_data.insert(Tag::new(b"maxp"), other_data);

        adjust_head_checksum(&directory, &mut table_data, TRUETYPE_SFNT_VERSION).unwrap();

        // Re-sum everything the adjustment covered, minus the adjustment
        // field itself, and check the identity sum + adjustment == magic.
        let head = &table_data[&Tag::new(b"head")];
        let adjustment = u32::from_be_bytes(head[8..12].try_into().unwrap());

        let header = SfntHeader::new(TRUETYPE_SFNT_VERSION, 2);
        let mut bytes: Vec<u8> = Vec::new();
        header.write(&mut bytes);
        for entry in &directory {
            entry.write(&mut bytes);
        }
        let mut sum = compute_checksum(&bytes);
        let mut head_without_adjustment = head.clone();
        head_without_adjustment[8..12].fill(0);
        sum = sum.wrapping_add(compute_checksum(&head_without_adjustment));
        sum = sum.wrapping_add(compute_checksum(&table_data[&Tag::new(b"maxp")]));

        assert_eq!(sum.wrapping_add(adjustment), CHECKSUM_MAGIC);
    }

    #[test]
    fn short_head_table_is_fatal() {
        let directory = [TableEntry {
            tag: Tag::new(b"head"),
            offset: 12,
            length: 4,
            checksum: 0,
        }];
        let mut table_data = HashMap::new();
        table_data.insert(Tag::new(b"head"), vec![0u8; 4]);
        assert_eq!(
            adjust_head_checksum(&directory, &mut table_data, TRUETYPE_SFNT_VERSION),
            Err(PackError::HeadTableTooShort(4))
        );
    }
}
