//! SFNT container packing
//!
//! <https://learn.microsoft.com/en-us/typography/opentype/spec/otff#table-directory>

use std::collections::HashMap;

use bytes::BufMut;
use font_types::Tag;

use crate::checksum::adjust_head_checksum;
use crate::error::PackError;
use crate::round4;
use crate::types::{Flavor, TableEntry};

pub const SFNT_HEADER_SIZE: usize = 12;
pub const SFNT_ENTRY_SIZE: usize = 16;

/// The fixed-size record at the start of an SFNT font
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SfntHeader {
    /// "OTTO" for CFF outlines, 0x00010000 for TrueType outlines
    pub sfnt_version: Tag,
    pub num_tables: u16,
    pub search_range: u16,
    pub entry_selector: u16,
    pub range_shift: u16,
}

impl SfntHeader {
    /// Build a header with the binary-search fields derived from `num_tables`
    pub fn new(sfnt_version: Tag, num_tables: u16) -> Self {
        let (search_range, entry_selector, range_shift) = search_range_params(num_tables);
        Self {
            sfnt_version,
            num_tables,
            search_range,
            entry_selector,
            range_shift,
        }
    }

    pub fn write(&self, out: &mut impl BufMut) {
        out.put_slice(&self.sfnt_version.to_be_bytes());
        out.put_u16(self.num_tables);
        out.put_u16(self.search_range);
        out.put_u16(self.entry_selector);
        out.put_u16(self.range_shift);
    }
}

/// Derive (searchRange, entrySelector, rangeShift) from the table count.
///
/// entrySelector is log2 of the largest power of two <= num_tables,
/// searchRange is that power of two times 16 (the directory entry size).
pub fn search_range_params(num_tables: u16) -> (u16, u16, u16) {
    if num_tables == 0 {
        return (0, 0, 0);
    }
    let entry_selector: u32 = 15 - num_tables.leading_zeros();
    let search_range: u32 = (1 << entry_selector) * 16;
    let range_shift: u32 = (num_tables as u32) * 16 - search_range;
    (search_range as u16, entry_selector as u16, range_shift as u16)
}

/// Options controlling [`pack_sfnt`]
#[derive(Debug, Copy, Clone)]
pub struct SfntPackOptions {
    /// Fix up head.checkSumAdjustment before serializing
    pub calc_checksum: bool,
    /// Pad each table's data to a 4-byte boundary with zeros
    pub apply_padding: bool,
    /// Emit the directory block in tag-sorted order rather than input order
    pub sort_directory: bool,
    /// Overrides for the derived binary-search header fields
    pub search_range: Option<u16>,
    pub entry_selector: Option<u16>,
    pub range_shift: Option<u16>,
}

impl Default for SfntPackOptions {
    fn default() -> Self {
        Self {
            calc_checksum: true,
            apply_padding: true,
            sort_directory: true,
            search_range: None,
            entry_selector: None,
            range_shift: None,
        }
    }
}

/// Assemble a complete SFNT font from a directory and its table data.
///
/// The packer trusts the offsets and lengths stored in `directory`; it does
/// not recompute them. It does reject a directory entry with no data in
/// `table_data`, and entries whose stored ranges overlap.
///
/// `table_data` is taken mutably because the checksum fixup rewrites the
/// head table's checkSumAdjustment field in place.
pub fn pack_sfnt(
    directory: &[TableEntry],
    table_data: &mut HashMap<Tag, Vec<u8>>,
    flavor: Flavor,
    options: &SfntPackOptions,
) -> Result<Vec<u8>, PackError> {
    // Validate the directory up front so that errors can't leave a
    // half-adjusted head table behind.
    for entry in directory {
        if !table_data.contains_key(&entry.tag) {
            return Err(PackError::MissingTableData(entry.tag));
        }
    }

    if options.calc_checksum {
        adjust_head_checksum(directory, table_data, flavor.sfnt_version())?;
    }

    let mut header = SfntHeader::new(flavor.sfnt_version(), directory.len() as u16);
    if let Some(search_range) = options.search_range {
        header.search_range = search_range;
    }
    if let Some(entry_selector) = options.entry_selector {
        header.entry_selector = entry_selector;
    }
    if let Some(range_shift) = options.range_shift {
        header.range_shift = range_shift;
    }

    let data_size: usize = directory
        .iter()
        .map(|entry| round4(table_data[&entry.tag].len()))
        .sum();
    let mut out: Vec<u8> =
        Vec::with_capacity(SFNT_HEADER_SIZE + directory.len() * SFNT_ENTRY_SIZE + data_size);

    header.write(&mut out);

    // Directory block
    if options.sort_directory {
        let mut sorted: Vec<&TableEntry> = directory.iter().collect();
        sorted.sort_by_key(|entry| entry.tag);
        for entry in sorted {
            entry.write(&mut out);
        }
    } else {
        for entry in directory {
            entry.write(&mut out);
        }
    }

    // Table data, in ascending stored-offset order (not directory order)
    let mut by_offset: Vec<&TableEntry> = directory.iter().collect();
    by_offset.sort_by_key(|entry| (entry.offset, entry.tag));

    let mut prev_end: u32 = 0;
    for entry in by_offset {
        if entry.offset < prev_end {
            return Err(PackError::OverlappingTables {
                tag: entry.tag,
                offset: entry.offset,
                prev_end,
            });
        }
        out.extend_from_slice(&table_data[&entry.tag]);
        if options.apply_padding {
            out.resize(round4(out.len()), 0);
        }
        prev_end = entry.offset.saturating_add(entry.length);
    }

    Ok(out)
}
