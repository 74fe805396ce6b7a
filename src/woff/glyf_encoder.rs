//! Encoder for the WOFF2 transformed glyf table
//!
//! <https://www.w3.org/TR/WOFF2/#glyf_table_format>

use arrayvec::ArrayVec;
use bytes::BufMut;

use crate::error::PackError;
use crate::types::{GlyphRecord, IndexFormat};
use crate::variable_length::BufMutVariableExt as _;

/// version + numGlyphs + indexFormat + the seven stream sizes
pub const TRANSFORMED_GLYF_HEADER_SIZE: usize = 36;

/// Encode one point delta as a (flag, payload) coordinate triplet.
///
/// Exactly one of the size classes applies, chosen in priority order by the
/// delta magnitudes. Bit 7 of the flag is set when the point is *off*-curve;
/// the sign bits are bit 0 for dx > 0 and bit 1 for dy > 0 (a zero delta
/// contributes no sign bit). The largest class stores full 16-bit
/// magnitudes, so any delta of a pair of 16-bit coordinates is encodable.
pub fn encode_triplet(
    dx: i32,
    dy: i32,
    on_curve: bool,
) -> Result<(u8, ArrayVec<u8, 4>), PackError> {
    let abs_x = (dx as i64).unsigned_abs();
    let abs_y = (dy as i64).unsigned_abs();
    if abs_x >= 65536 || abs_y >= 65536 {
        return Err(PackError::DeltaOutOfRange { dx, dy });
    }
    let abs_x = abs_x as i32;
    let abs_y = abs_y as i32;

    let on_curve_bit: i32 = if on_curve { 0 } else { 128 };
    let x_sign_bit: i32 = (dx > 0) as i32;
    let y_sign_bit: i32 = (dy > 0) as i32;
    let xy_sign_bits = x_sign_bit + 2 * y_sign_bit;

    let mut payload: ArrayVec<u8, 4> = ArrayVec::new();
    let flag: i32;
    if dx == 0 && abs_y < 1280 {
        flag = on_curve_bit + ((abs_y & 0xf00) >> 7) + y_sign_bit;
        payload.push((abs_y & 0xff) as u8);
    } else if dy == 0 && abs_x < 1280 {
        flag = on_curve_bit + 10 + ((abs_x & 0xf00) >> 7) + x_sign_bit;
        payload.push((abs_x & 0xff) as u8);
    } else if abs_x < 65 && abs_y < 65 {
        flag = on_curve_bit + 20 + ((abs_x - 1) & 0x30) + (((abs_y - 1) & 0x30) >> 2) + xy_sign_bits;
        payload.push(((((abs_x - 1) & 0xf) << 4) | ((abs_y - 1) & 0xf)) as u8);
    } else if abs_x < 769 && abs_y < 769 {
        flag = on_curve_bit
            + 84
            + 12 * (((abs_x - 1) & 0x300) >> 8)
            + (((abs_y - 1) & 0x300) >> 6)
            + xy_sign_bits;
        payload.push(((abs_x - 1) & 0xff) as u8);
        payload.push(((abs_y - 1) & 0xff) as u8);
    } else if abs_x < 4096 && abs_y < 4096 {
        flag = on_curve_bit + 120 + xy_sign_bits;
        payload.push((abs_x >> 4) as u8);
        payload.push((((abs_x & 0xf) << 4) | (abs_y >> 8)) as u8);
        payload.push((abs_y & 0xff) as u8);
    } else {
        flag = on_curve_bit + 124 + xy_sign_bits;
        payload.push((abs_x >> 8) as u8);
        payload.push((abs_x & 0xff) as u8);
        payload.push((abs_y >> 8) as u8);
        payload.push((abs_y & 0xff) as u8);
    }

    Ok((flag as u8, payload))
}

/// Re-encode a sequence of simple glyphs as a transformed glyf table.
pub fn transform_glyf(
    glyphs: &[GlyphRecord],
    index_format: IndexFormat,
) -> Result<Vec<u8>, PackError> {
    let num_glyphs =
        u16::try_from(glyphs.len()).map_err(|_| PackError::TooManyGlyphs(glyphs.len()))?;

    let mut encoder = GlyfEncoder::new(num_glyphs, index_format);
    for (glyph_id, glyph) in glyphs.iter().enumerate() {
        encoder.encode_glyph(glyph_id as u16, glyph)?;
    }
    Ok(encoder.finish())
}

/// Owns one set of per-call output streams; nothing is shared across calls.
pub struct GlyfEncoder {
    n_contour_stream: Vec<u8>,
    n_points_stream: Vec<u8>,
    flag_stream: Vec<u8>,
    glyph_stream: Vec<u8>,
    composite_stream: Vec<u8>,
    bbox_stream: Vec<u8>,
    instruction_stream: Vec<u8>,
    num_glyphs: u16,
    index_format: IndexFormat,
}

impl GlyfEncoder {
    pub fn new(num_glyphs: u16, index_format: IndexFormat) -> Self {
        Self {
            n_contour_stream: Vec::with_capacity(num_glyphs as usize * 2),
            n_points_stream: Vec::new(),
            flag_stream: Vec::new(),
            glyph_stream: Vec::new(),
            composite_stream: Vec::new(),
            bbox_stream: Vec::new(),
            instruction_stream: Vec::new(),
            num_glyphs,
            index_format,
        }
    }

    /// Append one simple glyph to the output streams
    pub fn encode_glyph(&mut self, glyph_id: u16, glyph: &GlyphRecord) -> Result<(), PackError> {
        if glyph.is_composite() {
            return Err(PackError::CompositeGlyph(glyph_id));
        }

        self.n_contour_stream.put_i16(glyph.number_of_contours);

        // Per-contour point counts. The count of the first contour is its
        // end index plus one; later contours are deltas between end indices.
        let mut last_end_pt: u16 = 0;
        for (i, &end_pt) in glyph.end_pts_of_contours.iter().enumerate() {
            let first_contour_adjustment = (i == 0) as u32;
            let n_points = (end_pt as u32)
                .checked_sub(last_end_pt as u32)
                .ok_or(PackError::UnorderedContourEnds(glyph_id))?
                + first_contour_adjustment;
            self.n_points_stream.put_255_u16(n_points)?;
            last_end_pt = end_pt;
        }

        // Point deltas, relative to (0, 0) at the start of the glyph and
        // carried across contour boundaries.
        let mut last_x: i32 = 0;
        let mut last_y: i32 = 0;
        for point in &glyph.points {
            let dx = point.x - last_x;
            let dy = point.y - last_y;
            last_x = point.x;
            last_y = point.y;

            let (flag, payload) = encode_triplet(dx, dy, point.on_curve)?;
            self.flag_stream.push(flag);
            self.glyph_stream.extend_from_slice(&payload);
        }

        if glyph.number_of_contours > 0 {
            if !glyph.instructions.is_empty() {
                return Err(PackError::Instructions {
                    glyph: glyph_id,
                    len: glyph.instructions.len(),
                });
            }
            // Zero instruction length. The WOFF2 spec does not say whether
            // this field exists for contour-less glyphs; the reference
            // implementation writes it only when there are contours.
            self.glyph_stream.put_255_u16(0)?;
        }

        Ok(())
    }

    /// Serialize the 36-byte header and the streams in their fixed order
    pub fn finish(self) -> Vec<u8> {
        // All-zero bitmap: every bounding box is left for the decoder to
        // recompute. One bit per glyph, padded to a multiple of 4 bytes.
        let bbox_bitmap = vec![0u8; 4 * (self.num_glyphs as usize).div_ceil(32)];
        let bbox_stream_size = bbox_bitmap.len() + self.bbox_stream.len();

        let total_size = TRANSFORMED_GLYF_HEADER_SIZE
            + self.n_contour_stream.len()
            + self.n_points_stream.len()
            + self.flag_stream.len()
            + self.glyph_stream.len()
            + self.composite_stream.len()
            + bbox_stream_size
            + self.instruction_stream.len();
        let mut out: Vec<u8> = Vec::with_capacity(total_size);

        out.put_u32(0); // version
        out.put_u16(self.num_glyphs);
        out.put_u16(self.index_format as u16);
        out.put_u32(self.n_contour_stream.len() as u32);
        out.put_u32(self.n_points_stream.len() as u32);
        out.put_u32(self.flag_stream.len() as u32);
        out.put_u32(self.glyph_stream.len() as u32);
        out.put_u32(self.composite_stream.len() as u32);
        out.put_u32(bbox_stream_size as u32);
        out.put_u32(self.instruction_stream.len() as u32);

        out.extend_from_slice(&self.n_contour_stream);
        out.extend_from_slice(&self.n_points_stream);
        out.extend_from_slice(&self.flag_stream);
        out.extend_from_slice(&self.glyph_stream);
        out.extend_from_slice(&self.composite_stream);
        out.extend_from_slice(&bbox_bitmap);
        out.extend_from_slice(&self.bbox_stream);
        out.extend_from_slice(&self.instruction_stream);

        out
    }
}
