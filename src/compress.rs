//! Brotli compression of the concatenated font data stream

use brotli::enc::BrotliEncoderParams;
use brotli::enc::backward_references::BrotliEncoderMode;

/// Compress a font data blob with brotli in font mode.
///
/// Returns the input verbatim whenever compression fails to shrink it, so
/// the result is never larger than the input.
pub fn compress_font_data(data: &[u8]) -> Vec<u8> {
    let params = BrotliEncoderParams {
        quality: 11,
        mode: BrotliEncoderMode::BROTLI_MODE_FONT,
        ..Default::default()
    };

    let mut compressed: Vec<u8> = Vec::with_capacity(data.len());
    let mut input = data;
    if brotli::BrotliCompress(&mut input, &mut compressed, &params).is_err() {
        return data.to_vec();
    }

    if compressed.len() >= data.len() {
        data.to_vec()
    } else {
        compressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compressible_data_shrinks() {
        let data = vec![0u8; 4096];
        let compressed = compress_font_data(&data);
        assert!(compressed.len() < data.len());
    }

    #[test]
    fn incompressible_data_falls_back_to_input() {
        // Tiny inputs gain nothing from compression
        let data = [0x42u8];
        assert_eq!(compress_font_data(&data), data);
    }
}
