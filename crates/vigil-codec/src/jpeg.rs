use image::codecs::jpeg::JpegEncoder;
use image::{ImageFormat, RgbImage};

use crate::error::{CodecError, Result};

/// Compress a raw frame to JPEG at the given quality. The input frame is
/// left untouched.
pub fn encode_jpeg(frame: &RgbImage, quality: u8) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let quality = quality.clamp(1, 100);
    JpegEncoder::new_with_quality(&mut buffer, quality)
        .encode_image(frame)
        .map_err(CodecError::Encode)?;
    Ok(buffer)
}

/// Decompress JPEG bytes back into a frame. A decode that succeeds but
/// yields a zero-area image is reported as a failure so callers never
/// forward an empty frame downstream.
pub fn decode_jpeg(bytes: &[u8]) -> Result<RgbImage> {
    let image = image::load_from_memory_with_format(bytes, ImageFormat::Jpeg)
        .map_err(CodecError::Decode)?;
    let frame = image.to_rgb8();
    if frame.width() == 0 || frame.height() == 0 {
        return Err(CodecError::EmptyFrame);
    }
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn gradient_frame(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
        })
    }

    #[test]
    fn test_round_trip_preserves_dimensions() {
        let frame = gradient_frame(64, 48);
        let bytes = encode_jpeg(&frame, 90).unwrap();
        let decoded = decode_jpeg(&bytes).unwrap();
        assert_eq!(decoded.width(), 64);
        assert_eq!(decoded.height(), 48);
    }

    #[test]
    fn test_encode_does_not_mutate_input() {
        let frame = gradient_frame(16, 16);
        let before = frame.clone();
        encode_jpeg(&frame, 75).unwrap();
        assert_eq!(frame, before);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            decode_jpeg(b"not a jpeg"),
            Err(CodecError::Decode(_))
        ));
    }

    #[test]
    fn test_decode_rejects_truncated_input() {
        let bytes = encode_jpeg(&gradient_frame(32, 32), 90).unwrap();
        assert!(decode_jpeg(&bytes[..bytes.len() / 2]).is_err());
    }

    #[test]
    fn test_quality_is_clamped() {
        let frame = gradient_frame(8, 8);
        assert!(encode_jpeg(&frame, 0).is_ok());
        assert!(encode_jpeg(&frame, 255).is_ok());
    }
}
