//! JPEG image format support
//!
//! Reads baseline and progressive JPEG through `jpeg-decoder` and writes
//! baseline JPEG through `jpeg-encoder`. Grayscale and RGB are supported;
//! CMYK input is rejected.

use crate::{IoError, IoResult};
use boardcheck_core::{Channels, Raster};
use jpeg_decoder::{Decoder, PixelFormat};
use std::io::{Read, Write};

/// Quality used when writing annotated output images.
pub const DEFAULT_QUALITY: u8 = 95;

/// Read a JPEG image from a reader.
///
/// # Arguments
/// * `reader` - A reader positioned at the JPEG SOI marker (`FF D8`)
///
/// # Returns
/// A 1-channel raster for grayscale files, 3-channel RGB otherwise.
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<Raster> {
    let mut decoder = Decoder::new(reader);
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("JPEG header missing".to_string()))?;

    let width = info.width as u32;
    let height = info.height as u32;

    match info.pixel_format {
        PixelFormat::L8 => Ok(Raster::from_vec(width, height, Channels::Gray, pixels)?),
        // Big-endian 16-bit samples; keep the high byte.
        PixelFormat::L16 => {
            let data = pixels.chunks_exact(2).map(|s| s[0]).collect();
            Ok(Raster::from_vec(width, height, Channels::Gray, data)?)
        }
        PixelFormat::RGB24 => Ok(Raster::from_vec(width, height, Channels::Rgb, pixels)?),
        PixelFormat::CMYK32 => Err(IoError::UnsupportedFormat(
            "CMYK JPEG is not supported".to_string(),
        )),
    }
}

/// Write a raster as JPEG with the given quality (1..=100).
///
/// # Errors
///
/// Returns [`IoError::EncodeError`] if either dimension exceeds 65535,
/// the JPEG limit.
pub fn write_jpeg<W: Write>(raster: &Raster, writer: W, quality: u8) -> IoResult<()> {
    let width = u16::try_from(raster.width()).map_err(|_| {
        IoError::EncodeError(format!("width {} too large for JPEG", raster.width()))
    })?;
    let height = u16::try_from(raster.height()).map_err(|_| {
        IoError::EncodeError(format!("height {} too large for JPEG", raster.height()))
    })?;
    let color_type = match raster.channels() {
        Channels::Gray => jpeg_encoder::ColorType::Luma,
        Channels::Rgb => jpeg_encoder::ColorType::Rgb,
    };

    let encoder = jpeg_encoder::Encoder::new(writer, quality.clamp(1, 100));
    encoder
        .encode(raster.data(), width, height, color_type)
        .map_err(|e| IoError::EncodeError(format!("JPEG encode error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_jpeg_roundtrip_gray_flat() {
        let raster = Raster::new_filled(16, 16, Channels::Gray, 128).unwrap();
        let mut buffer = Vec::new();
        write_jpeg(&raster, &mut buffer, DEFAULT_QUALITY).unwrap();
        assert_eq!(&buffer[..3], &[0xFF, 0xD8, 0xFF]);

        let decoded = read_jpeg(Cursor::new(buffer)).unwrap();
        assert_eq!(decoded.dimensions(), (16, 16));
        assert_eq!(decoded.channels(), Channels::Gray);
        for &v in decoded.data() {
            assert!((v as i32 - 128).abs() <= 2);
        }
    }

    #[test]
    fn test_jpeg_rgb_channels_preserved() {
        let mut raster = Raster::new(16, 16, Channels::Rgb).unwrap();
        for y in 0..16 {
            for x in 0..16 {
                raster.set_rgb(x, y, 0, 200, 0).unwrap();
            }
        }
        let mut buffer = Vec::new();
        write_jpeg(&raster, &mut buffer, DEFAULT_QUALITY).unwrap();
        let decoded = read_jpeg(Cursor::new(buffer)).unwrap();
        assert_eq!(decoded.channels(), Channels::Rgb);
        let (r, g, b) = decoded.get_rgb(8, 8).unwrap();
        assert!(r < 20 && g > 180 && b < 20);
    }

    #[test]
    fn test_jpeg_garbage_rejected() {
        assert!(read_jpeg(Cursor::new(vec![0xFF, 0xD8, 0xFF, 0x00])).is_err());
    }
}
