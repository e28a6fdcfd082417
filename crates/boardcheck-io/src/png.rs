//! PNG image format support
//!
//! Decoding expands palettes and low bit depths and strips 16-bit
//! samples, so every PNG arrives as 8-bit gray, gray+alpha, RGB or RGBA.
//! Alpha is dropped.

use crate::{IoError, IoResult};
use boardcheck_core::{Channels, Raster};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Raster> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let width = output_info.width;
    let height = output_info.height;
    let bytes_per_row = output_info.line_size;
    let (color_type, bit_depth) = reader.output_color_type();
    if bit_depth != BitDepth::Eight {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported PNG output depth: {:?}",
            bit_depth
        )));
    }

    let (channels, samples) = match color_type {
        ColorType::Grayscale => (Channels::Gray, 1),
        ColorType::GrayscaleAlpha => (Channels::Gray, 2),
        ColorType::Rgb => (Channels::Rgb, 3),
        ColorType::Rgba => (Channels::Rgb, 4),
        ColorType::Indexed => {
            return Err(IoError::UnsupportedFormat(
                "indexed PNG was not expanded".to_string(),
            ));
        }
    };

    let keep = channels.count();
    let mut data = Vec::with_capacity(width as usize * height as usize * keep);
    for y in 0..height as usize {
        let row = &buf[y * bytes_per_row..y * bytes_per_row + width as usize * samples];
        for px in row.chunks_exact(samples) {
            data.extend_from_slice(&px[..keep]);
        }
    }

    Ok(Raster::from_vec(width, height, channels, data)?)
}

/// Write a PNG image
pub fn write_png<W: Write>(raster: &Raster, writer: W) -> IoResult<()> {
    let color_type = match raster.channels() {
        Channels::Gray => ColorType::Grayscale,
        Channels::Rgb => ColorType::Rgb,
    };

    let mut encoder = Encoder::new(writer, raster.width(), raster.height());
    encoder.set_color(color_type);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    writer
        .write_image_data(raster.data())
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_png_roundtrip_grayscale() {
        let mut raster = Raster::new(10, 10, Channels::Gray).unwrap();
        for y in 0..10 {
            for x in 0..10 {
                raster.set_pixel(x, y, ((x + y) * 10) as u8).unwrap();
            }
        }

        let mut buffer = Vec::new();
        write_png(&raster, &mut buffer).unwrap();
        let decoded = read_png(Cursor::new(buffer)).unwrap();

        assert_eq!(decoded, raster);
    }

    #[test]
    fn test_png_roundtrip_rgb() {
        let mut raster = Raster::new(5, 5, Channels::Rgb).unwrap();
        raster.set_rgb(0, 0, 255, 0, 0).unwrap();
        raster.set_rgb(1, 1, 0, 255, 0).unwrap();
        raster.set_rgb(2, 2, 0, 0, 255).unwrap();

        let mut buffer = Vec::new();
        write_png(&raster, &mut buffer).unwrap();
        let decoded = read_png(Cursor::new(buffer)).unwrap();

        assert_eq!(decoded.channels(), Channels::Rgb);
        assert_eq!(decoded.get_rgb(0, 0), Some((255, 0, 0)));
        assert_eq!(decoded.get_rgb(1, 1), Some((0, 255, 0)));
        assert_eq!(decoded.get_rgb(2, 2), Some((0, 0, 255)));
    }
}
