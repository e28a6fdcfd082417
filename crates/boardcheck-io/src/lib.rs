//! boardcheck-io - Raster file I/O
//!
//! Reads and writes the two formats board photographs arrive in:
//!
//! - **PNG** (feature `png-format`, via the `png` crate)
//! - **JPEG** (feature `jpeg`, via `jpeg-decoder` and `jpeg-encoder`)
//!
//! Reading detects the format from the leading magic bytes, so a
//! mislabelled extension is harmless. Writing picks the encoder from the
//! requested [`ImageFormat`].

pub mod error;
pub mod format;

#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png-format")]
pub mod png;

pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format, detect_format_from_bytes};

use boardcheck_core::Raster;
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Read, Seek, SeekFrom, Write};
use std::path::Path;

/// Read an image from a file path.
///
/// # Errors
///
/// Returns [`IoError::Io`] if the file cannot be opened, and
/// [`IoError::UnsupportedFormat`] if its header matches no enabled format.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Raster> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut header = [0u8; 8];
    let n = reader.read(&mut header)?;
    let format = detect_format_from_bytes(&header[..n])?;
    reader.seek(SeekFrom::Start(0))?;
    let raster = read_image_format(reader, format)?;
    tracing::debug!(
        path = %path.display(),
        width = raster.width(),
        height = raster.height(),
        channels = raster.channels().count(),
        "read image"
    );
    Ok(raster)
}

/// Read an image from an in-memory buffer.
pub fn read_image_mem(data: &[u8]) -> IoResult<Raster> {
    let format = detect_format_from_bytes(data)?;
    read_image_format(Cursor::new(data), format)
}

/// Read an image of a known format.
pub fn read_image_format<R: Read + Seek + std::io::BufRead>(
    reader: R,
    format: ImageFormat,
) -> IoResult<Raster> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(reader),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::read_jpeg(reader),
        #[allow(unreachable_patterns)]
        other => Err(IoError::UnsupportedFormat(format!(
            "{:?} support not enabled",
            other
        ))),
    }
}

/// Write an image to a file path in the given format.
///
/// Parent directories must already exist.
pub fn write_image<P: AsRef<Path>>(raster: &Raster, path: P, format: ImageFormat) -> IoResult<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_image_format(raster, &mut writer, format)?;
    writer.flush()?;
    tracing::debug!(path = %path.display(), ?format, "wrote image");
    Ok(())
}

/// Encode an image into a new byte buffer.
pub fn write_image_mem(raster: &Raster, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut buffer = Vec::new();
    write_image_format(raster, &mut buffer, format)?;
    Ok(buffer)
}

/// Encode an image to any writer.
pub fn write_image_format<W: Write>(raster: &Raster, writer: W, format: ImageFormat) -> IoResult<()> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(raster, writer),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::write_jpeg(raster, writer, jpeg::DEFAULT_QUALITY),
        #[allow(unreachable_patterns)]
        other => {
            let _ = writer;
            Err(IoError::UnsupportedFormat(format!(
                "{:?} support not enabled",
                other
            )))
        }
    }
}
