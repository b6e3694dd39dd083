// Image file boundary: decoding covers into RGBA8 and writing stego images losslessly.

use image::codecs::png::PngEncoder;
use image::metadata::Orientation;
use image::{ExtendedColorType, ImageDecoder, ImageEncoder, ImageFormat, ImageReader, RgbaImage};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("cannot tell the image format of {0}")]
    UnsupportedFormat(PathBuf),

    #[error("{0:?} is lossy and would destroy the embedded bits (use png or bmp)")]
    LossyFormat(ImageFormat),
}

/// Formats that store every channel value exactly.
pub fn is_lossless(format: ImageFormat) -> bool {
    matches!(format, ImageFormat::Png | ImageFormat::Bmp)
}

/// Loads an image file as RGBA8. See [`load_image_from_memory`].
pub fn load_image(path: &Path) -> Result<RgbaImage, MediaError> {
    let bytes = fs::read(path).map_err(|source| MediaError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let img = load_image_from_memory(&bytes)?;
    log::debug!(
        "loaded {} ({}x{})",
        path.display(),
        img.width(),
        img.height()
    );
    Ok(img)
}

/// Decodes image bytes as RGBA8, applying EXIF orientation so pixel order matches what a
/// viewer shows. The format is guessed from the content.
pub fn load_image_from_memory(bytes: &[u8]) -> Result<RgbaImage, MediaError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(image::ImageError::from)?;
    let mut decoder = reader.into_decoder()?;
    let orientation = decoder.orientation().unwrap_or(Orientation::NoTransforms);
    let mut img = image::DynamicImage::from_decoder(decoder)?;
    img.apply_orientation(orientation);
    Ok(img.to_rgba8())
}

/// Writes `img` to `path` in the format named by its extension. Only lossless formats are
/// accepted.
pub fn save_image(img: &RgbaImage, path: &Path) -> Result<(), MediaError> {
    let format = ImageFormat::from_path(path)
        .map_err(|_| MediaError::UnsupportedFormat(path.to_path_buf()))?;
    if !is_lossless(format) {
        return Err(MediaError::LossyFormat(format));
    }

    if format == ImageFormat::Png {
        let png_bytes = encode_png(img)?;
        fs::write(path, png_bytes).map_err(|source| MediaError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    } else {
        img.save_with_format(path, format)?;
    }
    log::debug!("wrote {} as {:?}", path.display(), format);
    Ok(())
}

/// Encodes `img` as PNG bytes.
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>, MediaError> {
    let mut out = Cursor::new(Vec::new());
    let encoder = PngEncoder::new(&mut out);
    encoder.write_image(img.as_raw(), img.width(), img.height(), ExtendedColorType::Rgba8)?;
    Ok(out.into_inner())
}
