//! Image loading and PNG/base64 encoding.

use std::io::Cursor;
use std::path::Path;

use base64::Engine;
use image::buffer::ConvertBuffer;
use image::{DynamicImage, GrayImage, ImageFormat, RgbImage, RgbaImage};

use crate::types::{VerdictError, VerdictResult};

/// Prefix of a PNG data URL.
const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// An in-memory raster a comparator can read but never mutates.
pub trait Raster {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Serialize to PNG bytes (lossless).
    fn encode_png(&self) -> VerdictResult<Vec<u8>>;

    /// 8-bit RGBA view used for pixel comparison.
    fn to_rgba8(&self) -> RgbaImage;
}

impl Raster for DynamicImage {
    fn width(&self) -> u32 {
        DynamicImage::width(self)
    }

    fn height(&self) -> u32 {
        DynamicImage::height(self)
    }

    fn encode_png(&self) -> VerdictResult<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
        Ok(buf)
    }

    fn to_rgba8(&self) -> RgbaImage {
        DynamicImage::to_rgba8(self)
    }
}

macro_rules! impl_raster_for_buffer {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Raster for $ty {
                fn width(&self) -> u32 {
                    <$ty>::width(self)
                }

                fn height(&self) -> u32 {
                    <$ty>::height(self)
                }

                fn encode_png(&self) -> VerdictResult<Vec<u8>> {
                    let mut buf = Vec::new();
                    self.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
                    Ok(buf)
                }

                fn to_rgba8(&self) -> RgbaImage {
                    self.convert()
                }
            }
        )+
    };
}

impl_raster_for_buffer!(RgbImage, RgbaImage, GrayImage);

/// Load an image from a file path.
pub fn load_from_file(path: impl AsRef<Path>) -> VerdictResult<DynamicImage> {
    let path = path.as_ref();
    let img = image::open(path)?;
    tracing::debug!(
        "Loaded {} ({}x{})",
        path.display(),
        img.width(),
        img.height()
    );
    Ok(img)
}

/// Encode an image as base64 text of its PNG bytes.
pub fn encode_png_base64(img: &dyn Raster) -> VerdictResult<String> {
    let png = img.encode_png()?;
    Ok(base64::engine::general_purpose::STANDARD.encode(png))
}

/// Decode base64 PNG text back into an image.
pub fn decode_png_base64(data: &str) -> VerdictResult<DynamicImage> {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(data)
        .map_err(|e| VerdictError::InvalidInput(format!("Invalid base64: {e}")))?;
    Ok(image::load_from_memory_with_format(&bytes, ImageFormat::Png)?)
}

/// Wrap base64 PNG text in a `data:` URL.
pub fn png_data_url(encoded: &str) -> String {
    format!("{PNG_DATA_URL_PREFIX}{encoded}")
}
