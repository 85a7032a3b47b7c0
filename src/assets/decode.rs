use std::sync::Arc;

use anyhow::Context;

use crate::{
    foundation::core::PixelRect, foundation::error::ReelResult, manifest::model::ImageFormat,
};

/// Decoded raster image in straight (non-premultiplied) RGBA8.
///
/// Used for both the base image and the sprite sheets. Pixel bytes are shared, so cloning is cheap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major RGBA8, tightly packed.
    pub rgba8: Arc<Vec<u8>>,
}

impl RasterImage {
    /// Wrap raw RGBA8 bytes; `None` if the length does not match the dimensions.
    pub fn from_rgba8(width: u32, height: u32, rgba8: Vec<u8>) -> Option<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(4)?;
        (rgba8.len() == expected).then(|| Self {
            width,
            height,
            rgba8: Arc::new(rgba8),
        })
    }

    /// Full image bounds.
    pub fn bounds(&self) -> PixelRect {
        PixelRect::new(0, 0, self.width, self.height)
    }

    /// RGBA8 bytes of row `y`, restricted to `[x, x + width)`.
    pub(crate) fn row_span(&self, x: u32, y: u32, width: u32) -> &[u8] {
        let stride = self.width as usize * 4;
        let start = y as usize * stride + x as usize * 4;
        &self.rgba8[start..start + width as usize * 4]
    }
}

/// Decode encoded image bytes into RGBA8.
///
/// The container is sniffed from the bytes; `hint` is used only when sniffing fails.
pub fn decode_image(bytes: &[u8], hint: Option<ImageFormat>) -> ReelResult<RasterImage> {
    let dyn_img = match (image::guess_format(bytes), hint) {
        (Err(_), Some(format)) => {
            image::load_from_memory_with_format(bytes, container_format(format))
                .with_context(|| format!("decode {format} image from memory"))?
        }
        _ => image::load_from_memory(bytes).context("decode image from memory")?,
    };
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(RasterImage {
        width,
        height,
        rgba8: Arc::new(rgba.into_raw()),
    })
}

fn container_format(format: ImageFormat) -> image::ImageFormat {
    match format {
        ImageFormat::Jpeg => image::ImageFormat::Jpeg,
        ImageFormat::Png => image::ImageFormat::Png,
        ImageFormat::Gif => image::ImageFormat::Gif,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
