use crate::{assets::decode::RasterImage, foundation::core::PixelRect};

/// The decoded video: a persistent RGBA8 surface of `videoWidth × videoHeight` pixels.
///
/// Diff frames only overwrite the blocks they touch, so the buffer accumulates state from frame
/// to frame. It is cleared only when playback is reset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl FrameBuffer {
    /// Allocate a transparent buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGBA8 bytes, tightly packed, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// RGBA8 value of one pixel, or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Reset every pixel to transparent.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Draw a full image at the origin, replacing the covered pixels.
    pub fn draw_image(&mut self, image: &RasterImage) {
        self.copy_rect(image, image.bounds(), 0, 0);
    }

    /// Copy `src` out of `image` so its top-left lands on `(dst_x, dst_y)`.
    ///
    /// Pixels are replaced, not blended. The copied area is clipped to both the source image and
    /// this buffer; returns the destination rectangle actually written.
    pub fn copy_rect(
        &mut self,
        image: &RasterImage,
        src: PixelRect,
        dst_x: u32,
        dst_y: u32,
    ) -> PixelRect {
        let src = src.clip_to(image.width, image.height);
        let dst = PixelRect::new(dst_x, dst_y, src.width, src.height)
            .clip_to(self.width, self.height);
        if dst.is_empty() {
            return dst;
        }

        let stride = self.width as usize * 4;
        let row_bytes = dst.width as usize * 4;
        for row in 0..dst.height {
            let from = image.row_span(src.x, src.y + row, dst.width);
            let start = (dst.y + row) as usize * stride + dst.x as usize * 4;
            self.data[start..start + row_bytes].copy_from_slice(from);
        }
        dst
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
