use super::*;

fn solid(width: u32, height: u32, rgba: [u8; 4]) -> RasterImage {
    RasterImage::from_rgba8(width, height, rgba.repeat((width * height) as usize)).unwrap()
}

fn gradient(width: u32, height: u32) -> RasterImage {
    let mut px = Vec::new();
    for y in 0..height {
        for x in 0..width {
            px.extend_from_slice(&[x as u8, y as u8, 0, 255]);
        }
    }
    RasterImage::from_rgba8(width, height, px).unwrap()
}

#[test]
fn new_buffer_is_transparent() {
    let fb = FrameBuffer::new(4, 3);
    assert_eq!(fb.data().len(), 4 * 3 * 4);
    assert!(fb.data().iter().all(|&b| b == 0));
    assert_eq!(fb.pixel(4, 0), None);
}

#[test]
fn copy_rect_replaces_pixels_without_blending() {
    let mut fb = FrameBuffer::new(4, 4);
    fb.draw_image(&solid(4, 4, [9, 9, 9, 255]));

    let half = solid(2, 2, [200, 0, 0, 128]);
    let written = fb.copy_rect(&half, half.bounds(), 1, 1);
    assert_eq!(written, PixelRect::new(1, 1, 2, 2));
    assert_eq!(fb.pixel(1, 1), Some([200, 0, 0, 128]));
    assert_eq!(fb.pixel(2, 2), Some([200, 0, 0, 128]));
    assert_eq!(fb.pixel(0, 0), Some([9, 9, 9, 255]));
    assert_eq!(fb.pixel(3, 3), Some([9, 9, 9, 255]));
}

#[test]
fn copy_rect_reads_from_source_offset() {
    let mut fb = FrameBuffer::new(2, 1);
    let src = gradient(8, 8);
    fb.copy_rect(&src, PixelRect::new(5, 3, 2, 1), 0, 0);
    assert_eq!(fb.pixel(0, 0), Some([5, 3, 0, 255]));
    assert_eq!(fb.pixel(1, 0), Some([6, 3, 0, 255]));
}

#[test]
fn copy_rect_clips_to_both_bounds() {
    let mut fb = FrameBuffer::new(5, 5);
    let src = gradient(4, 4);

    // Source runs past the sheet edge and the destination past the frame edge.
    let written = fb.copy_rect(&src, PixelRect::new(2, 0, 8, 2), 4, 4);
    assert_eq!(written, PixelRect::new(4, 4, 1, 1));
    assert_eq!(fb.pixel(4, 4), Some([2, 0, 0, 255]));

    let none = fb.copy_rect(&src, PixelRect::new(0, 0, 2, 2), 5, 0);
    assert!(none.is_empty());
}

#[test]
fn clear_resets_everything() {
    let mut fb = FrameBuffer::new(2, 2);
    fb.draw_image(&solid(2, 2, [1, 2, 3, 4]));
    fb.clear();
    assert!(fb.data().iter().all(|&b| b == 0));
}
