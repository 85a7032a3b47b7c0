use crate::manifest::model::ImageFormat;

/// File name of the manifest inside a reel directory.
pub const MANIFEST_FILE: &str = "manifest.json";

/// File name of the full base image (frame 0).
pub fn first_image_name(format: ImageFormat) -> String {
    format!("first.{}", format.extension())
}

/// File name of sprite sheet `index` (1-based), zero-padded to three digits.
pub fn diff_image_name(index: u32, format: ImageFormat) -> String {
    format!("diff_{index:03}.{}", format.extension())
}

/// Every image a reel with `images_required` sheets needs, base image first.
pub fn required_image_names(images_required: u32, format: ImageFormat) -> Vec<String> {
    std::iter::once(first_image_name(format))
        .chain((1..=images_required).map(|i| diff_image_name(i, format)))
        .collect()
}
