use std::io::Cursor;

use super::*;
use crate::bootstrap::source::MemorySource;

fn png(width: u32, height: u32, fill: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(fill));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn manifest_json(frames: &[&str], images_required: u32) -> Vec<u8> {
    serde_json::to_vec(&serde_json::json!({
        "videoWidth": 4,
        "videoHeight": 2,
        "imagesRequired": images_required,
        "frameCount": frames.len() + 1,
        "blockSize": 2,
        "sourceGrid": 2,
        "framesPerSecond": 10,
        "format": "PNG",
        "frames": frames,
    }))
    .unwrap()
}

fn reel_source(frames: &[&str]) -> MemorySource {
    let mut src = MemorySource::new();
    src.insert("manifest.json", manifest_json(frames, 2));
    src.insert("first.png", png(4, 2, [9, 9, 9, 255]));
    src.insert("diff_001.png", png(4, 4, [1, 0, 0, 255]));
    src.insert("diff_002.png", png(4, 4, [2, 0, 0, 255]));
    src
}

#[test]
fn loads_programs_and_images_in_order() {
    let reel = load_reel(&reel_source(&["AAAAB", "", "AAAAC"]), DecodeMode::Inline).unwrap();

    assert_eq!(reel.settings().frame_count, 3);
    assert_eq!(reel.programs().len(), 3);
    assert_eq!(reel.first().width, 4);
    assert_eq!(reel.sheets().len(), 2);
    assert_eq!(reel.sheets()[1].rgba8[0], 2);
    assert_eq!(reel.blocks_consumed(), 3);

    assert!(reel.program_for(0).is_none());
    assert_eq!(reel.program_for(1).unwrap().total_blocks(), 1);
    assert!(reel.program_for(2).unwrap().is_empty());
    assert_eq!(reel.program_for(3).unwrap().total_blocks(), 2);
    assert!(reel.program_for(4).is_none());
    assert_eq!(reel.poster(), reel.first());
}

#[test]
fn parallel_mode_matches_inline() {
    let src = reel_source(&["AAAAB", "AABAB", "AAAAC"]);
    let inline = load_reel(&src, DecodeMode::Inline).unwrap();
    let parallel = load_reel(&src, DecodeMode::Parallel { threads: Some(2) }).unwrap();

    assert_eq!(inline.programs(), parallel.programs());
    assert_eq!(inline.sheets(), parallel.sheets());
}

#[test]
fn missing_manifest_is_a_manifest_error() {
    let src = MemorySource::new();
    let err = load_reel(&src, DecodeMode::Inline).unwrap_err();
    assert!(matches!(err, ReelError::Manifest(_)), "{err}");
}

#[test]
fn malformed_chunk_aborts_loading() {
    let err = load_reel(&reel_source(&["AAAAB", "AA!AB"]), DecodeMode::Inline).unwrap_err();
    assert!(matches!(err, ReelError::Decode { frame: 1, chunk: 0, .. }), "{err}");
}

#[test]
fn missing_sheet_is_an_asset_error() {
    let mut src = reel_source(&["AAAAB"]);
    src.remove("diff_002.png");
    let err = load_reel(&src, DecodeMode::Inline).unwrap_err();
    assert!(matches!(err, ReelError::Asset(_)), "{err}");
    assert!(err.to_string().contains("diff_002.png"));
}

#[test]
fn undecodable_image_is_an_asset_error() {
    let mut src = reel_source(&["AAAAB"]);
    src.insert("first.png", b"not an image".to_vec());
    let err = load_reel(&src, DecodeMode::Parallel { threads: None }).unwrap_err();
    assert!(matches!(err, ReelError::Asset(_)), "{err}");
    assert!(err.to_string().contains("first.png"));
}

#[test]
fn trailing_diff_strings_are_ignored() {
    let mut src = reel_source(&["AAAAB"]);
    let mut manifest: serde_json::Value =
        serde_json::from_slice(&manifest_json(&["AAAAB"], 2)).unwrap();
    manifest["frames"] = serde_json::json!(["AAAAB", "not-even-chunks"]);
    src.insert("manifest.json", serde_json::to_vec(&manifest).unwrap());

    let reel = load_reel(&src, DecodeMode::Inline).unwrap();
    assert_eq!(reel.programs().len(), 1);
}

#[test]
fn new_rejects_wrong_sheet_count() {
    let reel = load_reel(&reel_source(&["AAAAB"]), DecodeMode::Inline).unwrap();
    let err = LoadedReel::new(
        reel.settings().clone(),
        reel.programs().to_vec(),
        reel.first().clone(),
        vec![reel.sheets()[0].clone()],
    )
    .unwrap_err();
    assert!(matches!(err, ReelError::Asset(_)));

    let err = LoadedReel::new(
        reel.settings().clone(),
        Vec::new(),
        reel.first().clone(),
        reel.sheets().to_vec(),
    )
    .unwrap_err();
    assert!(matches!(err, ReelError::Manifest(_)));
}

#[test]
fn new_rejects_unbufferable_video_size() {
    let reel = load_reel(&reel_source(&["AAAAB"]), DecodeMode::Inline).unwrap();
    let mut settings = reel.settings().clone();
    settings.video_width = u32::MAX;
    settings.video_height = u32::MAX;

    let err = LoadedReel::new(
        settings,
        reel.programs().to_vec(),
        reel.first().clone(),
        reel.sheets().to_vec(),
    )
    .unwrap_err();
    assert!(matches!(err, ReelError::Manifest(_)));
}
