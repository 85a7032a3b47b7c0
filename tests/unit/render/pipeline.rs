use super::*;
use crate::{
    assets::decode::RasterImage,
    codec::program::{FrameProgram, Instruction},
    manifest::{model::ImageFormat, settings::Settings},
    render::surface::InMemorySurface,
};

fn solid(width: u32, height: u32, px: [u8; 4]) -> RasterImage {
    RasterImage::from_rgba8(width, height, px.repeat((width * height) as usize)).unwrap()
}

fn reel(programs: Vec<Vec<(u32, u32)>>, sheets: u32) -> LoadedReel {
    let settings = Settings {
        video_width: 4,
        video_height: 2,
        images_required: sheets,
        frame_count: programs.len() as u32,
        block_size: 2,
        source_grid: 1,
        frames_per_second: 10,
        format: ImageFormat::Png,
    };
    let programs = programs
        .into_iter()
        .map(|ops| {
            FrameProgram::new(ops.into_iter().map(|(p, r)| Instruction::new(p, r)).collect())
        })
        .collect();
    let sheets = (1..=sheets).map(|i| solid(2, 2, [i as u8, 0, 0, 255])).collect();
    LoadedReel::new(settings, programs, solid(4, 2, [9, 9, 9, 255]), sheets).unwrap()
}

#[test]
fn replay_draws_base_then_programs() {
    let reel = reel(vec![vec![(0, 1)], vec![], vec![(1, 1)]], 2);
    let mut replay = Replay::new(&reel);

    assert_eq!(replay.draw_next(&reel).unwrap(), 0);
    assert_eq!(replay.buffer().pixel(0, 0), Some([9, 9, 9, 255]));

    assert_eq!(replay.draw_next(&reel).unwrap(), 1);
    assert_eq!(replay.buffer().pixel(0, 0), Some([1, 0, 0, 255]));
    assert_eq!(replay.buffer().pixel(2, 0), Some([9, 9, 9, 255]));

    assert_eq!(replay.draw_next(&reel).unwrap(), 2);
    assert_eq!(replay.draw_next(&reel).unwrap(), 3);
    assert_eq!(replay.buffer().pixel(0, 0), Some([1, 0, 0, 255]));
    assert_eq!(replay.buffer().pixel(3, 1), Some([2, 0, 0, 255]));
    assert!(replay.is_finished(&reel));
    assert!(replay.draw_next(&reel).is_err());
}

#[test]
fn reset_rewinds_cursor_and_buffer() {
    let reel = reel(vec![vec![(0, 1)]], 1);
    let mut replay = Replay::new(&reel);
    replay.draw_next(&reel).unwrap();
    replay.draw_next(&reel).unwrap();
    assert_eq!(replay.cursor().image_index, 1);

    replay.reset();
    assert_eq!(replay.next_frame(), 0);
    assert_eq!(replay.cursor(), SourceCursor::default());
    assert_eq!(replay.buffer().pixel(0, 0), Some([0, 0, 0, 0]));
}

#[test]
fn overflow_leaves_replay_untouched() {
    let reel = reel(vec![vec![(0, 1)], vec![(1, 1)]], 1);
    let mut replay = Replay::new(&reel);
    replay.draw_next(&reel).unwrap();
    replay.draw_next(&reel).unwrap();
    let before = replay.buffer().clone();

    let err = replay.draw_next(&reel).unwrap_err();
    assert!(matches!(
        err,
        ReelError::CursorOverflow {
            frame: 2,
            instruction: 0,
            image_index: 1,
            available: 1
        }
    ));
    assert_eq!(replay.next_frame(), 2);
    assert_eq!(replay.buffer(), &before);
}

#[test]
fn render_frame_at_matches_sequence() {
    let reel = reel(vec![vec![(0, 1)], vec![(1, 1)]], 2);
    let mut surface = InMemorySurface::new();
    let stats = render_sequence(&reel, &mut surface).unwrap();

    assert_eq!(stats, RenderStats { frames: 3, blocks: 2 });
    assert_eq!(surface.frame_indices(), vec![0, 1, 2]);
    assert_eq!(
        surface.config(),
        Some(SurfaceConfig {
            width: 4,
            height: 2
        })
    );
    for (frame, buffer) in surface.frames() {
        assert_eq!(&render_frame_at(&reel, *frame).unwrap(), buffer);
    }
    assert!(render_frame_at(&reel, 3).is_err());
}
