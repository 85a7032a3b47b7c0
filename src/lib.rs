//! spritereel plays "pseudo-video": animations shipped as a base image, a few sprite sheets of
//! changed blocks, and a manifest of compact per-frame block-copy programs.
//!
//! # Pipeline overview
//!
//! 1. **Interpret**: `manifest.json -> Settings` (validated geometry and timing)
//! 2. **Decode**: raw diff strings `-> FrameProgram`s, inline or on a rayon pool
//! 3. **Composite**: each program is replayed against a raster-scan cursor over the sprite sheets
//!    into a persistent `FrameBuffer`; frame 0 is the base image
//! 4. **Play**: the `Player` state machine times frames, loops, pauses and soft-pauses while the
//!    host is hidden, and hands every frame to a `Surface`
//!
//! The key constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Strictly forward replay**: the frame buffer accumulates; frame `n` can only be drawn on top
//!   of frame `n - 1`, and rewinding means starting again from frame 0.
//! - **Atomic frames**: a frame program is planned in full before any pixel changes, so a corrupt
//!   frame leaves the buffer and cursor exactly as they were.
//! - **No IO in the core**: fetching is behind [`AssetSource`], presentation behind [`Surface`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod assets;
mod bootstrap;
mod codec;
mod foundation;
mod manifest;
mod playback;
mod render;

pub use assets::decode::{RasterImage, decode_image};
pub use bootstrap::loader::{LoadedReel, load_reel};
pub use bootstrap::naming::{
    MANIFEST_FILE, diff_image_name, first_image_name, required_image_names,
};
pub use bootstrap::source::{AssetSource, DirSource, MemorySource, normalize_rel_path};
pub use codec::grid::grid_cell_of;
pub use codec::positional::{
    ALPHABET, BASE, CHUNK_LEN, MAX_POSITION, MAX_RUN_LENGTH, POSITION_DIGITS, RUN_DIGITS,
    decode_digits, digit_value, encode_digits,
};
pub use codec::program::{
    ChunkError, DecodeMode, FrameProgram, Instruction, decode_frame, decode_frames,
    encode_instruction, encode_program,
};
pub use foundation::core::{GridCell, PixelRect, round_decimals};
pub use foundation::error::{ReelError, ReelResult};
pub use manifest::model::{ImageFormat, Manifest};
pub use manifest::settings::{MAX_FRAME_BYTES, Settings, interpret};
pub use playback::config::{Controls, PlaybackConfig};
pub use playback::events::{
    EventLog, PlaybackEvent, PlaybackEventKind, PlaybackListener, TracingListener,
};
pub use playback::progress::{PlaybackSnapshot, format_time};
pub use playback::scheduler::{Player, Tick};
pub use playback::state::PlaybackState;
pub use playback::visibility::{
    VisibilityPublisher, VisibilitySubscription, channel as visibility_channel,
};
pub use render::composite::{Blit, composite_frame, draw_base_frame, plan_frame};
pub use render::cursor::SourceCursor;
pub use render::frame::FrameBuffer;
pub use render::pipeline::{Replay, RenderStats, render_frame_at, render_sequence};
pub use render::surface::{
    InMemorySurface, NullSurface, PngSequenceSurface, Surface, SurfaceConfig,
};
