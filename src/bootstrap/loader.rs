use rayon::prelude::*;

use crate::{
    assets::decode::{RasterImage, decode_image},
    bootstrap::{
        naming::{MANIFEST_FILE, required_image_names},
        source::AssetSource,
    },
    codec::program::{DecodeMode, FrameProgram, decode_frames_on},
    foundation::error::{ReelError, ReelResult},
    manifest::{
        model::Manifest,
        settings::{Settings, interpret, require_frame_size},
    },
};

/// Everything one playback session needs, fully fetched and decoded.
///
/// A `LoadedReel` is immutable; sessions that replay it own their cursor and buffer separately.
#[derive(Clone, Debug)]
pub struct LoadedReel {
    settings: Settings,
    programs: Vec<FrameProgram>,
    first: RasterImage,
    sheets: Vec<RasterImage>,
}

impl LoadedReel {
    /// Assemble a reel from already decoded parts.
    ///
    /// Fails when the video is too large to buffer or when the program and sheet counts do not
    /// fit the settings. Image size mismatches are only logged; drawing clips.
    pub fn new(
        settings: Settings,
        programs: Vec<FrameProgram>,
        first: RasterImage,
        sheets: Vec<RasterImage>,
    ) -> ReelResult<Self> {
        require_frame_size(&settings)?;
        let needed = settings.frame_count as usize;
        if programs.len() < needed {
            return Err(ReelError::manifest(format!(
                "reel has {} frame programs but needs {needed}",
                programs.len()
            )));
        }
        if sheets.len() != settings.images_required as usize {
            return Err(ReelError::asset(format!(
                "reel has {} sprite sheets but imagesRequired is {}",
                sheets.len(),
                settings.images_required
            )));
        }

        if (first.width, first.height) != (settings.video_width, settings.video_height) {
            tracing::warn!(
                image_width = first.width,
                image_height = first.height,
                video_width = settings.video_width,
                video_height = settings.video_height,
                "base image size differs from video size"
            );
        }
        let sheet_edge = u64::from(settings.source_grid) * u64::from(settings.block_size);
        for (i, sheet) in sheets.iter().enumerate() {
            if u64::from(sheet.width) < sheet_edge || u64::from(sheet.height) < sheet_edge {
                tracing::warn!(
                    sheet = i + 1,
                    width = sheet.width,
                    height = sheet.height,
                    expected = sheet_edge,
                    "sprite sheet is smaller than its block grid"
                );
            }
        }

        Ok(Self {
            settings,
            programs,
            first,
            sheets,
        })
    }

    /// Session settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Decoded frame programs, index 0 being displayed frame 1.
    pub fn programs(&self) -> &[FrameProgram] {
        &self.programs
    }

    /// Base image (displayed frame 0).
    pub fn first(&self) -> &RasterImage {
        &self.first
    }

    /// Sprite sheets in cursor order.
    pub fn sheets(&self) -> &[RasterImage] {
        &self.sheets
    }

    /// Program that produces displayed frame `frame`.
    ///
    /// `None` for frame 0 (the base image) and for frames past `frame_count`.
    pub fn program_for(&self, frame: usize) -> Option<&FrameProgram> {
        if frame == 0 || frame > self.settings.frame_count as usize {
            return None;
        }
        self.programs.get(frame - 1)
    }

    /// Poster image shown before playback starts.
    pub fn poster(&self) -> &RasterImage {
        &self.first
    }

    /// Total source blocks the playable frames consume.
    pub fn blocks_consumed(&self) -> u64 {
        self.programs[..self.settings.frame_count as usize]
            .iter()
            .map(FrameProgram::total_blocks)
            .sum()
    }
}

/// Fetch and decode a complete reel from `source`.
///
/// Order: manifest, settings, frame programs, then the base image and sprite sheets. Every step
/// must succeed before the next begins; the first failure is returned and nothing is retried.
#[tracing::instrument(skip(source), fields(source = %source.describe()), err)]
pub fn load_reel(source: &dyn AssetSource, mode: DecodeMode) -> ReelResult<LoadedReel> {
    let pool = mode.thread_pool()?;

    let manifest_bytes = source.fetch(MANIFEST_FILE).map_err(|e| {
        ReelError::manifest(format!("failed to fetch {MANIFEST_FILE}: {e}"))
    })?;
    let manifest = Manifest::from_slice(&manifest_bytes)?;
    let settings = interpret(&manifest)?;

    let frames = &manifest.frames[..settings.frame_count as usize];
    if manifest.frames.len() > frames.len() {
        tracing::debug!(
            extra = manifest.frames.len() - frames.len(),
            "ignoring trailing diff strings"
        );
    }
    let programs = decode_frames_on(frames, pool.as_ref())?;

    let format = settings.format;
    let names = required_image_names(settings.images_required, format);
    let load_one = |name: &String| -> ReelResult<RasterImage> {
        let bytes = source.fetch(name)?;
        decode_image(&bytes, Some(format))
            .map_err(|e| ReelError::asset(format!("failed to decode '{name}': {e}")))
    };
    let decoded: Vec<ReelResult<RasterImage>> = match pool.as_ref() {
        Some(pool) => pool.install(|| names.par_iter().map(load_one).collect()),
        None => names.iter().map(load_one).collect(),
    };

    let mut images = Vec::with_capacity(decoded.len());
    for image in decoded {
        images.push(image?);
    }
    let mut images = images.into_iter();
    let first = images
        .next()
        .ok_or_else(|| ReelError::asset("base image missing"))?;
    let sheets: Vec<RasterImage> = images.collect();

    tracing::debug!(
        frames = programs.len(),
        sheets = sheets.len(),
        format = %format,
        "reel loaded"
    );
    LoadedReel::new(settings, programs, first, sheets)
}

#[cfg(test)]
#[path = "../../tests/unit/bootstrap/loader.rs"]
mod tests;
