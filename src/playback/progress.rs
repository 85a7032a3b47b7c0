use crate::{
    foundation::core::round_decimals, manifest::settings::Settings,
    playback::state::PlaybackState,
};

/// Render `seconds` as `mm:ss.mmm`.
///
/// Each component is truncated, not rounded. Minutes are zero-padded to two digits but not
/// capped. Negative or non-finite input renders as `00:00.000`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "00:00.000".to_owned();
    }
    let minutes = (seconds / 60.0).floor() as u64;
    let rem = seconds % 60.0;
    let secs = rem.floor() as u64;
    let millis = ((rem % 1.0) * 1000.0).floor() as u64;
    format!("{minutes:02}:{secs:02}.{millis:03}")
}

/// Observable playback position, carried by every lifecycle notification.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackSnapshot {
    /// Session state at the time of the snapshot.
    pub state: PlaybackState,
    /// Number of displayed frames drawn so far in this pass (`0..=frameCount + 1`).
    pub current_frame: usize,
    /// Percentage of the reel shown, `0..=100`, 3 decimals.
    pub progress: f64,
    /// `seconds_elapsed` as `mm:ss.mmm`.
    pub timestamp: String,
    /// Reel duration as `mm:ss.mmm`.
    pub max_time: String,
    /// Seconds of video shown, 3 decimals.
    pub seconds_elapsed: f64,
}

impl PlaybackSnapshot {
    /// Snapshot for a session that has not loaded yet.
    pub fn loading() -> Self {
        Self {
            state: PlaybackState::Loading,
            current_frame: 0,
            progress: 0.0,
            timestamp: format_time(0.0),
            max_time: format_time(0.0),
            seconds_elapsed: 0.0,
        }
    }

    /// Derive the position fields from `current_frame`.
    ///
    /// The end-of-stream position `frameCount + 1` reports the same progress and time as the last
    /// frame.
    pub fn derive(state: PlaybackState, current_frame: usize, settings: &Settings) -> Self {
        let shown = current_frame.min(settings.frame_count as usize) as f64;
        let progress = round_decimals(shown / f64::from(settings.frame_count) * 100.0, 3);
        let seconds = shown / f64::from(settings.frames_per_second);
        Self {
            state,
            current_frame,
            progress: if progress.is_finite() { progress } else { 0.0 },
            timestamp: format_time(seconds),
            max_time: settings.max_time(),
            seconds_elapsed: round_decimals(seconds, 3),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/progress.rs"]
mod tests;
