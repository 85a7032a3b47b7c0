use std::fmt;

/// Lifecycle state of a playback session.
///
/// `Loading` is initial. There is no terminal state: `Ended` goes back to playing from the first
/// frame on the next `play`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    /// Assets are still being fetched or decoded.
    #[default]
    Loading,
    /// Loaded and positioned at frame 0.
    Ready,
    /// The timing loop is running.
    Playing,
    /// Paused by the user.
    Paused,
    /// Paused involuntarily because the host became hidden.
    Suspended,
    /// Reached the end of the stream without looping.
    Ended,
}

impl PlaybackState {
    /// Lowercase name, as used in notifications and the host's `data-state` style attributes.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Ready => "ready",
            Self::Playing => "playing",
            Self::Paused => "paused",
            Self::Suspended => "suspended",
            Self::Ended => "ended",
        }
    }

    /// Every state, in lifecycle order.
    pub const ALL: [PlaybackState; 6] = [
        Self::Loading,
        Self::Ready,
        Self::Playing,
        Self::Paused,
        Self::Suspended,
        Self::Ended,
    ];
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
