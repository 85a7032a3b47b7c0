use crate::foundation::error::{ReelError, ReelResult};

/// Where play/pause controls live.
///
/// The core only records the choice; wiring click handlers is the host's job.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "ControlsRepr", into = "ControlsRepr")]
pub enum Controls {
    /// No click-to-toggle controls.
    #[default]
    None,
    /// Clicking the rendering surface toggles playback.
    Surface,
    /// An external control identified by the host (an element id, a widget name, ...).
    External(String),
}

#[derive(serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
enum ControlsRepr {
    Flag(bool),
    Target(String),
}

impl From<ControlsRepr> for Controls {
    fn from(raw: ControlsRepr) -> Self {
        match raw {
            ControlsRepr::Flag(false) => Self::None,
            ControlsRepr::Flag(true) => Self::Surface,
            ControlsRepr::Target(target) => Self::External(target),
        }
    }
}

impl From<Controls> for ControlsRepr {
    fn from(controls: Controls) -> Self {
        match controls {
            Controls::None => Self::Flag(false),
            Controls::Surface => Self::Flag(true),
            Controls::External(target) => Self::Target(target),
        }
    }
}

/// Options recognized at session start.
///
/// JSON form: `{"loop": true, "autoplay": false, "speed": 0.5, "controls": true}`; every field is
/// optional.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlaybackConfig {
    /// Restart from frame 0 instead of ending.
    #[serde(rename = "loop")]
    pub looping: bool,
    /// Start playing as soon as loading completes.
    pub autoplay: bool,
    /// Playback speed in `(0, 1]`.
    pub speed: f64,
    /// Click-to-toggle controls.
    pub controls: Controls,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            looping: false,
            autoplay: false,
            speed: 1.0,
            controls: Controls::None,
        }
    }
}

impl PlaybackConfig {
    /// Default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set looping.
    pub fn with_loop(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Builder: set autoplay.
    pub fn with_autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = autoplay;
        self
    }

    /// Builder: set speed.
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    /// Builder: set controls.
    pub fn with_controls(mut self, controls: Controls) -> Self {
        self.controls = controls;
        self
    }

    /// Parse a JSON configuration.
    pub fn from_json(bytes: &[u8]) -> ReelResult<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| ReelError::configuration(format!("invalid playback config: {e}")))
    }

    /// Effective configuration.
    ///
    /// Speeds of 1 or more play at normal speed; only slower playback is supported. Zero,
    /// negative and non-finite speeds are rejected.
    pub fn normalized(&self) -> ReelResult<Self> {
        let speed = self.speed;
        if !speed.is_finite() || speed <= 0.0 {
            return Err(ReelError::configuration(format!(
                "speed must be in (0, 1], got {speed}"
            )));
        }
        let mut out = self.clone();
        if speed >= 1.0 {
            if speed > 1.0 {
                tracing::warn!(speed, "speeds above 1 are clamped to 1");
            }
            out.speed = 1.0;
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/config.rs"]
mod tests;
