use std::{
    fmt,
    sync::{Arc, Mutex, PoisonError},
};

use crate::playback::progress::PlaybackSnapshot;

/// Which lifecycle point a notification marks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackEventKind {
    /// Loading finished; the session is `Ready`.
    Load,
    /// Playback started (not raised when resuming from a soft pause).
    Play,
    /// The user paused playback.
    Pause,
    /// Playback wrapped from the last frame back to frame 0.
    Loop,
    /// Playback reached the end of the stream.
    End,
}

impl fmt::Display for PlaybackEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Load => "load",
            Self::Play => "play",
            Self::Pause => "pause",
            Self::Loop => "loop",
            Self::End => "end",
        })
    }
}

/// A lifecycle notification with the playback position at the time it was raised.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlaybackEvent {
    /// Lifecycle point.
    pub kind: PlaybackEventKind,
    /// Position snapshot.
    pub snapshot: PlaybackSnapshot,
}

/// Receives lifecycle notifications from one player.
pub trait PlaybackListener {
    /// Called synchronously, after the state change the event describes.
    fn on_event(&mut self, event: &PlaybackEvent);
}

impl<F> PlaybackListener for F
where
    F: FnMut(&PlaybackEvent),
{
    fn on_event(&mut self, event: &PlaybackEvent) {
        self(event)
    }
}

/// Shared, cloneable event recorder.
///
/// Register one clone with a player and keep another to inspect what was emitted.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<PlaybackEvent>>>,
}

impl EventLog {
    /// Empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every recorded event, oldest first.
    pub fn events(&self) -> Vec<PlaybackEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Recorded event kinds, oldest first.
    pub fn kinds(&self) -> Vec<PlaybackEventKind> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|e| e.kind)
            .collect()
    }

    /// Number of recorded events of `kind`.
    pub fn count(&self, kind: PlaybackEventKind) -> usize {
        self.kinds().into_iter().filter(|k| *k == kind).count()
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl PlaybackListener for EventLog {
    fn on_event(&mut self, event: &PlaybackEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}

/// Logs every notification through `tracing` at `info` level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingListener;

impl PlaybackListener for TracingListener {
    fn on_event(&mut self, event: &PlaybackEvent) {
        let s = &event.snapshot;
        tracing::info!(
            event = %event.kind,
            state = %s.state,
            frame = s.current_frame,
            progress = s.progress,
            timestamp = %s.timestamp,
            max_time = %s.max_time,
            "playback event"
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/events.rs"]
mod tests;
