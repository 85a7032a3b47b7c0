use std::time::{Duration, Instant};

use crate::{
    assets::decode::RasterImage,
    bootstrap::loader::LoadedReel,
    foundation::error::{ReelError, ReelResult},
    manifest::settings::Settings,
    playback::{
        config::PlaybackConfig,
        events::{PlaybackEvent, PlaybackEventKind, PlaybackListener},
        progress::PlaybackSnapshot,
        state::PlaybackState,
        visibility::VisibilitySubscription,
    },
    render::{
        cursor::SourceCursor,
        frame::FrameBuffer,
        pipeline::Replay,
        surface::{Surface, SurfaceConfig},
    },
};

/// Outcome of one [`Player::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// Playing, but the next frame is not due yet.
    Idle,
    /// Displayed frame `n` was composited and presented.
    Drew(usize),
    /// Playback wrapped and frame 0 was presented again.
    Looped,
    /// The stream ended; the last frame stays on the surface.
    Ended,
    /// Nothing is scheduled (not playing, hidden, or faulted). The host can stop ticking.
    Halted,
}

struct Session {
    reel: LoadedReel,
    replay: Replay,
    interval: Duration,
    interval_ms: f64,
}

/// One playback session: owns its cursor, frame buffer, timing and surface.
///
/// The player is driven from a single cooperative timeline. The host calls [`Player::tick`] from
/// its animation-frame callback while [`Player::is_armed`] is true and forwards user commands as
/// they arrive. Every command is a no-op when the player is already in the state it asks for,
/// and `tick` re-checks the state before drawing so a stale callback never draws after a pause or
/// stop.
pub struct Player<S: Surface> {
    config: PlaybackConfig,
    surface: S,
    listeners: Vec<Box<dyn PlaybackListener>>,
    state: PlaybackState,
    session: Option<Session>,
    queued_play: bool,
    armed: bool,
    hidden: bool,
    faulted: bool,
    previous: Option<Instant>,
    visibility: Option<VisibilitySubscription>,
}

impl<S: Surface> Player<S> {
    /// New player in `Loading`, presenting to `surface`.
    pub fn new(surface: S, config: PlaybackConfig) -> ReelResult<Self> {
        let config = config.normalized()?;
        tracing::debug!(
            looping = config.looping,
            autoplay = config.autoplay,
            speed = config.speed,
            "player created"
        );
        Ok(Self {
            config,
            surface,
            listeners: Vec::new(),
            state: PlaybackState::Loading,
            session: None,
            queued_play: false,
            armed: false,
            hidden: false,
            faulted: false,
            previous: None,
            visibility: None,
        })
    }

    /// Register a lifecycle listener.
    pub fn add_listener(&mut self, listener: impl PlaybackListener + 'static) -> &mut Self {
        self.listeners.push(Box::new(listener));
        self
    }

    /// Install a loaded reel and become `Ready`.
    ///
    /// Announces the video size to the surface, raises the load notification, then starts
    /// playback if autoplay is set or a play command arrived while loading.
    pub fn load(&mut self, reel: LoadedReel, now: Instant) -> ReelResult<()> {
        if self.state != PlaybackState::Loading {
            return Err(ReelError::configuration("player already holds a loaded reel"));
        }

        let settings = reel.settings();
        let interval_ms = settings.frame_interval_ms(self.config.speed);
        let interval = Duration::try_from_secs_f64(interval_ms / 1000.0).map_err(|e| {
            ReelError::configuration(format!("frame interval {interval_ms}ms is unusable: {e}"))
        })?;
        self.surface.begin(SurfaceConfig {
            width: settings.video_width,
            height: settings.video_height,
        })?;

        tracing::debug!(
            frames = settings.frame_count,
            interval_ms,
            max_time = %settings.max_time(),
            "reel installed"
        );
        self.session = Some(Session {
            replay: Replay::new(&reel),
            reel,
            interval,
            interval_ms,
        });
        self.transition(PlaybackState::Ready);
        self.emit(PlaybackEventKind::Load);

        if self.config.autoplay || std::mem::take(&mut self.queued_play) {
            self.play(now)?;
        }
        Ok(())
    }

    /// Start or resume playback.
    ///
    /// No-op while already playing. Once every frame has been drawn (after `Ended`, including a
    /// pause issued there) the position and surface are reset first.
    /// Resuming from a soft pause raises no play notification.
    pub fn play(&mut self, now: Instant) -> ReelResult<()> {
        if self.faulted {
            tracing::warn!("play ignored: player is faulted");
            return Ok(());
        }
        match self.state {
            PlaybackState::Loading => {
                tracing::debug!("play queued until loading completes");
                self.queued_play = true;
                return Ok(());
            }
            PlaybackState::Playing => return Ok(()),
            _ => {}
        }
        if self
            .session
            .as_ref()
            .is_some_and(|s| s.replay.is_finished(&s.reel))
        {
            self.reset_position()?;
        }

        let resume = self.state == PlaybackState::Suspended;
        self.transition(PlaybackState::Playing);
        if !resume {
            self.emit(PlaybackEventKind::Play);
        }
        self.previous = Some(now);
        self.armed = !self.hidden;
        Ok(())
    }

    /// Pause playback.
    ///
    /// No-op while paused. While suspended the state is kept (the soft pause wins) but scheduling
    /// still halts.
    pub fn pause(&mut self) {
        match self.state {
            PlaybackState::Loading => {
                self.queued_play = false;
                return;
            }
            PlaybackState::Paused => return,
            PlaybackState::Suspended => {}
            _ => {
                self.transition(PlaybackState::Paused);
                self.emit(PlaybackEventKind::Pause);
            }
        }
        self.armed = false;
    }

    /// Halt playback and rewind to frame 0. No-op while `Ready`.
    pub fn stop(&mut self) -> ReelResult<()> {
        match self.state {
            PlaybackState::Loading => {
                self.queued_play = false;
                Ok(())
            }
            PlaybackState::Ready => Ok(()),
            _ => {
                self.transition(PlaybackState::Ready);
                self.armed = false;
                self.reset_position()
            }
        }
    }

    /// Pause when playing, otherwise play (queued while loading).
    pub fn playpause(&mut self, now: Instant) -> ReelResult<()> {
        if self.state == PlaybackState::Playing {
            self.pause();
            Ok(())
        } else {
            self.play(now)
        }
    }

    /// Soft pause entry point: the host became hidden or visible.
    ///
    /// Hidden while playing suspends without a pause notification; visible again while suspended
    /// resumes. Visible while playing but unscheduled (play arrived while hidden) re-arms.
    pub fn set_hidden(&mut self, hidden: bool, now: Instant) -> ReelResult<()> {
        self.hidden = hidden;
        match (hidden, self.state) {
            (true, PlaybackState::Playing) => {
                self.transition(PlaybackState::Suspended);
                self.armed = false;
                Ok(())
            }
            (false, PlaybackState::Suspended) => self.play(now),
            (false, PlaybackState::Playing) if !self.armed && !self.faulted => {
                tracing::debug!("visible again; re-arming playback");
                self.previous = Some(now);
                self.armed = true;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Bind a visibility signal to this player, replacing any previous one.
    pub fn subscribe_visibility(&mut self, subscription: VisibilitySubscription) {
        self.visibility = Some(subscription);
    }

    /// Detach the visibility signal.
    pub fn unsubscribe_visibility(&mut self) -> Option<VisibilitySubscription> {
        self.visibility.take()
    }

    /// Apply every pending visibility signal, oldest first.
    pub fn poll_visibility(&mut self, now: Instant) -> ReelResult<()> {
        let pending = match &self.visibility {
            Some(sub) => sub.drain(),
            None => return Ok(()),
        };
        for hidden in pending {
            self.set_hidden(hidden, now)?;
        }
        Ok(())
    }

    /// Animation-frame callback.
    ///
    /// Draws at most one frame. When the frame is due, the draw reference time advances by exactly
    /// one interval so irregular callback cadence does not accumulate drift. A compositing or
    /// presentation failure faults the player: it is logged once, returned from this call, and
    /// every later tick is `Halted`.
    pub fn tick(&mut self, now: Instant) -> ReelResult<Tick> {
        self.poll_visibility(now)?;
        if self.faulted || !self.armed || self.state != PlaybackState::Playing {
            return Ok(Tick::Halted);
        }
        let Some(interval) = self.session.as_ref().map(|s| s.interval) else {
            return Ok(Tick::Halted);
        };

        let previous = *self.previous.get_or_insert(now);
        if now.saturating_duration_since(previous) < interval {
            return Ok(Tick::Idle);
        }

        let outcome = match self.advance() {
            Ok(outcome) => outcome,
            Err(err) => return Err(self.fail(err)),
        };
        self.previous = Some(previous + interval);

        if self.state != PlaybackState::Playing || self.hidden {
            self.armed = false;
        }
        Ok(outcome)
    }

    fn advance(&mut self) -> ReelResult<Tick> {
        let Some(session) = self.session.as_mut() else {
            return Ok(Tick::Halted);
        };
        let last = session.reel.settings().frame_count as usize;

        if session.replay.next_frame() <= last {
            let frame = session.replay.draw_next(&session.reel)?;
            self.surface.present(frame, session.replay.buffer())?;
            tracing::trace!(frame, "drew frame");
            Ok(Tick::Drew(frame))
        } else if self.config.looping {
            session.replay.reset();
            self.surface.clear()?;
            let frame = session.replay.draw_next(&session.reel)?;
            self.surface.present(frame, session.replay.buffer())?;
            tracing::debug!("looped to frame 0");
            self.emit(PlaybackEventKind::Loop);
            Ok(Tick::Looped)
        } else {
            self.armed = false;
            self.transition(PlaybackState::Ended);
            self.emit(PlaybackEventKind::End);
            Ok(Tick::Ended)
        }
    }

    fn fail(&mut self, err: ReelError) -> ReelError {
        self.faulted = true;
        self.armed = false;
        tracing::error!(
            error = %err,
            frame = self.current_frame(),
            state = %self.state,
            "playback halted"
        );
        err
    }

    fn reset_position(&mut self) -> ReelResult<()> {
        if let Some(session) = self.session.as_mut() {
            session.replay.reset();
        }
        self.surface.clear()
    }

    fn transition(&mut self, to: PlaybackState) {
        if self.state != to {
            tracing::debug!(from = %self.state, to = %to, "playback state");
            self.state = to;
        }
    }

    fn emit(&mut self, kind: PlaybackEventKind) {
        let event = PlaybackEvent {
            kind,
            snapshot: self.snapshot(),
        };
        for listener in &mut self.listeners {
            listener.on_event(&event);
        }
    }

    /// Current state.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Effective (normalized) configuration.
    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    /// Session settings, once loaded.
    pub fn settings(&self) -> Option<&Settings> {
        self.session.as_ref().map(|s| s.reel.settings())
    }

    /// Loaded reel, if any.
    pub fn reel(&self) -> Option<&LoadedReel> {
        self.session.as_ref().map(|s| &s.reel)
    }

    /// Target inter-frame interval in milliseconds, once loaded.
    pub fn interval_ms(&self) -> Option<f64> {
        self.session.as_ref().map(|s| s.interval_ms)
    }

    /// Frames drawn in the current pass.
    pub fn current_frame(&self) -> usize {
        self.session.as_ref().map_or(0, |s| s.replay.next_frame())
    }

    /// Observable playback position.
    pub fn snapshot(&self) -> PlaybackSnapshot {
        match &self.session {
            Some(s) => {
                PlaybackSnapshot::derive(self.state, s.replay.next_frame(), s.reel.settings())
            }
            None => PlaybackSnapshot {
                state: self.state,
                ..PlaybackSnapshot::loading()
            },
        }
    }

    /// Progress percentage (`0..=100`).
    pub fn progress(&self) -> f64 {
        self.snapshot().progress
    }

    /// Elapsed video time as `mm:ss.mmm`.
    pub fn timestamp(&self) -> String {
        self.snapshot().timestamp
    }

    /// Reel duration as `mm:ss.mmm`.
    pub fn max_time(&self) -> String {
        self.snapshot().max_time
    }

    /// Elapsed video time in seconds.
    pub fn seconds_elapsed(&self) -> f64 {
        self.snapshot().seconds_elapsed
    }

    /// Base image hosts show before playback starts.
    pub fn poster(&self) -> Option<&RasterImage> {
        self.session.as_ref().map(|s| s.reel.poster())
    }

    /// Current frame buffer contents.
    pub fn buffer(&self) -> Option<&FrameBuffer> {
        self.session.as_ref().map(|s| s.replay.buffer())
    }

    /// Current source cursor.
    pub fn cursor(&self) -> Option<SourceCursor> {
        self.session.as_ref().map(|s| s.replay.cursor())
    }

    /// `true` while the host should keep calling [`Player::tick`].
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Last hidden flag received.
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// `true` after a fatal compositing error.
    pub fn is_faulted(&self) -> bool {
        self.faulted
    }

    /// `true` if a play command is waiting for loading to finish.
    pub fn has_queued_play(&self) -> bool {
        self.queued_play
    }

    /// Presentation surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Presentation surface, mutably.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Consume the player and return its surface.
    pub fn into_surface(self) -> S {
        self.surface
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/scheduler.rs"]
mod tests;
