//! Playback: the scheduler state machine, its configuration, progress derivation, lifecycle
//! notifications and the visibility signal that drives soft pauses.

/// Session options.
pub mod config;
/// Lifecycle notifications and listeners.
pub mod events;
/// Progress, timestamps and snapshots.
pub mod progress;
/// The frame-timing state machine.
pub mod scheduler;
/// Playback states.
pub mod state;
/// Host visibility signal.
pub mod visibility;
