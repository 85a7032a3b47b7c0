//! Authoring metadata and the playback settings derived from it.

/// Serde model of `manifest.json`.
pub mod model;
/// Validation and normalization of a manifest into [`settings::Settings`].
pub mod settings;
