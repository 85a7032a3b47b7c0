//! Resource bootstrap: manifest fetch, program decode and image preload, in that order.

/// Session assembly.
pub mod loader;
/// Asset naming convention.
pub mod naming;
/// Where asset bytes come from.
pub mod source;
