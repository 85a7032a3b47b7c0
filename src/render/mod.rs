//! Frame reconstruction: the persistent frame buffer, the source cursor, the cursor-driven
//! compositor and the surfaces finished frames are presented to.

/// Cursor-driven block compositor.
pub mod composite;
/// Raster-scan read position over the sprite sheets.
pub mod cursor;
/// Persistent RGBA8 frame buffer.
pub mod frame;
/// Offline replay helpers.
pub mod pipeline;
/// Presentation surfaces.
pub mod surface;
