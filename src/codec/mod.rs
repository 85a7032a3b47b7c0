//! Positional diff codec: 5-character chunks in a base-64 numeral system, decoded into
//! per-frame block-copy programs.

/// Destination grid addressing.
pub mod grid;
/// The 64-symbol positional numeral system.
pub mod positional;
/// Instructions, frame programs and the batch decoder.
pub mod program;
