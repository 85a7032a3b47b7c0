/// Convenience result type used across spritereel.
pub type ReelResult<T> = Result<T, ReelError>;

/// Top-level error taxonomy used by session, codec and playback APIs.
///
/// Every variant is fatal for the session that raised it: inputs are static once fetched, so
/// nothing here is retried.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// Invalid rendering target, source reference or session option.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Manifest could not be fetched, parsed or interpreted.
    #[error("manifest error: {0}")]
    Manifest(String),

    /// Base image or sprite sheet could not be fetched or decoded.
    #[error("asset error: {0}")]
    Asset(String),

    /// Malformed chunk inside a diff string.
    #[error("decode error: frame {frame}, chunk {chunk}: {reason}")]
    Decode {
        /// Index of the raw frame string (0 = first diff frame).
        frame: usize,
        /// Index of the 5-character chunk within the frame string.
        chunk: usize,
        /// What was wrong with the chunk.
        reason: String,
    },

    /// Replay consumed more sprite blocks than the sheets provide.
    #[error(
        "cursor overflow: frame {frame}, instruction {instruction} needs sheet {image_index} but only {available} exist"
    )]
    CursorOverflow {
        /// Displayed frame being composited.
        frame: usize,
        /// Instruction index within the frame program.
        instruction: usize,
        /// Sheet index the cursor tried to address.
        image_index: usize,
        /// Number of sprite sheets available.
        available: usize,
    },

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build a [`ReelError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`ReelError::Manifest`] value.
    pub fn manifest(msg: impl Into<String>) -> Self {
        Self::Manifest(msg.into())
    }

    /// Build a [`ReelError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
