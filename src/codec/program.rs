use rayon::prelude::*;

use crate::{
    codec::positional::{
        BASE, CHUNK_LEN, MAX_POSITION, MAX_RUN_LENGTH, POSITION_DIGITS, RUN_DIGITS, digit_value,
        encode_digits,
    },
    foundation::error::{ReelError, ReelResult},
};

/// Copy `run_length` consecutive blocks into the destination grid starting at `position`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Instruction {
    /// Linear index into the destination block grid.
    pub position: u32,
    /// Number of horizontally contiguous blocks to copy.
    pub run_length: u32,
}

impl Instruction {
    /// Construct an instruction.
    pub fn new(position: u32, run_length: u32) -> Self {
        Self {
            position,
            run_length,
        }
    }
}

/// Ordered block-copy instructions for one displayed frame.
///
/// Instruction order is replay order: it decides how far the source cursor advances before each
/// copy, so it must never be reordered.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct FrameProgram {
    instructions: Vec<Instruction>,
}

impl FrameProgram {
    /// Wrap an instruction list.
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    /// Instructions in replay order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// `true` for a frame with no changes.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Source blocks this frame consumes from the sprite sheets.
    pub fn total_blocks(&self) -> u64 {
        self.instructions
            .iter()
            .map(|i| u64::from(i.run_length))
            .sum()
    }
}

/// A malformed chunk inside a single frame string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChunkError {
    /// Index of the offending 5-character chunk.
    pub chunk: usize,
    /// Human-readable cause.
    pub reason: String,
}

impl ChunkError {
    fn into_reel_error(self, frame: usize) -> ReelError {
        ReelError::Decode {
            frame,
            chunk: self.chunk,
            reason: self.reason,
        }
    }
}

/// Decode one raw frame string into its program.
///
/// An empty string is a frame without changes.
pub fn decode_frame(raw: &str) -> Result<FrameProgram, ChunkError> {
    let bytes = raw.as_bytes();
    if !bytes.len().is_multiple_of(CHUNK_LEN) {
        return Err(ChunkError {
            chunk: bytes.len() / CHUNK_LEN,
            reason: format!(
                "frame string length {} is not a multiple of {CHUNK_LEN}",
                bytes.len()
            ),
        });
    }

    let mut instructions = Vec::with_capacity(bytes.len() / CHUNK_LEN);
    for (chunk, group) in bytes.chunks_exact(CHUNK_LEN).enumerate() {
        let (pos_digits, run_digits) = group.split_at(POSITION_DIGITS);
        let position = decode_symbols(pos_digits).map_err(|reason| ChunkError { chunk, reason })?;
        let run_length =
            decode_symbols(run_digits).map_err(|reason| ChunkError { chunk, reason })?;
        instructions.push(Instruction::new(position, run_length));
    }
    Ok(FrameProgram::new(instructions))
}

fn decode_symbols(symbols: &[u8]) -> Result<u32, String> {
    symbols.iter().try_fold(0u32, |acc, &b| {
        let digit = digit_value(b).ok_or_else(|| {
            format!(
                "symbol '{}' is outside the 64-symbol alphabet",
                b.escape_ascii()
            )
        })?;
        Ok(acc * BASE + digit)
    })
}

/// Where the batch decoder runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DecodeMode {
    /// Decode on the calling thread.
    #[default]
    Inline,
    /// Decode on a dedicated rayon pool; `threads: None` uses rayon defaults.
    Parallel {
        /// Worker thread override.
        threads: Option<usize>,
    },
}

impl DecodeMode {
    /// Build the worker pool for this mode, if it needs one.
    pub fn thread_pool(self) -> ReelResult<Option<rayon::ThreadPool>> {
        match self {
            Self::Inline => Ok(None),
            Self::Parallel { threads } => build_thread_pool(threads).map(Some),
        }
    }
}

fn build_thread_pool(threads: Option<usize>) -> ReelResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(ReelError::configuration(
            "decode 'threads' must be >= 1 when set",
        ));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ReelError::configuration(format!("failed to build rayon thread pool: {e}")))
}

/// Decode every raw frame string, preserving frame order.
///
/// Decoding is pure and frames are independent, so [`DecodeMode::Parallel`] fans out per frame.
/// Either way the call returns only once every frame is decoded, and the reported error is the
/// first malformed chunk in frame order.
#[tracing::instrument(skip(raws), fields(frames = raws.len()))]
pub fn decode_frames(raws: &[String], mode: DecodeMode) -> ReelResult<Vec<FrameProgram>> {
    let pool = mode.thread_pool()?;
    decode_frames_on(raws, pool.as_ref())
}

pub(crate) fn decode_frames_on(
    raws: &[String],
    pool: Option<&rayon::ThreadPool>,
) -> ReelResult<Vec<FrameProgram>> {
    let decoded: Vec<Result<FrameProgram, ChunkError>> = match pool {
        Some(pool) => pool.install(|| raws.par_iter().map(|raw| decode_frame(raw)).collect()),
        None => raws.iter().map(|raw| decode_frame(raw)).collect(),
    };

    let mut programs = Vec::with_capacity(decoded.len());
    for (frame, result) in decoded.into_iter().enumerate() {
        programs.push(result.map_err(|e| e.into_reel_error(frame))?);
    }
    tracing::debug!(
        frames = programs.len(),
        instructions = programs.iter().map(FrameProgram::len).sum::<usize>(),
        "decoded frame programs"
    );
    Ok(programs)
}

/// Encode one instruction as a 5-character chunk.
///
/// Returns `None` when the position or run length does not fit the chunk layout.
pub fn encode_instruction(instruction: Instruction) -> Option<String> {
    if instruction.position > MAX_POSITION || instruction.run_length > MAX_RUN_LENGTH {
        return None;
    }
    let mut out = encode_digits(instruction.position, POSITION_DIGITS)?;
    out.push_str(&encode_digits(instruction.run_length, RUN_DIGITS)?);
    Some(out)
}

/// Encode a whole program into its raw frame string.
pub fn encode_program(program: &FrameProgram) -> Option<String> {
    program
        .instructions()
        .iter()
        .map(|&i| encode_instruction(i))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/codec/program.rs"]
mod tests;
