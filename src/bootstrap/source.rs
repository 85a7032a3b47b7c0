use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::foundation::error::{ReelError, ReelResult};

/// Fetches reel files by name (`manifest.json`, `first.jpg`, `diff_001.jpg`, ...).
///
/// One-shot and trusted: a failed fetch is terminal for the session.
pub trait AssetSource: Send + Sync {
    /// Return the full contents of `name`.
    fn fetch(&self, name: &str) -> ReelResult<Vec<u8>>;

    /// Human-readable location used in diagnostics.
    fn describe(&self) -> String;
}

/// Reads reel files from a directory on disk.
#[derive(Clone, Debug)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    /// Bind to `root`, which must be an existing directory.
    pub fn new(root: impl Into<PathBuf>) -> ReelResult<Self> {
        let root = root.into();
        if root.as_os_str().is_empty() {
            return Err(ReelError::configuration("reel path must be non-empty"));
        }
        if !root.is_dir() {
            return Err(ReelError::configuration(format!(
                "reel path '{}' must be a directory containing {}",
                root.display(),
                crate::bootstrap::naming::MANIFEST_FILE
            )));
        }
        Ok(Self { root })
    }

    /// Directory files are read from.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetSource for DirSource {
    fn fetch(&self, name: &str) -> ReelResult<Vec<u8>> {
        let rel = normalize_rel_path(name)?;
        let path = self.root.join(Path::new(&rel));
        std::fs::read(&path)
            .with_context(|| format!("read '{}'", path.display()))
            .map_err(|e| ReelError::asset(format!("{e:#}")))
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

/// Serves reel files from memory.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    files: HashMap<String, Vec<u8>>,
}

impl MemorySource {
    /// Empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file.
    pub fn insert(&mut self, name: impl Into<String>, bytes: Vec<u8>) -> &mut Self {
        self.files.insert(name.into(), bytes);
        self
    }

    /// Remove a file, returning its bytes.
    pub fn remove(&mut self, name: &str) -> Option<Vec<u8>> {
        self.files.remove(name)
    }
}

impl AssetSource for MemorySource {
    fn fetch(&self, name: &str) -> ReelResult<Vec<u8>> {
        self.files
            .get(name)
            .cloned()
            .ok_or_else(|| ReelError::asset(format!("'{name}' not found")))
    }

    fn describe(&self) -> String {
        format!("memory ({} files)", self.files.len())
    }
}

/// Normalize and validate a reel-relative file name.
///
/// The result uses `/` separators and drops `.` segments; absolute paths and parent traversals
/// (`..`) are rejected.
pub fn normalize_rel_path(source: &str) -> ReelResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(ReelError::configuration("asset names must be relative"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(ReelError::configuration("asset names must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(ReelError::configuration(
            "asset name must contain a file name",
        ));
    }
    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/bootstrap/source.rs"]
mod tests;
