use std::path::{Component, Path, PathBuf};

use crate::error::DriverError;

/// A validated input file of the shape `name.ext`.
///
/// Every path the pipeline touches is derived from `name` and lives in the
/// same directory as the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    path: PathBuf,
    stem: PathBuf,
}

impl SourceFile {
    /// Checks that `path` is a regular file with exactly one extension
    /// separator.
    ///
    /// Existence is checked first so a missing file is always reported as
    /// such, whatever its name looks like. A bare relative name is anchored
    /// at `./` so no derived path can be taken for a tool option.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, DriverError> {
        let path = path.into();

        if !path.is_file() {
            return Err(DriverError::InputNotFound(path));
        }

        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => return Err(DriverError::FileNameShape(path)),
        };

        let stem = match name.split_once('.') {
            Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() && !ext.contains('.') => {
                stem.to_string()
            }
            _ => return Err(DriverError::FileNameShape(path)),
        };

        let path = anchor(path);
        let stem = path.with_file_name(stem);
        Ok(Self { path, stem })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `name.i`
    pub fn preprocessed(&self) -> PathBuf {
        self.stem.with_extension("i")
    }

    /// `name.s`
    pub fn assembly(&self) -> PathBuf {
        self.stem.with_extension("s")
    }

    /// `name`, the final executable.
    pub fn executable(&self) -> PathBuf {
        self.stem.clone()
    }
}

fn anchor(path: PathBuf) -> PathBuf {
    match path.components().next() {
        Some(Component::Normal(_)) => Path::new(".").join(path),
        _ => path,
    }
}
