//! Pipeline executor.
//!
//! Runs preprocess → backend → assemble/link through a [`Toolchain`],
//! threading the intermediate files between the stages and removing them
//! once they are no longer needed.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::error::DriverError;
use crate::model::SourceFile;
use crate::stage::{Selection, Stage};
use crate::toolchain::{Status, Toolchain};

/// How far a run got before it terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Start,
    Preprocessed,
    BackendDone,
    Stopped,
    Assembled,
}

/// Result of a pipeline run that did not hit a driver error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub state: PipelineState,
    /// First non-zero tool status, or success.
    pub status: Status,
}

/// An intermediate file owned by the pipeline.
#[derive(Debug)]
pub struct Artifact {
    path: PathBuf,
}

impl Artifact {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Removes the file. A file the tool never produced is not an error.
    pub fn discard(self) -> Result<(), DriverError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("removed {}", self.path.display());
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(DriverError::Cleanup {
                path: self.path,
                source,
            }),
        }
    }

    /// Hands the file over to the user.
    pub fn keep(self) -> PathBuf {
        self.path
    }
}

fn advance(state: &mut PipelineState, next: PipelineState) {
    debug!("pipeline: {state:?} -> {next:?}");
    *state = next;
}

/// Runs every stage up to `cutoff` on `source`.
///
/// Tool failures are reported in the returned [`Outcome`]; only problems of
/// the driver itself (a tool that cannot be spawned, a file that cannot be
/// removed) surface as errors.
pub fn execute<T: Toolchain>(
    tools: &mut T,
    source: &SourceFile,
    cutoff: Stage,
    keep_assembly: bool,
) -> Result<Outcome, DriverError> {
    let mut state = PipelineState::Start;

    // 1. ── Preprocess ────────────────────────────────────────────────
    let preprocessed = Artifact::new(source.preprocessed());
    let status = tools.preprocess(source.path(), preprocessed.path())?;
    if !status.success() {
        warn!("preprocessor exited with status {}", status.code());
        preprocessed.discard()?;
        return Ok(Outcome { state, status });
    }
    advance(&mut state, PipelineState::Preprocessed);

    // 2. ── Backend ───────────────────────────────────────────────────
    let selection = Selection::from(cutoff);
    info!(
        "compiling {} (stop: {}, cutoff: {} [{cutoff}])",
        preprocessed.path().display(),
        selection.stop,
        selection.cutoff
    );
    let compiled = tools.compile(preprocessed.path(), selection);

    // 3. ── name.i is done with, whatever the backend did ────────────
    let cleanup = preprocessed.discard();
    let status = compiled?;
    cleanup?;
    advance(&mut state, PipelineState::BackendDone);

    if selection.stop {
        advance(&mut state, PipelineState::Stopped);
        return Ok(Outcome { state, status });
    }

    if !status.success() {
        warn!("backend exited with status {}", status.code());
        return Ok(Outcome { state, status });
    }

    // 4. ── Assemble and link ────────────────────────────────────────
    let assembly = Artifact::new(source.assembly());
    let executable = source.executable();
    let status = tools.assemble(assembly.path(), &executable)?;
    if !status.success() {
        warn!(
            "assembler exited with status {}; keeping {}",
            status.code(),
            assembly.path().display()
        );
        return Ok(Outcome { state, status });
    }

    if keep_assembly {
        info!("kept {}", assembly.keep().display());
    } else {
        assembly.discard()?;
    }

    advance(&mut state, PipelineState::Assembled);
    info!("wrote {}", executable.display());
    Ok(Outcome { state, status })
}
