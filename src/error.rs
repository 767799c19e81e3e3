use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures of the driver itself.
///
/// A tool that runs and exits non-zero is *not* one of these: its status is
/// carried in [`crate::pipeline::Outcome`] and becomes the process exit code.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("input file `{}` does not exist", .0.display())]
    InputNotFound(PathBuf),

    #[error("input file `{}` must have exactly one extension separator (`name.ext`)", .0.display())]
    FileNameShape(PathBuf),

    #[error("failed to run {tool} `{program}`")]
    Spawn {
        tool: &'static str,
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to remove intermediate file `{}`", path.display())]
    Cleanup {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
