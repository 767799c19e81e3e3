//! The external tools the driver delegates to.
//!
//! The pipeline only talks to the [`Toolchain`] trait; [`SystemToolchain`]
//! is the implementation that actually spawns processes.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use log::debug;

use crate::error::DriverError;
use crate::stage::Selection;

/// Exit status of a single tool run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status(pub i32);

impl Status {
    pub const SUCCESS: Status = Status(0);

    pub fn success(self) -> bool {
        self.0 == 0
    }

    pub fn code(self) -> i32 {
        self.0
    }
}

impl From<ExitStatus> for Status {
    fn from(status: ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return Status(code);
        }

        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return Status(128 + signal);
            }
        }

        Status(1)
    }
}

/// The three collaborators of the pipeline. Each call blocks until the tool
/// has finished.
pub trait Toolchain {
    /// Preprocess `input` into `output`.
    fn preprocess(&mut self, input: &Path, output: &Path) -> Result<Status, DriverError>;

    /// Run the compiler backend on a preprocessed file.
    fn compile(&mut self, input: &Path, selection: Selection) -> Result<Status, DriverError>;

    /// Assemble and link `assembly` into the executable `output`.
    fn assemble(&mut self, assembly: &Path, output: &Path) -> Result<Status, DriverError>;
}

/// Programs used by [`SystemToolchain`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    /// C compiler driver used both to preprocess and to assemble/link.
    pub cc: OsString,
    pub backend: PathBuf,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            cc: "clang".into(),
            backend: PathBuf::from("bin/compiler"),
        }
    }
}

/// Spawns the real tools with explicit argument lists, inheriting stdio so
/// their diagnostics go straight to the user.
#[derive(Debug, Clone)]
pub struct SystemToolchain {
    paths: ToolPaths,
}

impl SystemToolchain {
    pub fn new(paths: ToolPaths) -> Self {
        Self { paths }
    }

    fn preprocess_command(&self, input: &Path, output: &Path) -> Command {
        let mut cmd = Command::new(&self.paths.cc);
        cmd.arg("-E").arg("-P").arg(input).arg("-o").arg(output);
        cmd
    }

    fn compile_command(&self, input: &Path, selection: Selection) -> Command {
        let mut cmd = Command::new(&self.paths.backend);
        cmd.arg(input)
            .arg(backend_bool(selection.stop))
            .arg(selection.cutoff.to_string());
        cmd
    }

    fn assemble_command(&self, assembly: &Path, output: &Path) -> Command {
        let mut cmd = Command::new(&self.paths.cc);
        cmd.arg(assembly).arg("-o").arg(output);
        cmd
    }
}

/// The backend reads its stop switch as `True` / `False`.
fn backend_bool(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

fn run(tool: &'static str, mut cmd: Command) -> Result<Status, DriverError> {
    debug!("running {tool}: {cmd:?}");

    let status = cmd.status().map_err(|source| DriverError::Spawn {
        tool,
        program: cmd.get_program().to_string_lossy().into_owned(),
        source,
    })?;

    let status = Status::from(status);
    debug!("{tool} exited with status {}", status.code());
    Ok(status)
}

impl Toolchain for SystemToolchain {
    fn preprocess(&mut self, input: &Path, output: &Path) -> Result<Status, DriverError> {
        run("preprocessor", self.preprocess_command(input, output))
    }

    fn compile(&mut self, input: &Path, selection: Selection) -> Result<Status, DriverError> {
        run("backend", self.compile_command(input, selection))
    }

    fn assemble(&mut self, assembly: &Path, output: &Path) -> Result<Status, DriverError> {
        run("assembler", self.assemble_command(assembly, output))
    }
}
