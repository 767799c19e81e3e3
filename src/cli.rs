use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

use crate::stage::{Stage, StopFlags};
use crate::toolchain::ToolPaths;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Input source file (`name.ext`)
    pub file: PathBuf,

    /// Stop after lexing the input file
    #[arg(long)]
    pub lex: bool,
    /// Stop after parsing the input file
    #[arg(long)]
    pub parse: bool,
    /// Stop after generating the intermediate representation
    #[arg(long)]
    pub tacky: bool,
    /// Stop after emitting textual assembly
    #[arg(long)]
    pub assemble: bool,
    /// Stop after code generation, before linking
    #[arg(long)]
    pub codegen: bool,

    /// Keep the `.s` file after a successful build
    #[arg(long)]
    pub keep_assembly: bool,

    /// Log every tool invocation
    #[arg(short, long)]
    pub verbose: bool,

    /// Program used to preprocess and to assemble/link
    #[arg(long, env = "CCDRIVER_CC", default_value = "clang")]
    pub cc: OsString,

    /// Compiler backend binary
    #[arg(long, env = "CCDRIVER_BACKEND", default_value = "bin/compiler")]
    pub backend: PathBuf,
}

/// Everything the driver needs, resolved once from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    pub input: PathBuf,
    pub cutoff: Stage,
    pub keep_assembly: bool,
    pub verbose: bool,
    pub tools: ToolPaths,
}

impl Cli {
    pub fn into_config(self) -> DriverConfig {
        let flags = StopFlags {
            lex: self.lex,
            parse: self.parse,
            tacky: self.tacky,
            assemble: self.assemble,
            codegen: self.codegen,
        };

        DriverConfig {
            input: self.file,
            cutoff: flags.cutoff(),
            keep_assembly: self.keep_assembly,
            verbose: self.verbose,
            tools: ToolPaths {
                cc: self.cc,
                backend: self.backend,
            },
        }
    }
}
