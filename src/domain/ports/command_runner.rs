//! CommandRunner port - running external tools
//!
//! The version resolver asks the runtime for its version and the `pub add`
//! writer hands dependencies to the package manager; both go through here.

use std::path::Path;

/// Captured result of a finished process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Whether the process exited with status 0
    pub success: bool,
    /// Captured standard output (lossy UTF-8)
    pub stdout: String,
    /// Captured standard error (lossy UTF-8)
    pub stderr: String,
}

/// Runs a program to completion and captures its output
pub trait CommandRunner {
    /// Run `program` with `args`, optionally inside `cwd`
    fn run(&self, program: &Path, args: &[&str], cwd: Option<&Path>)
        -> std::io::Result<CommandOutput>;
}

impl<T: CommandRunner + ?Sized> CommandRunner for &T {
    fn run(
        &self,
        program: &Path,
        args: &[&str],
        cwd: Option<&Path>,
    ) -> std::io::Result<CommandOutput> {
        (**self).run(program, args, cwd)
    }
}
