//! External build collaborator contract.

use std::path::PathBuf;
use std::process::Command;

use crate::error::BuildError;

/// The configure/build/run contract of the external build tool.
///
/// Each call blocks until the collaborator finishes and returns its exit
/// status. `Err` is reserved for failures to invoke the collaborator at
/// all; a clean invocation with a nonzero status is an `Ok` code the
/// orchestrator turns into the matching stage failure.
pub trait BuildRunner {
    /// Generate the build system with the given variables.
    fn configure(&mut self, variables: &[(String, String)]) -> Result<i32, BuildError>;

    /// Compile the configured tree.
    fn build(&mut self) -> Result<i32, BuildError>;

    /// Execute the produced test binary.
    fn run_test(&mut self) -> Result<i32, BuildError>;
}

/// A [`BuildRunner`] that shells out to an external build tool.
///
/// Mirrors the conventional CMake invocation shape: configure with
/// `-S <source> -B <build> -D<VAR>=<VALUE>...`, compile with
/// `--build <build>`, then run `<build>/unit_test`.
pub struct CommandRunner {
    program: PathBuf,
    source_dir: PathBuf,
    build_dir: PathBuf,
    test_binary: String,
}

impl CommandRunner {
    /// Create a runner for the given source and build directories,
    /// driving `cmake` and the `unit_test` binary it produces.
    pub fn new(source_dir: PathBuf, build_dir: PathBuf) -> Self {
        Self {
            program: PathBuf::from("cmake"),
            source_dir,
            build_dir,
            test_binary: "unit_test".to_string(),
        }
    }

    /// Override the build tool executable.
    pub fn with_program(mut self, program: PathBuf) -> Self {
        self.program = program;
        self
    }

    /// Override the test binary name.
    pub fn with_test_binary(mut self, name: &str) -> Self {
        self.test_binary = name.to_string();
        self
    }

    fn status_of(&self, command: &mut Command) -> Result<i32, BuildError> {
        let status = command.status().map_err(|e| BuildError::Collaborator {
            message: format!("failed to invoke {}: {e}", command.get_program().to_string_lossy()),
        })?;
        // A signal-terminated child has no code; report it as failure.
        Ok(status.code().unwrap_or(-1))
    }
}

impl BuildRunner for CommandRunner {
    fn configure(&mut self, variables: &[(String, String)]) -> Result<i32, BuildError> {
        let mut command = Command::new(&self.program);
        command
            .arg("-S")
            .arg(&self.source_dir)
            .arg("-B")
            .arg(&self.build_dir);
        for (name, value) in variables {
            command.arg(format!("-D{name}={value}"));
        }
        self.status_of(&mut command)
    }

    fn build(&mut self) -> Result<i32, BuildError> {
        let mut command = Command::new(&self.program);
        command.arg("--build").arg(&self.build_dir);
        self.status_of(&mut command)
    }

    fn run_test(&mut self) -> Result<i32, BuildError> {
        let mut command = Command::new(self.build_dir.join(&self.test_binary));
        self.status_of(&mut command)
    }
}
