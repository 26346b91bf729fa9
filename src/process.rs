//! Process handles for generator processes
//!
//! [`Spawner`] starts a generator from a built command line and hands back a
//! [`GeneratorHandle`] that can be waited on. [`SystemSpawner`] does this with
//! real OS processes through `tokio::process`.

use crate::invocation::GeneratorCommand;
use serde::Serialize;
use std::fmt;
use std::future::Future;
use std::io;
use std::process::{ExitStatus, Stdio};
use tokio::process::{Child, Command};

/// Terminal status of one generator process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GeneratorStatus {
    /// `None` when the process was terminated by a signal.
    code: Option<i32>,
}

impl GeneratorStatus {
    pub fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn terminated() -> Self {
        Self { code: None }
    }

    pub fn code(&self) -> Option<i32> {
        self.code
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Exit code to report for this generator; signal termination maps to 1.
    pub fn exit_code(&self) -> i32 {
        self.code.unwrap_or(1)
    }
}

impl From<ExitStatus> for GeneratorStatus {
    fn from(status: ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

impl fmt::Display for GeneratorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit code {code}"),
            None => write!(f, "terminated by signal"),
        }
    }
}

/// A launched generator that can be waited on until it exits.
pub trait GeneratorHandle: Send {
    fn wait(&mut self) -> impl Future<Output = io::Result<GeneratorStatus>> + Send;
}

/// Starts generator processes.
pub trait Spawner {
    type Handle: GeneratorHandle;

    fn spawn(&self, command: &GeneratorCommand) -> io::Result<Self::Handle>;
}

/// Spawns generators as child OS processes.
///
/// Child stdout is sent to the launcher's stderr so the launcher's stdout
/// carries only its own output. Children are not killed when their handle is
/// dropped; each generator enforces its own duration.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemSpawner;

impl Spawner for SystemSpawner {
    type Handle = Child;

    fn spawn(&self, command: &GeneratorCommand) -> io::Result<Child> {
        Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .stdout(std::io::stderr())
            .kill_on_drop(false)
            .spawn()
    }
}

impl GeneratorHandle for Child {
    fn wait(&mut self) -> impl Future<Output = io::Result<GeneratorStatus>> + Send {
        async move { Child::wait(self).await.map(GeneratorStatus::from) }
    }
}
