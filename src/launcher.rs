//! Concurrent generator launch and status collection
//!
//! The [`Launcher`] turns a list of per-generator TPS targets into command
//! lines, starts every generator before waiting on any of them, then waits on
//! each in launch order. A generator that cannot be started aborts the run;
//! a generator that starts and later fails is only reported.

use crate::error::{LaunchError, Result};
use crate::invocation::{GeneratorCommand, InvocationSpec};
use crate::process::{GeneratorHandle, GeneratorStatus, Spawner, SystemSpawner};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Exit statuses of one run, in the order the targets were given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunResult {
    statuses: Vec<GeneratorStatus>,
}

impl RunResult {
    pub fn statuses(&self) -> &[GeneratorStatus] {
        &self.statuses
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    pub fn all_succeeded(&self) -> bool {
        self.statuses.iter().all(GeneratorStatus::success)
    }

    /// Indices of generators that did not exit cleanly.
    pub fn failed_indices(&self) -> Vec<usize> {
        self.statuses
            .iter()
            .enumerate()
            .filter(|(_, status)| !status.success())
            .map(|(index, _)| index)
            .collect()
    }

    /// Single process exit code for the whole run.
    ///
    /// The first failing generator in launch order decides; signal
    /// termination counts as 1. Zero when every generator succeeded.
    pub fn exit_code(&self) -> i32 {
        self.statuses
            .iter()
            .find(|status| !status.success())
            .map_or(0, GeneratorStatus::exit_code)
    }
}

/// Launches one generator per TPS target and waits for all of them.
pub struct Launcher<S = SystemSpawner> {
    spawner: S,
    program: PathBuf,
    invocation: InvocationSpec,
    echo_commands: bool,
}

impl Launcher<SystemSpawner> {
    pub fn new(program: impl Into<PathBuf>, invocation: InvocationSpec) -> Self {
        Self::with_spawner(SystemSpawner, program, invocation)
    }
}

impl<S: Spawner> Launcher<S> {
    pub fn with_spawner(
        spawner: S,
        program: impl Into<PathBuf>,
        invocation: InvocationSpec,
    ) -> Self {
        Self {
            spawner,
            program: program.into(),
            invocation,
            echo_commands: false,
        }
    }

    /// Log every generator command line at INFO instead of DEBUG.
    pub fn echo_commands(mut self, echo: bool) -> Self {
        self.echo_commands = echo;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Command lines for `targets`, one per entry, in order.
    pub fn commands(&self, targets: &[u64]) -> Vec<GeneratorCommand> {
        targets
            .iter()
            .map(|&target_tps| self.invocation.command_for(&self.program, target_tps))
            .collect()
    }

    /// Start a generator for every target, then wait for all of them.
    ///
    /// Fails with [`LaunchError::LaunchFailure`] as soon as one generator
    /// cannot be started; generators already running are left alone. A
    /// [`LaunchError::Wait`] is only returned once every generator has been
    /// waited on.
    pub async fn launch(&self, targets: &[u64]) -> Result<RunResult> {
        let commands = self.commands(targets);
        let mut handles = Vec::with_capacity(commands.len());

        for (index, command) in commands.iter().enumerate() {
            if self.echo_commands {
                info!("Running trx_generator: {}", command);
            } else {
                debug!("Running trx_generator: {}", command);
            }

            let handle = self.spawner.spawn(command).map_err(|source| {
                error!(
                    "Failed to start generator {} of {}: {}",
                    index + 1,
                    commands.len(),
                    source
                );
                LaunchError::LaunchFailure {
                    index,
                    program: command.program.clone(),
                    source,
                }
            })?;
            handles.push(handle);
        }

        info!("Launched {} transaction generators", handles.len());

        // Every generator is waited on even if the OS fails to report one
        // of them; the first such failure is returned afterwards.
        let mut statuses = Vec::with_capacity(handles.len());
        let mut wait_error = None;
        for (index, mut handle) in handles.into_iter().enumerate() {
            let status = match handle.wait().await {
                Ok(status) => status,
                Err(source) => {
                    error!("Failed to wait for generator {}: {}", index, source);
                    if wait_error.is_none() {
                        wait_error = Some(LaunchError::Wait { index, source });
                    }
                    continue;
                }
            };

            if status.success() {
                debug!("Generator {} ({} TPS) finished", index, commands[index].target_tps);
            } else {
                warn!(
                    "Generator {} ({} TPS) finished with {}",
                    index, commands[index].target_tps, status
                );
            }
            statuses.push(status);
        }

        if let Some(err) = wait_error {
            return Err(err);
        }

        Ok(RunResult { statuses })
    }
}
