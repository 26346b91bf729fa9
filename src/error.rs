//! Error types for the generator launcher

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Failed to launch generator {index} ({}): {source}", .program.display())]
    LaunchFailure {
        index: usize,
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to wait for generator {index}: {source}")]
    Wait {
        index: usize,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, LaunchError>;
