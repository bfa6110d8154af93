use std::{io, time::Duration};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProcessError {
    /// The executable could not be located
    #[error("`{program}` was not found")]
    NotFound { program: String },

    #[error("failed to launch `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The child was killed after running past its deadline
    #[error("`{program}` did not exit within {timeout:?}")]
    TimedOut { program: String, timeout: Duration },

    #[error("failed to collect output of `{program}`: {source}")]
    Io {
        program: String,
        #[source]
        source: io::Error,
    },
}

impl ProcessError {
    pub fn program(&self) -> &str {
        match self {
            Self::NotFound { program }
            | Self::Spawn { program, .. }
            | Self::TimedOut { program, .. }
            | Self::Io { program, .. } => program,
        }
    }
}
