use process::ProcessError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("`{program}` is not available")]
    ExternalProcessUnavailable { program: String },

    /// The scripting host ran but reported an error, e.g. the player refused the query
    #[error("script failed with status {status:?}: {diagnostics}")]
    ScriptFailed {
        status: Option<i32>,
        diagnostics: String,
    },

    #[error("unexpected response to {query} query: {response:?}")]
    MalformedResponse {
        query: &'static str,
        response: String,
    },

    #[error("no track is loaded in the player")]
    NoTrackLoaded,

    #[error(transparent)]
    Process(ProcessError),
}

impl From<ProcessError> for MonitorError {
    fn from(error: ProcessError) -> Self {
        match error {
            ProcessError::NotFound { program } => Self::ExternalProcessUnavailable { program },
            other => Self::Process(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, MonitorError>;
