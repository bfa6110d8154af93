use process::ProcessError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    /// The transcoder ran but exited unsuccessfully
    #[error("conversion failed with status {status:?}: {diagnostics}")]
    ConversionFailure {
        status: Option<i32>,
        /// Whatever the tool printed on stderr
        diagnostics: String,
    },

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("`{program}` is not available")]
    ExternalProcessUnavailable { program: String },

    #[error(transparent)]
    Process(ProcessError),

    #[error("failed to read WAV container: {0}")]
    Wav(#[from] hound::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<ProcessError> for IngestError {
    fn from(error: ProcessError) -> Self {
        match error {
            ProcessError::NotFound { program } => Self::ExternalProcessUnavailable { program },
            other => Self::Process(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;
