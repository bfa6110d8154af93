use std::{
    ffi::OsString,
    fs, io,
    path::{Path, PathBuf},
};

use process::ProcessRunner;
use uuid::Uuid;

use crate::{
    constants::TARGET_SAMPLE_RATE,
    error::{IngestError, Result},
};

/// How the external converter is invoked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscoderConfig {
    /// Executable name or path (default: `ffmpeg`)
    pub program: String,
    /// Output rate in Hz (default: 22050)
    pub sample_rate: u32,
    /// Verbosity passed to `-loglevel` (default: `error`)
    pub log_level: String,
}

impl Default for TranscoderConfig {
    fn default() -> Self {
        Self {
            program: "ffmpeg".to_owned(),
            sample_rate: TARGET_SAMPLE_RATE,
            log_level: "error".to_owned(),
        }
    }
}

/// `Transcoder` converts any media the external tool understands into a
/// 16-bit PCM WAV that [`SampleLoader`](crate::SampleLoader) can read.
///
/// Re-running a conversion with the same inputs overwrites the output.
#[derive(Debug)]
pub struct Transcoder<R> {
    runner: R,
    config: TranscoderConfig,
}

impl<R: ProcessRunner> Transcoder<R> {
    pub fn new(runner: R) -> Self {
        Self::with_config(runner, TranscoderConfig::default())
    }

    pub fn with_config(runner: R, config: TranscoderConfig) -> Self {
        Self { runner, config }
    }

    pub fn config(&self) -> &TranscoderConfig {
        &self.config
    }

    /// `-y -loglevel <level> -i <source> -ar <rate> <output>`
    pub fn arguments(&self, source: &Path, output: &Path) -> Vec<OsString> {
        vec![
            "-y".into(),
            "-loglevel".into(),
            self.config.log_level.clone().into(),
            "-i".into(),
            source.into(),
            "-ar".into(),
            self.config.sample_rate.to_string().into(),
            output.into(),
        ]
    }

    /// Writes the converted audio to `output`.
    ///
    /// The tool writes a scratch file next to `output`, which is renamed over
    /// `output` only once the tool succeeded. On failure `output` is untouched.
    pub fn convert<S, O>(&self, source: S, output: O) -> Result<()>
    where
        S: AsRef<Path>,
        O: AsRef<Path>,
    {
        let (source, output) = (source.as_ref(), output.as_ref());
        let scratch = scratch_path(output);

        log::debug!(
            "Converting {} to {} at {} Hz",
            source.display(),
            output.display(),
            self.config.sample_rate
        );

        let result = self
            .runner
            .run(&self.config.program, &self.arguments(source, &scratch))
            .map_err(IngestError::from)
            .and_then(|out| {
                if out.success() {
                    Ok(())
                } else {
                    Err(IngestError::ConversionFailure {
                        status: out.status,
                        diagnostics: out.stderr.trim().to_owned(),
                    })
                }
            })
            .and_then(|()| fs::rename(&scratch, output).map_err(IngestError::from));

        if result.is_err() {
            discard_scratch(&scratch);
        }

        result
    }
}

/// `<dir>/<stem>.<uuid>.<ext>`, keeping the extension the tool picks its muxer from
fn scratch_path(output: &Path) -> PathBuf {
    let stem = output
        .file_stem()
        .map_or_else(|| "output".into(), |stem| stem.to_string_lossy());
    let extension = output
        .extension()
        .map_or_else(|| "wav".into(), |ext| ext.to_string_lossy());
    output.with_file_name(format!("{stem}.{}.{extension}", Uuid::new_v4()))
}

fn discard_scratch(scratch: &Path) {
    match fs::remove_file(scratch) {
        Ok(()) => log::warn!("Removed partial conversion output {}", scratch.display()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => log::warn!(
            "Could not remove partial conversion output {}: {e}",
            scratch.display()
        ),
    }
}
