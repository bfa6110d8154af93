use std::{fs, io, path::Path};

use process::ProcessRunner;
use uuid::Uuid;

use crate::{
    buffer::AudioBuffer,
    error::Result,
    loader::{LoadOptions, SampleLoader},
    transcoder::Transcoder,
};

/// Converts `source` into a scratch WAV, decodes the requested range and
/// removes the scratch file again, whether or not decoding succeeded.
pub fn ingest<R, P>(
    transcoder: &Transcoder<R>,
    source: P,
    options: &LoadOptions,
) -> Result<AudioBuffer>
where
    R: ProcessRunner,
    P: AsRef<Path>,
{
    let intermediate = std::env::temp_dir().join(format!("audio-ingest-{}.wav", Uuid::new_v4()));

    let result = transcoder
        .convert(source, &intermediate)
        .and_then(|()| SampleLoader::load(&intermediate, options));

    match fs::remove_file(&intermediate) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => {
            log::warn!("Could not remove {}: {e}", intermediate.display());
        }
        _ => {}
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{IngestError, TranscoderConfig, constants::TARGET_SAMPLE_RATE};
    use hound::{SampleFormat, WavSpec, WavWriter};
    use process::{CommandOutput, ProcessError};
    use std::{ffi::OsString, path::PathBuf, sync::Mutex};

    /// Pretends to be the converter by writing a short stereo WAV to the output argument.
    #[derive(Default)]
    struct WritingRunner {
        written: Mutex<Option<PathBuf>>,
    }

    impl ProcessRunner for WritingRunner {
        fn run(
            &self,
            _program: &str,
            args: &[OsString],
        ) -> std::result::Result<CommandOutput, ProcessError> {
            let output = PathBuf::from(args.last().unwrap());
            let spec = WavSpec {
                channels: 2,
                sample_rate: TARGET_SAMPLE_RATE,
                bits_per_sample: 16,
                sample_format: SampleFormat::Int,
            };
            let mut writer = WavWriter::create(&output, spec).unwrap();
            for s in [16384i16, 0, -16384, 0, 8192, 8192] {
                writer.write_sample(s).unwrap();
            }
            writer.finalize().unwrap();
            *self.written.lock().unwrap() = Some(output);

            Ok(CommandOutput {
                status: Some(0),
                ..CommandOutput::default()
            })
        }
    }

    struct FailingRunner;

    impl ProcessRunner for FailingRunner {
        fn run(
            &self,
            _program: &str,
            _args: &[OsString],
        ) -> std::result::Result<CommandOutput, ProcessError> {
            Ok(CommandOutput {
                status: Some(1),
                stdout: String::new(),
                stderr: "Unknown input format".to_owned(),
            })
        }
    }

    #[test]
    fn test_ingest_decodes_converted_file_and_cleans_up() {
        let runner = WritingRunner::default();
        let transcoder = Transcoder::new(&runner);

        let buffer = ingest(&transcoder, "track.mp3", &LoadOptions::default()).unwrap();

        assert_eq!(buffer.samples(), &[0.25, -0.25, 0.25]);
        // the converter writes `<intermediate stem>.<uuid>.wav` next to the intermediate
        let written = runner.written.lock().unwrap().clone().unwrap();
        let name = written.file_name().unwrap().to_string_lossy().into_owned();
        let stem = name.split('.').next().unwrap();
        let intermediate = written.with_file_name(format!("{stem}.wav"));
        assert!(stem.starts_with("audio-ingest-"));
        assert!(!written.exists());
        assert!(!intermediate.exists());
    }

    #[test]
    fn test_ingest_surfaces_conversion_failure() {
        let transcoder = Transcoder::with_config(FailingRunner, TranscoderConfig::default());

        let result = ingest(&transcoder, "track.xyz", &LoadOptions::default());

        assert!(matches!(result, Err(IngestError::ConversionFailure { .. })));
    }
}
