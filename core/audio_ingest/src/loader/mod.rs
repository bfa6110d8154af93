use std::{
    io::{Read, Seek},
    path::Path,
};

use hound::WavReader;

use crate::{
    buffer::AudioBuffer,
    constants::{MAX_CHANNELS, SAMPLE_SCALE},
    error::{IngestError, Result},
};

pub mod format;
pub mod options;

pub use format::{FrameRange, SourceFormat};
pub use options::LoadOptions;

/// `SampleLoader` decodes a range of a 16-bit PCM WAV into a mono [`AudioBuffer`].
///
/// Supports:
/// - Mono and stereo files (stereo is averaged down to mono)
/// - 16-bit integer samples only, scaled by `1 / 32768`
///
/// The file handle lives only for the duration of a call and is closed on every
/// exit path.
///
/// # Example
/// ```no_run
/// use audio_ingest::{LoadOptions, SampleLoader};
///
/// let options = LoadOptions::with_range(10.0, 40.0);
/// let buffer = SampleLoader::load("intermediate.wav", &options).unwrap();
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleLoader;

impl SampleLoader {
    pub fn load<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Result<AudioBuffer> {
        log::debug!("Loading samples from {}", path.as_ref().display());
        let reader = WavReader::open(path)?;
        Self::decode(reader, options)
    }

    pub fn load_from_reader<R: Read + Seek>(
        stream: R,
        options: &LoadOptions,
    ) -> Result<AudioBuffer> {
        let reader = WavReader::new(stream)?;
        Self::decode(reader, options)
    }

    /// Reads only the header of the file at `path`.
    pub fn probe<P: AsRef<Path>>(path: P) -> Result<SourceFormat> {
        let reader = WavReader::open(path)?;
        Ok(SourceFormat::from_reader(&reader))
    }

    fn decode<R: Read + Seek>(
        mut reader: WavReader<R>,
        options: &LoadOptions,
    ) -> Result<AudioBuffer> {
        let format = SourceFormat::from_reader(&reader);
        format.validate(options)?;

        let range = format.frame_range(options);
        log::debug!(
            "Decoding {} frame(s) from frame {} ({} ch, {} Hz, {} total)",
            range.count,
            range.start,
            format.channels,
            format.frame_rate,
            format.total_frames
        );

        let raw = if range.count == 0 {
            Vec::new()
        } else {
            reader.seek(range.start)?;
            Self::read_available(&mut reader, range.count as usize * usize::from(format.channels))?
        };

        let samples = Self::collapse_channels(normalize_samples(&raw), format.channels)?;
        Ok(AudioBuffer::new(samples, format.frame_rate))
    }

    /// Reads up to `sample_count` samples.
    ///
    /// A data chunk shorter than its header claims ends the read early instead of
    /// failing; a trailing partial frame is dropped by the downmix.
    fn read_available<R: Read + Seek>(
        reader: &mut WavReader<R>,
        sample_count: usize,
    ) -> Result<Vec<i16>> {
        let mut raw = Vec::with_capacity(sample_count);
        for sample in reader.samples::<i16>().take(sample_count) {
            match sample {
                Ok(s) => raw.push(s),
                Err(hound::Error::IoError(e)) => {
                    let read = raw.len();
                    log::warn!("Data chunk ends after {read} of {sample_count} samples: {e}");
                    break;
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(raw)
    }

    /// Folds interleaved samples down to mono.
    /// Stereo pairs are averaged, mono passes through untouched.
    fn collapse_channels(samples: Vec<f32>, channels: u16) -> Result<Vec<f32>> {
        match channels {
            1 => Ok(samples),
            2 => Ok(samples
                .chunks_exact(2)
                .map(|pair| 0.5 * (pair[0] + pair[1]))
                .collect()),
            other => Err(IngestError::UnsupportedFormat(format!(
                "can only handle up to {MAX_CHANNELS} channels, got {other}"
            ))),
        }
    }
}

fn normalize_samples(raw: &[i16]) -> Vec<f32> {
    raw.iter().map(|&s| f32::from(s) * SAMPLE_SCALE).collect()
}
