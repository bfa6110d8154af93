use std::io::Read;

use hound::{SampleFormat, WavReader};

use crate::{
    constants::{SAMPLE_WIDTH_BYTES, TARGET_SAMPLE_RATE},
    error::{IngestError, Result},
    loader::LoadOptions,
};

/// Format descriptor read from a container header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceFormat {
    pub channels: u16,
    /// Bytes per sample of a single channel
    pub sample_width: u16,
    pub frame_rate: u32,
    pub total_frames: u32,
    pub sample_format: SampleFormat,
}

/// Frames to decode, already clamped to the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRange {
    pub start: u32,
    pub count: u32,
}

impl SourceFormat {
    pub fn from_reader<R: Read>(reader: &WavReader<R>) -> Self {
        let spec = reader.spec();
        Self {
            channels: spec.channels,
            sample_width: spec.bits_per_sample.div_ceil(8),
            frame_rate: spec.sample_rate,
            total_frames: reader.duration(),
            sample_format: spec.sample_format,
        }
    }

    pub fn duration_seconds(&self) -> f64 {
        if self.frame_rate == 0 {
            return 0.0;
        }
        f64::from(self.total_frames) / f64::from(self.frame_rate)
    }

    /// Checks everything that must hold before any sample is read.
    ///
    /// The channel count is deliberately left to the downmix step.
    pub fn validate(&self, options: &LoadOptions) -> Result<()> {
        if self.sample_format != SampleFormat::Int || self.sample_width != SAMPLE_WIDTH_BYTES {
            return Err(IngestError::UnsupportedFormat(format!(
                "expected {}-bit integer PCM, got {}-byte {:?} samples",
                SAMPLE_WIDTH_BYTES * 8,
                self.sample_width,
                self.sample_format
            )));
        }

        if self.frame_rate != TARGET_SAMPLE_RATE {
            if options.require_standard_rate {
                return Err(IngestError::UnsupportedFormat(format!(
                    "expected a frame rate of {TARGET_SAMPLE_RATE} Hz, got {} Hz",
                    self.frame_rate
                )));
            }
            log::warn!(
                "Loading {} Hz audio, analysis expects {TARGET_SAMPLE_RATE} Hz",
                self.frame_rate
            );
        }

        Ok(())
    }

    /// `floor(seconds * rate)` for both bounds, end clamped to the file length.
    pub fn frame_range(&self, options: &LoadOptions) -> FrameRange {
        let rate = f64::from(self.frame_rate);
        // float -> int casts saturate, so +inf lands on u32::MAX and NaN on 0
        let start = (options.start_seconds * rate).floor().max(0.0) as u32;
        let end = ((options.end_seconds * rate).floor().max(0.0) as u32).min(self.total_frames);

        FrameRange {
            start,
            count: end.saturating_sub(start),
        }
    }
}
