//! Format assumptions of the ingestion pipeline.

/// Rate every intermediate file is resampled to by the transcoder
pub const TARGET_SAMPLE_RATE: u32 = 22050;

/// Only 16-bit PCM is decoded
pub const SAMPLE_WIDTH_BYTES: u16 = 2;

/// Maps the `i16` range onto [-1.0, 1.0)
pub const SAMPLE_SCALE: f32 = 1.0 / 32768.0;

/// Mono and stereo only
pub const MAX_CHANNELS: u16 = 2;

#[cfg(test)]
pub const AUDIO_SAMPLE_EPSILON: f32 = 1e-6;
