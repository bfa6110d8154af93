//! Turns arbitrary audio media into normalized mono sample buffers.
//!
//! The [`transcoder`] hands the source to an external converter which writes a
//! 16-bit PCM WAV at [`constants::TARGET_SAMPLE_RATE`]. The [`loader`] then decodes
//! a time range of such a file into an [`AudioBuffer`].

pub mod buffer;
pub mod constants;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod transcoder;

pub use buffer::AudioBuffer;
pub use error::{IngestError, Result};
pub use loader::{LoadOptions, SampleLoader, SourceFormat};
pub use pipeline::ingest;
pub use transcoder::{Transcoder, TranscoderConfig};
