//! Invocation of external programs behind an injectable [`ProcessRunner`].
//!
//! Both the transcoder and the playback monitor shell out to other tools.
//! They only ever see the trait, so tests can hand them canned output.

pub mod error;
pub mod runner;

pub use error::ProcessError;
pub use runner::{CommandOutput, ProcessRunner, SystemRunner};
