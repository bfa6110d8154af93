//! Polls a running media player through the OS scripting host.
//!
//! Every query runs exactly one external process and maps its textual answer.
//! Nothing is cached between calls.

pub mod error;
pub mod location;
pub mod monitor;
pub mod status;

pub use error::{MonitorError, Result};
pub use monitor::{MonitorConfig, NowPlaying, PlaybackMonitor, Query};
pub use status::PlaybackStatus;
