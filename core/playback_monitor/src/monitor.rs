use std::{ffi::OsString, path::PathBuf};

use process::ProcessRunner;

use crate::{
    error::{MonitorError, Result},
    location::{MISSING_VALUE, TRACK_LOCATION_PREFIX_LEN, location_to_path},
    status::PlaybackStatus,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    /// Scripting host executable (default: `osascript`)
    pub interpreter: String,
    /// Application the queries are addressed to (default: `iTunes`)
    pub application: String,
    /// Characters cut from the front of a track location
    pub location_prefix_len: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interpreter: "osascript".to_owned(),
            application: "iTunes".to_owned(),
            location_prefix_len: TRACK_LOCATION_PREFIX_LEN,
        }
    }
}

/// The single-line scripts sent to the scripting host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    Liveness,
    PlayerState,
    PlayerPosition,
    TrackLocation,
}

impl Query {
    pub fn script(self, application: &str) -> String {
        match self {
            Self::Liveness => format!("application \"{application}\" is running"),
            Self::PlayerState => format!("tell application \"{application}\" to get player state"),
            Self::PlayerPosition => {
                format!("tell application \"{application}\" to player position")
            }
            Self::TrackLocation => {
                format!("tell application \"{application}\" to get location of current track")
            }
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Liveness => "liveness",
            Self::PlayerState => "player state",
            Self::PlayerPosition => "player position",
            Self::TrackLocation => "track location",
        }
    }
}

/// Snapshot of what the player is doing right now.
#[derive(Debug, Clone, PartialEq)]
pub struct NowPlaying {
    pub status: PlaybackStatus,
    /// Seconds into the track
    pub position: f64,
    pub track: PathBuf,
}

/// `PlaybackMonitor` asks a running player about its state, one process per query.
///
/// It keeps no state between calls; every answer is a point-in-time snapshot
/// and the player may change track between two queries.
#[derive(Debug)]
pub struct PlaybackMonitor<R> {
    runner: R,
    config: MonitorConfig,
}

impl<R: ProcessRunner> PlaybackMonitor<R> {
    pub fn new(runner: R) -> Self {
        Self::with_config(runner, MonitorConfig::default())
    }

    pub fn with_config(runner: R, config: MonitorConfig) -> Self {
        Self { runner, config }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Runs `query` and returns its stdout with the trailing newline removed.
    pub fn query(&self, query: Query) -> Result<String> {
        let args: [OsString; 2] = ["-e".into(), query.script(&self.config.application).into()];
        let output = self.runner.run(&self.config.interpreter, &args)?;

        if !output.success() {
            return Err(MonitorError::ScriptFailed {
                status: output.status,
                diagnostics: output.stderr.trim().to_owned(),
            });
        }

        Ok(output.trimmed_stdout().to_owned())
    }

    pub fn is_running(&self) -> Result<bool> {
        Ok(self.query(Query::Liveness)? == "true")
    }

    /// Unrecognized states degrade to [`PlaybackStatus::Unknown`] instead of failing.
    pub fn status(&self) -> Result<PlaybackStatus> {
        let response = self.query(Query::PlayerState)?;
        Ok(PlaybackStatus::from_response(&response))
    }

    /// Position in seconds, `0.0` when the player has no position to report.
    pub fn position(&self) -> Result<f64> {
        let response = self.query(Query::PlayerPosition)?;
        if response == MISSING_VALUE {
            return Ok(0.0);
        }

        response
            .parse::<f64>()
            .map_err(|_| MonitorError::MalformedResponse {
                query: Query::PlayerPosition.name(),
                response,
            })
    }

    pub fn current_track_path(&self) -> Result<PathBuf> {
        let response = self.query(Query::TrackLocation)?;
        location_to_path(&response, self.config.location_prefix_len)
    }

    /// `None` while the player is closed or not inside a track.
    pub fn now_playing(&self) -> Result<Option<NowPlaying>> {
        if !self.is_running()? {
            return Ok(None);
        }

        let status = self.status()?;
        if !status.has_track() {
            return Ok(None);
        }

        Ok(Some(NowPlaying {
            status,
            position: self.position()?,
            track: self.current_track_path()?,
        }))
    }
}
