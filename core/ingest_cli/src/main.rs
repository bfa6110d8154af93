use std::{env, error::Error, path::PathBuf, time::Duration};

use audio_ingest::{LoadOptions, Transcoder, ingest};
use playback_monitor::PlaybackMonitor;
use process::SystemRunner;

const TRANSCODE_TIMEOUT: Duration = Duration::from_secs(300);
const QUERY_TIMEOUT: Duration = Duration::from_secs(10);

/// `ingest_cli [SOURCE [START_SECONDS [END_SECONDS]]]`
///
/// Without a source the track currently loaded in the player is used.
fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = env::args().skip(1);
    let source = match args.next() {
        Some(path) => PathBuf::from(path),
        None => {
            let monitor = PlaybackMonitor::new(SystemRunner::with_timeout(QUERY_TIMEOUT));
            let Some(now) = monitor.now_playing()? else {
                log::warn!("Nothing is playing, pass a file to ingest instead");
                return Ok(());
            };
            log::info!(
                "Player is {} at {:.1}s in {}",
                now.status,
                now.position,
                now.track.display()
            );
            now.track
        }
    };

    let start = parse_seconds(args.next(), 0.0)?;
    let end = parse_seconds(args.next(), f64::INFINITY)?;

    let transcoder = Transcoder::new(SystemRunner::with_timeout(TRANSCODE_TIMEOUT));
    let buffer = ingest(&transcoder, &source, &LoadOptions::with_range(start, end))?;

    log::info!(
        "Loaded {} samples ({:.2}s at {} Hz) from {}",
        buffer.len(),
        buffer.duration_seconds(),
        buffer.sample_rate(),
        source.display()
    );
    Ok(())
}

fn parse_seconds(arg: Option<String>, default: f64) -> Result<f64, Box<dyn Error>> {
    match arg {
        None => Ok(default),
        Some(value) => value
            .parse::<f64>()
            .map_err(|e| format!("invalid number of seconds {value:?}: {e}").into()),
    }
}
