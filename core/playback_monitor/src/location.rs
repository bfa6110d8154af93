//! Translation of player-native track locations into filesystem paths.
//!
//! The player prints locations as `alias Macintosh HD:Users:me:Music:song.mp3`.
//! The leading `alias <volume>` is cut off by length and the remaining `:`
//! separators become path separators. A `:` inside a file name is translated
//! too, which yields a wrong path; such names are not supported.

use std::path::{MAIN_SEPARATOR, PathBuf};

use crate::error::{MonitorError, Result};

/// Length of the `alias Macintosh HD` prefix
pub const TRACK_LOCATION_PREFIX_LEN: usize = 18;

pub const PLAYER_SEPARATOR: char = ':';

/// Printed by the scripting host when a property has no value
pub const MISSING_VALUE: &str = "missing value";

pub fn location_to_path(location: &str, prefix_len: usize) -> Result<PathBuf> {
    let location = location.trim();
    if location.is_empty() || location == MISSING_VALUE {
        return Err(MonitorError::NoTrackLoaded);
    }

    // by chars, so a non-ASCII volume name cannot split a code point
    let path: String = location
        .chars()
        .skip(prefix_len)
        .map(|c| if c == PLAYER_SEPARATOR { MAIN_SEPARATOR } else { c })
        .collect();

    if path.is_empty() {
        return Err(MonitorError::MalformedResponse {
            query: "track location",
            response: location.to_owned(),
        });
    }

    Ok(PathBuf::from(path))
}
