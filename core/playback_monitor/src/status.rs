use std::fmt;

/// Transport state reported by the player.
///
/// `Unknown` absorbs any answer the player gives that is not one of the
/// documented states; it is logged so format drift shows up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaybackStatus {
    Stopped,
    Playing,
    Paused,
    FastForwarding,
    Rewinding,
    Unknown,
}

impl PlaybackStatus {
    /// Maps the trimmed, lowercased player state onto a status.
    pub fn from_response(response: &str) -> Self {
        let state = response.trim().to_ascii_lowercase();
        match state.as_str() {
            "stopped" => Self::Stopped,
            "playing" => Self::Playing,
            "paused" => Self::Paused,
            "fast forwarding" => Self::FastForwarding,
            "rewinding" => Self::Rewinding,
            _ => {
                log::warn!("Unknown play status: {:?}", response.trim());
                Self::Unknown
            }
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stopped => "stopped",
            Self::Playing => "playing",
            Self::Paused => "paused",
            Self::FastForwarding => "fast forwarding",
            Self::Rewinding => "rewinding",
            Self::Unknown => "unknown",
        }
    }

    /// Whether the player is positioned inside a track
    pub const fn has_track(self) -> bool {
        match self {
            Self::Playing | Self::Paused | Self::FastForwarding | Self::Rewinding => true,
            Self::Stopped | Self::Unknown => false,
        }
    }
}

impl fmt::Display for PlaybackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{capture_logs, logged};

    #[test]
    fn test_documented_states_map_exactly() {
        let cases = [
            ("stopped", PlaybackStatus::Stopped),
            ("playing", PlaybackStatus::Playing),
            ("paused", PlaybackStatus::Paused),
            ("fast forwarding", PlaybackStatus::FastForwarding),
            ("rewinding", PlaybackStatus::Rewinding),
        ];

        for (response, expected) in cases {
            assert_eq!(PlaybackStatus::from_response(response), expected);
        }
    }

    #[test]
    fn test_trailing_newline_and_case_are_ignored() {
        assert_eq!(
            PlaybackStatus::from_response("Playing\n"),
            PlaybackStatus::Playing
        );
    }

    #[test]
    fn test_unrecognized_state_is_unknown_and_logged() {
        capture_logs();

        assert_eq!(
            PlaybackStatus::from_response("seeking\n"),
            PlaybackStatus::Unknown
        );
        assert!(logged("Unknown play status: \"seeking\""));
    }

    #[test]
    fn test_display_round_trips_known_states() {
        for status in [
            PlaybackStatus::Stopped,
            PlaybackStatus::Playing,
            PlaybackStatus::Paused,
            PlaybackStatus::FastForwarding,
            PlaybackStatus::Rewinding,
        ] {
            assert_eq!(PlaybackStatus::from_response(&status.to_string()), status);
        }
    }
}
