use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Message returned for any key outside the fixed mood set
pub const INVALID_MOOD_MESSAGE: &str =
    "Invalid mood. Choose: happy, chill, focus, sad, or afrobeats";

/// One of the fixed moods a listener can pick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Chill,
    Focus,
    Sad,
    Afrobeats,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid mood. Choose: happy, chill, focus, sad, or afrobeats")]
pub struct InvalidMood(pub String);

impl Mood {
    /// All moods in display order
    pub const ALL: [Mood; 5] = [
        Mood::Happy,
        Mood::Chill,
        Mood::Focus,
        Mood::Sad,
        Mood::Afrobeats,
    ];

    /// Resolve a user supplied key, ignoring case
    pub fn resolve(key: &str) -> Result<Self, InvalidMood> {
        match key.to_lowercase().as_str() {
            "happy" => Ok(Mood::Happy),
            "chill" => Ok(Mood::Chill),
            "focus" => Ok(Mood::Focus),
            "sad" => Ok(Mood::Sad),
            "afrobeats" => Ok(Mood::Afrobeats),
            _ => Err(InvalidMood(key.to_string())),
        }
    }

    /// Catalog search terms for this mood
    pub fn query(&self) -> &'static str {
        match self {
            Mood::Happy => "happy upbeat feel good",
            Mood::Chill => "chill relax calm peaceful",
            Mood::Focus => "focus study concentration",
            Mood::Sad => "sad melancholy emotional",
            Mood::Afrobeats => "afrobeats afrobeat african music wizkid burna boy",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Chill => "chill",
            Mood::Focus => "focus",
            Mood::Sad => "sad",
            Mood::Afrobeats => "afrobeats",
        }
    }
}

impl FromStr for Mood {
    type Err = InvalidMood;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mood::resolve(s)
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
