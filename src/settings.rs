//! Game settings and preferences
//!
//! Owned by the host configuration store; loaded once at match start and
//! mutated through [`crate::sim::TickInput`] commands. How (or whether) it
//! is persisted is the host's concern - this module only provides the JSON
//! encoding helpers.

use serde::{Deserialize, Serialize};

/// AI difficulty presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    Impossible,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
            Difficulty::Impossible => "Impossible",
        }
    }

    /// Parse a difficulty name. Unknown keys fall back to `Normal`.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "easy" => Difficulty::Easy,
            "normal" | "med" | "medium" => Difficulty::Normal,
            "hard" => Difficulty::Hard,
            "impossible" => Difficulty::Impossible,
            _ => {
                log::warn!("unknown difficulty '{s}', using Normal");
                Difficulty::Normal
            }
        }
    }
}

/// Paddle size presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PaddleSize {
    Short,
    #[default]
    Normal,
    Tall,
}

impl PaddleSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaddleSize::Short => "Short",
            PaddleSize::Normal => "Normal",
            PaddleSize::Tall => "Tall",
        }
    }

    /// Parse a paddle size name. Unknown keys fall back to `Normal`.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "short" | "small" => PaddleSize::Short,
            "normal" | "med" | "medium" => PaddleSize::Normal,
            "tall" | "large" => PaddleSize::Tall,
            _ => {
                log::warn!("unknown paddle size '{s}', using Normal");
                PaddleSize::Normal
            }
        }
    }

    /// Paddle height in pixels
    pub fn height(&self) -> f32 {
        match self {
            PaddleSize::Short => 120.0,
            PaddleSize::Normal => 180.0,
            PaddleSize::Tall => 260.0,
        }
    }
}

/// Match settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// First to this score wins the match
    pub winning_score: u32,
    /// Pointer/touch sensitivity multiplier
    pub sensitivity: f32,
    /// AI opponent difficulty
    pub difficulty: Difficulty,
    /// Second human drives the right paddle instead of the AI
    pub two_player: bool,
    /// Paddle height preset (applies to both paddles)
    pub paddle_size: PaddleSize,
    /// Suppress audio cue events on the host side
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            winning_score: 10,
            sensitivity: 1.0,
            difficulty: Difficulty::Normal,
            two_player: false,
            paddle_size: PaddleSize::Normal,
            muted: false,
        }
    }
}

impl Settings {
    /// Encode for the host's settings store
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Decode from the host's settings store, falling back to defaults on
    /// missing or corrupt data
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("failed to parse settings ({err}), using defaults");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_from_str_fallback() {
        assert_eq!(Difficulty::from_str("hard"), Difficulty::Hard);
        assert_eq!(Difficulty::from_str("IMPOSSIBLE"), Difficulty::Impossible);
        assert_eq!(Difficulty::from_str("nightmare"), Difficulty::Normal);
        assert_eq!(Difficulty::from_str(""), Difficulty::Normal);
    }

    #[test]
    fn test_paddle_size_from_str_fallback() {
        assert_eq!(PaddleSize::from_str("tall"), PaddleSize::Tall);
        assert_eq!(PaddleSize::from_str("gigantic"), PaddleSize::Normal);
        assert!(PaddleSize::Short.height() < PaddleSize::Tall.height());
    }

    #[test]
    fn test_settings_from_corrupt_json() {
        let settings = Settings::from_json("not json at all");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_settings_json_round_trip() {
        let mut settings = Settings::default();
        settings.winning_score = 7;
        settings.difficulty = Difficulty::Hard;
        settings.two_player = true;
        let restored = Settings::from_json(&settings.to_json());
        assert_eq!(restored, settings);
    }
}
