//! Timer modes and their static configuration

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Key identifying one of the three timer presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ModeKey {
    Pomodoro,
    ShortBreak,
    LongBreak,
}

impl ModeKey {
    /// All keys in display order
    pub const ALL: [ModeKey; 3] = [ModeKey::Pomodoro, ModeKey::ShortBreak, ModeKey::LongBreak];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModeKey::Pomodoro => "pomodoro",
            ModeKey::ShortBreak => "shortBreak",
            ModeKey::LongBreak => "longBreak",
        }
    }
}

impl fmt::Display for ModeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModeKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModeKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| format!("Unknown timer mode: {}", s))
    }
}

/// Static configuration for a single mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeConfig {
    pub key: ModeKey,
    pub duration_minutes: u32,
    pub accent_color: String,
    pub label: String,
}

impl ModeConfig {
    pub fn new(key: ModeKey, duration_minutes: u32, accent_color: &str, label: &str) -> Self {
        Self {
            key,
            duration_minutes,
            accent_color: accent_color.to_string(),
            label: label.to_string(),
        }
    }

    /// Full duration of the mode in seconds
    pub fn duration_seconds(&self) -> i64 {
        i64::from(self.duration_minutes) * 60
    }
}

/// The immutable set of the three mode presets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeCatalogue {
    modes: [ModeConfig; 3],
}

impl ModeCatalogue {
    /// Build a catalogue with custom durations and the stock colors and labels
    pub fn with_durations(pomodoro: u32, short_break: u32, long_break: u32) -> Self {
        Self {
            modes: [
                ModeConfig::new(ModeKey::Pomodoro, pomodoro, "green", "Pomodoro"),
                ModeConfig::new(ModeKey::ShortBreak, short_break, "orange", "Short Break"),
                ModeConfig::new(ModeKey::LongBreak, long_break, "red", "Long Break"),
            ],
        }
    }

    /// Look up the configuration for a mode
    pub fn get(&self, key: ModeKey) -> &ModeConfig {
        match key {
            ModeKey::Pomodoro => &self.modes[0],
            ModeKey::ShortBreak => &self.modes[1],
            ModeKey::LongBreak => &self.modes[2],
        }
    }

    pub fn duration_seconds(&self, key: ModeKey) -> i64 {
        self.get(key).duration_seconds()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModeConfig> {
        self.modes.iter()
    }
}

impl Default for ModeCatalogue {
    fn default() -> Self {
        Self::with_durations(25, 5, 15)
    }
}
