//! Persisted dark/light flag.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ThemeMode {
    #[default]
    #[serde(rename = "light")]
    Light,
    #[serde(rename = "dark-only")]
    DarkOnly,
}

impl ThemeMode {
    /// Stored value; anything but `dark-only` reads as light.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("dark-only") => Self::DarkOnly,
            _ => Self::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::DarkOnly => "dark-only",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::DarkOnly,
            Self::DarkOnly => Self::Light,
        }
    }

    /// Class on `<body>` while the dark mode is on.
    pub const BODY_CLASS: &'static str = "dark-only";

    pub fn is_dark(self) -> bool {
        self == Self::DarkOnly
    }
}
