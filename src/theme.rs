//! Studio themes: fixed {background, surface, text} color triples.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use serde::{Deserialize, Serialize};

/// A named studio theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
    Amoled,
}

/// The fixed color triple behind a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePalette {
    pub background: &'static str,
    pub surface: &'static str,
    pub text: &'static str,
}

impl Theme {
    #[must_use]
    pub fn palette(self) -> ThemePalette {
        match self {
            Self::Light => ThemePalette { background: "#ffffff", surface: "#f1f5f9", text: "#0f172a" },
            Self::Dark => ThemePalette { background: "#0f172a", surface: "#1e293b", text: "#f8fafc" },
            Self::Amoled => ThemePalette { background: "#000000", surface: "#121212", text: "#ffffff" },
        }
    }

    /// Toggle control behavior: Dark and Light swap; AMOLED (reachable only
    /// via a persisted blob or an explicit set) falls back to Dark.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light | Self::Amoled => Self::Dark,
        }
    }

    /// Parse a wire name. Unknown names resolve to `None`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            "amoled" => Some(Self::Amoled),
            _ => None,
        }
    }
}

/// Parse `#rgb` or `#rrggbb` into an RGB triple. Used by the PNG exporter;
/// anything unparsable is treated as absent and falls back to theme colors.
#[must_use]
pub fn parse_hex_color(raw: &str) -> Option<[u8; 3]> {
    let hex = raw.trim().strip_prefix('#')?;
    match hex.len() {
        3 => {
            let mut rgb = [0u8; 3];
            for (i, c) in hex.chars().enumerate() {
                let v = c.to_digit(16)? as u8;
                rgb[i] = v * 17;
            }
            Some(rgb)
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some([r, g, b])
        }
        _ => None,
    }
}
