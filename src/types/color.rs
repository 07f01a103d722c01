use std::{fmt::Display, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The fixed highlight palette.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Gold,
    Tomato,
    Aquamarine,
    Plum,
    LightGreen,
}

/// Hex code of the eraser swatch. Picking it switches to clear mode.
pub const ERASER_HEX: &str = "#FFFFFF";

impl Color {
    pub const PALETTE: [Color; 5] = [
        Color::Gold,
        Color::Tomato,
        Color::Aquamarine,
        Color::Plum,
        Color::LightGreen,
    ];

    #[must_use]
    pub fn hex(self) -> &'static str {
        match self {
            Color::Gold => "#FFD700",
            Color::Tomato => "#FF6347",
            Color::Aquamarine => "#7FFFD4",
            Color::Plum => "#DDA0DD",
            Color::LightGreen => "#90EE90",
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Color::Gold => "gold",
            Color::Tomato => "tomato",
            Color::Aquamarine => "aquamarine",
            Color::Plum => "plum",
            Color::LightGreen => "light_green",
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.name()) }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown color '{0}', expected a palette name or hex code")]
pub struct UnknownColor(pub String);

impl FromStr for Color {
    type Err = UnknownColor;

    /// Accepts palette names (`"gold"`, `"light-green"`) and hex codes
    /// (`"#ffd700"`), case-insensitively.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_lowercase().replace('-', "_");

        Color::PALETTE
            .into_iter()
            .find(|color| color.name() == normalized || color.hex().to_lowercase() == normalized)
            .ok_or_else(|| UnknownColor(value.to_owned()))
    }
}

/// What a selection does: paint a new highlight or erase existing ones.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Brush {
    Paint(Color),
    Clear,
}

impl Default for Brush {
    fn default() -> Self { Brush::Paint(Color::Gold) }
}

impl FromStr for Brush {
    type Err = UnknownColor;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_lowercase();
        if normalized == ERASER_HEX.to_lowercase() || normalized == "white" || normalized == "clear"
        {
            return Ok(Brush::Clear);
        }

        value.parse().map(Brush::Paint)
    }
}
