use std::fmt;
use std::str::FromStr;

use palette::Srgb;
use serde::{Serialize, Serializer};

use crate::error::{OctsError, Result};

// ---------------------------------------------------------------------------
// Colour names → hex
// ---------------------------------------------------------------------------

/// Translate a CSS colour name (case-insensitive) into `#rrggbb`.
///
/// The lookup goes through palette's compile-time table of named colours,
/// so there is nothing to build or share at runtime.
pub fn colour_name_to_hex(name: &str) -> Result<String> {
    let rgb = palette::named::from_str(&name.trim().to_ascii_lowercase())
        .ok_or_else(|| OctsError::UnknownColor(name.to_string()))?;
    Ok(to_hex(rgb))
}

/// Parse `#rrggbb` (or `rrggbb`) back into 8-bit sRGB for renderers.
pub fn hex_to_rgb(hex: &str) -> Result<Srgb<u8>> {
    Srgb::<u8>::from_str(hex).map_err(|_| OctsError::UnknownColor(hex.to_string()))
}

fn to_hex(rgb: Srgb<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb.red, rgb.green, rgb.blue)
}

// ---------------------------------------------------------------------------
// Line styles → dash codes
// ---------------------------------------------------------------------------

/// Line style of a model, carried to the chart as a numeric dash code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DashStyle {
    Solid,
    Dotted,
    Dashed,
}

impl DashStyle {
    /// Dash length understood by the chart's stroke settings.
    pub fn code(&self) -> u8 {
        match self {
            DashStyle::Solid => 0,
            DashStyle::Dotted => 1,
            DashStyle::Dashed => 3,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(DashStyle::Solid),
            1 => Some(DashStyle::Dotted),
            3 => Some(DashStyle::Dashed),
            _ => None,
        }
    }
}

impl FromStr for DashStyle {
    type Err = OctsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "solid" => Ok(DashStyle::Solid),
            "dotted" => Ok(DashStyle::Dotted),
            "dashed" => Ok(DashStyle::Dashed),
            _ => Err(OctsError::UnknownStyle(s.to_string())),
        }
    }
}

impl fmt::Display for DashStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DashStyle::Solid => write!(f, "solid"),
            DashStyle::Dotted => write!(f, "dotted"),
            DashStyle::Dashed => write!(f, "dashed"),
        }
    }
}

impl Serialize for DashStyle {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}
