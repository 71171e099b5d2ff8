//! Start/goal presets.

use std::f32::consts::FRAC_PI_2;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{Pose2D, WorldPoint};
use crate::error::Error;

/// Diagonal start/goal pairs, expressed as fractions of the map size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// Top-left corner heading down, goal bottom-right
    #[default]
    DiagonalDown,
    /// Bottom-left corner heading up, goal top-right
    DiagonalUp,
}

impl Preset {
    /// Corner inset as a fraction of the map size
    const INSET: f32 = 0.1;

    /// Start pose for a square map of `map_size`
    pub fn start(&self, map_size: f32) -> Pose2D {
        let near = Self::INSET * map_size;
        let far = (1.0 - Self::INSET) * map_size;
        match self {
            Preset::DiagonalDown => Pose2D::new(near, far, -FRAC_PI_2),
            Preset::DiagonalUp => Pose2D::new(near, near, FRAC_PI_2),
        }
    }

    /// Goal point for a square map of `map_size`
    pub fn goal(&self, map_size: f32) -> WorldPoint {
        let near = Self::INSET * map_size;
        let far = (1.0 - Self::INSET) * map_size;
        match self {
            Preset::DiagonalDown => WorldPoint::new(far, near),
            Preset::DiagonalUp => WorldPoint::new(far, far),
        }
    }

    /// The other preset
    pub fn toggled(&self) -> Self {
        match self {
            Preset::DiagonalDown => Preset::DiagonalUp,
            Preset::DiagonalUp => Preset::DiagonalDown,
        }
    }

    /// Short name
    pub fn name(&self) -> &'static str {
        match self {
            Preset::DiagonalDown => "down",
            Preset::DiagonalUp => "up",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Preset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "down" | "diagonal_down" => Ok(Preset::DiagonalDown),
            "up" | "diagonal_up" => Ok(Preset::DiagonalUp),
            other => Err(Error::invalid(format!(
                "unknown preset '{}', expected 'down' or 'up'",
                other
            ))),
        }
    }
}
