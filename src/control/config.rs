//! Controller configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Potential field controller parameters.
///
/// All values are constant for a whole run; nothing here adapts online.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Obstacles closer than `2 · safety_margin` repel the robot
    pub safety_margin: f32,

    /// Distance moved per step
    pub speed: f32,

    /// Proportional heading gain (fraction of the angle error corrected per step)
    pub turn_gain: f32,

    /// Magnitude of the goal attraction force
    pub attraction_gain: f32,

    /// Weight of the summed repulsion relative to attraction
    pub repulsion_weight: f32,

    /// Range floor used in the inverse-square term
    pub min_repulsion_range: f32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            safety_margin: 3.0,
            speed: 0.2,
            turn_gain: 0.7,
            attraction_gain: 0.5,
            repulsion_weight: 0.6,
            min_repulsion_range: 0.1,
        }
    }
}

impl ControllerConfig {
    /// Range below which a reading contributes repulsion
    pub fn influence_range(&self) -> f32 {
        2.0 * self.safety_margin
    }

    /// Reject parameters outside their physical range.
    pub fn validate(&self) -> Result<()> {
        if !self.speed.is_finite() || self.speed < 0.0 {
            return Err(Error::invalid(format!(
                "controller.speed must be >= 0, got {}",
                self.speed
            )));
        }
        if !self.safety_margin.is_finite() || self.safety_margin < 0.0 {
            return Err(Error::invalid(format!(
                "controller.safety_margin must be >= 0, got {}",
                self.safety_margin
            )));
        }
        if !(self.turn_gain > 0.0 && self.turn_gain <= 1.0) {
            return Err(Error::invalid(format!(
                "controller.turn_gain must be in (0, 1], got {}",
                self.turn_gain
            )));
        }
        if !self.attraction_gain.is_finite() || self.attraction_gain <= 0.0 {
            return Err(Error::invalid(format!(
                "controller.attraction_gain must be > 0, got {}",
                self.attraction_gain
            )));
        }
        if !self.repulsion_weight.is_finite() || self.repulsion_weight < 0.0 {
            return Err(Error::invalid(format!(
                "controller.repulsion_weight must be >= 0, got {}",
                self.repulsion_weight
            )));
        }
        if !self.min_repulsion_range.is_finite() || self.min_repulsion_range <= 0.0 {
            return Err(Error::invalid(format!(
                "controller.min_repulsion_range must be > 0, got {}",
                self.min_repulsion_range
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ControllerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.influence_range(), 6.0);
    }

    #[test]
    fn test_rejects_negative_speed() {
        let config = ControllerConfig {
            speed: -0.1,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_rejects_bad_gain() {
        for gain in [0.0, -0.5, 1.5, f32::NAN] {
            let config = ControllerConfig {
                turn_gain: gain,
                ..Default::default()
            };
            assert!(config.validate().is_err(), "gain {} accepted", gain);
        }
    }
}
