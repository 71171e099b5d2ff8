//! Obstacle blocks and bounded rejection-sampling placement.

use log::{debug, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::WorldPoint;
use crate::error::{Error, Result};

/// Axis-aligned rectangular obstacle in world coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Lower-left X
    pub x: f32,
    /// Lower-left Y
    pub y: f32,
    /// Extent along X
    pub width: f32,
    /// Extent along Y
    pub height: f32,
}

impl Block {
    /// Create a block from its lower-left corner and size
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square block centered on `center`
    pub fn centered(center: WorldPoint, size: f32) -> Self {
        let half = size * 0.5;
        Self::new(center.x - half, center.y - half, size, size)
    }

    /// Lower-left corner
    pub fn min(&self) -> WorldPoint {
        WorldPoint::new(self.x, self.y)
    }

    /// Upper-right corner
    pub fn max(&self) -> WorldPoint {
        WorldPoint::new(self.x + self.width, self.y + self.height)
    }

    /// Center point
    pub fn center(&self) -> WorldPoint {
        WorldPoint::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Euclidean distance from `point` to the block (0 inside).
    pub fn distance_to(&self, point: WorldPoint) -> f32 {
        let max = self.max();
        let dx = (self.x - point.x).max(0.0).max(point.x - max.x);
        let dy = (self.y - point.y).max(0.0).max(point.y - max.y);
        (dx * dx + dy * dy).sqrt()
    }
}

/// Random obstacle placement parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleSpec {
    /// Number of random square blocks
    pub count: usize,
    /// Smallest block side
    pub min_size: f32,
    /// Largest block side
    pub max_size: f32,
    /// Minimum distance between a block and the start or goal
    pub clearance: f32,
    /// Placement attempts per block before giving up
    pub max_attempts: usize,
}

impl Default for ObstacleSpec {
    fn default() -> Self {
        Self {
            count: 8,
            min_size: 2.0,
            max_size: 6.0,
            clearance: 10.0,
            max_attempts: 100,
        }
    }
}

impl ObstacleSpec {
    /// Spec with no random obstacles
    pub fn none() -> Self {
        Self {
            count: 0,
            ..Default::default()
        }
    }

    /// Reject sizes that cannot fit a map of `map_size`.
    pub fn validate(&self, map_size: f32) -> Result<()> {
        if self.count == 0 {
            return Ok(());
        }
        if !self.min_size.is_finite() || self.min_size <= 0.0 {
            return Err(Error::invalid(format!(
                "scenario.obstacles.min_size must be > 0, got {}",
                self.min_size
            )));
        }
        if !self.max_size.is_finite() || self.max_size < self.min_size {
            return Err(Error::invalid(format!(
                "scenario.obstacles.max_size must be >= min_size, got {}",
                self.max_size
            )));
        }
        if self.max_size >= map_size {
            return Err(Error::invalid(format!(
                "scenario.obstacles.max_size {} does not fit map size {}",
                self.max_size, map_size
            )));
        }
        if !self.clearance.is_finite() || self.clearance < 0.0 {
            return Err(Error::invalid(format!(
                "scenario.obstacles.clearance must be >= 0, got {}",
                self.clearance
            )));
        }
        if self.max_attempts == 0 {
            return Err(Error::invalid(
                "scenario.obstacles.max_attempts must be > 0",
            ));
        }
        Ok(())
    }
}

/// Place `spec.count` square blocks inside `[margin, map_size - margin]`.
///
/// Each candidate is drawn uniformly; a candidate closer than
/// `spec.clearance` to any of `keep_clear` is rejected and redrawn. After
/// `spec.max_attempts` rejections for one block the placement fails.
pub fn place_obstacles<R: Rng>(
    rng: &mut R,
    spec: &ObstacleSpec,
    map_size: f32,
    margin: f32,
    keep_clear: &[WorldPoint],
) -> Result<Vec<Block>> {
    spec.validate(map_size)?;

    let mut blocks = Vec::with_capacity(spec.count);
    for index in 0..spec.count {
        let mut placed = None;
        for attempt in 0..spec.max_attempts {
            let size = rng.gen_range(spec.min_size..=spec.max_size);
            let hi = (map_size - margin - size).max(margin);
            let candidate = Block::new(
                rng.gen_range(margin..=hi),
                rng.gen_range(margin..=hi),
                size,
                size,
            );

            if keep_clear
                .iter()
                .all(|p| candidate.distance_to(*p) >= spec.clearance)
            {
                debug!(
                    "Obstacle {} placed at ({:.1}, {:.1}) size {:.1} after {} attempts",
                    index,
                    candidate.x,
                    candidate.y,
                    size,
                    attempt + 1
                );
                placed = Some(candidate);
                break;
            }
        }

        match placed {
            Some(block) => blocks.push(block),
            None => {
                warn!(
                    "Obstacle {} rejected {} times, giving up",
                    index, spec.max_attempts
                );
                return Err(Error::ObstaclePlacement {
                    index,
                    attempts: spec.max_attempts,
                });
            }
        }
    }

    Ok(blocks)
}
