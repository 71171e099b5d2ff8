//! 2D pose type for robot position and orientation.

use serde::{Deserialize, Serialize};

use super::math::normalize_angle;
use super::point::WorldPoint;

/// A 2D pose representing position and heading.
///
/// Theta is always stored normalized to (-π, π].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose2D {
    /// X position
    pub x: f32,
    /// Y position
    pub y: f32,
    /// Heading angle in radians (-π, π], CCW positive from X-axis
    pub theta: f32,
}

impl Pose2D {
    /// Create a new pose. Theta is normalized to (-π, π].
    #[inline]
    pub fn new(x: f32, y: f32, theta: f32) -> Self {
        Self {
            x,
            y,
            theta: normalize_angle(theta),
        }
    }

    /// Create a pose from position and heading.
    #[inline]
    pub fn from_position(position: WorldPoint, theta: f32) -> Self {
        Self::new(position.x, position.y, theta)
    }

    /// Get the position as a WorldPoint.
    #[inline]
    pub fn position(&self) -> WorldPoint {
        WorldPoint::new(self.x, self.y)
    }

    /// Euclidean distance from this pose's position to a point.
    #[inline]
    pub fn distance_to(&self, point: &WorldPoint) -> f32 {
        self.position().distance(point)
    }

    /// Distance between the positions of two poses.
    #[inline]
    pub fn distance(&self, other: &Pose2D) -> f32 {
        self.position().distance(&other.position())
    }
}
