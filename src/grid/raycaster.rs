//! Continuous ray marching over the occupancy grid.
//!
//! Rays are sampled every half cell. Axis-aligned rays visit every cell
//! they cross; an oblique ray can clip the corner of a cell by less than
//! half a cell between two samples and miss it:
//!
//! ```text
//! start ●──●──●──●──●──● max_range
//!       d=0  R/2  R  ...
//! ```
//!
//! The marcher only reports cells; deciding what counts as a hit is left to
//! [`OccupancyGrid::ray_intersection`](super::OccupancyGrid::ray_intersection).

use crate::core::{GridCoord, WorldPoint};

/// Result of a ray that hit an occupied cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// World point where the ray enters the occupied cell
    pub point: WorldPoint,
    /// Distance from the ray origin to `point`
    pub distance: f32,
    /// The occupied cell that stopped the ray
    pub cell: GridCoord,
}

/// Cast a ray through the grid and yield each new cell along the path.
///
/// Returns an iterator of (GridCoord, distance_from_origin). The first item
/// is always the cell containing the origin at distance 0, and the final
/// sample is taken exactly at `max_range`.
pub struct RayCast {
    /// Ray origin (world coordinates)
    start: WorldPoint,
    /// Direction unit vector
    direction: WorldPoint,
    /// Step size (resolution / 2)
    step_size: f32,
    /// Maximum range
    max_range: f32,
    /// Distance of the next sample
    distance: f32,
    /// Grid origin
    origin: WorldPoint,
    /// Grid resolution
    resolution: f32,
    /// Last grid coordinate (to avoid duplicates)
    last_coord: Option<GridCoord>,
    /// Set once the max_range sample has been taken
    done: bool,
}

impl RayCast {
    /// Create a new ray cast from `start` along `angle`.
    pub fn new(
        start: WorldPoint,
        angle: f32,
        max_range: f32,
        grid_origin: WorldPoint,
        resolution: f32,
    ) -> Self {
        Self {
            start,
            direction: WorldPoint::from_angle(angle),
            step_size: resolution * 0.5,
            max_range: max_range.max(0.0),
            distance: 0.0,
            origin: grid_origin,
            resolution,
            last_coord: None,
            done: false,
        }
    }

    /// Step size used by this ray
    pub fn step_size(&self) -> f32 {
        self.step_size
    }

    /// Direction unit vector
    pub fn direction(&self) -> WorldPoint {
        self.direction
    }

    fn coord_at(&self, point: WorldPoint) -> GridCoord {
        GridCoord::new(
            ((point.x - self.origin.x) / self.resolution).floor() as i32,
            ((point.y - self.origin.y) / self.resolution).floor() as i32,
        )
    }
}

impl Iterator for RayCast {
    type Item = (GridCoord, f32);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.done {
                return None;
            }

            let distance = self.distance.min(self.max_range);
            if distance >= self.max_range {
                self.done = true;
            }

            // Sample from the start each time so error does not accumulate
            let point = self.start + self.direction * distance;
            let coord = self.coord_at(point);
            self.distance += self.step_size;

            // Only yield if this is a new cell
            if self.last_coord != Some(coord) {
                self.last_coord = Some(coord);
                return Some((coord, distance));
            }
        }
    }
}

/// Distance along a ray at which it enters an axis-aligned cell square.
///
/// Slab test against `[min, max]`. The caller guarantees the ray reaches
/// the square; the result is clamped to be non-negative.
pub(crate) fn entry_distance(
    start: WorldPoint,
    direction: WorldPoint,
    min: WorldPoint,
    max: WorldPoint,
) -> f32 {
    let mut t_enter = 0.0f32;
    for (o, d, lo, hi) in [
        (start.x, direction.x, min.x, max.x),
        (start.y, direction.y, min.y, max.y),
    ] {
        if d.abs() > f32::EPSILON {
            let t1 = (lo - o) / d;
            let t2 = (hi - o) / d;
            t_enter = t_enter.max(t1.min(t2));
        }
    }
    t_enter
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raycast_first_cell_is_origin() {
        let ray = RayCast::new(WorldPoint::new(0.5, 0.5), 0.0, 5.0, WorldPoint::ZERO, 1.0);
        let cells: Vec<_> = ray.collect();

        assert_eq!(cells[0], (GridCoord::new(0, 0), 0.0));
        // Horizontal ray visits each column once
        let columns: Vec<i32> = cells.iter().map(|(c, _)| c.x).collect();
        assert_eq!(columns, vec![0, 1, 2, 3, 4, 5]);
        assert!(cells.iter().all(|(c, _)| c.y == 0));
    }

    #[test]
    fn test_raycast_stops_at_max_range() {
        let ray = RayCast::new(WorldPoint::new(0.5, 0.5), 0.0, 2.2, WorldPoint::ZERO, 1.0);
        let cells: Vec<_> = ray.collect();
        let last = cells.last().copied().unwrap();
        assert_eq!(last.0, GridCoord::new(2, 0));
        assert!(cells.iter().all(|(_, d)| *d <= 2.2));
    }

    #[test]
    fn test_step_is_half_resolution() {
        let ray = RayCast::new(WorldPoint::ZERO, 1.0, 10.0, WorldPoint::ZERO, 0.5);
        assert_eq!(ray.step_size(), 0.25);
    }

    #[test]
    fn test_entry_distance() {
        let start = WorldPoint::new(0.5, 0.5);
        let t = entry_distance(
            start,
            WorldPoint::new(1.0, 0.0),
            WorldPoint::new(3.0, 0.0),
            WorldPoint::new(4.0, 1.0),
        );
        assert!((t - 2.5).abs() < 1e-6);

        // Diagonal entry through the corner region
        let dir = WorldPoint::from_angle(std::f32::consts::FRAC_PI_4);
        let t = entry_distance(
            WorldPoint::ZERO,
            dir,
            WorldPoint::new(2.0, 2.0),
            WorldPoint::new(3.0, 3.0),
        );
        assert!((t - 2.0 * 2.0f32.sqrt()).abs() < 1e-5);
    }
}
