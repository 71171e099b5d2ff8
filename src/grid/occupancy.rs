//! Fixed-size binary occupancy grid.

use log::trace;

use crate::core::{GridCoord, WorldPoint};
use crate::error::{Error, Result};

use super::raycaster::{RayCast, RayHit, entry_distance};

/// Binary occupancy grid over world coordinates.
///
/// Storage is row-major (`index = y * width + x`), one `bool` per cell.
#[derive(Clone, Debug)]
pub struct OccupancyGrid {
    /// Grid width in cells
    width: usize,
    /// Grid height in cells
    height: usize,
    /// Length units per cell
    resolution: f32,
    /// World coordinates of cell (0,0) corner
    origin: WorldPoint,
    /// Occupancy flags
    cells: Vec<bool>,
}

impl OccupancyGrid {
    /// Create an empty grid with its origin at (0, 0).
    pub fn new(width: usize, height: usize, resolution: f32) -> Result<Self> {
        Self::with_origin(width, height, resolution, WorldPoint::ZERO)
    }

    /// Create an empty grid with an explicit origin.
    pub fn with_origin(
        width: usize,
        height: usize,
        resolution: f32,
        origin: WorldPoint,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::invalid(format!(
                "grid dimensions must be non-zero, got {}x{}",
                width, height
            )));
        }
        if !resolution.is_finite() || resolution <= 0.0 {
            return Err(Error::invalid(format!(
                "grid resolution must be positive, got {}",
                resolution
            )));
        }

        Ok(Self {
            width,
            height,
            resolution,
            origin,
            cells: vec![false; width * height],
        })
    }

    /// Build a grid from text rows, `#` marks an occupied cell.
    ///
    /// The first row is the top of the map (highest y), matching how the
    /// rows read on screen.
    pub fn from_rows(rows: &[&str], resolution: f32) -> Result<Self> {
        let height = rows.len();
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let mut grid = Self::new(width, height, resolution)?;

        for (row_idx, row) in rows.iter().enumerate() {
            let y = (height - 1 - row_idx) as i32;
            for (x, ch) in row.chars().enumerate() {
                if ch == '#' {
                    grid.set_occupied(GridCoord::new(x as i32, y), true);
                }
            }
        }

        Ok(grid)
    }

    /// Grid width in cells
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells
    pub fn height(&self) -> usize {
        self.height
    }

    /// Length units per cell
    pub fn resolution(&self) -> f32 {
        self.resolution
    }

    /// World coordinates of the (0,0) cell corner
    pub fn origin(&self) -> WorldPoint {
        self.origin
    }

    /// World extent (width, height)
    pub fn world_size(&self) -> (f32, f32) {
        (
            self.width as f32 * self.resolution,
            self.height as f32 * self.resolution,
        )
    }

    /// World bounds: (min_point, max_point)
    pub fn bounds(&self) -> (WorldPoint, WorldPoint) {
        let (w, h) = self.world_size();
        (self.origin, self.origin + WorldPoint::new(w, h))
    }

    /// Is this coordinate inside the grid?
    #[inline]
    pub fn is_valid_coord(&self, coord: GridCoord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && (coord.x as usize) < self.width
            && (coord.y as usize) < self.height
    }

    #[inline]
    fn index(&self, coord: GridCoord) -> Option<usize> {
        if self.is_valid_coord(coord) {
            Some(coord.y as usize * self.width + coord.x as usize)
        } else {
            None
        }
    }

    /// Convert world coordinates to the containing cell
    #[inline]
    pub fn world_to_grid(&self, point: WorldPoint) -> GridCoord {
        GridCoord::new(
            ((point.x - self.origin.x) / self.resolution).floor() as i32,
            ((point.y - self.origin.y) / self.resolution).floor() as i32,
        )
    }

    /// Convert grid coordinates to world coordinates (cell center)
    #[inline]
    pub fn grid_to_world(&self, coord: GridCoord) -> WorldPoint {
        WorldPoint::new(
            self.origin.x + (coord.x as f32 + 0.5) * self.resolution,
            self.origin.y + (coord.y as f32 + 0.5) * self.resolution,
        )
    }

    /// Corner points (min, max) of a cell square
    pub fn cell_bounds(&self, coord: GridCoord) -> (WorldPoint, WorldPoint) {
        let min = WorldPoint::new(
            self.origin.x + coord.x as f32 * self.resolution,
            self.origin.y + coord.y as f32 * self.resolution,
        );
        (min, min + WorldPoint::new(self.resolution, self.resolution))
    }

    /// Does the grid cover this world point?
    pub fn contains_world(&self, point: WorldPoint) -> bool {
        self.is_valid_coord(self.world_to_grid(point))
    }

    /// Is this cell occupied? Out-of-bounds cells are occupied.
    #[inline]
    pub fn is_occupied(&self, coord: GridCoord) -> bool {
        match self.index(coord) {
            Some(idx) => self.cells[idx],
            None => true,
        }
    }

    /// Is the cell containing this world point occupied?
    #[inline]
    pub fn is_occupied_at_world(&self, point: WorldPoint) -> bool {
        self.is_occupied(self.world_to_grid(point))
    }

    /// Mark a cell. Returns false if the coordinate is outside the grid.
    pub fn set_occupied(&mut self, coord: GridCoord, occupied: bool) -> bool {
        match self.index(coord) {
            Some(idx) => {
                self.cells[idx] = occupied;
                true
            }
            None => false,
        }
    }

    /// Mark every cell overlapping the world rectangle `[min, max)` occupied.
    ///
    /// The rectangle is clipped to the grid. Returns the number of cells set.
    pub fn fill_world_rect(&mut self, min: WorldPoint, max: WorldPoint) -> usize {
        let to_cells = |v: f32, o: f32| (v - o) / self.resolution;
        let x0 = to_cells(min.x, self.origin.x).floor().max(0.0) as usize;
        let y0 = to_cells(min.y, self.origin.y).floor().max(0.0) as usize;
        let x1 = (to_cells(max.x, self.origin.x).ceil().max(0.0) as usize).min(self.width);
        let y1 = (to_cells(max.y, self.origin.y).ceil().max(0.0) as usize).min(self.height);

        let mut count = 0;
        for y in y0..y1 {
            for x in x0..x1 {
                self.cells[y * self.width + x] = true;
                count += 1;
            }
        }
        count
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Iterate over occupied cell coordinates
    pub fn iter_occupied(&self) -> impl Iterator<Item = GridCoord> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, occupied)| **occupied)
            .map(|(idx, _)| {
                GridCoord::new((idx % self.width) as i32, (idx / self.width) as i32)
            })
    }

    /// Cast a ray and return the first occupied cell boundary it crosses.
    ///
    /// Marches from `origin` along `angle` for up to `max_range`:
    /// - `None` if the ray leaves the grid or reaches `max_range` without
    ///   touching an occupied cell
    /// - a hit at the origin with distance 0 if the origin itself is
    ///   occupied or outside the grid
    /// - otherwise the entry point on the first occupied cell found
    pub fn ray_intersection(
        &self,
        origin: WorldPoint,
        angle: f32,
        max_range: f32,
    ) -> Option<RayHit> {
        let ray = RayCast::new(origin, angle, max_range, self.origin, self.resolution);
        let direction = ray.direction();

        for (coord, sample_distance) in ray {
            if sample_distance == 0.0 {
                if self.is_occupied(coord) {
                    trace!("Ray origin ({:.2}, {:.2}) is blocked", origin.x, origin.y);
                    return Some(RayHit {
                        point: origin,
                        distance: 0.0,
                        cell: coord,
                    });
                }
                continue;
            }

            let Some(idx) = self.index(coord) else {
                // Left the grid without a hit
                return None;
            };

            if self.cells[idx] {
                let (min, max) = self.cell_bounds(coord);
                let distance = entry_distance(origin, direction, min, max).min(sample_distance);
                return Some(RayHit {
                    point: origin + direction * distance,
                    distance,
                    cell: coord,
                });
            }
        }

        None
    }

    /// Distance from a point to the closest occupied cell square.
    ///
    /// Zero when the point lies inside an occupied cell; `None` when the
    /// grid has no occupied cells.
    pub fn distance_to_nearest_occupied(&self, point: WorldPoint) -> Option<f32> {
        self.iter_occupied()
            .map(|coord| {
                let (min, max) = self.cell_bounds(coord);
                let dx = (min.x - point.x).max(0.0).max(point.x - max.x);
                let dy = (min.y - point.y).max(0.0).max(point.y - max.y);
                (dx * dx + dy * dy).sqrt()
            })
            .min_by(f32::total_cmp)
    }
}
