//! Scan angle sets and scan readings.

use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Ordered set of scan angle offsets relative to the robot heading.
///
/// The order is significant: the i-th entry of a [`ScanReading`] always
/// belongs to the i-th offset here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScanAngles {
    offsets: Vec<f32>,
}

impl ScanAngles {
    /// Create from explicit relative offsets (radians).
    pub fn new(offsets: Vec<f32>) -> Self {
        Self { offsets }
    }

    /// `count` offsets evenly spanning the full circle, starting straight ahead.
    ///
    /// Offset `i` is `i · 2π / count`.
    pub fn full_circle(count: usize) -> Self {
        let step = if count == 0 { 0.0 } else { TAU / count as f32 };
        Self {
            offsets: (0..count).map(|i| i as f32 * step).collect(),
        }
    }

    /// Relative offsets in scan order
    pub fn offsets(&self) -> &[f32] {
        &self.offsets
    }

    /// Number of angles
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Is the angle set empty?
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

/// One lidar measurement.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScanEntry {
    /// Measured range, in (0, max_range] (0 only when the sensor origin is blocked)
    pub range: f32,
    /// Absolute world-frame angle of the ray, in (-π, π]
    pub angle: f32,
}

/// A complete scan, one entry per configured angle in scan-angle order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanReading {
    entries: Vec<ScanEntry>,
    max_range: f32,
}

impl ScanReading {
    /// Create a reading from entries already in scan-angle order.
    pub fn new(entries: Vec<ScanEntry>, max_range: f32) -> Self {
        Self { entries, max_range }
    }

    /// Build from parallel range/angle slices (test and replay helper).
    pub fn from_ranges(ranges: &[f32], angles: &[f32], max_range: f32) -> Self {
        let entries = ranges
            .iter()
            .zip(angles)
            .map(|(&range, &angle)| ScanEntry { range, angle })
            .collect();
        Self { entries, max_range }
    }

    /// Entries in scan-angle order
    pub fn entries(&self) -> &[ScanEntry] {
        &self.entries
    }

    /// Iterate over entries
    pub fn iter(&self) -> impl Iterator<Item = &ScanEntry> {
        self.entries.iter()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Is the scan empty?
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum range used for this scan
    pub fn max_range(&self) -> f32 {
        self.max_range
    }

    /// Ranges in scan order
    pub fn ranges(&self) -> Vec<f32> {
        self.entries.iter().map(|e| e.range).collect()
    }

    /// Absolute angles in scan order
    pub fn angles(&self) -> Vec<f32> {
        self.entries.iter().map(|e| e.angle).collect()
    }

    /// Shortest range in the scan
    pub fn min_range(&self) -> Option<f32> {
        self.entries.iter().map(|e| e.range).min_by(f32::total_cmp)
    }

    /// Number of rays that hit something before max range
    pub fn hit_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.range < self.max_range)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_circle() {
        let angles = ScanAngles::full_circle(90);
        assert_eq!(angles.len(), 90);
        assert_eq!(angles.offsets()[0], 0.0);
        assert!((angles.offsets()[1] - TAU / 90.0).abs() < 1e-6);
        assert!(angles.offsets()[89] < TAU);

        assert!(ScanAngles::full_circle(0).is_empty());
    }

    #[test]
    fn test_scan_summary() {
        let scan = ScanReading::from_ranges(&[15.0, 3.0, 7.5], &[0.0, 1.0, 2.0], 15.0);
        assert_eq!(scan.len(), 3);
        assert_eq!(scan.min_range(), Some(3.0));
        assert_eq!(scan.hit_count(), 2);
        assert_eq!(scan.angles(), vec![0.0, 1.0, 2.0]);
    }
}
