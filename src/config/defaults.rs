//! Default values for configuration fields.

pub fn map_size() -> f32 {
    100.0
}

pub fn resolution() -> f32 {
    1.0
}

pub fn boundary_margin() -> f32 {
    2.0
}

pub fn angle_count() -> usize {
    90
}

pub fn max_range() -> f32 {
    15.0
}

pub fn goal_radius() -> f32 {
    8.0
}

pub fn iteration_budget() -> usize {
    2000
}

pub fn log_interval() -> usize {
    100
}

pub fn near_miss_distance() -> f32 {
    1.0
}

pub fn seed() -> u64 {
    42
}
