use super::types::{DeathReason, Phase, Point};

/// Read-only view of the engine state, produced once per tick or phase change
/// and handed to the rendering side.
#[derive(Clone, Debug)]
pub struct GameSnapshot {
    pub phase: Phase,
    pub snake: Vec<Point>,
    pub food: Point,
    pub score: u32,
    pub high_score: u32,
    pub death_reason: Option<DeathReason>,
    pub grid_size: u32,
}
