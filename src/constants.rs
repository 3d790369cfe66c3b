// Board geometry
pub const GRID_SIZE: usize = 8;
pub const MIN_GRID_SIZE: usize = 3;
pub const MAX_GRID_SIZE: usize = 32;

// Token distribution
pub const FRUIT_CHANCE: f64 = 0.6; // 60% fruit, 40% vegetable
pub const MATCH_MIN: usize = 3;    // Minimum 3 in a row to match

// Scoring
pub const POINTS_PER_MATCH: u32 = 10;

// Board generation retries before the deterministic repair kicks in
pub const MAX_GENERATION_ATTEMPTS: u32 = 10_000;

// Terminal client timing (in milliseconds)
pub const SETTLE_STEP_MS: u64 = 120; // Delay between cascade steps so falls are visible
pub const POLL_MS: u64 = 16;
