use crate::constants::{
    FRUIT_CHANCE, GRID_SIZE, MAX_GENERATION_ATTEMPTS, MAX_GRID_SIZE, MIN_GRID_SIZE, POINTS_PER_MATCH,
};

/// How a committed swap drains its cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The whole cascade runs inside `propose_swap`.
    Eager,
    /// `propose_swap` clears the first round; `tick` drives the rest.
    Progressive,
}

impl Resolution {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "eager" => Some(Resolution::Eager),
            "progressive" => Some(Resolution::Progressive),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    pub fruit_chance: f64,
    pub points_per_match: u32,
    pub resolution: Resolution,
    pub max_generation_attempts: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: GRID_SIZE,
            cols: GRID_SIZE,
            fruit_chance: FRUIT_CHANCE,
            points_per_match: POINTS_PER_MATCH,
            resolution: Resolution::Progressive,
            max_generation_attempts: MAX_GENERATION_ATTEMPTS,
        }
    }
}

impl GameConfig {
    pub fn eager() -> Self {
        Self {
            resolution: Resolution::Eager,
            ..Self::default()
        }
    }

    pub fn clamp(mut self) -> Self {
        self.rows = self.rows.clamp(MIN_GRID_SIZE, MAX_GRID_SIZE);
        self.cols = self.cols.clamp(MIN_GRID_SIZE, MAX_GRID_SIZE);
        self.fruit_chance = if self.fruit_chance.is_finite() {
            self.fruit_chance.clamp(0.0, 1.0)
        } else {
            FRUIT_CHANCE
        };
        self.max_generation_attempts = self.max_generation_attempts.max(1);
        self
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Missing or unparsable values keep their defaults.
    pub fn from_lookup<F>(mut lookup: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            rows: parsed(&mut lookup, "FRUITSWAP_ROWS").unwrap_or(defaults.rows),
            cols: parsed(&mut lookup, "FRUITSWAP_COLS").unwrap_or(defaults.cols),
            fruit_chance: parsed(&mut lookup, "FRUITSWAP_FRUIT_CHANCE").unwrap_or(defaults.fruit_chance),
            points_per_match: parsed(&mut lookup, "FRUITSWAP_POINTS").unwrap_or(defaults.points_per_match),
            resolution: lookup("FRUITSWAP_RESOLUTION")
                .and_then(|v| Resolution::parse(&v))
                .unwrap_or(defaults.resolution),
            max_generation_attempts: defaults.max_generation_attempts,
        }
        .clamp()
    }
}

fn parsed<F, T>(lookup: &mut F, key: &str) -> Option<T>
where
    F: FnMut(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(key).and_then(|v| v.trim().parse().ok())
}
