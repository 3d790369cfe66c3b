use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use fruitswap::constants::SETTLE_STEP_MS;
use fruitswap::{Cell, GameConfig, GameSession, SwapError};
use tracing::info;

use crate::input::InputState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSettings {
    pub seed: Option<u64>,
    pub settle_step: Duration,
    pub log_path: Option<PathBuf>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            seed: None,
            settle_step: Duration::from_millis(SETTLE_STEP_MS),
            log_path: None,
        }
    }
}

impl AppSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(mut lookup: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            seed: lookup("FRUITSWAP_SEED").and_then(|v| v.trim().parse().ok()),
            settle_step: lookup("FRUITSWAP_STEP_MS")
                .and_then(|v| v.trim().parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.settle_step),
            log_path: lookup("FRUITSWAP_LOG")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        }
    }
}

/// Terminal-side game state: the engine session plus cursor, selection and
/// what the last move did.
pub struct App {
    pub session: GameSession,
    pub input_state: InputState,
    pub settings: AppSettings,
    pub last_step: Instant,
    pub flash: BTreeSet<Cell>, // Cells cleared by the latest step
    pub status: String,
}

impl App {
    pub fn new(config: GameConfig, settings: AppSettings) -> Self {
        let session = match settings.seed {
            Some(seed) => GameSession::with_seed(config, seed),
            None => GameSession::from_entropy(config),
        };
        info!(seed = ?settings.seed, rows = config.rows, cols = config.cols, "starting session");
        Self {
            session,
            input_state: InputState::new(),
            settings,
            last_step: Instant::now(),
            flash: BTreeSet::new(),
            status: "Pick a tile".to_string(),
        }
    }

    pub fn reset(&mut self) {
        self.session.new_game();
        self.input_state = InputState::new();
        self.flash.clear();
        self.status = "New board".to_string();
        self.last_step = Instant::now();
    }

    /// Hands a swap to the engine. Returns true if the swap stuck.
    pub fn try_swap(&mut self, a: Cell, b: Cell) -> bool {
        match self.session.propose_swap(a, b) {
            Ok(outcome) if outcome.accepted => {
                self.flash = outcome.removed;
                self.status = format!("+{} ({} match)", outcome.points, outcome.match_count);
                self.last_step = Instant::now();
                true
            }
            Ok(_) => {
                self.status = "No match there".to_string();
                false
            }
            Err(SwapError::Settling) => false,
            Err(err) => {
                self.status = err.to_string();
                false
            }
        }
    }

    /// Drives the cascade one step per `settle_step` so falls stay visible.
    pub fn update(&mut self, now: Instant) {
        if !self.session.is_settling() || now.duration_since(self.last_step) < self.settings.settle_step {
            return;
        }
        self.last_step = now;

        let step = self.session.tick();
        if step.match_count > 0 {
            self.flash = step.removed;
            self.status = format!("Chain x{}! +{}", self.session.chain(), step.points);
        } else if step.changed {
            self.flash.clear();
        } else if step.settled {
            self.flash.clear();
            if self.session.chain() > 1 {
                self.status = format!("{}-round cascade", self.session.chain());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_from_lookup() {
        let settings = AppSettings::from_lookup(|key| match key {
            "FRUITSWAP_SEED" => Some("99".to_string()),
            "FRUITSWAP_STEP_MS" => Some("40".to_string()),
            "FRUITSWAP_LOG" => Some(" ".to_string()),
            _ => None,
        });
        assert_eq!(settings.seed, Some(99));
        assert_eq!(settings.settle_step, Duration::from_millis(40));
        assert_eq!(settings.log_path, None);
    }

    #[test]
    fn update_drains_a_committed_cascade() {
        let settings = AppSettings {
            seed: Some(5),
            settle_step: Duration::ZERO,
            log_path: None,
        };
        let mut app = App::new(GameConfig::default(), settings);
        assert!(!app.session.is_settling());

        let grid = app.session.grid().clone();
        let swap = (0..grid.rows())
            .flat_map(|row| (0..grid.cols()).map(move |col| Cell::new(row, col)))
            .flat_map(|a| [Cell::new(a.row, a.col + 1), Cell::new(a.row + 1, a.col)].map(|b| (a, b)))
            .filter(|(_, b)| grid.contains(*b))
            .find(|&(a, b)| {
                let mut probe = grid.clone();
                probe.swap(a, b);
                !fruitswap::game::find_matches(&probe).is_empty()
            });

        let Some((a, b)) = swap else {
            return;
        };
        assert!(app.try_swap(a, b));
        let mut steps = 0;
        while app.session.is_settling() && steps < 10_000 {
            app.update(Instant::now());
            steps += 1;
        }
        assert!(!app.session.is_settling());
        assert!(app.session.score() > 0);
    }
}
