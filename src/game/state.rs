use std::collections::BTreeSet;
use std::error::Error;
use std::fmt;

use rand::rngs::StdRng;
use tracing::{debug, trace, warn};

use crate::config::{GameConfig, Resolution};
use crate::game::board::{Cell, Grid};
use crate::game::generator::generate;
use crate::game::gravity::collapse_and_refill;
use crate::game::matcher::{find_matches, resolve, Match};
use crate::game::tokens::{RandomTokens, TokenSource};

/// Upper bound on ticks spent inside one `settle` call. Only reachable with a
/// token source that keeps refilling matches forever.
pub const MAX_SETTLE_STEPS: u32 = 10_000;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Idle,
    Settling, // Clear/collapse/refill in progress, swaps are refused
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwapError {
    OutOfBounds(Cell),
    NotAdjacent(Cell, Cell),
    Settling,
}

impl fmt::Display for SwapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwapError::OutOfBounds(cell) => write!(f, "cell {cell} is outside the board"),
            SwapError::NotAdjacent(a, b) => write!(f, "cells {a} and {b} are not adjacent"),
            SwapError::Settling => write!(f, "board is still settling"),
        }
    }
}

impl Error for SwapError {}

/// Result of a legal swap request. A swap that forms no match is reverted
/// and reported with `accepted == false` and zero counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SwapOutcome {
    pub accepted: bool,
    pub match_count: usize,
    /// Every cell cleared at least once by this move.
    pub removed: BTreeSet<Cell>,
    /// Tiles cleared across all rounds, counting a cell once per round.
    pub cleared: usize,
    pub rounds: u32,
    pub points: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub changed: bool,
    pub settled: bool,
    pub match_count: usize,
    pub removed: BTreeSet<Cell>,
    pub cleared: usize,
    pub points: u32,
}

impl TickOutcome {
    fn absorb(&mut self, step: TickOutcome) {
        self.changed |= step.changed;
        self.settled = step.settled;
        self.match_count += step.match_count;
        self.removed.extend(step.removed);
        self.cleared += step.cleared;
        self.points = self.points.saturating_add(step.points);
    }
}

/// Owned copy of everything a renderer needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub grid: Grid,
    pub score: u32,
    pub phase: Phase,
    pub moves: u32,
    pub chain: u32,
    pub best_chain: u32,
}

/// One running game: the board, its score and the swap/settle state machine.
/// All mutation goes through `propose_swap`, `tick` and `new_game`.
pub struct GameSession<S = RandomTokens<StdRng>> {
    config: GameConfig,
    grid: Grid,
    source: S,
    score: u32,
    phase: Phase,
    moves: u32,
    chain: u32, // Rounds resolved in the current (or last) cascade
    best_chain: u32,
}

impl GameSession<RandomTokens<StdRng>> {
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        let source = RandomTokens::seeded(seed, config.fruit_chance);
        Self::new(config, source)
    }

    pub fn from_entropy(config: GameConfig) -> Self {
        let source = RandomTokens::from_entropy(config.fruit_chance);
        Self::new(config, source)
    }
}

impl<S: TokenSource> GameSession<S> {
    pub fn new(config: GameConfig, source: S) -> Self {
        let config = config.clamp();
        let mut session = Self {
            config,
            grid: Grid::filled(config.rows, config.cols, Default::default()),
            source,
            score: 0,
            phase: Phase::Idle,
            moves: 0,
            chain: 0,
            best_chain: 0,
        };
        session.new_game();
        session
    }

    /// Starts from a prepared board instead of a generated one. The board is
    /// taken as is: holes or runs on it are drained by the next `tick`.
    pub fn with_grid(config: GameConfig, grid: Grid, source: S) -> Self {
        let config = GameConfig {
            rows: grid.rows(),
            cols: grid.cols(),
            ..config
        };
        Self {
            config,
            grid,
            source,
            score: 0,
            phase: Phase::Idle,
            moves: 0,
            chain: 0,
            best_chain: 0,
        }
    }

    /// Replaces the board with a fresh match-free one and resets the score.
    pub fn new_game(&mut self) -> &Grid {
        self.grid = generate(
            self.config.rows,
            self.config.cols,
            &mut self.source,
            self.config.max_generation_attempts,
        );
        self.score = 0;
        self.phase = Phase::Idle;
        self.moves = 0;
        self.chain = 0;
        self.best_chain = 0;
        debug!(rows = self.config.rows, cols = self.config.cols, "new game");
        &self.grid
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_settling(&self) -> bool {
        self.phase == Phase::Settling
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn chain(&self) -> u32 {
        self.chain
    }

    pub fn best_chain(&self) -> u32 {
        self.best_chain
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            grid: self.grid.clone(),
            score: self.score,
            phase: self.phase,
            moves: self.moves,
            chain: self.chain,
            best_chain: self.best_chain,
        }
    }

    /// There is no terminal state; the board can always be played.
    pub fn is_game_over(&self) -> bool {
        false
    }

    /// Tries to swap two orthogonally adjacent cells. The swap only sticks if
    /// it forms at least one match; otherwise the board is left untouched.
    pub fn propose_swap(&mut self, a: Cell, b: Cell) -> Result<SwapOutcome, SwapError> {
        if self.phase == Phase::Settling {
            return Err(SwapError::Settling);
        }
        if let Some(&outside) = [a, b].iter().find(|c| !self.grid.contains(**c)) {
            return Err(SwapError::OutOfBounds(outside));
        }
        if !a.is_adjacent(b) {
            return Err(SwapError::NotAdjacent(a, b));
        }

        self.grid.swap(a, b);
        let matches = find_matches(&self.grid);
        if matches.is_empty() {
            self.grid.swap(a, b);
            trace!(%a, %b, "swap reverted, no match");
            return Ok(SwapOutcome::default());
        }

        self.moves += 1;
        self.enter_settling();
        debug!(%a, %b, matches = matches.len(), "swap committed");

        let (removed, points) = self.resolve_round(&matches);
        let mut outcome = SwapOutcome {
            accepted: true,
            match_count: matches.len(),
            cleared: removed.len(),
            removed,
            rounds: 1,
            points,
        };

        if self.config.resolution == Resolution::Eager {
            let rest = self.settle();
            outcome.match_count += rest.match_count;
            outcome.removed.extend(rest.removed);
            outcome.cleared += rest.cleared;
            outcome.points = outcome.points.saturating_add(rest.points);
            outcome.rounds = self.chain;
        }

        Ok(outcome)
    }

    /// Advances the board by one step: a gravity step while there are holes,
    /// otherwise one round of clearing. Once neither applies the session goes
    /// back to `Idle` and the outcome reports `settled`. Calling this on a
    /// settled board changes nothing.
    pub fn tick(&mut self) -> TickOutcome {
        if self.grid.has_empty() {
            self.enter_settling();
            let changed = collapse_and_refill(&mut self.grid, &mut self.source);
            return TickOutcome {
                changed,
                ..TickOutcome::default()
            };
        }

        let matches = find_matches(&self.grid);
        if matches.is_empty() {
            self.finish_settling();
            return TickOutcome {
                settled: true,
                ..TickOutcome::default()
            };
        }

        self.enter_settling();
        let (removed, points) = self.resolve_round(&matches);
        TickOutcome {
            changed: true,
            settled: false,
            match_count: matches.len(),
            cleared: removed.len(),
            removed,
            points,
        }
    }

    /// Ticks until the board is settled and returns the combined outcome.
    pub fn settle(&mut self) -> TickOutcome {
        let mut total = TickOutcome::default();
        for _ in 0..MAX_SETTLE_STEPS {
            total.absorb(self.tick());
            if total.settled {
                debug_assert!(!self.grid.has_empty());
                return total;
            }
        }
        warn!(steps = MAX_SETTLE_STEPS, chain = self.chain, "cascade still running, giving up for now");
        total
    }

    fn enter_settling(&mut self) {
        if self.phase == Phase::Idle {
            self.phase = Phase::Settling;
            self.chain = 0;
        }
    }

    fn finish_settling(&mut self) {
        if self.phase == Phase::Settling {
            self.phase = Phase::Idle;
            self.best_chain = self.best_chain.max(self.chain);
            debug!(chain = self.chain, score = self.score, "board settled");
        }
    }

    fn resolve_round(&mut self, matches: &[Match]) -> (BTreeSet<Cell>, u32) {
        let removed = resolve(&mut self.grid, matches);
        let points = self
            .config
            .points_per_match
            .saturating_mul(matches.len() as u32);
        self.score = self.score.saturating_add(points);
        self.chain += 1;
        debug!(
            round = self.chain,
            matches = matches.len(),
            removed = removed.len(),
            points,
            score = self.score,
            "cleared round"
        );
        (removed, points)
    }
}
