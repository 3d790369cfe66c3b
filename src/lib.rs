//! Fruit-and-vegetable match-three engine.
//!
//! Swap two adjacent cells to line up three or more identical fruit. The run
//! clears together with every vegetable touching it, the tokens above fall
//! down and new ones drop in from the top, which may set off further runs.
//! [`game::GameSession`] owns the board and drives that loop either inside
//! the swap call or one [`tick`](game::GameSession::tick) at a time.

pub mod config;
pub mod constants;
pub mod game;

pub use config::{GameConfig, Resolution};
pub use game::{Cell, GameSession, Grid, Phase, SwapError, SwapOutcome, TickOutcome, Token};
