pub mod board;
pub mod generator;
pub mod gravity;
pub mod matcher;
pub mod state;
pub mod tokens;

pub use board::{Cell, Fruit, Grid, GridError, Token, Vegetable};
pub use generator::generate;
pub use gravity::{collapse, collapse_and_refill, refill};
pub use matcher::{find_matches, resolve, Match, Orientation};
pub use state::{GameSession, Phase, SessionSnapshot, SwapError, SwapOutcome, TickOutcome};
pub use tokens::{RandomTokens, ScriptError, ScriptedTokens, TokenSource};
