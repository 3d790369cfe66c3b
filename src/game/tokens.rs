use std::error::Error;
use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::constants::FRUIT_CHANCE;
use crate::game::board::{Fruit, Token, Vegetable};

/// Where new tokens come from, for both board generation and refill.
pub trait TokenSource {
    fn next_token(&mut self) -> Token;
}

impl<T: TokenSource + ?Sized> TokenSource for Box<T> {
    fn next_token(&mut self) -> Token {
        (**self).next_token()
    }
}

/// Draws fruit with probability `fruit_chance`, otherwise a vegetable; the
/// kind within a category is uniform.
#[derive(Debug, Clone)]
pub struct RandomTokens<R> {
    rng: R,
    fruit_chance: f64,
}

impl<R: Rng> RandomTokens<R> {
    pub fn new(rng: R, fruit_chance: f64) -> Self {
        let fruit_chance = if fruit_chance.is_nan() {
            FRUIT_CHANCE
        } else {
            fruit_chance.clamp(0.0, 1.0)
        };
        Self { rng, fruit_chance }
    }
}

impl RandomTokens<StdRng> {
    pub fn seeded(seed: u64, fruit_chance: f64) -> Self {
        Self::new(StdRng::seed_from_u64(seed), fruit_chance)
    }

    pub fn from_entropy(fruit_chance: f64) -> Self {
        Self::new(StdRng::from_entropy(), fruit_chance)
    }
}

impl<R: Rng> TokenSource for RandomTokens<R> {
    fn next_token(&mut self) -> Token {
        if self.rng.gen_bool(self.fruit_chance) {
            Token::Fruit(Fruit::ALL[self.rng.gen_range(0..Fruit::ALL.len())])
        } else {
            Token::Vegetable(Vegetable::ALL[self.rng.gen_range(0..Vegetable::ALL.len())])
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    EmptyScript,
    EmptyToken,
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::EmptyScript => write!(f, "token script is empty"),
            ScriptError::EmptyToken => write!(f, "token script may not contain empty cells"),
        }
    }
}

impl Error for ScriptError {}

/// Replays a fixed token list, wrapping around at the end.
#[derive(Debug, Clone)]
pub struct ScriptedTokens {
    script: Vec<Token>,
    cursor: usize,
}

impl ScriptedTokens {
    pub fn new(script: Vec<Token>) -> Result<Self, ScriptError> {
        if script.is_empty() {
            return Err(ScriptError::EmptyScript);
        }
        if script.iter().any(|t| t.is_empty()) {
            return Err(ScriptError::EmptyToken);
        }
        Ok(Self { script, cursor: 0 })
    }

    /// Builds a script from the grid text symbols, ignoring whitespace.
    pub fn from_symbols(symbols: &str) -> Result<Self, ScriptError> {
        let script = symbols
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| Token::from_symbol(c).unwrap_or(Token::Empty))
            .collect();
        Self::new(script)
    }

    /// Number of tokens handed out so far.
    pub fn drawn(&self) -> usize {
        self.cursor
    }
}

impl TokenSource for ScriptedTokens {
    fn next_token(&mut self) -> Token {
        let token = self.script[self.cursor % self.script.len()];
        self.cursor += 1;
        token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_tokens_wrap_around() {
        let mut source = ScriptedTokens::from_symbols("A x").unwrap();
        let drawn: Vec<_> = (0..3).map(|_| source.next_token()).collect();
        assert_eq!(
            drawn,
            vec![
                Token::Fruit(Fruit::Apple),
                Token::Vegetable(Vegetable::Broccoli),
                Token::Fruit(Fruit::Apple)
            ]
        );
        assert_eq!(source.drawn(), 3);
    }

    #[test]
    fn scripted_tokens_reject_bad_scripts() {
        assert_eq!(ScriptedTokens::new(Vec::new()).unwrap_err(), ScriptError::EmptyScript);
        assert_eq!(ScriptedTokens::from_symbols("A.").unwrap_err(), ScriptError::EmptyToken);
        assert_eq!(ScriptedTokens::from_symbols("A?").unwrap_err(), ScriptError::EmptyToken);
    }

    #[test]
    fn fruit_chance_extremes_pick_one_category() {
        let mut all_fruit = RandomTokens::seeded(7, 1.0);
        let mut all_veg = RandomTokens::seeded(7, 0.0);
        for _ in 0..200 {
            assert!(all_fruit.next_token().fruit().is_some());
            assert!(all_veg.next_token().is_vegetable());
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = RandomTokens::seeded(42, 0.6);
        let mut b = RandomTokens::seeded(42, 0.6);
        for _ in 0..64 {
            assert_eq!(a.next_token(), b.next_token());
        }
    }

    #[test]
    fn random_tokens_cover_every_kind() {
        let mut source = RandomTokens::seeded(1, 0.6);
        let drawn: Vec<_> = (0..2_000).map(|_| source.next_token()).collect();
        for fruit in Fruit::ALL {
            assert!(drawn.contains(&Token::Fruit(fruit)));
        }
        for veg in Vegetable::ALL {
            assert!(drawn.contains(&Token::Vegetable(veg)));
        }
        let fruit = drawn.iter().filter(|t| t.fruit().is_some()).count();
        assert!((1_000..1_400).contains(&fruit), "fruit share off: {fruit}");
    }
}
