//! Scripted end-to-end games on an 8x8 board. Refill tokens come from a
//! fixed cyclic script (`z y x`), so every intermediate board is known.

use std::collections::BTreeSet;

use fruitswap::game::{ScriptedTokens, SwapError};
use fruitswap::{Cell, GameConfig, GameSession, Grid, Phase, Resolution};

const START: &str = "
    xyzxyzxy
    yzxyzxyz
    zxyzxyBx
    xyzxyzBy
    yzxyzxyB
    OOyzxyzx
    xyAxyzxy
    AAOyzxyz
";

const AFTER_FIRST_MOVE: &str = "
    zxyzyzxy
    yzxxzxyz
    zxyxxyBx
    yzzyyzBy
    xyxzzxyB
    yzyxxyzx
    zxzyyzxy
    xyxzzxyz
";

const AFTER_SECOND_MOVE: &str = "
    zxyzyyyz
    yzxxzxxy
    zxyxxzzx
    yzzyyzyy
    xyxzzxxz
    yzyxxyxx
    zxzyyzxy
    xyxzzxyz
";

fn grid(text: &str) -> Grid {
    text.parse().unwrap()
}

fn session(resolution: Resolution) -> GameSession<ScriptedTokens> {
    let config = GameConfig {
        resolution,
        ..GameConfig::default()
    };
    GameSession::with_grid(config, grid(START), ScriptedTokens::from_symbols("zyx").unwrap())
}

fn cells(list: &[(usize, usize)]) -> BTreeSet<Cell> {
    list.iter().map(|&(r, c)| Cell::new(r, c)).collect()
}

#[test]
fn eager_swap_sequence_matches_golden_boards() {
    let mut s = session(Resolution::Eager);
    assert!(fruitswap::game::find_matches(s.grid()).is_empty());

    // Move 1: apple drops into the bottom row, oranges fall after it clears.
    let first = s.propose_swap(Cell::new(7, 2), Cell::new(6, 2)).unwrap();
    assert!(first.accepted);
    assert_eq!(first.match_count, 2);
    assert_eq!(first.rounds, 2);
    assert_eq!(first.points, 20);
    assert_eq!(first.cleared, 13);
    assert_eq!(
        first.removed,
        cells(&[(6, 0), (6, 1), (6, 2), (7, 0), (7, 1), (7, 2), (7, 3)])
    );
    assert_eq!(s.grid(), &grid(AFTER_FIRST_MOVE));
    assert_eq!(s.score(), 20);
    assert_eq!(s.phase(), Phase::Idle);
    assert_eq!(s.best_chain(), 2);

    // Move 2: vertical banana run in column 6 takes eight vegetables with it.
    let second = s.propose_swap(Cell::new(4, 6), Cell::new(4, 7)).unwrap();
    assert!(second.accepted);
    assert_eq!(second.match_count, 1);
    assert_eq!(second.rounds, 1);
    assert_eq!(second.points, 10);
    assert_eq!(second.cleared, 11);
    assert_eq!(
        second.removed,
        cells(&[
            (1, 6),
            (2, 5),
            (2, 6),
            (2, 7),
            (3, 5),
            (3, 6),
            (3, 7),
            (4, 5),
            (4, 6),
            (4, 7),
            (5, 6),
        ])
    );
    assert_eq!(s.grid(), &grid(AFTER_SECOND_MOVE));
    assert_eq!(s.score(), 30);
    assert_eq!(s.moves(), 2);

    // Move 3: nothing lines up, the board stays as it was.
    let third = s.propose_swap(Cell::new(0, 0), Cell::new(0, 1)).unwrap();
    assert!(!third.accepted);
    assert_eq!(third.points, 0);
    assert_eq!(s.grid(), &grid(AFTER_SECOND_MOVE));

    // Move 4: off the board.
    assert_eq!(
        s.propose_swap(Cell::new(7, 7), Cell::new(7, 8)),
        Err(SwapError::OutOfBounds(Cell::new(7, 8)))
    );
    assert_eq!(s.score(), 30);
    assert_eq!(s.moves(), 2);
}

#[test]
fn progressive_ticks_walk_through_each_cascade_step() {
    let mut s = session(Resolution::Progressive);

    let first = s.propose_swap(Cell::new(7, 2), Cell::new(6, 2)).unwrap();
    assert!(first.accepted);
    assert_eq!(first.rounds, 1);
    assert_eq!(first.points, 10);
    assert_eq!(
        first.removed,
        cells(&[(6, 0), (6, 1), (7, 0), (7, 1), (7, 2), (7, 3)])
    );
    assert_eq!(s.phase(), Phase::Settling);
    assert_eq!(
        s.grid(),
        &grid(
            "
            xyzxyzxy
            yzxyzxyz
            zxyzxyBx
            xyzxyzBy
            yzxyzxyB
            OOyzxyzx
            ..Oxyzxy
            ....zxyz
            "
        )
    );

    // Gravity step: the oranges land in a row.
    let tick = s.tick();
    assert!(tick.changed);
    assert!(!tick.settled);
    assert_eq!(tick.match_count, 0);
    assert_eq!(
        s.grid(),
        &grid(
            "
            zxyxyzxy
            yzzxzxyz
            xyxyxyBx
            yzyzyzBy
            zxzxzxyB
            xyxyxyzx
            yzyzyzxy
            OOOxzxyz
            "
        )
    );

    // Chain round.
    let tick = s.tick();
    assert!(tick.changed);
    assert_eq!(tick.match_count, 1);
    assert_eq!(tick.points, 10);
    assert_eq!(tick.cleared, 7);
    assert_eq!(s.chain(), 2);
    assert_eq!(s.grid().row(6), grid("...zyzxy").row(0));
    assert_eq!(s.grid().row(7), grid("....zxyz").row(0));

    // Swaps are refused until the board settles.
    assert_eq!(
        s.propose_swap(Cell::new(4, 6), Cell::new(4, 7)),
        Err(SwapError::Settling)
    );

    let tick = s.tick();
    assert!(tick.changed);
    assert_eq!(s.grid(), &grid(AFTER_FIRST_MOVE));

    let tick = s.tick();
    assert!(!tick.changed);
    assert!(tick.settled);
    assert_eq!(s.phase(), Phase::Idle);
    assert_eq!(s.score(), 20);
    assert_eq!(s.best_chain(), 2);
}
