//! Ladder Board
//!
//! A round is drawn on a board of `LADDER_ROWS` rows between two rails.
//! Each row either has a rung or not. The path starts on a rail at the top
//! and crosses to the other rail at every rung on the way down.
//!
//! ```text
//!   LEFT   RIGHT
//!    │       │     row 0
//!    ├───────┤     row 1  (rung: path flips)
//!    │       │     row 2
//!    ├───────┤     row 3  (rung: path flips)
//!    ...
//! ```
//!
//! Rung placement is supplied by the caller; this module only traces it.

use crate::game::rules::LADDER_ROWS;
use crate::game::types::{LineCount, Outcome, RoundResult, Side};

/// Board construction and reveal errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// Rung row outside the board.
    #[error("Rung row {0} is outside the board")]
    RowOutOfRange(usize),

    /// The same row was given twice.
    #[error("Rung row {0} given more than once")]
    DuplicateRow(usize),

    /// A revealed board must have 3 or 4 rungs.
    #[error("Board has {0} rungs, expected 3 or 4")]
    RungCount(usize),
}

/// One row of a traced path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PathStep {
    /// Row index, top to bottom.
    pub row: usize,
    /// Rail the path is on when entering the row.
    pub from: Side,
    /// Rail the path is on when leaving the row.
    pub to: Side,
}

impl PathStep {
    /// True when the row has a rung.
    pub fn crossed(&self) -> bool {
        self.from != self.to
    }
}

/// A ladder round: starting rail plus rung layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LadderBoard {
    /// Rail the path starts on.
    pub start: Side,
    /// `rungs[row]` is true when that row has a rung.
    pub rungs: [bool; LADDER_ROWS],
}

impl LadderBoard {
    /// Create a board from an explicit rung layout.
    pub const fn new(start: Side, rungs: [bool; LADDER_ROWS]) -> Self {
        Self { start, rungs }
    }

    /// Create a board with rungs at the given rows.
    pub fn from_rows(start: Side, rows: &[usize]) -> Result<Self, BoardError> {
        let mut rungs = [false; LADDER_ROWS];
        for &row in rows {
            let slot = rungs.get_mut(row).ok_or(BoardError::RowOutOfRange(row))?;
            if *slot {
                return Err(BoardError::DuplicateRow(row));
            }
            *slot = true;
        }
        Ok(Self { start, rungs })
    }

    /// Number of rungs on the board.
    pub fn rung_count(&self) -> usize {
        self.rungs.iter().filter(|rung| **rung).count()
    }

    /// Rail the path ends on.
    pub fn end_side(&self) -> Side {
        self.rungs
            .iter()
            .fold(self.start, |side, rung| if *rung { side.flip() } else { side })
    }

    /// Row-by-row path from top to bottom.
    pub fn trace(&self) -> Vec<PathStep> {
        let mut side = self.start;
        self.rungs
            .iter()
            .enumerate()
            .map(|(row, rung)| {
                let from = side;
                if *rung {
                    side = side.flip();
                }
                PathStep { row, from, to: side }
            })
            .collect()
    }

    /// Revealed outcome of this board.
    pub fn outcome(&self) -> Result<Outcome, BoardError> {
        let count = self.rung_count();
        let lines = u8::try_from(count)
            .ok()
            .and_then(|n| LineCount::try_from(n).ok())
            .ok_or(BoardError::RungCount(count))?;

        Ok(Outcome {
            start: self.start,
            lines,
            end: self.end_side(),
        })
    }

    /// Revealed result, ready to settle bets against.
    pub fn reveal(&self) -> Result<RoundResult, BoardError> {
        self.outcome().map(RoundResult::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_even_rungs_keep_side() {
        let board = LadderBoard::from_rows(Side::Left, &[0, 2, 4, 6]).unwrap();

        assert_eq!(board.rung_count(), 4);
        assert_eq!(board.end_side(), Side::Left);
    }

    #[test]
    fn test_odd_rungs_flip_side() {
        let board = LadderBoard::from_rows(Side::Right, &[1, 3, 5]).unwrap();

        assert_eq!(board.rung_count(), 3);
        assert_eq!(board.end_side(), Side::Left);
    }

    #[test]
    fn test_reveal() {
        let board = LadderBoard::from_rows(Side::Left, &[6, 0, 3]).unwrap();
        let result = board.reveal().unwrap();

        assert_eq!(result, RoundResult::new(Side::Left, LineCount::Three, Side::Right));
    }

    #[test]
    fn test_reveal_rejects_bad_rung_count() {
        let empty = LadderBoard::new(Side::Left, [false; LADDER_ROWS]);
        assert_eq!(empty.reveal(), Err(BoardError::RungCount(0)));

        let full = LadderBoard::new(Side::Left, [true; LADDER_ROWS]);
        assert_eq!(full.outcome(), Err(BoardError::RungCount(7)));
    }

    #[test]
    fn test_from_rows_errors() {
        assert_eq!(
            LadderBoard::from_rows(Side::Left, &[1, 7]),
            Err(BoardError::RowOutOfRange(7))
        );
        assert_eq!(
            LadderBoard::from_rows(Side::Left, &[2, 2, 4]),
            Err(BoardError::DuplicateRow(2))
        );
    }

    #[test]
    fn test_trace() {
        let board = LadderBoard::from_rows(Side::Left, &[1, 4, 5]).unwrap();
        let path = board.trace();

        assert_eq!(path.len(), LADDER_ROWS);
        assert_eq!(path[0], PathStep { row: 0, from: Side::Left, to: Side::Left });
        assert!(path[1].crossed());
        assert_eq!(path[1].to, Side::Right);
        assert_eq!(path[4], PathStep { row: 4, from: Side::Right, to: Side::Left });
        assert_eq!(path[6].to, board.end_side());
        assert_eq!(path.iter().filter(|step| step.crossed()).count(), board.rung_count());
    }

    #[test]
    fn test_settles_against_board() {
        use crate::game::settle::settle_bet;
        use crate::game::types::{Bet, Picks};

        let board = LadderBoard::from_rows(Side::Right, &[0, 1, 2, 3]).unwrap();
        let result = board.reveal().unwrap();
        let bet = Bet::single(Picks::new().with_lines(LineCount::Four).with_end(Side::Right), 200);

        let settlement = settle_bet(&bet, &result).unwrap();
        assert!(settlement.win);
        assert_eq!(settlement.payout.whole_credits(), 648);
    }
}
