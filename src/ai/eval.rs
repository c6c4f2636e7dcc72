use crate::board::Board;
use crate::types::{Cell, NUM_SQUARES, Position, Side};

/// Static score of a position from `side`'s point of view.
pub trait Evaluator {
    fn evaluate(&self, board: &Board, side: Side) -> i32;
}

#[rustfmt::skip]
const WEIGHTS: [i32; NUM_SQUARES] = [
    100, -20,  10,   5,   5,  10, -20, 100,
    -20, -50,  -2,  -2,  -2,  -2, -50, -20,
     10,  -2,  -1,  -1,  -1,  -1,  -2,  10,
      5,  -2,  -1,  -1,  -1,  -1,  -2,   5,
      5,  -2,  -1,  -1,  -1,  -1,  -2,   5,
     10,  -2,  -1,  -1,  -1,  -1,  -2,  10,
    -20, -50,  -2,  -2,  -2,  -2, -50, -20,
    100, -20,  10,   5,   5,  10, -20, 100,
];

/// Largest absolute weight on any square.
pub const MAX_WEIGHT: i32 = 100;

/// Fixed square-weight evaluator: corners good, X/C squares bad.
#[derive(Debug, Default, Clone, Copy)]
pub struct PositionalEvaluator;

impl PositionalEvaluator {
    pub fn weight(pos: Position) -> i32 {
        WEIGHTS[pos.index()]
    }
}

impl Evaluator for PositionalEvaluator {
    fn evaluate(&self, board: &Board, side: Side) -> i32 {
        let me = side.cell();
        let opp = side.opponent().cell();

        board
            .to_array()
            .iter()
            .zip(WEIGHTS.iter())
            .map(|(&cell, &w)| {
                if cell == me as u8 {
                    w
                } else if cell == opp as u8 {
                    -w
                } else {
                    debug_assert_eq!(cell, Cell::Empty as u8);
                    0
                }
            })
            .sum()
    }
}
