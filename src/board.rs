use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;
use crate::types::{BOARD_SIZE, Cell, NUM_SQUARES, Position, Side};

const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Othello board state represented by two bitboards.
///
/// Bit `row * 8 + col` is set in `black` or `white` when that side owns the
/// square. The two masks never overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    black: u64,
    white: u64,
}

impl Board {
    /// Creates the initial board:
    /// d4=white, e4=black, d5=black, e5=white.
    pub fn new() -> Self {
        let mid = (BOARD_SIZE / 2) as u8;
        Self {
            black: bit(Position::new(mid - 1, mid).index())
                | bit(Position::new(mid, mid - 1).index()),
            white: bit(Position::new(mid - 1, mid - 1).index())
                | bit(Position::new(mid, mid).index()),
        }
    }

    pub fn from_bitboards(black: u64, white: u64) -> Self {
        assert_eq!(black & white, 0, "a square cannot hold two discs");
        Self { black, white }
    }

    pub fn cell(&self, pos: Position) -> Cell {
        let square = bit(pos.index());
        if (self.black & square) != 0 {
            Cell::Black
        } else if (self.white & square) != 0 {
            Cell::White
        } else {
            Cell::Empty
        }
    }

    /// Whether `side` may place a disc at `pos`.
    pub fn is_legal(&self, pos: Position, side: Side) -> bool {
        let (me, opp) = self.split(side);
        Self::collect_flips(pos.index(), me, opp) != 0
    }

    /// Returns legal move mask for the given side.
    pub fn legal_mask(&self, side: Side) -> u64 {
        let (me, opp) = self.split(side);
        let occupied = me | opp;
        let mut legal = 0u64;

        for pos in 0..NUM_SQUARES {
            let move_bit = bit(pos);
            if (occupied & move_bit) != 0 {
                continue;
            }
            if Self::collect_flips(pos, me, opp) != 0 {
                legal |= move_bit;
            }
        }

        legal
    }

    /// Same answer as `legal_mask(side) != 0`, stopping at the first hit.
    pub fn has_legal_move(&self, side: Side) -> bool {
        let (me, opp) = self.split(side);
        let occupied = me | opp;
        (0..NUM_SQUARES)
            .any(|pos| (occupied & bit(pos)) == 0 && Self::collect_flips(pos, me, opp) != 0)
    }

    /// Places one disc and flips captured discs. Returns the flipped mask.
    ///
    /// # Panics
    ///
    /// The move must have been validated with [`Board::is_legal`]; applying
    /// an illegal move is a caller bug.
    pub fn apply(&mut self, pos: Position, side: Side) -> u64 {
        let (me, opp) = self.split(side);
        let flips = Self::collect_flips(pos.index(), me, opp);
        assert!(
            flips != 0,
            "invariant violation: illegal move {:?} for {:?}",
            pos,
            side
        );

        let next_me = me | bit(pos.index()) | flips;
        let next_opp = opp & !flips;

        match side {
            Side::Black => {
                self.black = next_me;
                self.white = next_opp;
            }
            Side::White => {
                self.white = next_me;
                self.black = next_opp;
            }
        }

        flips
    }

    /// Returns `(black_count, white_count)`.
    pub fn count(&self) -> (u8, u8) {
        (self.black.count_ones() as u8, self.white.count_ones() as u8)
    }

    pub fn discs(&self, side: Side) -> u8 {
        let (me, _) = self.split(side);
        me.count_ones() as u8
    }

    /// Returns the number of empty squares.
    pub fn empty_count(&self) -> u8 {
        let (black_count, white_count) = self.count();
        NUM_SQUARES as u8 - black_count - white_count
    }

    /// Converts board to `[u8; 64]` where 0=empty, 1=black, 2=white.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        let mut board = [0u8; NUM_SQUARES];
        for (idx, cell) in board.iter_mut().enumerate() {
            *cell = self.cell(Position::from_index(idx)) as u8;
        }
        board
    }

    fn split(&self, side: Side) -> (u64, u64) {
        match side {
            Side::Black => (self.black, self.white),
            Side::White => (self.white, self.black),
        }
    }

    fn collect_flips(pos: usize, me: u64, opp: u64) -> u64 {
        if pos >= NUM_SQUARES {
            return 0;
        }

        let move_bit = bit(pos);
        if ((me | opp) & move_bit) != 0 {
            return 0;
        }

        let (row, col) = pos_to_row_col(pos);
        let mut flips = 0u64;

        for (dr, dc) in DIRECTIONS {
            let mut r = row + dr;
            let mut c = col + dc;
            let mut line = 0u64;

            while in_bounds(r, c) {
                let square = bit((r as usize) * BOARD_SIZE + c as usize);
                if (opp & square) != 0 {
                    line |= square;
                } else {
                    if (me & square) != 0 {
                        flips |= line;
                    }
                    break;
                }

                r += dr;
                c += dc;
            }
        }

        flips
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Eight lines of `X` (black), `O` (white) and `.` (empty).
/// Whitespace inside a line is ignored.
impl FromStr for Board {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        if rows.len() != BOARD_SIZE {
            return Err(EngineError::InvalidDiagram(format!(
                "expected {BOARD_SIZE} rows, got {}",
                rows.len()
            )));
        }

        let mut black = 0u64;
        let mut white = 0u64;
        for (row, line) in rows.iter().enumerate() {
            let cells: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if cells.len() != BOARD_SIZE {
                return Err(EngineError::InvalidDiagram(format!(
                    "row {row} has {} cells",
                    cells.len()
                )));
            }
            for (col, ch) in cells.into_iter().enumerate() {
                let square = bit(row * BOARD_SIZE + col);
                match ch {
                    'X' | 'x' | 'B' | 'b' => black |= square,
                    'O' | 'o' | 'W' | 'w' => white |= square,
                    '.' | '-' => {}
                    other => {
                        return Err(EngineError::InvalidDiagram(format!(
                            "unexpected character {other:?} at row {row}"
                        )));
                    }
                }
            }
        }

        Ok(Self { black, white })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE as u8 {
            for col in 0..BOARD_SIZE as u8 {
                let ch = match self.cell(Position::new(row, col)) {
                    Cell::Empty => '.',
                    Cell::Black => 'X',
                    Cell::White => 'O',
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn bit(pos: usize) -> u64 {
    if pos < NUM_SQUARES { 1u64 << pos } else { 0 }
}

fn pos_to_row_col(pos: usize) -> (i32, i32) {
    ((pos / BOARD_SIZE) as i32, (pos % BOARD_SIZE) as i32)
}

fn in_bounds(row: i32, col: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col)
}
