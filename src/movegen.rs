//! Legal move enumeration.
//!
//! Moves come out in row-major order. Search tie-breaking depends on this
//! order, so it must stay stable.

use crate::board::Board;
use crate::types::{Position, Side};

pub fn legal_moves(board: &Board, side: Side) -> Vec<Position> {
    mask_to_positions(board.legal_mask(side))
}

pub fn can_move(board: &Board, side: Side) -> bool {
    board.has_legal_move(side)
}

/// Neither side has a legal move.
pub fn is_terminal(board: &Board) -> bool {
    !can_move(board, Side::Black) && !can_move(board, Side::White)
}

pub(crate) fn mask_to_positions(mut mask: u64) -> Vec<Position> {
    let mut out = Vec::with_capacity(mask.count_ones() as usize);
    while mask != 0 {
        out.push(Position::from_index(mask.trailing_zeros() as usize));
        mask &= mask - 1;
    }
    out
}

pub(crate) fn mask_to_indices(mut mask: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(mask.count_ones() as usize);
    while mask != 0 {
        out.push(mask.trailing_zeros() as u8);
        mask &= mask - 1;
    }
    out
}
