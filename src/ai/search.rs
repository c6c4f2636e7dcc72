use log::debug;
use rand::RngCore;
use rand::seq::IndexedRandom;
use web_time::{Duration, Instant};

use crate::ai::eval::{Evaluator, MAX_WEIGHT};
use crate::board::Board;
use crate::movegen;
use crate::types::{NUM_SQUARES, Position, Side};

/// Strictly outside any score the evaluator can produce.
pub const SCORE_INF: i32 = MAX_WEIGHT * NUM_SQUARES as i32 + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    pub best_move: Position,
    pub score: i32,
    /// Deepest fully completed depth.
    pub depth: u8,
}

/// Minimax search with alpha-beta pruning.
///
/// Scores are always taken from the root side's point of view: nodes where
/// the root side is to move maximize, the others minimize.
pub struct Searcher<'a, E: Evaluator + ?Sized> {
    evaluator: &'a E,
    pruning: bool,
    time_budget: Option<Duration>,
    start_time: Instant,
    deadline: Option<Instant>,
    root_side: Side,
    timed_out: bool,
    nodes: u64,
}

impl<'a, E: Evaluator + ?Sized> Searcher<'a, E> {
    pub fn new(evaluator: &'a E) -> Self {
        Self {
            evaluator,
            pruning: true,
            time_budget: None,
            start_time: Instant::now(),
            deadline: None,
            root_side: Side::White,
            timed_out: false,
            nodes: 0,
        }
    }

    /// Plain minimax. Same results, more nodes.
    pub fn without_pruning(mut self) -> Self {
        self.pruning = false;
        self
    }

    /// Budget for [`Searcher::iterative_deepening`].
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = Some(budget);
        self
    }

    pub fn timed_out(&self) -> bool {
        self.timed_out
    }

    /// Nodes visited by the last search.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Value of `board` with `side_to_move` to play, searched `depth` plies deep.
    pub fn search(
        &mut self,
        board: &Board,
        depth: u8,
        side_to_move: Side,
        root_side: Side,
        alpha: i32,
        beta: i32,
    ) -> i32 {
        self.begin(root_side);
        match self.alpha_beta(board, depth, side_to_move, alpha, beta) {
            Some(value) => value,
            None => unreachable!("search without a deadline cannot time out"),
        }
    }

    /// Best move for `side` at a fixed depth. `None` means `side` must pass.
    ///
    /// Root moves are tried in generator order and only a strictly greater
    /// value replaces the current best, so ties go to the first move.
    pub fn best_move(&mut self, board: &Board, side: Side, depth: u8) -> Option<SearchOutcome> {
        let moves = movegen::legal_moves(board, side);
        if moves.is_empty() {
            return None;
        }

        self.begin(side);
        let depth = depth.max(1);
        let outcome = self.root_search(board, side, depth, &moves);
        self.log_outcome(outcome.as_ref());
        outcome
    }

    /// Exact value of every root move, in generator order.
    pub fn score_moves(&mut self, board: &Board, side: Side, depth: u8) -> Vec<(Position, i32)> {
        self.begin(side);
        let depth = depth.max(1);

        movegen::legal_moves(board, side)
            .into_iter()
            .map(|mv| {
                let mut next = *board;
                next.apply(mv, side);
                let value =
                    self.search_child(&next, depth - 1, side.opponent(), -SCORE_INF, SCORE_INF);
                (mv, value)
            })
            .collect()
    }

    /// Searches depth 1, 2, ... up to `max_depth` until the time budget runs
    /// out, returning the result of the deepest completed depth.
    pub fn iterative_deepening(
        &mut self,
        board: &Board,
        side: Side,
        max_depth: u8,
    ) -> Option<SearchOutcome> {
        let moves = movegen::legal_moves(board, side);
        if moves.is_empty() {
            return None;
        }

        self.begin(side);
        let mut best = None;

        for depth in 1..=max_depth.max(1) {
            // Depth 1 always completes so a move is always available.
            self.deadline = if depth == 1 {
                None
            } else {
                self.time_budget.map(|budget| self.start_time + budget)
            };

            match self.root_search(board, side, depth, &moves) {
                Some(outcome) => best = Some(outcome),
                None => {
                    debug!("search interrupted at depth {depth} after {} nodes", self.nodes);
                    break;
                }
            }
        }

        self.deadline = None;
        self.log_outcome(best.as_ref());
        best
    }

    fn begin(&mut self, root_side: Side) {
        self.root_side = root_side;
        self.start_time = Instant::now();
        self.deadline = None;
        self.timed_out = false;
        self.nodes = 0;
    }

    fn root_search(
        &mut self,
        board: &Board,
        side: Side,
        depth: u8,
        moves: &[Position],
    ) -> Option<SearchOutcome> {
        let mut alpha = -SCORE_INF;
        let mut best: Option<(Position, i32)> = None;

        for &mv in moves {
            let mut next = *board;
            next.apply(mv, side);
            let value = self.alpha_beta(&next, depth - 1, side.opponent(), alpha, SCORE_INF)?;

            if best.is_none_or(|(_, score)| value > score) {
                best = Some((mv, value));
            }
            if self.pruning {
                alpha = alpha.max(value);
            }
        }

        best.map(|(best_move, score)| SearchOutcome {
            best_move,
            score,
            depth,
        })
    }

    fn search_child(&mut self, board: &Board, depth: u8, side: Side, alpha: i32, beta: i32) -> i32 {
        match self.alpha_beta(board, depth, side, alpha, beta) {
            Some(value) => value,
            None => unreachable!("search without a deadline cannot time out"),
        }
    }

    /// `None` when the deadline passed; the partial result is discarded.
    fn alpha_beta(
        &mut self,
        board: &Board,
        depth: u8,
        side: Side,
        mut alpha: i32,
        mut beta: i32,
    ) -> Option<i32> {
        if let Some(deadline) = self.deadline
            && Instant::now() >= deadline
        {
            self.timed_out = true;
            return None;
        }
        self.nodes += 1;

        if depth == 0 {
            return Some(self.evaluator.evaluate(board, self.root_side));
        }

        let moves = movegen::legal_moves(board, side);
        if moves.is_empty() {
            if !movegen::can_move(board, side.opponent()) {
                return Some(self.evaluator.evaluate(board, self.root_side));
            }
            // A pass costs one ply like any other move.
            return self.alpha_beta(board, depth - 1, side.opponent(), alpha, beta);
        }

        if side == self.root_side {
            let mut best = -SCORE_INF;
            for mv in moves {
                let mut next = *board;
                next.apply(mv, side);
                let value = self.alpha_beta(&next, depth - 1, side.opponent(), alpha, beta)?;
                best = best.max(value);
                alpha = alpha.max(value);
                if self.pruning && beta <= alpha {
                    break;
                }
            }
            Some(best)
        } else {
            let mut best = SCORE_INF;
            for mv in moves {
                let mut next = *board;
                next.apply(mv, side);
                let value = self.alpha_beta(&next, depth - 1, side.opponent(), alpha, beta)?;
                best = best.min(value);
                beta = beta.min(value);
                if self.pruning && beta <= alpha {
                    break;
                }
            }
            Some(best)
        }
    }

    fn log_outcome(&self, outcome: Option<&SearchOutcome>) {
        if let Some(outcome) = outcome {
            debug!(
                "{:?} best {:?} score {} depth {} nodes {} in {:?}",
                self.root_side,
                outcome.best_move,
                outcome.score,
                outcome.depth,
                self.nodes,
                self.start_time.elapsed()
            );
        }
    }
}

/// Uniform pick among the moves sharing the top score.
pub fn choose_best_randomly<R: RngCore + ?Sized>(
    scored: &[(Position, i32)],
    rng: &mut R,
) -> Option<Position> {
    let top = scored.iter().map(|&(_, score)| score).max()?;
    let best: Vec<Position> = scored
        .iter()
        .filter(|&&(_, score)| score == top)
        .map(|&(mv, _)| mv)
        .collect();
    best.choose(rng).copied()
}
