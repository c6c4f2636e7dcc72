use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{RngCore, SeedableRng};
use web_time::{Duration, SystemTime};

use crate::ai::eval::PositionalEvaluator;
use crate::ai::level::Level;
use crate::ai::search::{self, Searcher};
use crate::board::Board;
use crate::config::{GameConfig, TimeoutPolicy};
use crate::error::{EngineError, EngineResult};
use crate::movegen;
use crate::types::{GameResult, GameState, Phase, Position, Side};

/// Picks the computer's move. `None` means pass.
pub trait MoveSelector: Send + Sync {
    fn select_move(&self, board: &Board, side: Side, rng: &mut dyn RngCore) -> Option<Position>;
}

/// Alpha-beta search over the positional evaluator.
#[derive(Debug, Clone)]
pub struct SearchSelector {
    evaluator: PositionalEvaluator,
    depth: u8,
    time_budget: Option<Duration>,
    randomize_ties: bool,
}

impl SearchSelector {
    pub fn for_level(level: Level) -> Self {
        Self {
            evaluator: PositionalEvaluator,
            depth: level.depth(),
            time_budget: None,
            randomize_ties: level.randomizes_ties(),
        }
    }

    pub fn from_config(config: &GameConfig) -> EngineResult<Self> {
        Ok(Self {
            evaluator: PositionalEvaluator,
            depth: config.search_depth()?,
            time_budget: config.search_time_budget(),
            randomize_ties: config.depth.is_none() && config.level.randomizes_ties(),
        })
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }
}

impl MoveSelector for SearchSelector {
    fn select_move(&self, board: &Board, side: Side, rng: &mut dyn RngCore) -> Option<Position> {
        if self.randomize_ties {
            let scored = Searcher::new(&self.evaluator).score_moves(board, side, self.depth);
            return search::choose_best_randomly(&scored, rng);
        }

        let outcome = match self.time_budget {
            Some(budget) => Searcher::new(&self.evaluator)
                .with_time_budget(budget)
                .iterative_deepening(board, side, self.depth),
            None => Searcher::new(&self.evaluator).best_move(board, side, self.depth),
        };
        outcome.map(|outcome| outcome.best_move)
    }
}

/// One game between a human and the computer.
///
/// All mutation goes through `&mut self`, so at most one move or search is
/// in flight per session.
pub struct Game {
    board: Board,
    side_to_move: Side,
    phase: Phase,
    config: GameConfig,
    is_pass: bool,
    flipped: Vec<u8>,
    last_move: Option<Position>,
    skipped: Option<Side>,
    selector: Box<dyn MoveSelector>,
    rng: StdRng,
}

impl Game {
    pub fn new_game(config: GameConfig) -> EngineResult<Self> {
        let selector = SearchSelector::from_config(&config)?;
        Ok(Self::with_selector(config, Box::new(selector)))
    }

    pub fn with_level(level: Level) -> Self {
        let config = GameConfig::with_level(level);
        let selector = SearchSelector::for_level(level);
        Self::with_selector(config, Box::new(selector))
    }

    pub fn with_selector(config: GameConfig, selector: Box<dyn MoveSelector>) -> Self {
        let seed = config.seed.unwrap_or_else(clock_seed);
        let mut game = Self {
            board: Board::new(),
            side_to_move: Side::Black,
            phase: Phase::AwaitingHumanMove,
            config,
            is_pass: false,
            flipped: Vec::new(),
            last_move: None,
            skipped: None,
            selector,
            rng: StdRng::seed_from_u64(seed),
        };
        game.reset();
        game
    }

    /// Starts from an arbitrary position. A side without moves is skipped.
    pub fn from_position(
        config: GameConfig,
        board: Board,
        side_to_move: Side,
    ) -> EngineResult<Self> {
        let mut game = Self::new_game(config)?;
        game.load(board, side_to_move);
        Ok(game)
    }

    /// Fresh board, same configuration. Black always moves first.
    pub fn reset(&mut self) {
        self.load(Board::new(), Side::Black);
        info!(
            "new game: human {:?}, level {}, depth {:?}",
            self.human_side(),
            self.config.level,
            self.config.search_depth()
        );
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    pub fn human_side(&self) -> Side {
        self.config.human_side
    }

    pub fn computer_side(&self) -> Side {
        self.config.computer_side()
    }

    pub fn apply_human_move(&mut self, row: u8, col: u8) -> EngineResult<GameState> {
        self.ensure_turn(self.human_side())?;
        let pos = Position::checked(row, col).ok_or(EngineError::OutOfRange { row, col })?;
        if !self.board.is_legal(pos, self.human_side()) {
            return Err(EngineError::IllegalMove { row, col });
        }

        self.play(pos, self.human_side());
        self.advance(self.human_side());
        Ok(self.state())
    }

    /// Runs the search and plays its move, or passes when there is none.
    pub fn request_computer_move(&mut self) -> EngineResult<GameState> {
        let computer = self.computer_side();
        self.ensure_turn(computer)?;

        match self.selector.select_move(&self.board, computer, &mut self.rng) {
            Some(pos) if self.board.is_legal(pos, computer) => self.play(pos, computer),
            Some(pos) => {
                return Err(EngineError::IllegalMove {
                    row: pos.row,
                    col: pos.col,
                });
            }
            None => self.pass(computer),
        }

        self.advance(computer);
        Ok(self.state())
    }

    /// Called by the host when the side to move ran out of time.
    pub fn expire_turn(&mut self) -> EngineResult<GameState> {
        if self.phase == Phase::GameOver {
            return Err(EngineError::GameOver);
        }

        let side = self.side_to_move;
        info!("{side:?} ran out of time");
        match self.config.timeout_policy {
            TimeoutPolicy::Pass => self.pass(side),
            TimeoutPolicy::RandomMove => {
                let moves = movegen::legal_moves(&self.board, side);
                match moves.choose(&mut self.rng).copied() {
                    Some(pos) => self.play(pos, side),
                    None => self.pass(side),
                }
            }
        }

        self.advance(side);
        Ok(self.state())
    }

    pub fn legal_moves(&self, side: Side) -> Vec<Position> {
        movegen::legal_moves(&self.board, side)
    }

    pub fn is_terminal(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Returns `(black_count, white_count)`.
    pub fn score(&self) -> (u8, u8) {
        self.board.count()
    }

    pub fn result(&self) -> GameResult {
        let (black_count, white_count) = self.board.count();
        GameResult::from_counts(black_count, white_count)
    }

    pub fn state(&self) -> GameState {
        let (black_count, white_count) = self.board.count();
        GameState {
            board: self.board.to_array().to_vec(),
            current_player: self.side_to_move,
            phase: self.phase,
            black_count,
            white_count,
            is_game_over: self.phase == Phase::GameOver,
            is_pass: self.is_pass,
            flipped: self.flipped.clone(),
            last_move: self.last_move,
            skipped: self.skipped,
            human_can_move: movegen::can_move(&self.board, self.human_side()),
            computer_can_move: movegen::can_move(&self.board, self.computer_side()),
            turn_time_limit_secs: self.config.turn_time_limit(),
        }
    }

    fn ensure_turn(&self, side: Side) -> EngineResult<()> {
        if self.phase == Phase::GameOver {
            return Err(EngineError::GameOver);
        }
        if self.side_to_move != side {
            return Err(EngineError::NotYourTurn {
                to_move: self.side_to_move,
            });
        }
        Ok(())
    }

    fn load(&mut self, board: Board, side_to_move: Side) {
        self.board = board;
        self.is_pass = false;
        self.flipped.clear();
        self.last_move = None;
        self.skipped = None;
        self.settle(side_to_move);
    }

    fn play(&mut self, pos: Position, side: Side) {
        let flips = self.board.apply(pos, side);
        debug!("{side:?} plays {pos:?}, {} flipped", flips.count_ones());
        self.is_pass = false;
        self.flipped = movegen::mask_to_indices(flips);
        self.last_move = Some(pos);
    }

    fn pass(&mut self, side: Side) {
        info!("{side:?} passes");
        self.is_pass = true;
        self.flipped.clear();
        self.last_move = None;
    }

    /// Hands the turn over after `side` moved or passed.
    fn advance(&mut self, side: Side) {
        self.settle(side.opponent());
    }

    /// Gives the turn to `next` if it can move, otherwise back to the other
    /// side, otherwise ends the game.
    fn settle(&mut self, next: Side) {
        self.skipped = None;

        if movegen::can_move(&self.board, next) {
            self.side_to_move = next;
        } else if movegen::can_move(&self.board, next.opponent()) {
            info!("{next:?} has no legal move and must pass");
            self.skipped = Some(next);
            self.side_to_move = next.opponent();
        } else {
            self.side_to_move = next;
            self.phase = Phase::GameOver;
            let result = self.result();
            info!(
                "game over: black {} white {} winner {:?}",
                result.black_count, result.white_count, result.winner
            );
            return;
        }

        self.phase = if self.side_to_move == self.human_side() {
            Phase::AwaitingHumanMove
        } else {
            Phase::ComputerThinking
        };
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}
