pub mod ai;
pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod movegen;
pub mod types;
pub mod wasm;

pub use board::Board;
pub use config::{GameConfig, TimeoutPolicy};
pub use error::{EngineError, EngineResult};
pub use game::{Game, MoveSelector, SearchSelector};
pub use types::{Cell, GameResult, GameState, Phase, Position, Side};
