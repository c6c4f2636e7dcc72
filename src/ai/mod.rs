pub mod eval;
pub mod level;
pub mod search;

pub use eval::{Evaluator, PositionalEvaluator};
pub use level::Level;
pub use search::{SearchOutcome, Searcher};
