//! Session configuration supplied by the host when a game starts.

use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::ai::level::{self, Level};
use crate::error::EngineResult;
use crate::types::Side;

/// What happens when the host reports that the per-turn clock ran out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeoutPolicy {
    #[default]
    Pass,
    /// Play a uniformly chosen legal move, passing only when there is none.
    RandomMove,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameConfig {
    pub level: Level,
    /// Overrides the level's depth when set.
    pub depth: Option<u8>,
    pub human_side: Side,
    /// Per-turn clock for the host; 0 or absent disables it.
    pub turn_time_limit_secs: Option<u32>,
    /// Wall-clock cap on a single computer search.
    pub search_time_budget_ms: Option<u64>,
    pub timeout_policy: TimeoutPolicy,
    /// Fixed seed for tie-breaking and forced moves.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            level: Level::default(),
            depth: None,
            human_side: Side::Black,
            turn_time_limit_secs: None,
            search_time_budget_ms: None,
            timeout_policy: TimeoutPolicy::default(),
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            ..Self::default()
        }
    }

    pub fn search_depth(&self) -> EngineResult<u8> {
        level::validate_depth(self.depth.unwrap_or_else(|| self.level.depth()))
    }

    pub fn search_time_budget(&self) -> Option<Duration> {
        self.search_time_budget_ms.map(Duration::from_millis)
    }

    pub fn turn_time_limit(&self) -> Option<u32> {
        self.turn_time_limit_secs.filter(|&secs| secs > 0)
    }

    pub fn computer_side(&self) -> Side {
        self.human_side.opponent()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    #[test]
    fn empty_object_yields_defaults() {
        let config: GameConfig = serde_json::from_str("{}").unwrap();

        assert_eq!(config, GameConfig::default());
        assert_eq!(config.search_depth(), Ok(3));
        assert_eq!(config.computer_side(), Side::White);
    }

    #[test]
    fn parses_host_config() {
        let config: GameConfig = serde_json::from_str(
            r#"{
                "level": "very-hard",
                "humanSide": "white",
                "turnTimeLimitSecs": 30,
                "searchTimeBudgetMs": 250,
                "timeoutPolicy": "random-move",
                "seed": 42
            }"#,
        )
        .unwrap();

        assert_eq!(config.level, Level::VeryHard);
        assert_eq!(config.search_depth(), Ok(5));
        assert_eq!(config.human_side, Side::White);
        assert_eq!(config.turn_time_limit(), Some(30));
        assert_eq!(config.search_time_budget(), Some(Duration::from_millis(250)));
        assert_eq!(config.timeout_policy, TimeoutPolicy::RandomMove);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn explicit_depth_overrides_level_and_is_validated() {
        let mut config = GameConfig::with_level(Level::God);
        config.depth = Some(1);
        assert_eq!(config.search_depth(), Ok(1));

        config.depth = Some(0);
        assert_eq!(config.search_depth(), Err(EngineError::InvalidDepth(0)));
    }

    #[test]
    fn zero_turn_limit_means_no_clock() {
        let config = GameConfig {
            turn_time_limit_secs: Some(0),
            ..GameConfig::default()
        };
        assert_eq!(config.turn_time_limit(), None);
    }
}
