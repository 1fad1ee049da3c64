// Configuration module for reading Snake.toml
// Every tunable of the decision engine lives here so scenarios can be replayed
// against alternative settings without recompiling.

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub game: GameConfig,
    pub shield: ShieldConfig,
    pub safety: SafetyConfig,
    pub space: SpaceConfig,
    pub scores: ScoresConfig,
    pub selection: SelectionConfig,
    pub fallback: FallbackConfig,
    pub debug: DebugConfig,
}

/// Identity and board geometry
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct GameConfig {
    pub self_id: i64,
    pub grid_width: i32,
    pub grid_height: i32,
    pub total_ticks: i32,
}

/// Shield margins: a shield counts as sufficient only while its remaining
/// duration is strictly greater than the margin
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ShieldConfig {
    pub zone_margin: i32,
    pub body_margin: i32,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SafetyConfig {
    pub congestion_threshold: usize,
}

/// Flood-fill caps used by the different consumers
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SpaceConfig {
    pub target_probe_depth: usize,
    pub open_field_depth: usize,
    pub tie_lean_depth: usize,
    pub fallback_depth: usize,
}

/// Target scoring constants
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ScoresConfig {
    pub rejected_score: f64,

    // Food
    pub food_value_weight: f64,
    pub food_space_weight: f64,

    // Growth beans
    pub bean_rich_food_value: i32,
    pub bean_short_length: usize,
    pub bean_short_space: usize,
    pub bean_short_score: f64,
    pub bean_medium_length: usize,
    pub bean_medium_space: usize,
    pub bean_medium_score: f64,
    pub bean_fallback_score: f64,
    pub reject_crowded_beans: bool,

    // Keys and chests
    pub key_score: f64,
    pub chest_score: f64,
}

/// Direction selector weights
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SelectionConfig {
    pub distance_weight: f64,
    pub competition_weight: f64,
    pub space_tie_weight: f64,
}

/// Escape tiers used when no scored move survives
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct FallbackConfig {
    pub shield_min_score: i32,
    pub shield_min_remaining_ticks: i32,
    pub max_redraws: usize,
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Debug configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Snake.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Loads default configuration from Snake.toml in the working directory
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Snake.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Snake.toml
    pub fn default_hardcoded() -> Self {
        Config {
            game: GameConfig {
                self_id: 2024201552,
                grid_width: 40,
                grid_height: 30,
                total_ticks: 256,
            },
            shield: ShieldConfig {
                zone_margin: 1,
                body_margin: 2,
            },
            safety: SafetyConfig {
                congestion_threshold: 3,
            },
            space: SpaceConfig {
                target_probe_depth: 5,
                open_field_depth: 10,
                tie_lean_depth: 5,
                fallback_depth: 5,
            },
            scores: ScoresConfig {
                rejected_score: -1e12,
                food_value_weight: 100.0,
                food_space_weight: 10.0,
                bean_rich_food_value: 3,
                bean_short_length: 10,
                bean_short_space: 10,
                bean_short_score: 80.0,
                bean_medium_length: 15,
                bean_medium_space: 5,
                bean_medium_score: 45.0,
                bean_fallback_score: 25.0,
                reject_crowded_beans: false,
                key_score: 2000.0,
                chest_score: 2e5,
            },
            selection: SelectionConfig {
                distance_weight: 100.0,
                competition_weight: 50.0,
                space_tie_weight: 0.1,
            },
            fallback: FallbackConfig {
                shield_min_score: 50,
                shield_min_remaining_ticks: 10,
                max_redraws: 16,
                seed: None,
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "snake_debug.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            log::warn!("Could not load Snake.toml ({}), using hardcoded defaults", e);
            Self::default_hardcoded()
        })
    }
}
