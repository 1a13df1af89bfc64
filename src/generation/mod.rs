//! # Generation Module
//!
//! Procedural loot generation.
//!
//! A drop is built in four steps: pick a base item for the character's class,
//! roll level-gated modifiers and cap them, compose the display name, and
//! score the result. Every step draws from an explicit random source so a
//! seeded generator reproduces its output exactly.

pub mod items;
pub mod naming;
pub mod rolling;

pub use items::*;
pub use naming::*;
pub use rolling::*;

use crate::config::{FALLBACK_BASE_ITEM, LEVELS_PER_MODIFIER, MAX_MODIFIERS_CAP, MIN_MODIFIERS_CAP};
use crate::{LootError, LootResult};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration for loot generation.
///
/// Holds the tunables of the modifier cap and the fallback base item. The
/// cap for a character is `clamp(level / levels_per_modifier, min, max)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Random seed for reproducible drops; `None` seeds from OS entropy
    pub seed: Option<u64>,
    /// Base item used when a class has no candidates
    pub fallback_item: String,
    /// Character levels needed per modifier slot
    pub levels_per_modifier: i32,
    /// Smallest modifier cap, whatever the level
    pub min_modifiers_cap: usize,
    /// Largest modifier cap, whatever the level
    pub max_modifiers_cap: usize,
}

impl GenerationConfig {
    /// Creates the standard configuration with a fixed seed.
    ///
    /// # Examples
    ///
    /// ```
    /// use lootforge::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(Some(7));
    /// assert_eq!(config.modifier_cap(1), 1);
    /// assert_eq!(config.modifier_cap(8), 2);
    /// assert_eq!(config.modifier_cap(20), 5);
    /// assert_eq!(config.modifier_cap(400), 5);
    /// ```
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            seed,
            fallback_item: FALLBACK_BASE_ITEM.to_string(),
            levels_per_modifier: LEVELS_PER_MODIFIER,
            min_modifiers_cap: MIN_MODIFIERS_CAP,
            max_modifiers_cap: MAX_MODIFIERS_CAP,
        }
    }

    /// Creates a seeded configuration for tests.
    pub fn for_testing(seed: u64) -> Self {
        Self::new(Some(seed))
    }

    /// Reads a configuration from a JSON file. Missing fields take defaults.
    pub fn load(path: impl AsRef<Path>) -> LootResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        info!("Loaded generation config from {}", path.display());
        Ok(config)
    }

    /// Checks that the cap bounds are usable.
    pub fn validate(&self) -> LootResult<()> {
        if self.levels_per_modifier <= 0 {
            return Err(LootError::InvalidConfig(format!(
                "levels_per_modifier must be positive, got {}",
                self.levels_per_modifier
            )));
        }
        if self.min_modifiers_cap == 0 {
            return Err(LootError::InvalidConfig(
                "min_modifiers_cap must be at least 1".to_string(),
            ));
        }
        if self.min_modifiers_cap > self.max_modifiers_cap {
            return Err(LootError::InvalidConfig(format!(
                "min_modifiers_cap {} exceeds max_modifiers_cap {}",
                self.min_modifiers_cap, self.max_modifiers_cap
            )));
        }
        if self.fallback_item.trim().is_empty() {
            return Err(LootError::InvalidConfig(
                "fallback_item must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Maximum number of modifiers a character of `level` may keep.
    ///
    /// Never panics, even for a configuration that fails [`validate`](Self::validate).
    pub fn modifier_cap(&self, level: i32) -> usize {
        let slots = level
            .checked_div(self.levels_per_modifier)
            .unwrap_or(0)
            .max(0) as usize;
        slots.max(self.min_modifiers_cap).min(self.max_modifiers_cap)
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Utility functions for generation.
pub mod utils {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Creates a random number generator from the config.
    ///
    /// Seeded configs give a reproducible generator; unseeded ones draw their
    /// seed from OS entropy.
    pub fn create_rng(config: &GenerationConfig) -> StdRng {
        match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
