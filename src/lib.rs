//! # Lootforge
//!
//! A loot generator for tabletop-style characters.
//!
//! ## Architecture Overview
//!
//! Lootforge is built around a single generation pipeline fed by two
//! read-only catalogs:
//!
//! - **Catalogs**: the modifier table (level-gated, prefix/suffix placement)
//!   and the base-item table keyed by character class
//! - **Generation**: base item selection, modifier rolling and capping,
//!   name composition and power scoring
//! - **Characters**: the character record and its on-disk roster
//! - **Storage**: the append-only loot history
//!
//! ## Randomness
//!
//! Generation never touches a global random source. Every call receives an
//! explicit [`rand::Rng`], so a seeded [`rand::rngs::StdRng`] reproduces the
//! same drop for the same inputs.

pub mod catalog;
pub mod character;
pub mod generation;
pub mod storage;

pub use catalog::*;
pub use character::*;
pub use generation::*;
pub use storage::*;

/// Core error type for Lootforge.
#[derive(thiserror::Error, Debug)]
pub enum LootError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Character level outside the supported range
    #[error("Invalid level {level}: must be between {min} and {max}")]
    InvalidLevel { level: i32, min: i32, max: i32 },

    /// Character record is incomplete
    #[error("Invalid character: {0}")]
    InvalidCharacter(String),

    /// Catalog data failed validation
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    /// A persisted record could not be parsed
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// Generation settings are inconsistent
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A generated item broke an invariant
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
}

/// Result type used throughout the Lootforge codebase.
pub type LootResult<T> = Result<T, LootError>;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Generation and storage constants.
pub mod config {
    /// Base item handed out when a class has no candidates
    pub const FALLBACK_BASE_ITEM: &str = "Mysterious Lint Ball";

    /// Lowest level a character may be created with
    pub const MIN_CHARACTER_LEVEL: i32 = 1;

    /// Highest level a character may be created with
    pub const MAX_CHARACTER_LEVEL: i32 = 20;

    /// Character levels needed per additional modifier slot
    pub const LEVELS_PER_MODIFIER: i32 = 4;

    /// Modifier cap floor, applied even at level 0
    pub const MIN_MODIFIERS_CAP: usize = 1;

    /// Modifier cap ceiling
    pub const MAX_MODIFIERS_CAP: usize = 5;

    /// Schema version of the modifier table this build understands
    pub const MODIFIER_CATALOG_VERSION: u32 = 1;

    /// Default base-item catalog path
    pub const DEFAULT_BASE_ITEMS_PATH: &str = "data/base_items.txt";

    /// Default loot history path
    pub const DEFAULT_HISTORY_PATH: &str = "loot_history.csv";

    /// Default character roster path
    pub const DEFAULT_CHARACTERS_PATH: &str = "characters.csv";
}
