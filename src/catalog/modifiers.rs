//! # Modifier Catalog
//!
//! Versioned table of item modifiers. The default table ships inside the
//! binary as JSON and can be swapped for an external file of the same shape.

use crate::config::MODIFIER_CATALOG_VERSION;
use crate::{LootError, LootResult};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Modifier table compiled into the binary.
pub const BUILTIN_MODIFIERS_JSON: &str = include_str!("../../data/modifiers.json");

/// Where a modifier's name goes relative to the base item name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModifierPosition {
    /// Placed before the base item ("Flaming Longsword")
    Prefix,
    /// Placed after the base item ("Longsword of Focus")
    Suffix,
    /// Unrecognised placement; the modifier still counts but is not named
    #[serde(other)]
    Unknown,
}

/// A single entry of the modifier table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifierDefinition {
    /// Display name, e.g. "Flaming" or "of the Owl"
    pub name: String,
    /// Lowest character level at which this modifier can roll
    pub min_level: i32,
    /// Independent selection probability once eligible (0.0 to 1.0)
    pub chance: f64,
    /// Free-text description of the in-game effect
    #[serde(default)]
    pub power_text: String,
    /// Name placement
    pub position: ModifierPosition,
}

impl ModifierDefinition {
    /// Creates a modifier with an empty effect description.
    ///
    /// # Examples
    ///
    /// ```
    /// use lootforge::{ModifierDefinition, ModifierPosition};
    ///
    /// let flaming = ModifierDefinition::new("Flaming", 1, 0.3, ModifierPosition::Prefix);
    /// assert!(flaming.is_eligible(1));
    /// assert!(!flaming.is_eligible(0));
    /// ```
    pub fn new(name: impl Into<String>, min_level: i32, chance: f64, position: ModifierPosition) -> Self {
        Self {
            name: name.into(),
            min_level,
            chance,
            power_text: String::new(),
            position,
        }
    }

    /// Sets the effect description.
    pub fn with_power_text(mut self, power_text: impl Into<String>) -> Self {
        self.power_text = power_text.into();
        self
    }

    /// Whether a character of `level` may roll this modifier.
    pub fn is_eligible(&self, level: i32) -> bool {
        level >= self.min_level
    }
}

/// Ordered, versioned modifier table.
///
/// Catalog order matters: it is the order in which modifiers are rolled and
/// the order in which surviving modifiers appear in the item name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifierCatalog {
    /// Table schema version
    pub version: u32,
    /// Modifiers in roll order
    pub modifiers: Vec<ModifierDefinition>,
}

impl ModifierCatalog {
    /// Creates a catalog at the current schema version without validation.
    pub fn new(modifiers: Vec<ModifierDefinition>) -> Self {
        Self {
            version: MODIFIER_CATALOG_VERSION,
            modifiers,
        }
    }

    /// Loads the table compiled into the binary.
    pub fn builtin() -> LootResult<Self> {
        Self::from_json_str(BUILTIN_MODIFIERS_JSON)
    }

    /// Parses and validates a JSON table.
    pub fn from_json_str(json: &str) -> LootResult<Self> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Reads, parses and validates a JSON table from disk.
    pub fn load(path: impl AsRef<Path>) -> LootResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&contents)?;
        info!(
            "Loaded {} modifiers from {}",
            catalog.modifiers.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Checks the version, names and chances of every entry.
    ///
    /// Unknown positions are allowed through with a warning; generation
    /// treats them as unnamed modifiers.
    pub fn validate(&self) -> LootResult<()> {
        if self.version != MODIFIER_CATALOG_VERSION {
            return Err(LootError::InvalidCatalog(format!(
                "unsupported modifier table version {} (expected {})",
                self.version, MODIFIER_CATALOG_VERSION
            )));
        }

        for (index, modifier) in self.modifiers.iter().enumerate() {
            if modifier.name.trim().is_empty() {
                return Err(LootError::InvalidCatalog(format!(
                    "modifier #{} has an empty name",
                    index
                )));
            }
            if !(0.0..=1.0).contains(&modifier.chance) {
                return Err(LootError::InvalidCatalog(format!(
                    "modifier '{}' has chance {} outside 0.0..=1.0",
                    modifier.name, modifier.chance
                )));
            }
            if modifier.position == ModifierPosition::Unknown {
                warn!(
                    "Modifier '{}' has an unrecognised position and will not appear in item names",
                    modifier.name
                );
            }
        }

        Ok(())
    }

    /// Number of modifiers in the table.
    pub fn len(&self) -> usize {
        self.modifiers.len()
    }

    /// Whether the table has no modifiers.
    pub fn is_empty(&self) -> bool {
        self.modifiers.is_empty()
    }

    /// Iterates over every modifier in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &ModifierDefinition> {
        self.modifiers.iter()
    }

    /// Iterates over the modifiers a character of `level` may roll.
    pub fn eligible(&self, level: i32) -> impl Iterator<Item = &ModifierDefinition> {
        self.modifiers.iter().filter(move |m| m.is_eligible(level))
    }

    /// Finds a modifier by exact name.
    pub fn get(&self, name: &str) -> Option<&ModifierDefinition> {
        self.modifiers.iter().find(|m| m.name == name)
    }
}

impl Default for ModifierCatalog {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = ModifierCatalog::builtin().unwrap();
        assert_eq!(catalog.version, MODIFIER_CATALOG_VERSION);
        assert_eq!(catalog.len(), 49);

        let flaming = catalog.get("Flaming").unwrap();
        assert_eq!(flaming.min_level, 1);
        assert_eq!(flaming.position, ModifierPosition::Prefix);
        assert_eq!(flaming.power_text, "+1d4 fire damage");

        // Thresholds stop at 20
        assert!(catalog.iter().all(|m| (1..=20).contains(&m.min_level)));
    }

    #[test]
    fn test_eligibility_by_level() {
        let catalog = ModifierCatalog::builtin().unwrap();

        assert!(catalog.eligible(1).all(|m| m.min_level <= 1));
        assert_eq!(catalog.eligible(0).count(), 0);
        assert_eq!(catalog.eligible(20).count(), catalog.len());
        assert_eq!(catalog.eligible(99).count(), catalog.len());
    }

    #[test]
    fn test_unknown_position_deserializes() {
        let json = r#"{
            "version": 1,
            "modifiers": [
                { "name": "Odd", "min_level": 1, "chance": 0.5, "position": "infix" }
            ]
        }"#;

        let catalog = ModifierCatalog::from_json_str(json).unwrap();
        assert_eq!(catalog.modifiers[0].position, ModifierPosition::Unknown);
        assert!(catalog.modifiers[0].power_text.is_empty());
    }

    #[test]
    fn test_rejects_bad_chance() {
        let json = r#"{
            "version": 1,
            "modifiers": [
                { "name": "Greedy", "min_level": 1, "chance": 1.5, "position": "prefix" }
            ]
        }"#;

        let err = ModifierCatalog::from_json_str(json).unwrap_err();
        assert!(matches!(err, LootError::InvalidCatalog(_)));
    }

    #[test]
    fn test_rejects_empty_name_and_version() {
        let empty_name = ModifierCatalog::new(vec![ModifierDefinition::new(
            "  ",
            1,
            0.5,
            ModifierPosition::Suffix,
        )]);
        assert!(empty_name.validate().is_err());

        let mut wrong_version = ModifierCatalog::default();
        wrong_version.version = MODIFIER_CATALOG_VERSION + 1;
        assert!(wrong_version.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("modifiers.json");
        let catalog = ModifierCatalog::new(vec![ModifierDefinition::new(
            "Sharp",
            1,
            0.25,
            ModifierPosition::Prefix,
        )
        .with_power_text("+1 to attack rolls")]);
        fs::write(&path, serde_json::to_string(&catalog).unwrap()).unwrap();

        let loaded = ModifierCatalog::load(&path).unwrap();
        assert_eq!(loaded, catalog);
    }
}
