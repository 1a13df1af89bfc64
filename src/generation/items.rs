//! # Item Generation
//!
//! The loot generator: base item selection, modifier rolling, naming and
//! power scoring combined into a single drop.

use crate::{
    compose_name, roll_modifiers, BaseItemCatalog, Character, GenerationConfig, LootError,
    LootResult, ModifierCatalog,
};
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// A finished loot drop.
///
/// Owned by the caller once generated; the generator keeps no reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedItem {
    /// Unmodified base item name
    pub base_item: String,
    /// Display name with prefixes and suffixes applied
    pub full_name: String,
    /// Retained modifier names, in catalog order
    pub modifiers: Vec<String>,
    /// Effect text of each retained modifier, parallel to `modifiers`
    pub effects: Vec<String>,
    /// Character level plus one per retained modifier
    pub power_score: i32,
}

impl GeneratedItem {
    /// Modifier names joined with ", ", or "None" when there are none.
    pub fn modifier_summary(&self) -> String {
        if self.modifiers.is_empty() {
            "None".to_string()
        } else {
            self.modifiers.join(", ")
        }
    }
}

impl fmt::Display for GeneratedItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Base Item: {}", self.base_item)?;
        writeln!(f, "Full Name: {}", self.full_name)?;
        writeln!(f, "Modifiers: {}", self.modifier_summary())?;
        writeln!(f)?;
        writeln!(f, "Properties:")?;
        for (name, effect) in self.modifiers.iter().zip(&self.effects) {
            if !effect.is_empty() {
                writeln!(f, "  {}: {}", name, effect)?;
            }
        }
        write!(f, "Power: {}", self.power_score)
    }
}

/// Generates loot drops from shared, read-only catalogs.
///
/// The generator holds no mutable state. It is `Send + Sync`, so one
/// instance can serve many threads as long as each brings its own random
/// source.
#[derive(Debug, Clone)]
pub struct LootGenerator {
    modifiers: Arc<ModifierCatalog>,
    base_items: Arc<BaseItemCatalog>,
    config: GenerationConfig,
}

impl LootGenerator {
    /// Creates a generator with the default configuration.
    pub fn new(modifiers: impl Into<Arc<ModifierCatalog>>, base_items: impl Into<Arc<BaseItemCatalog>>) -> Self {
        Self::with_config(modifiers, base_items, GenerationConfig::default())
    }

    /// Creates a generator with explicit tunables.
    pub fn with_config(
        modifiers: impl Into<Arc<ModifierCatalog>>,
        base_items: impl Into<Arc<BaseItemCatalog>>,
        config: GenerationConfig,
    ) -> Self {
        Self {
            modifiers: modifiers.into(),
            base_items: base_items.into(),
            config,
        }
    }

    /// The modifier table this generator rolls against.
    pub fn modifier_catalog(&self) -> &ModifierCatalog {
        &self.modifiers
    }

    /// The class-to-base-item table.
    pub fn base_item_catalog(&self) -> &BaseItemCatalog {
        &self.base_items
    }

    /// The generation tunables.
    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Generates one drop for a class and level.
    ///
    /// Total for every level: levels above the catalog's thresholds make all
    /// modifiers eligible, and levels below 1 make none eligible.
    ///
    /// # Examples
    ///
    /// ```
    /// use lootforge::{BaseItemCatalog, LootGenerator, ModifierCatalog, ModifierDefinition, ModifierPosition};
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let modifiers = ModifierCatalog::new(vec![
    ///     ModifierDefinition::new("Flaming", 1, 1.0, ModifierPosition::Prefix),
    ///     ModifierDefinition::new("of Focus", 2, 1.0, ModifierPosition::Suffix),
    /// ]);
    /// let base_items: BaseItemCatalog = [("Warrior", "Longsword")].into_iter().collect();
    /// let generator = LootGenerator::new(modifiers, base_items);
    ///
    /// let item = generator.generate("Warrior", 1, &mut StdRng::seed_from_u64(1));
    /// assert_eq!(item.full_name, "Flaming Longsword");
    /// assert_eq!(item.power_score, 2);
    /// ```
    pub fn generate<R: Rng + ?Sized>(&self, char_class: &str, level: i32, rng: &mut R) -> GeneratedItem {
        let base_item = self.choose_base_item(char_class, rng);
        let cap = self.config.modifier_cap(level);
        let retained = roll_modifiers(self.modifiers.iter(), level, cap, rng);

        let full_name = compose_name(&base_item, retained.iter().copied());
        let power_score = power_score(level, retained.len());

        debug!(
            "Generated '{}' for {} level {} (power {})",
            full_name, char_class, level, power_score
        );

        GeneratedItem {
            base_item,
            full_name,
            modifiers: retained.iter().map(|m| m.name.clone()).collect(),
            effects: retained.iter().map(|m| m.power_text.clone()).collect(),
            power_score,
        }
    }

    /// Generates one drop for a character.
    pub fn generate_for<R: Rng + ?Sized>(&self, character: &Character, rng: &mut R) -> GeneratedItem {
        self.generate(&character.char_class, character.level, rng)
    }

    /// Picks a base item uniformly, or the fallback item for an unknown or
    /// empty class.
    pub fn choose_base_item<R: Rng + ?Sized>(&self, char_class: &str, rng: &mut R) -> String {
        match self.base_items.candidates(char_class).choose(rng) {
            Some(item) => item.clone(),
            None => {
                debug!("No base items for class '{}'; using fallback", char_class);
                self.config.fallback_item.clone()
            }
        }
    }

    /// Checks a drop against the generator's invariants for `level`.
    pub fn validate(&self, item: &GeneratedItem, level: i32) -> LootResult<()> {
        let fail = |msg: String| Err(LootError::GenerationFailed(msg));

        if item.power_score != power_score(level, item.modifiers.len()) {
            return fail(format!(
                "power score {} does not match level {} with {} modifiers",
                item.power_score,
                level,
                item.modifiers.len()
            ));
        }

        let cap = self.config.modifier_cap(level);
        if item.modifiers.len() > cap {
            return fail(format!(
                "{} modifiers exceed the cap of {} at level {}",
                item.modifiers.len(),
                cap,
                level
            ));
        }

        let mut definitions = Vec::with_capacity(item.modifiers.len());
        for name in &item.modifiers {
            let Some(definition) = self.modifiers.get(name) else {
                return fail(format!("modifier '{}' is not in the catalog", name));
            };
            if !definition.is_eligible(level) {
                return fail(format!("modifier '{}' is not eligible at level {}", name, level));
            }
            definitions.push(definition);
        }

        let expected = compose_name(&item.base_item, definitions);
        if item.full_name != expected {
            return fail(format!(
                "name '{}' does not match the composed name '{}'",
                item.full_name, expected
            ));
        }

        Ok(())
    }
}

/// Coarse strength proxy: the level plus one per modifier.
pub fn power_score(level: i32, modifier_count: usize) -> i32 {
    let count = i32::try_from(modifier_count).unwrap_or(i32::MAX);
    level.saturating_add(count)
}
