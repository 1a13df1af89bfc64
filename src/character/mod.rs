//! # Character Module
//!
//! The character a drop is generated for, plus the on-disk roster of saved
//! characters.

pub mod roster;

pub use roster::*;

use crate::config::{MAX_CHARACTER_LEVEL, MIN_CHARACTER_LEVEL};
use crate::{LootError, LootResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Characters reserved by the roster and history file formats.
const RESERVED_CHARS: [char; 2] = [',', '|'];

/// A player character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub char_class: String,
    pub level: i32,
}

impl Character {
    /// Creates a validated character.
    ///
    /// Name and class are trimmed and must be nonempty and free of `,`, `|`
    /// and control characters. The level must lie in the supported range.
    ///
    /// # Examples
    ///
    /// ```
    /// use lootforge::Character;
    ///
    /// let hero = Character::new("Aria", "Rogue", 5).unwrap();
    /// assert_eq!(hero.to_string(), "Aria (Rogue L5)");
    ///
    /// assert!(Character::new("Aria", "Rogue", 0).is_err());
    /// assert!(Character::new("", "Rogue", 5).is_err());
    /// ```
    pub fn new(name: &str, char_class: &str, level: i32) -> LootResult<Self> {
        Ok(Self {
            name: validate_field("name", name)?,
            char_class: validate_field("class", char_class)?,
            level: validate_level(level)?,
        })
    }

    /// Whether this is the same character as `other`, ignoring level.
    pub fn same_identity(&self, other: &Character) -> bool {
        self.name == other.name && self.char_class == other.char_class
    }
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} L{})", self.name, self.char_class, self.level)
    }
}

/// Checks that a level lies in the supported character range.
pub fn validate_level(level: i32) -> LootResult<i32> {
    if (MIN_CHARACTER_LEVEL..=MAX_CHARACTER_LEVEL).contains(&level) {
        Ok(level)
    } else {
        Err(LootError::InvalidLevel {
            level,
            min: MIN_CHARACTER_LEVEL,
            max: MAX_CHARACTER_LEVEL,
        })
    }
}

fn validate_field(label: &str, value: &str) -> LootResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(LootError::InvalidCharacter(format!(
            "character {} cannot be empty",
            label
        )));
    }
    if value.contains(RESERVED_CHARS) {
        return Err(LootError::InvalidCharacter(format!(
            "character {} '{}' may not contain ',' or '|'",
            label, value
        )));
    }
    if value.chars().any(char::is_control) {
        return Err(LootError::InvalidCharacter(format!(
            "character {} {:?} may not contain control characters",
            label, value
        )));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_creation_trims() {
        let c = Character::new("  Brom ", " Warrior ", 12).unwrap();
        assert_eq!(c.name, "Brom");
        assert_eq!(c.char_class, "Warrior");
        assert_eq!(c.level, 12);
    }

    #[test]
    fn test_level_bounds() {
        assert!(Character::new("Brom", "Warrior", 1).is_ok());
        assert!(Character::new("Brom", "Warrior", 20).is_ok());

        let err = Character::new("Brom", "Warrior", 21).unwrap_err();
        assert!(matches!(err, LootError::InvalidLevel { level: 21, .. }));
        assert!(matches!(
            validate_level(-3),
            Err(LootError::InvalidLevel { level: -3, min: 1, max: 20 })
        ));
    }

    #[test]
    fn test_reserved_characters_rejected() {
        assert!(matches!(
            Character::new("Brom, the Bold", "Warrior", 3),
            Err(LootError::InvalidCharacter(_))
        ));
        assert!(Character::new("Brom", "War|rior", 3).is_err());
        assert!(Character::new("Brom", "   ", 3).is_err());
    }

    #[test]
    fn test_line_breaks_rejected() {
        assert!(matches!(
            Character::new("Br\nom", "Warrior", 3),
            Err(LootError::InvalidCharacter(_))
        ));
        assert!(Character::new("Brom", "War\rrior", 3).is_err());
        assert!(Character::new("Brom\tthe Bold", "Warrior", 3).is_err());
    }

    #[test]
    fn test_same_identity_ignores_level() {
        let a = Character::new("Brom", "Warrior", 3).unwrap();
        let b = Character::new("Brom", "Warrior", 9).unwrap();
        let c = Character::new("Brom", "Wizard", 3).unwrap();
        assert!(a.same_identity(&b));
        assert!(!a.same_identity(&c));
    }
}
