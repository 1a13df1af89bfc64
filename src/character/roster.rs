//! # Character Roster
//!
//! Saved characters, persisted as a three-column CSV file.

use crate::{Character, LootResult};
use log::{info, warn};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Header row written at the top of the roster file.
pub const ROSTER_HEADER: &str = "name,char_class,level";

/// Ordered collection of saved characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterRoster {
    characters: Vec<Character>,
}

impl CharacterRoster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses roster CSV.
    ///
    /// The first line is treated as a header. Rows without exactly three
    /// fields, or whose level is not an integer, are skipped.
    pub fn parse(contents: &str) -> Self {
        let mut roster = Self::new();

        for (line_number, line) in contents.lines().enumerate().skip(1) {
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split(',').collect();
            let &[name, char_class, level] = fields.as_slice() else {
                warn!("Skipping roster row {}: expected 3 fields", line_number + 1);
                continue;
            };
            let Ok(level) = level.trim().parse::<i32>() else {
                warn!("Skipping roster row {}: bad level '{}'", line_number + 1, level);
                continue;
            };
            roster.characters.push(Character {
                name: name.trim().to_string(),
                char_class: char_class.trim().to_string(),
                level,
            });
        }

        roster
    }

    /// Loads the roster from disk. A missing file yields an empty roster.
    pub fn load(path: impl AsRef<Path>) -> LootResult<Self> {
        let path = path.as_ref();
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("Roster file {} not found; starting empty", path.display());
                return Ok(Self::new());
            }
            Err(e) => return Err(e.into()),
        };

        let roster = Self::parse(&contents);
        info!("Loaded {} characters from {}", roster.len(), path.display());
        Ok(roster)
    }

    /// Renders the roster as CSV, header included.
    pub fn to_csv(&self) -> String {
        let mut out = String::from(ROSTER_HEADER);
        out.push('\n');
        for c in &self.characters {
            out.push_str(&format!("{},{},{}\n", c.name, c.char_class, c.level));
        }
        out
    }

    /// Rewrites the roster file, creating parent directories as needed.
    pub fn save(&self, path: impl AsRef<Path>) -> LootResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_csv())?;
        info!("Saved {} characters to {}", self.len(), path.display());
        Ok(())
    }

    /// Updates the level of a matching (name, class) entry, or appends.
    ///
    /// Returns `true` when an existing entry was updated.
    pub fn upsert(&mut self, character: Character) -> bool {
        match self.characters.iter_mut().find(|c| c.same_identity(&character)) {
            Some(existing) => {
                existing.level = character.level;
                true
            }
            None => {
                self.characters.push(character);
                false
            }
        }
    }

    /// Finds a character by name, optionally narrowed by class.
    pub fn find(&self, name: &str, char_class: Option<&str>) -> Option<&Character> {
        self.characters
            .iter()
            .find(|c| c.name == name && char_class.map_or(true, |class| c.char_class == class))
    }

    /// Iterates over characters in roster order.
    pub fn iter(&self) -> impl Iterator<Item = &Character> {
        self.characters.iter()
    }

    /// Number of saved characters.
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    /// Whether the roster has no characters.
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn character(name: &str, class: &str, level: i32) -> Character {
        Character::new(name, class, level).unwrap()
    }

    #[test]
    fn test_parse_skips_bad_rows() {
        let contents = "\
name,char_class,level
Aria,Rogue,5
Brom,Warrior
Cass,Wizard,seven
Dain,Warrior,12,extra

Eli,Wizard,3
";
        let roster = CharacterRoster::parse(contents);
        let names: Vec<_> = roster.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Aria", "Eli"]);
    }

    #[test]
    fn test_upsert_updates_level_or_appends() {
        let mut roster = CharacterRoster::new();
        assert!(!roster.upsert(character("Aria", "Rogue", 5)));
        assert!(!roster.upsert(character("Aria", "Wizard", 2)));
        assert!(roster.upsert(character("Aria", "Rogue", 9)));

        assert_eq!(roster.len(), 2);
        assert_eq!(roster.find("Aria", Some("Rogue")).unwrap().level, 9);
        assert_eq!(roster.find("Aria", Some("Wizard")).unwrap().level, 2);
        assert_eq!(roster.find("Aria", None).unwrap().char_class, "Rogue");
        assert!(roster.find("Brom", None).is_none());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("characters.csv");

        let mut roster = CharacterRoster::new();
        roster.upsert(character("Aria", "Rogue", 5));
        roster.upsert(character("Brom", "Warrior", 20));
        roster.save(&path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("name,char_class,level\n"));

        let loaded = CharacterRoster::load(&path).unwrap();
        assert_eq!(loaded, roster);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let roster = CharacterRoster::load(dir.path().join("characters.csv")).unwrap();
        assert!(roster.is_empty());
    }
}
