//! # Base Item Catalog
//!
//! Class-to-item table read from a flat `class|item_name` file.

use crate::LootResult;
use log::{info, warn};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Candidate base items per character class.
///
/// Candidates keep their file order. A class with no entry is not an error;
/// [`BaseItemCatalog::candidates`] simply returns an empty slice for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BaseItemCatalog {
    items: BTreeMap<String, Vec<String>>,
}

impl BaseItemCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `class|item_name` lines.
    ///
    /// Blank lines, lines without `|`, and lines whose class or item is empty
    /// are skipped. Only the first `|` separates the fields.
    ///
    /// # Examples
    ///
    /// ```
    /// use lootforge::BaseItemCatalog;
    ///
    /// let catalog = BaseItemCatalog::parse("Warrior|Longsword\n\nnot an entry\nRogue | Dagger\n");
    /// assert_eq!(catalog.candidates("Warrior"), ["Longsword"]);
    /// assert_eq!(catalog.candidates("Rogue"), ["Dagger"]);
    /// assert!(catalog.candidates("Bard").is_empty());
    /// ```
    pub fn parse(contents: &str) -> Self {
        let mut catalog = Self::new();

        for (line_number, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let Some((char_class, item_name)) = line.split_once('|') else {
                warn!("Skipping base item line {}: missing '|'", line_number + 1);
                continue;
            };
            if !catalog.insert(char_class, item_name) {
                warn!("Skipping base item line {}: empty field", line_number + 1);
            }
        }

        catalog
    }

    /// Loads the catalog from disk.
    ///
    /// A missing file yields an empty catalog, so every class falls back to
    /// the sentinel item. Other I/O errors are returned.
    pub fn load(path: impl AsRef<Path>) -> LootResult<Self> {
        let path = path.as_ref();
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("Base item file {} not found; using empty catalog", path.display());
                return Ok(Self::new());
            }
            Err(e) => return Err(e.into()),
        };

        let catalog = Self::parse(&contents);
        info!(
            "Loaded {} base items for {} classes from {}",
            catalog.item_count(),
            catalog.class_count(),
            path.display()
        );
        Ok(catalog)
    }

    /// Adds an item to a class. Returns `false` if either field is blank.
    pub fn insert(&mut self, char_class: &str, item_name: &str) -> bool {
        let char_class = char_class.trim();
        let item_name = item_name.trim();
        if char_class.is_empty() || item_name.is_empty() {
            return false;
        }

        self.items
            .entry(char_class.to_string())
            .or_default()
            .push(item_name.to_string());
        true
    }

    /// Candidate items for a class, in file order.
    pub fn candidates(&self, char_class: &str) -> &[String] {
        self.items
            .get(char_class)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Known classes, sorted by name.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    /// Number of classes with at least one item.
    pub fn class_count(&self) -> usize {
        self.items.len()
    }

    /// Total number of base items across classes.
    pub fn item_count(&self) -> usize {
        self.items.values().map(Vec::len).sum()
    }
}

impl<C: AsRef<str>, I: AsRef<str>> FromIterator<(C, I)> for BaseItemCatalog {
    fn from_iter<T: IntoIterator<Item = (C, I)>>(iter: T) -> Self {
        let mut catalog = Self::new();
        for (char_class, item_name) in iter {
            catalog.insert(char_class.as_ref(), item_name.as_ref());
        }
        catalog
    }
}
