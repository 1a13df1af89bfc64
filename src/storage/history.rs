//! # Loot History
//!
//! Append-only log of generated drops. Each record is one `|`-delimited line:
//!
//! ```text
//! name|class|level|base_item|full_name|mod1, mod2|power_score
//! ```
//!
//! Fields containing `|` or `"` are double-quoted, with inner quotes doubled.

use crate::{Character, GeneratedItem, LootError, LootResult};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

const DELIMITER: char = '|';
const QUOTE: char = '"';
const MODIFIER_SEPARATOR: &str = ", ";
const FIELD_COUNT: usize = 7;

/// One persisted drop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LootRecord {
    pub character_name: String,
    pub char_class: String,
    pub level: i32,
    pub base_item: String,
    pub full_name: String,
    pub modifiers: Vec<String>,
    pub power_score: i32,
}

impl LootRecord {
    /// Pairs a character with the item generated for it.
    pub fn new(character: &Character, item: &GeneratedItem) -> Self {
        Self {
            character_name: character.name.clone(),
            char_class: character.char_class.clone(),
            level: character.level,
            base_item: item.base_item.clone(),
            full_name: item.full_name.clone(),
            modifiers: item.modifiers.clone(),
            power_score: item.power_score,
        }
    }

    /// Renders the record as a single history line, without the newline.
    pub fn to_line(&self) -> String {
        let level = self.level.to_string();
        let modifiers = self.modifiers.join(MODIFIER_SEPARATOR);
        let power = self.power_score.to_string();

        [
            self.character_name.as_str(),
            self.char_class.as_str(),
            level.as_str(),
            self.base_item.as_str(),
            self.full_name.as_str(),
            modifiers.as_str(),
            power.as_str(),
        ]
        .iter()
        .map(|field| quote_field(field))
        .collect::<Vec<_>>()
        .join("|")
    }
}

impl FromStr for LootRecord {
    type Err = LootError;

    fn from_str(line: &str) -> LootResult<Self> {
        let fields: [String; FIELD_COUNT] = split_fields(line)?.try_into().map_err(|_| {
            LootError::InvalidRecord(format!("expected {} fields in '{}'", FIELD_COUNT, line))
        })?;
        let [name, class, level, base, full, modifiers, power] = fields;

        let parse_int = |label: &str, value: &str| {
            value.trim().parse::<i32>().map_err(|_| {
                LootError::InvalidRecord(format!("{} '{}' is not an integer", label, value))
            })
        };

        let modifiers = if modifiers.is_empty() {
            Vec::new()
        } else {
            modifiers.split(MODIFIER_SEPARATOR).map(str::to_string).collect()
        };

        Ok(Self {
            character_name: name,
            char_class: class,
            level: parse_int("level", &level)?,
            base_item: base,
            full_name: full,
            modifiers,
            power_score: parse_int("power score", &power)?,
        })
    }
}

fn quote_field(field: &str) -> String {
    if field.contains([DELIMITER, QUOTE]) {
        format!("\"{}\"", field.replace(QUOTE, "\"\""))
    } else {
        field.to_string()
    }
}

fn split_fields(line: &str) -> LootResult<Vec<String>> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            QUOTE if quoted && chars.peek() == Some(&QUOTE) => {
                current.push(QUOTE);
                chars.next();
            }
            QUOTE if quoted => quoted = false,
            QUOTE if current.is_empty() => quoted = true,
            DELIMITER if !quoted => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }

    if quoted {
        return Err(LootError::InvalidRecord(format!(
            "unterminated quote in '{}'",
            line
        )));
    }
    fields.push(current);
    Ok(fields)
}

/// Append-only loot history file.
#[derive(Debug, Clone)]
pub struct LootHistory {
    path: PathBuf,
}

impl LootHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends a drop, creating the file and parent directories if needed.
    pub fn append(&self, character: &Character, item: &GeneratedItem) -> LootResult<LootRecord> {
        let record = LootRecord::new(character, item);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", record.to_line())?;

        info!(
            "Recorded '{}' for {} in {}",
            record.full_name,
            record.character_name,
            self.path.display()
        );
        Ok(record)
    }

    /// Reads every record. Malformed lines are skipped with a warning and a
    /// missing file reads as empty.
    pub fn read_all(&self) -> LootResult<Vec<LootRecord>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::new();
        for (line_number, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<LootRecord>() {
                Ok(record) => records.push(record),
                Err(e) => warn!("Skipping history line {}: {}", line_number + 1, e),
            }
        }
        Ok(records)
    }

    /// The newest `limit` records, oldest first.
    pub fn recent(&self, limit: usize) -> LootResult<Vec<LootRecord>> {
        let mut records = self.read_all()?;
        let skip = records.len().saturating_sub(limit);
        records.drain(..skip);
        Ok(records)
    }
}
