//! # Item Naming
//!
//! Builds display names from a base item and its modifiers.

use crate::{ModifierDefinition, ModifierPosition};

/// Composes `"<prefixes> <base> <suffixes>"`.
///
/// Prefixes and suffixes each keep the order they are given in. Modifiers
/// with an unknown position are left out of the name.
///
/// # Examples
///
/// ```
/// use lootforge::{compose_name, ModifierDefinition, ModifierPosition};
///
/// let mods = [
///     ModifierDefinition::new("Flaming", 1, 1.0, ModifierPosition::Prefix),
///     ModifierDefinition::new("of Focus", 2, 1.0, ModifierPosition::Suffix),
///     ModifierDefinition::new("Sharp", 1, 1.0, ModifierPosition::Prefix),
/// ];
/// assert_eq!(compose_name("Longsword", &mods), "Flaming Sharp Longsword of Focus");
/// assert_eq!(compose_name("Longsword", &Vec::<ModifierDefinition>::new()), "Longsword");
/// ```
pub fn compose_name<'a, I>(base_item: &str, modifiers: I) -> String
where
    I: IntoIterator<Item = &'a ModifierDefinition>,
{
    let mut prefixes: Vec<&str> = Vec::new();
    let mut suffixes: Vec<&str> = Vec::new();

    for modifier in modifiers {
        match modifier.position {
            ModifierPosition::Prefix => prefixes.push(&modifier.name),
            ModifierPosition::Suffix => suffixes.push(&modifier.name),
            ModifierPosition::Unknown => {}
        }
    }

    let mut parts = prefixes;
    parts.push(base_item);
    parts.extend(suffixes);
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_and_suffix_placement() {
        let mods = vec![
            ModifierDefinition::new("of the Owl", 2, 1.0, ModifierPosition::Suffix),
            ModifierDefinition::new("Silent", 2, 1.0, ModifierPosition::Prefix),
            ModifierDefinition::new("of Echoes", 6, 1.0, ModifierPosition::Suffix),
        ];

        assert_eq!(
            compose_name("Dagger", &mods),
            "Silent Dagger of the Owl of Echoes"
        );
    }

    #[test]
    fn test_unknown_position_omitted() {
        let mods = vec![
            ModifierDefinition::new("Glitched", 1, 1.0, ModifierPosition::Unknown),
            ModifierDefinition::new("Runic", 5, 1.0, ModifierPosition::Prefix),
        ];

        assert_eq!(compose_name("Wand", &mods), "Runic Wand");
    }

    #[test]
    fn test_only_unknown_yields_base() {
        let mods = vec![ModifierDefinition::new("Glitched", 1, 1.0, ModifierPosition::Unknown)];
        assert_eq!(compose_name("Wand", &mods), "Wand");
    }
}
