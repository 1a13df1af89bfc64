//! # Catalog Module
//!
//! Read-only data tables consumed by the loot generator.
//!
//! Two catalogs feed every generation call:
//! - the modifier table, a versioned list of level-gated name fragments
//! - the base-item table, mapping each character class to its candidate items
//!
//! Both are loaded once and then shared immutably.

pub mod base_items;
pub mod modifiers;

pub use base_items::*;
pub use modifiers::*;
