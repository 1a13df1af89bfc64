//! # Storage Module
//!
//! Persistence for generated loot.

pub mod history;

pub use history::*;
