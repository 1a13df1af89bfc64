//! # Modifier Rolling
//!
//! Two-phase modifier selection: independent level-gated rolls, then a
//! uniform random down-selection to the level's cap.

use crate::ModifierDefinition;
use log::debug;
use rand::seq::index;
use rand::Rng;

/// Rolls every eligible modifier independently and caps the survivors.
///
/// Each modifier with `min_level <= level` is kept when a fresh draw from
/// `[0, 1)` falls below its `chance`. If more than `cap` modifiers were kept,
/// exactly `cap` of them are chosen uniformly at random without replacement.
/// Survivors always keep their catalog order.
pub fn roll_modifiers<'a, I, R>(modifiers: I, level: i32, cap: usize, rng: &mut R) -> Vec<&'a ModifierDefinition>
where
    I: IntoIterator<Item = &'a ModifierDefinition>,
    R: Rng + ?Sized,
{
    let rolled: Vec<&ModifierDefinition> = modifiers
        .into_iter()
        .filter(|m| m.is_eligible(level))
        .filter(|m| rng.gen::<f64>() < m.chance)
        .collect();

    if rolled.len() <= cap {
        debug!("Rolled {} modifiers at level {} (cap {})", rolled.len(), level, cap);
        return rolled;
    }

    let mut keep = index::sample(rng, rolled.len(), cap).into_vec();
    keep.sort_unstable();

    debug!(
        "Rolled {} modifiers at level {}, discarding {} over cap {}",
        rolled.len(),
        level,
        rolled.len() - cap,
        cap
    );

    keep.into_iter().map(|i| rolled[i]).collect()
}
