//! Weighted random task selection.
//!
//! A spin draws one task with probability proportional to its priority.
//! Tasks with a priority of zero or below can never be drawn.

use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};

use crate::entities::Task;

/// Draw one task from `tasks`, weighted by priority.
///
/// Returns `None` when the slice is empty or every task weighs zero.
pub fn select_weighted<'a, R: Rng + ?Sized>(tasks: &'a [Task], rng: &mut R) -> Option<&'a Task> {
    // Each weight fits in u32; the running total needs u64.
    let dist = WeightedIndex::new(tasks.iter().map(|t| u64::from(t.weight()))).ok()?;
    tasks.get(dist.sample(rng))
}
