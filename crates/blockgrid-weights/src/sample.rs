use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::normalize::ResolvedGroup;

/// The flattened sampling pool, stored run-length encoded.
///
/// Conceptually every resolved group appears `weight` times in a row; index
/// `i` of that flat list belongs to the run whose end is the first one past
/// `i`. Only the run ends are stored, so a chance of `4000000000` does not
/// allocate four billion entries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WeightedPool {
    // Exclusive end of each run in the flat pool.
    ends: Vec<u64>,
    // Position in the resolved slice that each run belongs to.
    slots: Vec<usize>,
}

impl WeightedPool {
    pub fn build(resolved: &[ResolvedGroup<'_>]) -> Self {
        let mut pool = WeightedPool::default();
        let mut end = 0u64;
        for (slot, group) in resolved.iter().enumerate() {
            if group.weight == 0 {
                continue;
            }
            end += u64::from(group.weight);
            pool.ends.push(end);
            pool.slots.push(slot);
        }
        pool
    }

    /// Number of entries in the flat pool.
    #[inline]
    pub fn len(&self) -> u64 {
        self.ends.last().copied().unwrap_or(0)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// How many flat entries belong to the group at `slot` in the resolved slice.
    pub fn count_of(&self, slot: usize) -> u64 {
        self.slots
            .iter()
            .position(|&s| s == slot)
            .map(|run| {
                let start = if run == 0 { 0 } else { self.ends[run - 1] };
                self.ends[run] - start
            })
            .unwrap_or(0)
    }

    /// Resolved-slice position of the flat entry at `index`.
    pub fn entry(&self, index: u64) -> Option<usize> {
        if index >= self.len() {
            return None;
        }
        let run = self.ends.partition_point(|&end| end <= index);
        self.slots.get(run).copied()
    }

    /// Uniform draw over the flat pool.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        self.entry(rng.gen_range(0..self.len()))
    }
}

/// Draw one block per cell, row-major: `height` rows of `width` cells.
///
/// A cell whose draw fails (empty pool) is skipped, and rows left empty are
/// dropped, so degenerate inputs come back as a grid with zero rows.
pub fn sample<R: Rng + ?Sized>(
    resolved: &[ResolvedGroup<'_>],
    width: usize,
    height: usize,
    rng: &mut R,
) -> Vec<Vec<String>> {
    let pool = WeightedPool::build(resolved);
    if pool.is_empty() {
        log::debug!("sampling pool is empty; {}x{} grid has no cells", width, height);
        return Vec::new();
    }
    let mut grid = Vec::with_capacity(height);
    for _ in 0..height {
        let mut row = Vec::with_capacity(width);
        for _ in 0..width {
            let Some(slot) = pool.draw(rng) else {
                continue;
            };
            if let Some(block) = resolved[slot].blocks.choose(rng) {
                row.push(block.clone());
            }
        }
        if !row.is_empty() {
            grid.push(row);
        }
    }
    grid
}

/// Generator for one render pass.
///
/// Every pass of a session shares `seed`; only the re-roll token picks a new
/// stream, so layout edits redraw from the same stream.
pub fn pass_rng(seed: u64, roll: u64) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(roll);
    rng
}
