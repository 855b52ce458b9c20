use crate::chance::Chance;
use crate::group::BlockGroup;

/// A non-empty group with its weight resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedGroup<'a> {
    /// Position of the group in the list handed to [`normalize`].
    pub index: usize,
    pub blocks: &'a [String],
    pub chance: Chance,
    pub weight: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Normalized<'a> {
    pub resolved: Vec<ResolvedGroup<'a>>,
    /// Sum of explicit chances over non-empty groups (saturating).
    pub assigned: u32,
    /// Weight handed to every group without an explicit chance.
    pub auto_chance: u32,
}

impl Normalized<'_> {
    pub fn total_weight(&self) -> u64 {
        self.resolved.iter().map(|g| u64::from(g.weight)).sum()
    }

    pub fn auto_groups(&self) -> usize {
        self.resolved.iter().filter(|g| g.chance.is_auto()).count()
    }
}

/// Resolve every non-empty group to a weight.
///
/// Explicit chances are taken as-is. The remainder of 100 (clamped to
/// `0..=100`) is split evenly, rounding down, across groups left on auto.
/// Weights are not rescaled, so the total may be above or below 100.
pub fn normalize(groups: &[BlockGroup]) -> Normalized<'_> {
    let parsed: Vec<(usize, &BlockGroup, Chance)> = groups
        .iter()
        .enumerate()
        .filter(|(_, g)| !g.is_empty())
        .map(|(i, g)| (i, g, g.parsed_chance()))
        .collect();

    let assigned = parsed
        .iter()
        .filter_map(|(_, _, c)| c.explicit())
        .fold(0u32, u32::saturating_add);
    let auto_count = parsed.iter().filter(|(_, _, c)| c.is_auto()).count();
    let remainder = 100u32.saturating_sub(assigned);
    // max(1, ..) keeps the value finite when every group is explicit; it is unused then.
    let auto_chance = remainder / (auto_count.max(1) as u32);

    let resolved = parsed
        .into_iter()
        .map(|(index, g, chance)| ResolvedGroup {
            index,
            blocks: g.blocks.as_slice(),
            chance,
            weight: chance.explicit().unwrap_or(auto_chance),
        })
        .collect();

    Normalized {
        resolved,
        assigned,
        auto_chance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_remainder_across_auto_groups() {
        let groups = vec![
            BlockGroup::new(["a"], "40"),
            BlockGroup::auto(["b"]),
            BlockGroup::auto(["c", "d"]),
            BlockGroup::auto(["e"]),
        ];
        let n = normalize(&groups);
        assert_eq!(n.assigned, 40);
        assert_eq!(n.auto_chance, 20);
        let weights: Vec<u32> = n.resolved.iter().map(|g| g.weight).collect();
        assert_eq!(weights, vec![40, 20, 20, 20]);
    }

    #[test]
    fn rounds_auto_chance_down() {
        let groups = vec![
            BlockGroup::auto(["a"]),
            BlockGroup::auto(["b"]),
            BlockGroup::auto(["c"]),
        ];
        assert_eq!(normalize(&groups).auto_chance, 33);
    }

    #[test]
    fn skips_empty_groups_but_keeps_indices() {
        let groups = vec![
            BlockGroup::default(),
            BlockGroup::new(["a"], "10"),
            BlockGroup::new(Vec::<String>::new(), "90"),
            BlockGroup::auto(["b"]),
        ];
        let n = normalize(&groups);
        assert_eq!(n.resolved.len(), 2);
        assert_eq!(n.resolved[0].index, 1);
        assert_eq!(n.resolved[1].index, 3);
        // The empty group's 90 is not counted.
        assert_eq!(n.assigned, 10);
        assert_eq!(n.auto_chance, 90);
    }

    #[test]
    fn over_assigned_leaves_auto_at_zero() {
        let groups = vec![
            BlockGroup::new(["a"], "80"),
            BlockGroup::new(["b"], "70"),
            BlockGroup::auto(["c"]),
        ];
        let n = normalize(&groups);
        assert_eq!(n.assigned, 150);
        assert_eq!(n.auto_chance, 0);
        assert_eq!(n.resolved[2].weight, 0);
        assert_eq!(n.total_weight(), 150);
    }

    #[test]
    fn all_explicit_has_finite_auto_chance() {
        let groups = vec![BlockGroup::new(["a"], "30"), BlockGroup::new(["b"], "30")];
        let n = normalize(&groups);
        assert_eq!(n.auto_groups(), 0);
        assert_eq!(n.auto_chance, 40);
    }

    #[test]
    fn empty_input() {
        let n = normalize(&[]);
        assert!(n.resolved.is_empty());
        assert_eq!(n.auto_chance, 100);
        assert_eq!(n.total_weight(), 0);
    }
}
