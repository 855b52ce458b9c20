use blockgrid_weights::{BlockGroup, Normalized, normalize, pass_rng, sample};

use crate::config::SessionConfig;

pub const DEFAULT_WIDTH: usize = 8;
pub const DEFAULT_HEIGHT: usize = 5;
pub const DEFAULT_BLOCKS: [&str; 4] = [
    "log_spruce",
    "log_spruce_top",
    "planks_spruce",
    "stripped_spruce_log",
];

/// Largest accepted width or height; bigger inputs are clamped.
pub const MAX_DIMENSION: usize = 512;

/// Lenient grid dimension: leading integer of `text`, or 1 if that is missing,
/// zero, or negative. Capped at [`MAX_DIMENSION`].
pub fn parse_dimension(text: &str) -> usize {
    let s = text.trim_start();
    if s.starts_with('-') {
        return 1;
    }
    let digits = s.strip_prefix('+').unwrap_or(s);
    let run: String = digits.chars().take_while(|c| c.is_ascii_digit()).collect();
    if run.is_empty() {
        return 1;
    }
    match run.parse::<usize>() {
        Ok(0) => 1,
        Ok(v) => v.min(MAX_DIMENSION),
        // Digits only, so the remaining failure is overflow.
        Err(_) => MAX_DIMENSION,
    }
}

/// Everything the user has entered so far, plus the re-roll token.
#[derive(Clone, Debug)]
pub struct Session {
    width: usize,
    height: usize,
    groups: Vec<BlockGroup>,
    seed: u64,
    roll: u64,
}

impl Session {
    pub fn new(seed: u64) -> Self {
        let mut s = Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            groups: vec![BlockGroup::auto(DEFAULT_BLOCKS)],
            seed,
            roll: 0,
        };
        s.ensure_placeholder();
        s
    }

    /// Session seeded from `cfg`; `seed` is used when the file names none.
    pub fn from_config(cfg: SessionConfig, seed: u64) -> Self {
        let mut s = Self::new(cfg.seed.unwrap_or(seed));
        if let Some(w) = cfg.width {
            s.set_width_text(&w.as_text());
        }
        if let Some(h) = cfg.height {
            s.set_height_text(&h.as_text());
        }
        if let Some(groups) = cfg.groups {
            s.groups = groups.into_iter().map(BlockGroup::from).collect();
            s.ensure_placeholder();
        }
        s
    }

    /// Swap in a reloaded config, keeping the seed and roll.
    pub fn reload(&mut self, cfg: SessionConfig) {
        let (seed, roll) = (self.seed, self.roll);
        *self = Self::from_config(cfg, seed);
        self.seed = seed;
        self.roll = roll;
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[inline]
    pub fn roll_token(&self) -> u64 {
        self.roll
    }

    pub fn groups(&self) -> &[BlockGroup] {
        &self.groups
    }

    pub fn set_width_text(&mut self, text: &str) {
        self.width = parse_dimension(text);
        log::debug!(target: "session", "width = {}", self.width);
    }

    pub fn set_height_text(&mut self, text: &str) {
        self.height = parse_dimension(text);
        log::debug!(target: "session", "height = {}", self.height);
    }

    /// Replace the whole group list (e.g. from `--group` flags).
    pub fn set_groups(&mut self, groups: Vec<BlockGroup>) {
        self.groups = groups;
        self.ensure_placeholder();
    }

    /// Append `id` to group `group`. Returns false if there is no such group.
    pub fn add_block(&mut self, group: usize, id: &str) -> bool {
        let Some(g) = self.groups.get_mut(group) else {
            return false;
        };
        g.blocks.push(id.to_string());
        log::info!(target: "session", "added {} to group {}", id, group + 1);
        self.ensure_placeholder();
        true
    }

    /// Remove the first `id` from group `group`.
    pub fn remove_block(&mut self, group: usize, id: &str) -> bool {
        let Some(g) = self.groups.get_mut(group) else {
            return false;
        };
        let Some(pos) = g.blocks.iter().position(|b| b == id) else {
            return false;
        };
        g.blocks.remove(pos);
        self.ensure_placeholder();
        true
    }

    pub fn set_chance(&mut self, group: usize, text: &str) -> bool {
        let Some(g) = self.groups.get_mut(group) else {
            return false;
        };
        g.chance = text.to_string();
        log::debug!(target: "session", "group {} chance = {:?}", group + 1, g.chance);
        true
    }

    /// Set a group's blocks from newline-separated text; lines are trimmed and
    /// blank ones dropped.
    pub fn set_blocks_text(&mut self, group: usize, text: &str) -> bool {
        let Some(g) = self.groups.get_mut(group) else {
            return false;
        };
        g.blocks = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();
        self.ensure_placeholder();
        true
    }

    pub fn remove_group(&mut self, group: usize) -> bool {
        if group >= self.groups.len() {
            return false;
        }
        self.groups.remove(group);
        self.ensure_placeholder();
        true
    }

    /// Group a picked search result lands in: the last non-empty group, or the
    /// placeholder when nothing has been entered yet.
    pub fn pick_target(&self) -> usize {
        self.groups
            .iter()
            .rposition(|g| !g.is_empty())
            .or_else(|| self.groups.iter().position(BlockGroup::is_empty))
            .unwrap_or(0)
    }

    /// Add a catalog pick to the selection pool; returns the group it went to.
    pub fn add_to_pool(&mut self, id: &str) -> usize {
        let target = self.pick_target();
        self.add_block(target, id);
        target
    }

    /// Explicit re-random.
    pub fn roll(&mut self) {
        self.roll = self.roll.wrapping_add(1);
        log::debug!(target: "session", "re-roll #{}", self.roll);
    }

    pub fn normalized(&self) -> Normalized<'_> {
        normalize(&self.groups)
    }

    /// Blocks for the current state and roll, `height` rows of `width`.
    pub fn grid(&self) -> Vec<Vec<String>> {
        let n = self.normalized();
        let mut rng = pass_rng(self.seed, self.roll);
        sample(&n.resolved, self.width, self.height, &mut rng)
    }

    /// Distinct block names across all groups in first-seen order; a block's
    /// position here selects its fallback color.
    pub fn distinct_blocks(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for b in self.groups.iter().flat_map(|g| g.blocks.iter()) {
            if !out.contains(&b.as_str()) {
                out.push(b.as_str());
            }
        }
        out
    }

    fn ensure_placeholder(&mut self) {
        if !self.groups.iter().any(BlockGroup::is_empty) {
            self.groups.push(BlockGroup::default());
        }
    }
}
