use crate::chance::Chance;

/// Interchangeable blocks sharing one chance.
///
/// The chance is kept as the text the user typed; it is parsed on every
/// normalization pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlockGroup {
    pub blocks: Vec<String>,
    pub chance: String,
}

impl BlockGroup {
    pub fn new<I, S>(blocks: I, chance: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            blocks: blocks.into_iter().map(Into::into).collect(),
            chance: chance.into(),
        }
    }

    /// Group with no explicit chance.
    pub fn auto<I, S>(blocks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(blocks, String::new())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    #[inline]
    pub fn parsed_chance(&self) -> Chance {
        Chance::parse(&self.chance)
    }
}
