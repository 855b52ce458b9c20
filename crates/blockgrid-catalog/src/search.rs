/// Case-insensitive catalog filter.
///
/// An identifier matches if it contains the lowercased query, or the query
/// with whitespace runs turned into `_` (so `"spruce log"` finds
/// `stripped_spruce_log`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchQuery {
    plain: String,
    underscored: String,
}

impl SearchQuery {
    pub fn new(text: &str) -> Self {
        let plain = text.to_lowercase();
        let underscored = plain.split_whitespace().collect::<Vec<_>>().join("_");
        // Keep leading/trailing whitespace runs as separators too.
        let underscored = match (
            plain.starts_with(char::is_whitespace),
            plain.ends_with(char::is_whitespace),
        ) {
            _ if underscored.is_empty() && !plain.is_empty() => "_".to_string(),
            (true, true) => format!("_{}_", underscored),
            (true, false) => format!("_{}", underscored),
            (false, true) => format!("{}_", underscored),
            (false, false) => underscored,
        };
        Self { plain, underscored }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.plain.is_empty()
    }

    pub fn matches(&self, id: &str) -> bool {
        if self.is_empty() {
            return true;
        }
        let lower = id.to_lowercase();
        lower.contains(&self.plain) || lower.contains(&self.underscored)
    }
}
