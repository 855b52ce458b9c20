use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;

use blockgrid_weights::BlockGroup;

/// Startup session file. Read once (or on change with `--watch`), never written.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub width: Option<LenientText>,
    #[serde(default)]
    pub height: Option<LenientText>,
    #[serde(default)]
    pub seed: Option<u64>,
    /// `None` keeps the default spruce group; `Some(vec![])` starts empty.
    #[serde(default)]
    pub groups: Option<Vec<GroupConfig>>,
}

/// A field the user may write either as a number or as free text.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum LenientText {
    Int(i64),
    Text(String),
}

impl LenientText {
    pub fn as_text(&self) -> String {
        match self {
            LenientText::Int(v) => v.to_string(),
            LenientText::Text(s) => s.clone(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct GroupConfig {
    #[serde(default)]
    pub blocks: Vec<String>,
    #[serde(default)]
    pub chance: Option<LenientText>,
}

impl From<GroupConfig> for BlockGroup {
    fn from(cfg: GroupConfig) -> Self {
        BlockGroup {
            blocks: cfg.blocks,
            chance: cfg.chance.map(|c| c.as_text()).unwrap_or_default(),
        }
    }
}

impl SessionConfig {
    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        Ok(toml::from_str(toml_str)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }
}

/// `block_a,block_b[:chance]` from the command line.
pub fn parse_group_spec(spec: &str) -> BlockGroup {
    let (blocks, chance) = match spec.rsplit_once(':') {
        Some((blocks, chance)) => (blocks, chance.trim()),
        None => (spec, ""),
    };
    BlockGroup::new(
        blocks
            .split(',')
            .map(str::trim)
            .filter(|b| !b.is_empty()),
        chance,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_numbers_and_text() {
        let cfg = SessionConfig::from_toml_str(
            r#"
            width = 12
            height = "3"
            seed = 9

            [[groups]]
            blocks = ["log_spruce", "planks_spruce"]
            chance = "50"

            [[groups]]
            blocks = ["stone"]
            chance = 25

            [[groups]]
            blocks = ["dirt"]
        "#,
        )
        .unwrap();
        assert_eq!(cfg.width, Some(LenientText::Int(12)));
        assert_eq!(cfg.height, Some(LenientText::Text("3".into())));
        assert_eq!(cfg.seed, Some(9));
        let groups: Vec<BlockGroup> = cfg.groups.unwrap().into_iter().map(Into::into).collect();
        assert_eq!(groups[0], BlockGroup::new(["log_spruce", "planks_spruce"], "50"));
        assert_eq!(groups[1].chance, "25");
        assert_eq!(groups[2].chance, "");
    }

    #[test]
    fn everything_is_optional() {
        let cfg = SessionConfig::from_toml_str("").unwrap();
        assert!(cfg.width.is_none());
        assert!(cfg.groups.is_none());
    }

    #[test]
    fn group_specs() {
        assert_eq!(
            parse_group_spec("a, b:40"),
            BlockGroup::new(["a", "b"], "40")
        );
        assert_eq!(parse_group_spec("a"), BlockGroup::auto(["a"]));
        assert_eq!(parse_group_spec(",,:"), BlockGroup::auto(Vec::<String>::new()));
    }
}
