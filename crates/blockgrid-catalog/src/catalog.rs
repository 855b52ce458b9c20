use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::search::SearchQuery;

/// Image backing a block tile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageResource {
    pub path: PathBuf,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: String,
    pub image: ImageResource,
}

/// Every block identifier known at startup, in a stable order.
#[derive(Default, Clone, Debug)]
pub struct Catalog {
    pub entries: Vec<CatalogEntry>,
    pub by_id: HashMap<String, usize>,
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            by_id: HashMap::new(),
        }
    }

    /// Build from `(id, image path)` pairs. Entries are sorted by id; a later
    /// duplicate id replaces the earlier image.
    pub fn from_entries<I, S, P>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, P)>,
        S: Into<String>,
        P: Into<PathBuf>,
    {
        let mut by_key: HashMap<String, PathBuf> = HashMap::new();
        for (id, path) in pairs {
            by_key.insert(id.into(), path.into());
        }
        let mut keyed: Vec<(String, PathBuf)> = by_key.into_iter().collect();
        // HashMap iteration order is nondeterministic; sort so catalog order is stable.
        keyed.sort_by(|a, b| a.0.cmp(&b.0));
        let mut catalog = Catalog::new();
        for (id, path) in keyed {
            catalog.by_id.insert(id.clone(), catalog.entries.len());
            catalog.entries.push(CatalogEntry {
                id,
                image: ImageResource { path },
            });
        }
        catalog
    }

    /// Parse a manifest. Relative image paths are joined onto `base`.
    pub fn from_toml_str(toml_str: &str, base: &Path) -> Result<Self, Box<dyn Error>> {
        let cfg: ManifestConfig = toml::from_str(toml_str)?;
        let pairs = cfg.blocks.into_iter().map(|(id, entry)| {
            let path = PathBuf::from(entry.into_path());
            let path = if path.is_relative() {
                base.join(path)
            } else {
                path
            };
            (id, path)
        });
        Ok(Self::from_entries(pairs))
    }

    pub fn from_manifest_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let path = path.as_ref();
        let s = fs::read_to_string(path)?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        let catalog = Self::from_toml_str(&s, base)?;
        log::info!(
            "loaded {} block(s) from manifest {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// One block per `*.png` in `dir`, named by file stem.
    pub fn scan_dir(dir: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let dir = dir.as_ref();
        let mut pairs: Vec<(String, PathBuf)> = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            let is_png = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("png"));
            if !is_png {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                pairs.push((stem.to_string(), path.clone()));
            }
        }
        let catalog = Self::from_entries(pairs);
        log::info!("scanned {} block image(s) in {}", catalog.len(), dir.display());
        Ok(catalog)
    }

    /// A directory is scanned; anything else is read as a manifest.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let path = path.as_ref();
        if path.is_dir() {
            Self::scan_dir(path)
        } else {
            Self::from_manifest_path(path)
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn list_available(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|e| e.id.as_str())
    }

    pub fn resolve_image(&self, id: &str) -> Option<&ImageResource> {
        self.by_id.get(id).map(|&i| &self.entries[i].image)
    }

    /// Identifiers matching `query`, in catalog order.
    pub fn search(&self, query: &str) -> Vec<&str> {
        let q = SearchQuery::new(query);
        self.list_available().filter(|id| q.matches(id)).collect()
    }
}

// --- Config ---

#[derive(Deserialize)]
pub struct ManifestConfig {
    pub blocks: HashMap<String, ManifestEntry>,
}

#[derive(Deserialize)]
#[serde(untagged)]
pub enum ManifestEntry {
    // Simple: log_spruce = "log_spruce.png"
    Path(String),
    // Detailed: log_spruce = { path = "log_spruce.png" }
    Detail { path: String },
}

impl ManifestEntry {
    fn into_path(self) -> String {
        match self {
            ManifestEntry::Path(p) | ManifestEntry::Detail { path: p } => p,
        }
    }
}
