use std::collections::{HashMap, HashSet};
use std::path::Path;

use raylib::prelude::*;

/// Textures loaded for the window presenter, keyed by block id.
pub struct TextureCache {
    pub map: HashMap<String, Texture2D>,
    // Ids whose image failed to load; they draw with a fallback color.
    pub failed: HashSet<String>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
            failed: HashSet::new(),
        }
    }

    pub fn get_ref(&self, key: &str) -> Option<&Texture2D> {
        self.map.get(key)
    }

    pub fn replace_loaded(&mut self, key: String, tex: Texture2D) {
        self.map.insert(key, tex);
    }

    /// Load `path` for `key` unless it is cached or already failed once.
    pub fn ensure(
        &mut self,
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
        key: &str,
        path: &Path,
    ) {
        if self.map.contains_key(key) || self.failed.contains(key) {
            return;
        }
        let p = path.to_string_lossy();
        match rl.load_texture(thread, &p) {
            Ok(t) => {
                t.set_texture_filter(thread, TextureFilter::TEXTURE_FILTER_POINT);
                log::debug!("loaded texture {}", p);
                self.replace_loaded(key.to_string(), t);
            }
            Err(e) => {
                log::warn!("failed to load texture {}: {}", p, e);
                self.failed.insert(key.to_string());
            }
        }
    }
}
