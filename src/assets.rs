use std::path::{Path, PathBuf};

/// Locate the block catalog: a `blocks.toml` manifest or a directory of PNGs.
pub fn resolve_catalog_source(cli: Option<PathBuf>) -> PathBuf {
    // Precedence: CLI flag -> BLOCKGRID_ASSETS env -> search nearby dirs -> CWD
    if let Some(pb) = cli {
        if pb.exists() {
            return pb;
        }
        log::warn!("--assets {} does not exist; searching defaults", pb.display());
    }
    if let Ok(p) = std::env::var("BLOCKGRID_ASSETS") {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return pb;
        }
    }
    // Search candidates: CWD, executable dir, crate root; climb up to 5 parents
    let mut candidates: Vec<PathBuf> = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd);
    }
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            candidates.push(dir.to_path_buf());
        }
    }
    candidates.push(PathBuf::from(env!("CARGO_MANIFEST_DIR")));

    for base in candidates {
        let mut cur = base.clone();
        for _ in 0..5 {
            if let Some(found) = catalog_in(&cur) {
                return found;
            }
            if let Some(parent) = cur.parent() {
                cur = parent.to_path_buf();
            } else {
                break;
            }
        }
    }
    textures_dir(&std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Catalog source under `root`, preferring the manifest over a bare texture dir.
pub fn catalog_in(root: &Path) -> Option<PathBuf> {
    let manifest = manifest_path(root);
    if manifest.is_file() {
        return Some(manifest);
    }
    let dir = textures_dir(root);
    if dir.is_dir() {
        return Some(dir);
    }
    None
}

pub fn manifest_path(root: &Path) -> PathBuf {
    root.join("assets/blocks.toml")
}

pub fn textures_dir(root: &Path) -> PathBuf {
    root.join("assets/blocks")
}
