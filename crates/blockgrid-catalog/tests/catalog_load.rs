use blockgrid_catalog::{Catalog, label};
use proptest::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

fn sample_catalog() -> Catalog {
    Catalog::from_toml_str(
        r#"
        [blocks]
        planks_spruce = "planks_spruce.png"
        log_spruce = "log_spruce.png"
        log_spruce_top = { path = "log_spruce_top.png" }
        stripped_spruce_log = "/abs/stripped_spruce_log.png"
    "#,
        Path::new("textures"),
    )
    .expect("manifest")
}

#[test]
fn manifest_order_is_sorted() {
    let catalog = sample_catalog();
    let ids: Vec<&str> = catalog.list_available().collect();
    assert_eq!(
        ids,
        vec![
            "log_spruce",
            "log_spruce_top",
            "planks_spruce",
            "stripped_spruce_log"
        ]
    );
}

#[test]
fn manifest_paths_join_base_unless_absolute() {
    let catalog = sample_catalog();
    assert_eq!(
        catalog.resolve_image("log_spruce").unwrap().path,
        PathBuf::from("textures/log_spruce.png")
    );
    assert_eq!(
        catalog.resolve_image("log_spruce_top").unwrap().path,
        PathBuf::from("textures/log_spruce_top.png")
    );
    assert_eq!(
        catalog.resolve_image("stripped_spruce_log").unwrap().path,
        PathBuf::from("/abs/stripped_spruce_log.png")
    );
}

#[test]
fn unknown_identifier_resolves_to_none() {
    let catalog = sample_catalog();
    assert!(catalog.resolve_image("bedrock").is_none());
    assert!(!catalog.contains("bedrock"));
}

#[test]
fn bad_manifest_is_an_error() {
    assert!(Catalog::from_toml_str("blocks = 3", Path::new(".")).is_err());
}

#[test]
fn search_filters_in_catalog_order() {
    let catalog = sample_catalog();
    assert_eq!(catalog.search("").len(), 4);
    assert_eq!(catalog.search("TOP"), vec!["log_spruce_top"]);
    assert_eq!(
        catalog.search("spruce log"),
        vec!["stripped_spruce_log"]
    );
    assert_eq!(
        catalog.search("log"),
        vec!["log_spruce", "log_spruce_top", "stripped_spruce_log"]
    );
}

#[test]
fn scan_picks_up_png_stems_only() {
    let dir = tempfile::tempdir().expect("tempdir");
    for name in ["stone.png", "dirt.PNG", "notes.txt", "grass_block_side.png"] {
        fs::write(dir.path().join(name), b"").unwrap();
    }
    fs::create_dir(dir.path().join("nested.png")).unwrap();
    let catalog = Catalog::load(dir.path()).expect("scan");
    let ids: Vec<&str> = catalog.list_available().collect();
    assert_eq!(ids, vec!["dirt", "grass_block_side", "stone"]);
    assert_eq!(
        catalog.resolve_image("stone").unwrap().path,
        dir.path().join("stone.png")
    );
}

#[test]
fn load_reads_manifest_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let manifest = dir.path().join("blocks.toml");
    fs::write(&manifest, "[blocks]\nstone = \"img/stone.png\"\n").unwrap();
    let catalog = Catalog::load(&manifest).expect("manifest");
    assert_eq!(
        catalog.resolve_image("stone").unwrap().path,
        dir.path().join("img/stone.png")
    );
}

#[test]
fn missing_path_is_an_error() {
    assert!(Catalog::load("/definitely/not/here.toml").is_err());
}

proptest! {
    // Labels never contain underscores and keep the identifier's length.
    #[test]
    fn label_replaces_every_underscore(id in "[a-z_]{0,24}") {
        let l = label(&id);
        prop_assert!(!l.contains('_'));
        prop_assert_eq!(l.len(), id.len());
    }

    // Searching for an identifier always finds it.
    #[test]
    fn search_finds_own_id(ids in prop::collection::hash_set("[a-z]{1,5}(_[a-z]{1,5}){0,2}", 1..8)) {
        let catalog = Catalog::from_entries(ids.iter().map(|id| (id.clone(), format!("{}.png", id))));
        for id in &ids {
            prop_assert!(catalog.search(id).contains(&id.as_str()));
            prop_assert!(catalog.search(&id.replace('_', " ")).contains(&id.as_str()));
        }
    }
}
