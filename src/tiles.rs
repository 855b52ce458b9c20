use std::path::PathBuf;

use serde::Serialize;

use blockgrid_catalog::{Catalog, label};
use blockgrid_weights::{Palette, Rgb};

use crate::session::Session;

/// What fills a tile behind its label.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Backdrop {
    Image { path: PathBuf },
    Color { color: Rgb },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Tile {
    pub x: usize,
    pub y: usize,
    pub id: String,
    pub label: String,
    pub backdrop: Backdrop,
}

/// Render output handed to a presenter. `rows` may be shorter than `height`
/// (or empty) when nothing could be drawn.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RenderGrid {
    pub width: usize,
    pub height: usize,
    pub rows: Vec<Vec<Tile>>,
}

impl RenderGrid {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[cfg_attr(not(feature = "window"), allow(dead_code))]
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.rows.iter().flatten()
    }
}

/// Attach images, fallback colors and labels to a sampled grid.
///
/// Blocks without an image get the palette color at their index in
/// `distinct`; names missing from `distinct` use the first color.
pub fn compose(
    grid: Vec<Vec<String>>,
    catalog: &Catalog,
    palette: &Palette,
    distinct: &[&str],
    width: usize,
    height: usize,
) -> RenderGrid {
    let rows = grid
        .into_iter()
        .enumerate()
        .map(|(y, row)| {
            row.into_iter()
                .enumerate()
                .map(|(x, id)| {
                    let backdrop = match catalog.resolve_image(&id) {
                        Some(img) => Backdrop::Image {
                            path: img.path.clone(),
                        },
                        None => {
                            let index = distinct.iter().position(|d| *d == id).unwrap_or(0);
                            Backdrop::Color {
                                color: palette.color_for(index),
                            }
                        }
                    };
                    Tile {
                        x,
                        y,
                        label: label(&id),
                        id,
                        backdrop,
                    }
                })
                .collect()
        })
        .collect();
    RenderGrid {
        width,
        height,
        rows,
    }
}

pub fn render_session(session: &Session, catalog: &Catalog, palette: &Palette) -> RenderGrid {
    compose(
        session.grid(),
        catalog,
        palette,
        &session.distinct_blocks(),
        session.width(),
        session.height(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockgrid_weights::BlockGroup;

    fn catalog() -> Catalog {
        Catalog::from_entries([("log_spruce", "img/log_spruce.png")])
    }

    #[test]
    fn known_blocks_get_images_unknown_get_colors() {
        let palette = Palette::rotated(0);
        let grid = vec![vec!["log_spruce".to_string(), "mystery_block".to_string()]];
        let out = compose(grid, &catalog(), &palette, &["log_spruce", "mystery_block"], 2, 1);
        assert_eq!(out.rows.len(), 1);
        let a = &out.rows[0][0];
        assert_eq!(a.label, "log spruce");
        assert_eq!(
            a.backdrop,
            Backdrop::Image {
                path: PathBuf::from("img/log_spruce.png")
            }
        );
        let b = &out.rows[0][1];
        assert_eq!((b.x, b.y), (1, 0));
        assert_eq!(b.label, "mystery block");
        assert_eq!(
            b.backdrop,
            Backdrop::Color {
                color: palette.color_for(1)
            }
        );
    }

    #[test]
    fn session_colors_follow_distinct_order() {
        let mut session = Session::new(3);
        session.set_groups(vec![BlockGroup::auto(["x", "y"])]);
        session.set_width_text("6");
        session.set_height_text("6");
        let palette = Palette::rotated(4);
        let out = render_session(&session, &Catalog::new(), &palette);
        assert_eq!(out.rows.len(), 6);
        for t in out.tiles() {
            let want = if t.id == "x" { 0 } else { 1 };
            assert_eq!(
                t.backdrop,
                Backdrop::Color {
                    color: palette.color_for(want)
                }
            );
        }
    }

    #[test]
    fn serializes_backdrops_with_a_kind_tag() {
        let out = compose(
            vec![vec!["a".into()]],
            &Catalog::new(),
            &Palette::rotated(0),
            &["a"],
            1,
            1,
        );
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["rows"][0][0]["backdrop"]["kind"], "color");
        assert_eq!(json["rows"][0][0]["backdrop"]["color"], "#f6e58d");
        assert_eq!(json["rows"][0][0]["label"], "a");
    }
}
