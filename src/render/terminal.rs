use std::io::{self, Write};

use blockgrid_weights::Rgb;

use crate::session::Session;
use crate::tiles::{Backdrop, RenderGrid};

/// Background for tiles that have a texture; a terminal cannot show the image.
const IMAGE_TILE_BG: Rgb = Rgb::from_hex(0x2f3542);

#[derive(Copy, Clone, Debug)]
pub struct TermStyle {
    pub color: bool,
    /// Characters per cell, label included.
    pub cell_width: usize,
}

impl Default for TermStyle {
    fn default() -> Self {
        Self {
            color: true,
            cell_width: 14,
        }
    }
}

fn ink_for(bg: Rgb) -> Rgb {
    if bg.luma() > 140 {
        Rgb::from_hex(0x111111)
    } else {
        Rgb::from_hex(0xf5f6fa)
    }
}

/// Label cut or padded to exactly `width` characters.
fn fit(label: &str, width: usize) -> String {
    let mut s: String = label.chars().take(width).collect();
    let n = s.chars().count();
    s.extend(std::iter::repeat_n(' ', width - n));
    s
}

pub fn write_grid(out: &mut impl Write, grid: &RenderGrid, style: TermStyle) -> io::Result<()> {
    if grid.is_empty() {
        writeln!(out, "(nothing to draw: no group has a chance above zero)")?;
        return Ok(());
    }
    let inner = style.cell_width.saturating_sub(2).max(1);
    for row in &grid.rows {
        for tile in row {
            let text = fit(&tile.label, inner);
            if !style.color {
                let mark = match tile.backdrop {
                    Backdrop::Image { .. } => ' ',
                    Backdrop::Color { .. } => '*',
                };
                write!(out, "{}{} ", mark, text)?;
                continue;
            }
            let (bg, bold) = match &tile.backdrop {
                Backdrop::Image { .. } => (IMAGE_TILE_BG, true),
                Backdrop::Color { color } => (*color, false),
            };
            let fg = ink_for(bg);
            write!(
                out,
                "\x1b[48;2;{};{};{}m\x1b[38;2;{};{};{}m{} {} \x1b[0m",
                bg.r,
                bg.g,
                bg.b,
                fg.r,
                fg.g,
                fg.b,
                if bold { "\x1b[1m" } else { "" },
                text
            )?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// The group list with resolved weights, numbered from 1.
pub fn write_groups(out: &mut impl Write, session: &Session) -> io::Result<()> {
    let n = session.normalized();
    writeln!(
        out,
        "grid {}x{}  seed {}  roll {}  assigned {}%  auto {}%",
        session.width(),
        session.height(),
        session.seed(),
        session.roll_token(),
        n.assigned,
        n.auto_chance
    )?;
    for (i, g) in session.groups().iter().enumerate() {
        if g.is_empty() {
            writeln!(out, "  {}. (empty)", i + 1)?;
            continue;
        }
        let weight = n
            .resolved
            .iter()
            .find(|r| r.index == i)
            .map(|r| r.weight)
            .unwrap_or(0);
        let chance = if g.parsed_chance().is_auto() {
            format!("auto ({})", weight)
        } else {
            weight.to_string()
        };
        writeln!(out, "  {}. [{}] {}", i + 1, chance, g.blocks.join(", "))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::Tile;
    use std::path::PathBuf;

    fn grid() -> RenderGrid {
        RenderGrid {
            width: 2,
            height: 1,
            rows: vec![vec![
                Tile {
                    x: 0,
                    y: 0,
                    id: "log_spruce".into(),
                    label: "log spruce".into(),
                    backdrop: Backdrop::Image {
                        path: PathBuf::from("log_spruce.png"),
                    },
                },
                Tile {
                    x: 1,
                    y: 0,
                    id: "stone".into(),
                    label: "stone".into(),
                    backdrop: Backdrop::Color {
                        color: Rgb::from_hex(0xf6e58d),
                    },
                },
            ]],
        }
    }

    #[test]
    fn plain_output_marks_fallback_tiles() {
        let mut buf = Vec::new();
        let style = TermStyle {
            color: false,
            cell_width: 8,
        };
        write_grid(&mut buf, &grid(), style).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), " log sp *stone  \n");
    }

    #[test]
    fn colored_output_uses_truecolor_backgrounds() {
        let mut buf = Vec::new();
        write_grid(&mut buf, &grid(), TermStyle::default()).unwrap();
        let s = String::from_utf8(buf).unwrap();
        assert!(s.contains("\x1b[48;2;246;229;141m"));
        assert!(s.contains("\x1b[48;2;47;53;66m"));
        assert!(s.ends_with("\x1b[0m\n"));
    }

    #[test]
    fn empty_grid_says_so() {
        let mut buf = Vec::new();
        write_grid(&mut buf, &RenderGrid::default(), TermStyle::default()).unwrap();
        assert!(String::from_utf8(buf).unwrap().starts_with("(nothing to draw"));
    }

    #[test]
    fn group_listing_shows_auto_weights() {
        let mut session = Session::new(1);
        session.set_groups(vec![
            blockgrid_weights::BlockGroup::new(["a"], "30"),
            blockgrid_weights::BlockGroup::auto(["b", "c"]),
        ]);
        let mut buf = Vec::new();
        write_groups(&mut buf, &session).unwrap();
        let s = String::from_utf8(buf).unwrap();
        assert!(s.contains("  1. [30] a\n"));
        assert!(s.contains("  2. [auto (70)] b, c\n"));
        assert!(s.contains("  3. (empty)\n"));
    }
}
