use raylib::prelude::*;

use blockgrid_catalog::Catalog;
use blockgrid_weights::{Palette, Rgb};

use crate::session::Session;
use crate::texture_cache::TextureCache;
use crate::tiles::{Backdrop, RenderGrid, render_session};
use crate::watch::SessionReloader;

const TILE: i32 = 96;
const MARGIN: i32 = 12;
const HUD_HEIGHT: i32 = 28;

fn to_color(c: Rgb) -> Color {
    Color::new(c.r, c.g, c.b, 255)
}

fn window_size(session: &Session) -> (i32, i32) {
    let w = session.width() as i32 * TILE + 2 * MARGIN;
    let h = session.height() as i32 * TILE + 2 * MARGIN + HUD_HEIGHT;
    (w.clamp(320, 1920), h.clamp(200, 1080))
}

/// Textured grid in a window. `R` rerolls; the window closes on Esc.
pub fn run(
    session: &mut Session,
    catalog: &Catalog,
    palette: &Palette,
    reloader: Option<&SessionReloader>,
) {
    let (w, h) = window_size(session);
    let (mut rl, thread) = raylib::init()
        .size(w, h)
        .title("blockgrid")
        .resizable()
        .build();
    rl.set_target_fps(30);

    let mut textures = TextureCache::new();
    let mut grid: RenderGrid = render_session(session, catalog, palette);

    while !rl.window_should_close() {
        let mut dirty = false;
        if rl.is_key_pressed(KeyboardKey::KEY_R) {
            session.roll();
            dirty = true;
        }
        if let Some(r) = reloader {
            if r.poll(session) {
                let (w, h) = window_size(session);
                rl.set_window_size(w, h);
                dirty = true;
            }
        }
        if dirty {
            grid = render_session(session, catalog, palette);
        }

        for tile in grid.tiles() {
            if let Backdrop::Image { path } = &tile.backdrop {
                textures.ensure(&mut rl, &thread, &tile.id, path);
            }
        }

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::RAYWHITE);
        for tile in grid.tiles() {
            let x = MARGIN + tile.x as i32 * TILE;
            let y = MARGIN + HUD_HEIGHT + tile.y as i32 * TILE;
            let fallback = match &tile.backdrop {
                Backdrop::Color { color } => Some(to_color(*color)),
                Backdrop::Image { .. } => None,
            };
            match (fallback, textures.get_ref(&tile.id)) {
                (None, Some(tex)) => {
                    let src = Rectangle::new(0.0, 0.0, tex.width as f32, tex.height as f32);
                    let dst = Rectangle::new(x as f32, y as f32, TILE as f32, TILE as f32);
                    d.draw_texture_pro(tex, src, dst, Vector2::new(0.0, 0.0), 0.0, Color::WHITE);
                }
                (Some(c), _) => d.draw_rectangle(x, y, TILE, TILE, c),
                (None, None) => d.draw_rectangle(x, y, TILE, TILE, Color::GRAY),
            }
            d.draw_rectangle(x, y + TILE - 18, TILE, 18, Color::new(255, 255, 255, 170));
            d.draw_text(&tile.label, x + 4, y + TILE - 15, 12, Color::BLACK);
        }
        let hud = format!(
            "R: re-random | {}x{} | roll {}",
            session.width(),
            session.height(),
            session.roll_token()
        );
        d.draw_text(&hud, MARGIN, 8, 18, Color::DARKGRAY);
        if grid.is_empty() {
            d.draw_text(
                "nothing to draw: no group has a chance above zero",
                MARGIN,
                MARGIN + HUD_HEIGHT,
                18,
                Color::MAROON,
            );
        }
    }
}
