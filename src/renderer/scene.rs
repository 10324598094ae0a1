//! Scene builders: simulation state to clip-space vertices

use glam::Vec2;

use super::shapes::{ShapeBatch, Viewport};
use super::vertex::{Vertex, colors, hex};
use crate::sim::pong::{BALL_RADIUS, FIELD_HEIGHT, FIELD_WIDTH, PADDLE_HEIGHT, PADDLE_WIDTH};
use crate::sim::snake::BOARD_SIZE;
use crate::sim::{CellKind, PongState, ShootingStars, SnakeState, Starfield};

/// Snake cell edge (px)
pub const CELL_PX: f32 = 20.0;
/// Gap between snake cells (px)
pub const CELL_GAP: f32 = 2.0;
/// Snake canvas edge (px)
pub const SNAKE_CANVAS_PX: f32 = BOARD_SIZE as f32 * (CELL_PX + CELL_GAP) + CELL_GAP;

/// Shooting star tail length (px)
const TAIL_PX: f32 = 90.0;

/// Background stars plus any shooting stars in flight
pub fn starfield_scene(field: &Starfield, shooting: &ShootingStars) -> Vec<Vertex> {
    let mut batch = ShapeBatch::new();

    for star in field.pixel_stars() {
        let color = hex(colors::WHITE, star.opacity);
        // shadowBlur 8 around every star
        batch.glow_circle(star.pos, star.radius, 8.0 * star.radius, color, 2);
        batch.circle(star.pos, star.radius, color);
    }

    for star in &shooting.stars {
        let dir = Vec2::new(star.angle.cos(), star.angle.sin());
        let tail = star.pos - dir * TAIL_PX;
        batch.streak(
            tail,
            star.pos,
            2.0,
            hex(colors::WHITE, 0.0),
            hex(colors::WHITE, 0.9),
        );
        batch.glow_circle(star.pos, 2.0, 6.0, hex(colors::WHITE, 1.0), 2);
        batch.circle(star.pos, 2.0, hex(colors::WHITE, 1.0));
    }

    batch.into_ndc(Viewport::new(field.size.x, field.size.y))
}

/// Top-left pixel of a snake board cell
pub fn cell_origin(x: i32, y: i32) -> Vec2 {
    Vec2::new(
        CELL_GAP + x as f32 * (CELL_PX + CELL_GAP),
        CELL_GAP + y as f32 * (CELL_PX + CELL_GAP),
    )
}

/// Snake board. `flash` (0-1) tints the board after a game over.
pub fn snake_scene(state: &SnakeState, flash: f32) -> Vec<Vertex> {
    let mut batch = ShapeBatch::new();
    let size = Vec2::splat(CELL_PX);

    for (cell, kind) in state.cells() {
        let origin = cell_origin(cell.x, cell.y);
        match kind {
            CellKind::Empty => batch.rect(origin, size, hex(colors::CELL, 1.0)),
            CellKind::Head => batch.rect(origin, size, hex(colors::SNAKE_HEAD, 1.0)),
            CellKind::Body => batch.rect(origin, size, hex(colors::SNAKE_BODY, 1.0)),
            CellKind::Food => {
                batch.rect(origin, size, hex(colors::CELL, 1.0));
                let center = origin + size / 2.0;
                let pink = hex(colors::PINK, 1.0);
                batch.glow_circle(center, CELL_PX * 0.35, 6.0, pink, 2);
                batch.circle(center, CELL_PX * 0.35, pink);
            }
        }
    }

    if flash > 0.0 {
        batch.rect(
            Vec2::ZERO,
            Vec2::splat(SNAKE_CANVAS_PX),
            hex(colors::FLASH, 0.45 * flash.min(1.0)),
        );
    }

    batch.into_ndc(Viewport::new(SNAKE_CANVAS_PX, SNAKE_CANVAS_PX))
}

/// Pong field: glowing paddle on the left, glowing ball
pub fn pong_scene(state: &PongState, glow_layers: u32) -> Vec<Vertex> {
    let mut batch = ShapeBatch::new();
    let white = hex(colors::WHITE, 1.0);

    let paddle_origin = Vec2::new(0.0, state.paddle_y);
    let paddle_size = Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT);
    batch.glow_rect(
        paddle_origin,
        paddle_size,
        10.0,
        hex(colors::ACCENT, 1.0),
        glow_layers,
    );
    batch.rect(paddle_origin, paddle_size, white);

    batch.glow_circle(
        state.ball.pos,
        BALL_RADIUS,
        15.0,
        hex(colors::PINK, 1.0),
        glow_layers,
    );
    batch.circle(state.ball.pos, BALL_RADIUS, white);

    batch.into_ndc(Viewport::new(FIELD_WIDTH, FIELD_HEIGHT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn in_clip_space(vertices: &[Vertex]) -> bool {
        vertices
            .iter()
            .all(|v| v.position.iter().all(|c| c.is_finite()))
    }

    #[test]
    fn test_cell_origin_layout() {
        assert_eq!(cell_origin(0, 0), Vec2::splat(CELL_GAP));
        let last = cell_origin(BOARD_SIZE - 1, BOARD_SIZE - 1);
        assert!((last.x + CELL_PX + CELL_GAP - SNAKE_CANVAS_PX).abs() < 1e-3);
    }

    #[test]
    fn test_snake_scene_covers_board() {
        let state = SnakeState::new(4);
        let vertices = snake_scene(&state, 0.0);
        // At least one quad per cell
        assert!(vertices.len() >= (BOARD_SIZE * BOARD_SIZE) as usize * 6);
        assert!(in_clip_space(&vertices));
        // Food glow may bleed a pixel past the edge; nothing else should
        assert!(
            vertices
                .iter()
                .all(|v| v.position[0].abs() <= 1.05 && v.position[1].abs() <= 1.05)
        );

        let flashed = snake_scene(&state, 1.0);
        assert_eq!(flashed.len(), vertices.len() + 6);
    }

    #[test]
    fn test_pong_scene_without_glow() {
        let state = PongState::new(4);
        let plain = pong_scene(&state, 0);
        let glowing = pong_scene(&state, 3);
        assert!(glowing.len() > plain.len());
        assert!(in_clip_space(&glowing));
    }

    #[test]
    fn test_starfield_scene_includes_shooting_stars() {
        let mut rng = Pcg32::seed_from_u64(2);
        let field = Starfield::new(&mut rng, 20, 800.0, 600.0);
        let mut shooting = ShootingStars::new();
        let quiet = starfield_scene(&field, &shooting);

        shooting.advance(&mut rng, 0.0, 800.0, 600.0);
        let busy = starfield_scene(&field, &shooting);
        assert!(busy.len() > quiet.len());
    }
}
