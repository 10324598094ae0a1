//! Decorative background animations
//!
//! Nothing here affects gameplay. Stars are stored in normalised coordinates
//! so a window resize keeps the same sky instead of bunching it into a corner.

use std::f32::consts::{FRAC_PI_6, TAU};

use glam::Vec2;
use rand::Rng;

use crate::platform::IntervalTimer;
use crate::polar_offset;

/// Default number of background stars
pub const STAR_COUNT: usize = 120;

/// Shooting star spawn delay: base + uniform jitter (ms)
pub const SPAWN_BASE_MS: f64 = 2000.0;
pub const SPAWN_JITTER_MS: f64 = 4000.0;
/// Shooting star movement cadence (ms)
pub const MOVE_INTERVAL_MS: f64 = 32.0;
/// Horizontal distance travelled per movement step (px)
pub const MOVE_STEP_PX: f32 = 18.0;
/// Off-screen margin for spawning and culling (px)
pub const OFFSCREEN_MARGIN: f32 = 100.0;
/// Shooting stars start in the top 70% of the viewport
pub const SPAWN_BAND: f32 = 0.7;

/// A background star
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    /// Position in [0, 1) of the viewport
    pub pos: Vec2,
    /// Radius in pixels
    pub radius: f32,
    pub opacity: f32,
}

/// Static twinkle-free starfield
#[derive(Debug, Clone)]
pub struct Starfield {
    pub stars: Vec<Star>,
    pub size: Vec2,
}

impl Starfield {
    pub fn new<R: Rng>(rng: &mut R, count: usize, width: f32, height: f32) -> Self {
        let stars = (0..count)
            .map(|_| Star {
                pos: Vec2::new(rng.random::<f32>(), rng.random::<f32>()),
                radius: rng.random::<f32>() * 1.2 + 0.2,
                opacity: rng.random::<f32>() * 0.5 + 0.5,
            })
            .collect();
        Self {
            stars,
            size: Vec2::new(width, height),
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width, height);
    }

    /// Stars in pixel coordinates
    pub fn pixel_stars(&self) -> impl Iterator<Item = Star> + '_ {
        self.stars.iter().map(|star| Star {
            pos: star.pos * self.size,
            ..*star
        })
    }
}

/// A streak crossing the sky left to right
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShootingStar {
    pub id: u32,
    pub pos: Vec2,
    /// Heading in radians, within ±30° of horizontal
    pub angle: f32,
}

impl ShootingStar {
    fn advance(&mut self) {
        self.pos.x += MOVE_STEP_PX;
        self.pos.y += MOVE_STEP_PX * self.angle.tan();
    }

    fn on_screen(&self, size: Vec2) -> bool {
        self.pos.x < size.x + OFFSCREEN_MARGIN && self.pos.y < size.y + OFFSCREEN_MARGIN
    }
}

/// Spawner and mover for shooting stars
#[derive(Debug, Clone)]
pub struct ShootingStars {
    pub stars: Vec<ShootingStar>,
    visible: bool,
    enabled: bool,
    next_spawn_ms: f64,
    move_timer: IntervalTimer,
    next_id: u32,
}

impl Default for ShootingStars {
    fn default() -> Self {
        Self::new()
    }
}

impl ShootingStars {
    /// The first star spawns on the first `advance`
    pub fn new() -> Self {
        Self {
            stars: Vec::new(),
            visible: true,
            enabled: true,
            next_spawn_ms: 0.0,
            move_timer: IntervalTimer::new(),
            next_id: 1,
        }
    }

    /// Disable spawning (reduced motion). Stars in flight finish their path.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Page visibility changed. Coming back clears stale stars.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        if visible {
            self.stars.clear();
            self.move_timer.reset();
        }
    }

    /// Advance timers by `dt_ms` in a `width` x `height` viewport
    pub fn advance<R: Rng>(&mut self, rng: &mut R, dt_ms: f64, width: f32, height: f32) {
        let size = Vec2::new(width, height);

        // The spawn timer keeps running while hidden; it just spawns nothing
        self.next_spawn_ms -= dt_ms;
        while self.next_spawn_ms <= 0.0 {
            if self.visible && self.enabled {
                self.spawn(rng, height);
            }
            self.next_spawn_ms += SPAWN_BASE_MS + rng.random::<f64>() * SPAWN_JITTER_MS;
        }

        if self.stars.is_empty() {
            self.move_timer.reset();
            return;
        }
        let steps = self.move_timer.advance(dt_ms, MOVE_INTERVAL_MS);
        for _ in 0..steps {
            for star in &mut self.stars {
                star.advance();
            }
            self.stars.retain(|star| star.on_screen(size));
        }
    }

    fn spawn<R: Rng>(&mut self, rng: &mut R, height: f32) {
        let angle = rng.random::<f32>() * 2.0 * FRAC_PI_6 - FRAC_PI_6;
        let y = rng.random::<f32>() * height * SPAWN_BAND;
        self.stars.push(ShootingStar {
            id: self.next_id,
            pos: Vec2::new(-OFFSCREEN_MARGIN, y),
            angle,
        });
        self.next_id += 1;
    }
}

/// Dots drawn around a menu star, in percent of the cluster box
#[derive(Debug, Clone)]
pub struct StarCluster {
    pub dots: Vec<Vec2>,
}

impl StarCluster {
    pub const DEFAULT_COUNT: usize = 6;
    pub const DEFAULT_RADIUS: f32 = 36.0;

    pub fn new<R: Rng>(rng: &mut R, count: usize, radius: f32) -> Self {
        let center = Vec2::splat(50.0);
        let dots = (0..count)
            .map(|_| {
                let theta = rng.random::<f32>() * TAU;
                let r = rng.random::<f32>() * radius;
                polar_offset(center, r, theta)
            })
            .collect();
        Self { dots }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_starfield_ranges() {
        let mut rng = Pcg32::seed_from_u64(3);
        let field = Starfield::new(&mut rng, STAR_COUNT, 800.0, 600.0);
        assert_eq!(field.stars.len(), STAR_COUNT);
        for star in &field.stars {
            assert!((0.0..1.0).contains(&star.pos.x));
            assert!((0.0..1.0).contains(&star.pos.y));
            assert!(star.radius >= 0.2 && star.radius < 1.4 + 1e-6);
            assert!(star.opacity >= 0.5 && star.opacity <= 1.0);
        }
    }

    #[test]
    fn test_starfield_resize_scales_positions() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut field = Starfield::new(&mut rng, 10, 100.0, 100.0);
        let before: Vec<Vec2> = field.pixel_stars().map(|s| s.pos).collect();
        field.resize(200.0, 50.0);
        for (old, new) in before.iter().zip(field.pixel_stars()) {
            assert!((new.pos.x - old.x * 2.0).abs() < 1e-3);
            assert!((new.pos.y - old.y * 0.5).abs() < 1e-3);
        }
    }

    #[test]
    fn test_first_shooting_star_spawns_immediately() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut sky = ShootingStars::new();
        sky.advance(&mut rng, 0.0, 1024.0, 768.0);
        assert_eq!(sky.stars.len(), 1);

        let star = sky.stars[0];
        assert_eq!(star.pos.x, -OFFSCREEN_MARGIN);
        assert!(star.pos.y >= 0.0 && star.pos.y < 768.0 * SPAWN_BAND);
        assert!(star.angle.abs() <= FRAC_PI_6 + 1e-6);

        // Next spawn is at least two seconds away
        sky.advance(&mut rng, SPAWN_BASE_MS - 1.0, 1024.0, 768.0);
        assert!(sky.stars.iter().all(|s| s.id == 1));
    }

    #[test]
    fn test_shooting_star_moves_every_32ms() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut sky = ShootingStars::new();
        sky.advance(&mut rng, 0.0, 1024.0, 768.0);
        let start = sky.stars[0];

        sky.advance(&mut rng, 31.0, 1024.0, 768.0);
        assert_eq!(sky.stars[0].pos, start.pos);

        sky.advance(&mut rng, 1.0, 1024.0, 768.0);
        let moved = sky.stars[0];
        assert_eq!(moved.pos.x, start.pos.x + MOVE_STEP_PX);
        assert!((moved.pos.y - (start.pos.y + MOVE_STEP_PX * start.angle.tan())).abs() < 1e-3);
    }

    #[test]
    fn test_shooting_stars_culled_offscreen() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut sky = ShootingStars::new();
        sky.advance(&mut rng, 0.0, 200.0, 200.0);
        assert_eq!(sky.stars.len(), 1);
        // 400px of travel needs 23 steps, well before the next spawn
        for _ in 0..30 {
            sky.advance(&mut rng, MOVE_INTERVAL_MS, 200.0, 200.0);
        }
        assert!(sky.stars.iter().all(|s| s.pos.x < 300.0 && s.pos.y < 300.0));
        assert!(sky.stars.iter().all(|s| s.id != 1));
    }

    #[test]
    fn test_hidden_page_spawns_nothing_and_return_clears() {
        let mut rng = Pcg32::seed_from_u64(8);
        let mut sky = ShootingStars::new();
        sky.advance(&mut rng, 0.0, 1024.0, 768.0);
        assert_eq!(sky.stars.len(), 1);

        sky.set_visible(false);
        sky.advance(&mut rng, 60_000.0, 1024.0, 768.0);
        assert!(sky.stars.len() <= 1);

        sky.set_visible(true);
        assert!(sky.stars.is_empty());
    }

    #[test]
    fn test_disabled_spawner() {
        let mut rng = Pcg32::seed_from_u64(8);
        let mut sky = ShootingStars::new();
        sky.set_enabled(false);
        sky.advance(&mut rng, 30_000.0, 1024.0, 768.0);
        assert!(sky.stars.is_empty());
    }

    #[test]
    fn test_cluster_dots_within_radius() {
        let mut rng = Pcg32::seed_from_u64(11);
        let cluster = StarCluster::new(
            &mut rng,
            StarCluster::DEFAULT_COUNT,
            StarCluster::DEFAULT_RADIUS,
        );
        assert_eq!(cluster.dots.len(), 6);
        for dot in &cluster.dots {
            assert!(dot.distance(Vec2::splat(50.0)) <= StarCluster::DEFAULT_RADIUS + 1e-3);
        }
    }
}
