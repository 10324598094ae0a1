//! Galaxy portfolio entry point
//!
//! The browser build wires the library into the host page. Natively there is
//! no window, so a short scripted session of both games runs headless.

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    web::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use galaxy_portfolio::Settings;
    use galaxy_portfolio::platform::MemoryStore;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Galaxy portfolio (native) starting...");
    log::info!("The site itself needs a browser - run `trunk serve` for the web version");

    let store = MemoryStore::new();
    let settings = Settings::load(&store);
    log::info!(
        "Default settings: quality {}, volume {:.2}",
        settings.quality.as_str(),
        settings.effective_volume()
    );

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    smoke::snake(&store, seed);
    smoke::pong(&store, seed);
}

#[cfg(not(target_arch = "wasm32"))]
mod smoke {
    use galaxy_portfolio::platform::{Command, KeyValueStore};
    use galaxy_portfolio::sim::pong::PADDLE_HEIGHT;
    use galaxy_portfolio::sim::{Direction, PongInput, PongPhase, PongState, SnakeEvent, SnakeState};
    use galaxy_portfolio::{GameKind, HighScore};

    /// Ticks of perfect play before the paddle stops following the ball
    const PONG_TICKS: u32 = 60 * 60;
    /// Hard stop in case the ball settles into a loop the paddle keeps catching
    const PONG_MAX_TICKS: u32 = PONG_TICKS * 10;

    /// Greedy autopilot: the safe direction closest to the food
    fn pilot(state: &SnakeState) -> Option<Direction> {
        let food = state.food?;
        [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ]
        .into_iter()
        .filter(|&dir| {
            let next = state.head().offset(dir);
            next.in_bounds() && !state.snake.contains(&next)
        })
        .min_by_key(|&dir| {
            let next = state.head().offset(dir);
            (next.x - food.x).abs() + (next.y - food.y).abs()
        })
    }

    pub fn snake(store: &dyn KeyValueStore, seed: u64) {
        let mut state = SnakeState::new(seed);
        let mut high = HighScore::load(store, GameKind::Snake);

        let mut steps = 0u32;
        while !state.is_over() && steps < 10_000 {
            if let Some(dir) = pilot(&state) {
                state.steer(dir);
            }
            for event in state.step() {
                if event == SnakeEvent::Ate {
                    log::debug!("Snake ate, score {}", state.score);
                }
            }
            steps += 1;
        }

        log::info!(
            "Snake: {:?} after {} steps, score {}, length {}",
            state.phase,
            steps,
            state.score,
            state.snake.len()
        );
        if high.submit(store, state.score) {
            log::info!("New Snake high score: {}", high.best);
        }
    }

    pub fn pong(store: &dyn KeyValueStore, seed: u64) {
        let mut state = PongState::new(seed);
        let mut high = HighScore::load(store, GameKind::Pong);
        state.handle(Command::Space);

        // Track the ball, then stop moving and let it through
        let mut ticks = 0u32;
        while state.phase == PongPhase::Playing && ticks < PONG_MAX_TICKS {
            let pointer_y = (ticks < PONG_TICKS).then(|| state.ball.pos.y - PADDLE_HEIGHT / 2.0);
            let input = PongInput {
                pointer_y,
                ..Default::default()
            };
            state.tick(&input);
            ticks += 1;
        }

        log::info!(
            "Pong: {:?} after {} ticks, score {}, ball speed {:.3}",
            state.phase,
            ticks,
            state.score,
            state.speed
        );
        if high.submit(store, state.score) {
            log::info!("New Pong high score: {}", high.best);
        }
    }
}
