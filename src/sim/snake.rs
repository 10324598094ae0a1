//! Snake on a 15x15 board
//!
//! The snake advances one cell per step. The step interval shrinks as the
//! score grows; the caller owns the timer and asks `step_interval_ms`.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::platform::Command;

/// Board width and height in cells
pub const BOARD_SIZE: i32 = 15;
/// Cells on the board
pub const BOARD_CELLS: usize = (BOARD_SIZE * BOARD_SIZE) as usize;
/// Step interval at score 0 (ms)
pub const BASE_STEP_MS: u32 = 120;
/// Interval reduction per point (ms)
pub const SPEED_STEP_MS: u32 = 3;
/// Fastest step interval (ms)
pub const MIN_STEP_MS: u32 = 40;

/// Starting head position
pub const START: Cell = Cell { x: 7, y: 7 };

/// A board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn in_bounds(self) -> bool {
        (0..BOARD_SIZE).contains(&self.x) && (0..BOARD_SIZE).contains(&self.y)
    }
}

/// Movement direction (screen coordinates, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn from_command(command: Command) -> Option<Self> {
        match command {
            Command::Up => Some(Direction::Up),
            Command::Down => Some(Direction::Down),
            Command::Left => Some(Direction::Left),
            Command::Right => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Current phase of a Snake round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnakePhase {
    /// Waiting for an arrow key (also the state after a restart)
    Paused,
    Playing,
    /// Hit a wall or itself
    GameOver,
    /// Filled the whole board
    Won,
}

/// Something the UI should react to (sound, flash, high score)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnakeEvent {
    Ate,
    Died,
    Won,
}

/// What occupies a cell, for drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Empty,
    Head,
    Body,
    Food,
}

/// Complete Snake game state
#[derive(Debug, Clone)]
pub struct SnakeState {
    /// Segments, head first
    pub snake: VecDeque<Cell>,
    pub direction: Direction,
    /// `None` only once the board is full
    pub food: Option<Cell>,
    pub score: u32,
    pub phase: SnakePhase,
    rng: Pcg32,
}

impl SnakeState {
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let snake = VecDeque::from([START]);
        let food = place_food(&mut rng, &snake);
        Self {
            snake,
            direction: Direction::Up,
            food,
            score: 0,
            phase: SnakePhase::Paused,
            rng,
        }
    }

    pub fn head(&self) -> Cell {
        self.snake[0]
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, SnakePhase::GameOver | SnakePhase::Won)
    }

    /// Current step interval in milliseconds
    pub fn step_interval_ms(&self) -> u32 {
        step_interval_ms(self.score)
    }

    /// Change direction. Turning back onto the neck is refused.
    /// Any accepted arrow starts (or resumes) the game.
    pub fn steer(&mut self, dir: Direction) -> bool {
        if self.is_over() {
            return false;
        }
        if self.snake.len() > 1 && self.head().offset(dir) == self.snake[1] {
            return false;
        }
        self.direction = dir;
        self.phase = SnakePhase::Playing;
        true
    }

    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            SnakePhase::Playing => SnakePhase::Paused,
            SnakePhase::Paused => SnakePhase::Playing,
            other => other,
        };
    }

    /// Reset to a fresh, paused round. With a seed the round replays like
    /// `new(seed)`; without one the RNG stream continues.
    pub fn restart(&mut self, seed: Option<u64>) {
        if let Some(seed) = seed {
            self.rng = Pcg32::seed_from_u64(seed);
        }
        self.snake = VecDeque::from([START]);
        self.direction = Direction::Up;
        self.food = place_food(&mut self.rng, &self.snake);
        self.score = 0;
        self.phase = SnakePhase::Paused;
    }

    /// Apply a keyboard command
    pub fn handle(&mut self, command: Command) {
        if self.is_over() {
            if command == Command::Space {
                self.restart(None);
            }
            return;
        }
        if command == Command::Space {
            self.toggle_pause();
        } else if let Some(dir) = Direction::from_command(command) {
            self.steer(dir);
        }
    }

    /// Advance one cell
    pub fn step(&mut self) -> Vec<SnakeEvent> {
        let mut events = Vec::new();
        if self.phase != SnakePhase::Playing {
            return events;
        }

        let new_head = self.head().offset(self.direction);
        if !new_head.in_bounds() || self.snake.contains(&new_head) {
            self.phase = SnakePhase::GameOver;
            events.push(SnakeEvent::Died);
            return events;
        }

        self.snake.push_front(new_head);
        if self.food == Some(new_head) {
            self.score += 1;
            events.push(SnakeEvent::Ate);
            self.food = place_food(&mut self.rng, &self.snake);
            if self.food.is_none() {
                self.phase = SnakePhase::Won;
                events.push(SnakeEvent::Won);
            }
        } else {
            self.snake.pop_back();
        }
        events
    }

    /// Classify a board cell
    pub fn cell_kind(&self, cell: Cell) -> CellKind {
        if self.head() == cell {
            CellKind::Head
        } else if self.snake.iter().skip(1).any(|&seg| seg == cell) {
            CellKind::Body
        } else if self.food == Some(cell) {
            CellKind::Food
        } else {
            CellKind::Empty
        }
    }

    /// Every board cell with its contents, row by row
    pub fn cells(&self) -> impl Iterator<Item = (Cell, CellKind)> + '_ {
        (0..BOARD_SIZE)
            .flat_map(|y| (0..BOARD_SIZE).map(move |x| Cell::new(x, y)))
            .map(|cell| (cell, self.cell_kind(cell)))
    }

    /// Player-facing hint under the board
    pub fn instructions(&self) -> &'static str {
        match self.phase {
            SnakePhase::Paused => "Click here and press any arrow key to start",
            SnakePhase::Playing => "Use arrow keys to play. Press Space to pause.",
            SnakePhase::GameOver => "Game Over!",
            SnakePhase::Won => "You filled the board!",
        }
    }

    /// Label for the pause button
    pub fn pause_label(&self) -> &'static str {
        if self.phase == SnakePhase::Paused {
            "Resume"
        } else {
            "Pause"
        }
    }
}

/// Step interval for a given score
pub fn step_interval_ms(score: u32) -> u32 {
    BASE_STEP_MS
        .saturating_sub(score.saturating_mul(SPEED_STEP_MS))
        .max(MIN_STEP_MS)
}

/// Pick a random free cell by rejection sampling.
/// Returns `None` when the snake covers the whole board.
pub fn place_food<R: Rng>(rng: &mut R, snake: &VecDeque<Cell>) -> Option<Cell> {
    if snake.len() >= BOARD_CELLS {
        return None;
    }
    loop {
        let cell = Cell::new(
            rng.random_range(0..BOARD_SIZE),
            rng.random_range(0..BOARD_SIZE),
        );
        if !snake.contains(&cell) {
            return Some(cell);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Build a playing state with a given body and food
    fn scripted(body: &[(i32, i32)], direction: Direction, food: Option<(i32, i32)>) -> SnakeState {
        let mut state = SnakeState::new(7);
        state.snake = body.iter().map(|&(x, y)| Cell::new(x, y)).collect();
        state.direction = direction;
        state.food = food.map(|(x, y)| Cell::new(x, y));
        state.phase = SnakePhase::Playing;
        state
    }

    #[test]
    fn test_new_starts_paused() {
        let state = SnakeState::new(1);
        assert_eq!(state.phase, SnakePhase::Paused);
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.head(), START);
        assert_eq!(state.direction, Direction::Up);
        let food = state.food.unwrap();
        assert!(food.in_bounds());
        assert_ne!(food, START);
    }

    #[test]
    fn test_step_ignored_while_paused() {
        let mut state = SnakeState::new(1);
        assert!(state.step().is_empty());
        assert_eq!(state.head(), START);
    }

    #[test]
    fn test_arrow_starts_game() {
        let mut state = SnakeState::new(1);
        state.handle(Command::Left);
        assert_eq!(state.phase, SnakePhase::Playing);
        assert_eq!(state.direction, Direction::Left);
    }

    #[test]
    fn test_move_without_food() {
        let mut state = scripted(&[(7, 7), (7, 8)], Direction::Up, Some((0, 0)));
        assert!(state.step().is_empty());
        assert_eq!(
            state.snake.iter().copied().collect::<Vec<_>>(),
            vec![Cell::new(7, 6), Cell::new(7, 7)]
        );
    }

    #[test]
    fn test_eat_grows_and_scores() {
        let mut state = scripted(&[(7, 7)], Direction::Right, Some((8, 7)));
        let events = state.step();
        assert_eq!(events, vec![SnakeEvent::Ate]);
        assert_eq!(state.score, 1);
        assert_eq!(state.snake.len(), 2);
        let food = state.food.unwrap();
        assert!(!state.snake.contains(&food));
    }

    #[test]
    fn test_wall_collision_ends_game() {
        let mut state = scripted(&[(0, 3)], Direction::Left, Some((5, 5)));
        assert_eq!(state.step(), vec![SnakeEvent::Died]);
        assert_eq!(state.phase, SnakePhase::GameOver);
        // Snake is left where it was
        assert_eq!(state.head(), Cell::new(0, 3));
        // Further steps do nothing
        assert!(state.step().is_empty());
    }

    #[test]
    fn test_self_collision_includes_tail() {
        // Square loop: moving up from (1,1) lands on the tail at (1,0)
        let mut state = scripted(
            &[(1, 1), (0, 1), (0, 0), (1, 0)],
            Direction::Up,
            Some((9, 9)),
        );
        assert_eq!(state.step(), vec![SnakeEvent::Died]);
    }

    #[test]
    fn test_reverse_onto_neck_is_refused() {
        let mut state = scripted(&[(7, 7), (7, 8)], Direction::Up, Some((0, 0)));
        assert!(!state.steer(Direction::Down));
        assert_eq!(state.direction, Direction::Up);
        assert!(state.steer(Direction::Left));
    }

    #[test]
    fn test_single_segment_may_reverse() {
        let mut state = scripted(&[(7, 7)], Direction::Up, Some((0, 0)));
        assert!(state.steer(Direction::Down));
    }

    #[test]
    fn test_space_pauses_and_restarts() {
        let mut state = scripted(&[(7, 7)], Direction::Up, Some((0, 0)));
        state.handle(Command::Space);
        assert_eq!(state.phase, SnakePhase::Paused);
        assert_eq!(state.pause_label(), "Resume");
        state.handle(Command::Space);
        assert_eq!(state.phase, SnakePhase::Playing);
        assert_eq!(state.pause_label(), "Pause");

        state.phase = SnakePhase::GameOver;
        state.score = 4;
        state.handle(Command::Up);
        assert_eq!(state.phase, SnakePhase::GameOver);
        state.handle(Command::Space);
        assert_eq!(state.phase, SnakePhase::Paused);
        assert_eq!(state.score, 0);
        assert_eq!(state.snake.len(), 1);
    }

    #[test]
    fn test_restart_with_seed_replays_new() {
        let fresh = SnakeState::new(42);
        let mut state = SnakeState::new(7);
        state.steer(Direction::Left);
        state.step();
        state.restart(Some(42));
        assert_eq!(state.food, fresh.food);
        assert_eq!(state.snake, fresh.snake);
        assert_eq!(state.phase, SnakePhase::Paused);

        // Unseeded restarts keep drawing from the same stream
        let mut a = SnakeState::new(42);
        let mut b = SnakeState::new(42);
        a.restart(None);
        b.restart(None);
        assert_eq!(a.food, b.food);
    }

    #[test]
    fn test_step_interval_scaling() {
        assert_eq!(step_interval_ms(0), 120);
        assert_eq!(step_interval_ms(10), 90);
        assert_eq!(step_interval_ms(26), 42);
        assert_eq!(step_interval_ms(27), 40);
        assert_eq!(step_interval_ms(1000), 40);
    }

    #[test]
    fn test_filling_board_wins() {
        // Snake covers every cell but (14, 14), heading right into it
        let mut body: Vec<(i32, i32)> = Vec::new();
        body.push((13, 14));
        for x in (0..13).rev() {
            body.push((x, 14));
        }
        for y in (0..14).rev() {
            let row: Vec<i32> = if y % 2 == 1 {
                (0..BOARD_SIZE).collect()
            } else {
                (0..BOARD_SIZE).rev().collect()
            };
            body.extend(row.into_iter().map(|x| (x, y)));
        }
        assert_eq!(body.len(), BOARD_CELLS - 1);

        let mut state = scripted(&body, Direction::Right, Some((14, 14)));
        let events = state.step();
        assert_eq!(events, vec![SnakeEvent::Ate, SnakeEvent::Won]);
        assert_eq!(state.phase, SnakePhase::Won);
        assert_eq!(state.food, None);
    }

    #[test]
    fn test_cells_classification() {
        let state = scripted(&[(2, 2), (2, 3)], Direction::Up, Some((5, 5)));
        assert_eq!(state.cell_kind(Cell::new(2, 2)), CellKind::Head);
        assert_eq!(state.cell_kind(Cell::new(2, 3)), CellKind::Body);
        assert_eq!(state.cell_kind(Cell::new(5, 5)), CellKind::Food);
        assert_eq!(state.cell_kind(Cell::new(0, 0)), CellKind::Empty);
        assert_eq!(state.cells().count(), BOARD_CELLS);
    }

    proptest! {
        #[test]
        fn prop_food_never_on_snake(seed in any::<u64>(), len in 1usize..200) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let snake: VecDeque<Cell> = (0..len)
                .map(|i| Cell::new(i as i32 % BOARD_SIZE, i as i32 / BOARD_SIZE))
                .collect();
            let food = place_food(&mut rng, &snake).unwrap();
            prop_assert!(food.in_bounds());
            prop_assert!(!snake.contains(&food));
        }

        #[test]
        fn prop_score_tracks_length(seed in any::<u64>(), turns in proptest::collection::vec(0u8..4, 1..80)) {
            let mut state = SnakeState::new(seed);
            for turn in turns {
                let dir = match turn {
                    0 => Direction::Up,
                    1 => Direction::Down,
                    2 => Direction::Left,
                    _ => Direction::Right,
                };
                state.steer(dir);
                state.step();
                prop_assert_eq!(state.score as usize, state.snake.len() - 1);
                prop_assert!(state.snake.len() <= BOARD_CELLS);
                let segments: Vec<Cell> = state.snake.iter().copied().collect();
                for pair in segments.windows(2) {
                    let gap = (pair[0].x - pair[1].x).abs() + (pair[0].y - pair[1].y).abs();
                    prop_assert_eq!(gap, 1);
                }
                if let Some(food) = state.food {
                    prop_assert!(!state.snake.contains(&food));
                }
                if state.is_over() {
                    break;
                }
            }
        }
    }
}
