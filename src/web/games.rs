//! Mounted Snake and Pong views
//!
//! Each view owns its game state, its DOM subtree and its listeners.
//! Dropping a view removes all three, which is how a game is torn down.

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlCanvasElement, MouseEvent};

use galaxy_portfolio::consts::{FOCUS_OUTLINE, GAME_OVER_FLASH_MS, MAX_SUBSTEPS, PONG_DT};
use galaxy_portfolio::platform::{Command, FixedStep, IntervalTimer, KeyValueStore};
use galaxy_portfolio::renderer::scene::SNAKE_CANVAS_PX;
use galaxy_portfolio::renderer::{RenderState, pong_scene, snake_scene};
use galaxy_portfolio::sim::pong::{FIELD_HEIGHT, FIELD_WIDTH};
use galaxy_portfolio::sim::{PongEvent, PongInput, PongPhase, PongState, SnakeEvent, SnakePhase, SnakeState};
use galaxy_portfolio::{GameKind, HighScore};

use super::dom::{self, Listener};
use super::{Action, Queue, push};

/// Text shown around a game canvas
struct Hud<'a> {
    score: u32,
    best: u32,
    pause_label: &'a str,
    game_over: Option<&'a str>,
    instructions: &'a str,
}

/// DOM shared by both games: score line, pause button, canvas, game-over
/// overlay and instructions
struct GameNodes {
    root: Element,
    score: Element,
    pause: Element,
    game_over: Element,
    game_over_text: Element,
    instructions: Element,
    canvas: HtmlCanvasElement,
    listeners: Vec<Listener>,
}

impl GameNodes {
    fn build(
        document: &Document,
        host: &Element,
        game: GameKind,
        (width, height): (u32, u32),
        focused: &Rc<Cell<bool>>,
        queue: &Queue,
    ) -> Result<Self, JsValue> {
        let prefix = game.as_str().to_lowercase();
        let root = dom::element(document, "div", &format!("game-view {prefix}-game-container"))?;
        root.set_attribute("tabindex", "0")?;

        let score = dom::append_text(document, &root, "div", &format!("{prefix}-score"), "")?;
        let pause = dom::append_text(document, &root, "button", &format!("{prefix}-pause-btn"), "")?;

        let canvas: HtmlCanvasElement = dom::element(document, "canvas", &format!("{prefix}-canvas"))?
            .dyn_into()?;
        canvas.set_width(width);
        canvas.set_height(height);
        root.append_child(&canvas)?;

        let game_over = dom::element(document, "div", &format!("{prefix}-gameover"))?;
        let game_over_text = dom::append_text(document, &game_over, "div", "", "Game Over!")?;
        let restart = dom::append_text(document, &game_over, "button", "", "Restart (Space)")?;
        root.append_child(&game_over)?;

        let instructions =
            dom::append_text(document, &root, "div", &format!("{prefix}-instructions"), "")?;
        host.append_child(&root)?;

        let mut listeners = Vec::new();
        // focusin/focusout bubble, so focusing the pause button keeps the game focused
        {
            let focused = focused.clone();
            listeners.push(Listener::new(&root, "focusin", move |_| focused.set(true))?);
        }
        {
            let focused = focused.clone();
            listeners.push(Listener::new(&root, "focusout", move |_| focused.set(false))?);
        }
        {
            let target = root.clone();
            listeners.push(Listener::new(&root, "click", move |_| dom::focus(&target))?);
        }
        {
            let queue = queue.clone();
            listeners.push(Listener::new(&pause, "click", move |_| {
                push(&queue, Action::TogglePause)
            })?);
        }
        {
            let queue = queue.clone();
            listeners.push(Listener::new(&restart, "click", move |_| {
                push(&queue, Action::Restart)
            })?);
        }

        Ok(Self {
            root,
            score,
            pause,
            game_over,
            game_over_text,
            instructions,
            canvas,
            listeners,
        })
    }

    fn sync(&self, hud: &Hud, focused: bool) {
        dom::set_text(
            &self.score,
            &format!("Score: {} | High Score: {}", hud.score, hud.best),
        );
        dom::set_text(&self.pause, hud.pause_label);
        dom::set_hidden(&self.pause, hud.game_over.is_some());

        dom::set_hidden(&self.game_over, hud.game_over.is_none());
        if let Some(text) = hud.game_over {
            dom::set_text(&self.game_over_text, text);
        }

        dom::set_text(&self.instructions, hud.instructions);
        dom::set_hidden(
            &self.instructions,
            hud.instructions.is_empty() || hud.game_over.is_some(),
        );

        dom::set_style(
            &self.root,
            "outline",
            if focused { FOCUS_OUTLINE } else { "none" },
        );
    }
}

impl Drop for GameNodes {
    fn drop(&mut self) {
        self.root.remove();
    }
}

pub struct SnakeView {
    state: SnakeState,
    timer: IntervalTimer,
    high: HighScore,
    flash_ms: f64,
    render: Option<RenderState>,
    nodes: GameNodes,
}

impl SnakeView {
    pub fn mount(
        document: &Document,
        host: &Element,
        store: &dyn KeyValueStore,
        seed: u64,
        focused: &Rc<Cell<bool>>,
        queue: &Queue,
    ) -> Result<Self, JsValue> {
        let px = SNAKE_CANVAS_PX as u32;
        let nodes = GameNodes::build(document, host, GameKind::Snake, (px, px), focused, queue)?;
        Ok(Self {
            state: SnakeState::new(seed),
            timer: IntervalTimer::new(),
            high: HighScore::load(store, GameKind::Snake),
            flash_ms: 0.0,
            render: None,
            nodes,
        })
    }

    pub fn handle(&mut self, command: Command) {
        self.state.handle(command);
    }

    pub fn toggle_pause(&mut self) {
        self.state.toggle_pause();
    }

    pub fn pause(&mut self) {
        if self.state.phase == SnakePhase::Playing {
            self.state.toggle_pause();
        }
    }

    pub fn restart(&mut self) {
        self.state.restart(None);
        self.timer.reset();
        self.flash_ms = 0.0;
        dom::focus(&self.nodes.root);
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    /// Save the round's score if it is a new best
    pub fn submit_score(&mut self, store: &dyn KeyValueStore) -> bool {
        self.high.submit(store, self.state.score)
    }

    pub fn flash(&mut self) {
        self.flash_ms = GAME_OVER_FLASH_MS;
    }

    /// Run as many steps as the elapsed time allows
    pub fn update(&mut self, dt_ms: f64) -> Vec<SnakeEvent> {
        self.flash_ms = (self.flash_ms - dt_ms).max(0.0);

        let mut events = Vec::new();
        if self.state.phase != SnakePhase::Playing {
            self.timer.reset();
            return events;
        }
        self.timer.add(dt_ms);
        // The interval is re-read after every step since eating speeds the snake up
        while self.state.phase == SnakePhase::Playing
            && self.timer.fire(self.state.step_interval_ms() as f64)
        {
            events.extend(self.state.step());
        }
        events
    }

    pub fn draw(&mut self, focused: bool) {
        let flash = (self.flash_ms / GAME_OVER_FLASH_MS) as f32;
        if let Some(render) = &mut self.render {
            render.present(&snake_scene(&self.state, flash));
        }

        let game_over = match self.state.phase {
            SnakePhase::GameOver | SnakePhase::Won => Some(self.state.instructions()),
            _ => None,
        };
        self.nodes.sync(
            &Hud {
                score: self.state.score,
                best: self.high.best,
                pause_label: self.state.pause_label(),
                game_over,
                instructions: self.state.instructions(),
            },
            focused,
        );
        dom::toggle_class(&self.nodes.root, "flash", self.flash_ms > 0.0);
    }
}

pub struct PongView {
    state: PongState,
    fixed: FixedStep,
    input: PongInput,
    high: HighScore,
    glow_layers: u32,
    render: Option<RenderState>,
    nodes: GameNodes,
}

impl PongView {
    pub fn mount(
        document: &Document,
        host: &Element,
        store: &dyn KeyValueStore,
        seed: u64,
        glow_layers: u32,
        focused: &Rc<Cell<bool>>,
        queue: &Queue,
    ) -> Result<Self, JsValue> {
        let size = (FIELD_WIDTH as u32, FIELD_HEIGHT as u32);
        let mut nodes = GameNodes::build(document, host, GameKind::Pong, size, focused, queue)?;

        // Pointer position in field pixels, whatever size CSS gives the canvas
        let canvas = nodes.canvas.clone();
        let queue = queue.clone();
        let listener = Listener::new(&nodes.canvas, "mousemove", move |event| {
            let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let rect = canvas.get_bounding_client_rect();
            if rect.height() <= 0.0 {
                return;
            }
            let y = (mouse.client_y() as f64 - rect.top()) * canvas.height() as f64 / rect.height();
            push(&queue, Action::PointerY(y as f32));
        })?;
        nodes.listeners.push(listener);

        Ok(Self {
            state: PongState::new(seed),
            fixed: FixedStep::new(PONG_DT, MAX_SUBSTEPS),
            input: PongInput::default(),
            high: HighScore::load(store, GameKind::Pong),
            glow_layers,
            render: None,
            nodes,
        })
    }

    /// Space is handled at the next fixed step
    pub fn handle(&mut self, command: Command) {
        if command == Command::Space {
            self.input.toggle_pause = true;
        }
    }

    pub fn toggle_pause(&mut self) {
        self.input.toggle_pause = true;
    }

    pub fn pause(&mut self) {
        self.input.toggle_pause = false;
        if self.state.phase == PongPhase::Playing {
            self.state.toggle_pause();
        }
    }

    pub fn restart(&mut self) {
        self.input.request_restart();
        dom::focus(&self.nodes.root);
    }

    pub fn pointer(&mut self, y: f32) {
        self.input.pointer_y = Some(y);
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn submit_score(&mut self, store: &dyn KeyValueStore) -> bool {
        self.high.submit(store, self.state.score)
    }

    /// Run fixed steps for `dt` seconds of frame time
    pub fn update(&mut self, dt: f32) -> Vec<PongEvent> {
        let steps = self.fixed.advance(dt);
        let mut events = Vec::new();
        for _ in 0..steps {
            events.extend(self.state.tick(&self.input));
            self.input.clear();
        }
        events
    }

    pub fn draw(&mut self, focused: bool) {
        if let Some(render) = &mut self.render {
            render.present(&pong_scene(&self.state, self.glow_layers));
        }

        let game_over = (self.state.phase == PongPhase::GameOver).then_some("Game Over!");
        self.nodes.sync(
            &Hud {
                score: self.state.score,
                best: self.high.best,
                pause_label: self.state.pause_label(),
                game_over,
                instructions: self.state.instructions(),
            },
            focused,
        );
    }
}

/// The game currently mounted in the Games section
pub enum ActiveGame {
    Snake(SnakeView),
    Pong(PongView),
}

impl ActiveGame {
    pub fn kind(&self) -> GameKind {
        match self {
            ActiveGame::Snake(_) => GameKind::Snake,
            ActiveGame::Pong(_) => GameKind::Pong,
        }
    }

    pub fn canvas(&self) -> HtmlCanvasElement {
        match self {
            ActiveGame::Snake(view) => view.nodes.canvas.clone(),
            ActiveGame::Pong(view) => view.nodes.canvas.clone(),
        }
    }

    pub fn attach(&mut self, render: RenderState) {
        match self {
            ActiveGame::Snake(view) => view.render = Some(render),
            ActiveGame::Pong(view) => view.render = Some(render),
        }
    }

    pub fn toggle_pause(&mut self) {
        match self {
            ActiveGame::Snake(view) => view.toggle_pause(),
            ActiveGame::Pong(view) => view.toggle_pause(),
        }
    }

    pub fn pause(&mut self) {
        match self {
            ActiveGame::Snake(view) => view.pause(),
            ActiveGame::Pong(view) => view.pause(),
        }
    }

    pub fn restart(&mut self) {
        match self {
            ActiveGame::Snake(view) => view.restart(),
            ActiveGame::Pong(view) => view.restart(),
        }
    }

    pub fn draw(&mut self, focused: bool) {
        match self {
            ActiveGame::Snake(view) => view.draw(focused),
            ActiveGame::Pong(view) => view.draw(focused),
        }
    }
}
