//! Browser front end
//!
//! DOM handlers never touch site state directly. They push an [`Action`]
//! onto a shared queue and the animation frame drains it, so a handler can
//! never observe a half-applied update or drop a listener that is running.

mod dom;
mod games;
mod gpu;
mod menu;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, VisibilityState, Window};

use galaxy_portfolio::audio::{AudioManager, SoundEffect};
use galaxy_portfolio::consts::PONG_DT;
use galaxy_portfolio::platform::{Command, FrameClock, KeyValueStore, LocalStore, MemoryStore};
use galaxy_portfolio::renderer::vertex::colors;
use galaxy_portfolio::renderer::{RenderState, starfield_scene};
use galaxy_portfolio::sim::{PongEvent, ShootingStars, SnakeEvent, Starfield};
use galaxy_portfolio::ui::{GalaxyMenu, GameSelector, Section};
use galaxy_portfolio::{GameKind, Settings};

use dom::Listener;
use games::{ActiveGame, PongView, SnakeView};
use menu::{GamePanel, MenuView};

pub type Queue = Rc<RefCell<Vec<Action>>>;

pub fn push(queue: &Queue, action: Action) {
    queue.borrow_mut().push(action);
}

/// Canvas a renderer was built for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Sky,
    Game,
}

/// Everything the page can ask the site to do
pub enum Action {
    OpenSection(Section),
    MenuKey(Section, Command),
    CloseModal,
    Hover(Option<Section>),
    Focus(Option<Section>),
    SelectGame(GameKind),
    BackToPicker,
    Key(Command),
    PointerY(f32),
    TogglePause,
    Restart,
    Visibility(bool),
    WindowBlur,
    Resize,
    RendererReady {
        target: Target,
        generation: u32,
        render: RenderState,
    },
}

impl Action {
    /// Clicks and key presses count as user activation for Web Audio
    fn is_gesture(&self) -> bool {
        matches!(
            self,
            Action::OpenSection(_)
                | Action::MenuKey(..)
                | Action::SelectGame(_)
                | Action::Key(_)
                | Action::TogglePause
                | Action::Restart
        )
    }
}

struct Sky {
    canvas: HtmlCanvasElement,
    field: Starfield,
    shooting: ShootingStars,
    render: Option<RenderState>,
}

struct Site {
    window: Window,
    document: Document,
    queue: Queue,
    store: Box<dyn KeyValueStore>,
    settings: Settings,
    audio: AudioManager,
    rng: Pcg32,
    clock: FrameClock,
    instance: Rc<wgpu::Instance>,
    sky: Sky,
    menu: GalaxyMenu,
    menu_view: MenuView,
    selector: GameSelector,
    panel: Option<GamePanel>,
    game: Option<ActiveGame>,
    game_focused: Rc<Cell<bool>>,
    /// Bumped on every game teardown so late renderers are discarded
    generation: u32,
}

pub fn run() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

    log::info!("Galaxy portfolio starting...");

    match boot() {
        Ok(site) => {
            start_loop(site);
            log::info!("Galaxy portfolio running!");
        }
        Err(e) => log::error!("Boot failed: {:?}", e),
    }
}

fn boot() -> Result<Site, JsValue> {
    let window = web_sys::window().expect("no window");
    let document = window.document().expect("no document");

    let store: Box<dyn KeyValueStore> = match LocalStore::open() {
        Ok(store) => Box::new(store),
        Err(e) => {
            log::warn!("Local storage unavailable ({}), nothing will persist", e);
            Box::new(MemoryStore::new())
        }
    };
    let mut settings = Settings::load(store.as_ref());
    if matches!(store.get(Settings::STORAGE_KEY), Ok(None)) {
        settings.reduced_motion = prefers_reduced_motion(&window);
    }
    log::info!(
        "Settings: quality {}, volume {:.2}, reduced motion {}",
        settings.quality.as_str(),
        settings.effective_volume(),
        settings.reduced_motion
    );

    let seed = js_sys::Date::now() as u64;
    let mut rng = Pcg32::seed_from_u64(seed);
    log::info!("Seed: {}", seed);

    let queue: Queue = Rc::new(RefCell::new(Vec::new()));

    let canvas: HtmlCanvasElement = dom::by_id(&document, "starfield").dyn_into()?;
    let (width, height, dpr) = viewport(&window);
    canvas.set_width((width * dpr) as u32);
    canvas.set_height((height * dpr) as u32);
    let mut shooting = ShootingStars::new();
    shooting.set_enabled(settings.shooting_stars());
    shooting.set_visible(document.visibility_state() == VisibilityState::Visible);
    let sky = Sky {
        field: Starfield::new(&mut rng, settings.quality.star_count(), width, height),
        canvas,
        shooting,
        render: None,
    };

    let menu_view = MenuView::build(&document, &mut rng, &queue)?;
    let game_focused = Rc::new(Cell::new(false));
    install_page_listeners(&window, &document, &queue, &game_focused)?;

    let site = Site {
        audio: AudioManager::new(settings.effective_volume()),
        window,
        document,
        queue,
        store,
        settings,
        rng,
        clock: FrameClock::new(),
        instance: gpu::instance(),
        sky,
        menu: GalaxyMenu::new(),
        menu_view,
        selector: GameSelector::new(),
        panel: None,
        game: None,
        game_focused,
        generation: 0,
    };
    site.spawn_renderer(Target::Sky, site.sky.canvas.clone(), "starfield");
    Ok(site)
}

/// Window and document level handlers that live as long as the page
fn install_page_listeners(
    window: &Window,
    document: &Document,
    queue: &Queue,
    game_focused: &Rc<Cell<bool>>,
) -> Result<(), JsValue> {
    {
        let queue = queue.clone();
        let focused = game_focused.clone();
        Listener::new(window, "keydown", move |event| {
            let Some(command) = event
                .dyn_ref::<KeyboardEvent>()
                .and_then(|key| Command::from_key(&key.key()))
            else {
                return;
            };
            // A focused button already turns Space and Enter into a click
            if command.activates() && target_is_button(&event) {
                return;
            }
            if focused.get() && (command.scrolls_page() || command == Command::Space) {
                event.prevent_default();
            }
            push(&queue, Action::Key(command));
        })?
        .forget();
    }
    {
        let queue = queue.clone();
        Listener::new(window, "resize", move |_| push(&queue, Action::Resize))?.forget();
    }
    {
        let queue = queue.clone();
        Listener::new(window, "blur", move |_| push(&queue, Action::WindowBlur))?.forget();
    }
    {
        let queue = queue.clone();
        let doc = document.clone();
        Listener::new(document, "visibilitychange", move |_| {
            let visible = doc.visibility_state() == VisibilityState::Visible;
            push(&queue, Action::Visibility(visible));
        })?
        .forget();
    }
    Ok(())
}

fn target_is_button(event: &web_sys::Event) -> bool {
    event
        .target()
        .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
        .is_some_and(|el| el.tag_name() == "BUTTON")
}

fn prefers_reduced_motion(window: &Window) -> bool {
    window
        .match_media("(prefers-reduced-motion: reduce)")
        .ok()
        .flatten()
        .is_some_and(|query| query.matches())
}

/// CSS viewport size and device pixel ratio
fn viewport(window: &Window) -> (f32, f32, f32) {
    let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(1024.0);
    let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(768.0);
    (width as f32, height as f32, window.device_pixel_ratio() as f32)
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn start_loop(mut site: Site) {
    let window = site.window.clone();
    let frame: FrameCallback = Rc::new(RefCell::new(None));
    let next = frame.clone();
    *frame.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |time: f64| {
        site.frame(time);
        if let Some(callback) = next.borrow().as_ref() {
            let _ = site
                .window
                .request_animation_frame(callback.as_ref().unchecked_ref());
        }
    }));
    if let Some(callback) = frame.borrow().as_ref() {
        let _ = window.request_animation_frame(callback.as_ref().unchecked_ref());
    }
}

impl Site {
    fn frame(&mut self, time: f64) {
        let actions = std::mem::take(&mut *self.queue.borrow_mut());
        for action in actions {
            if let Err(e) = self.apply(action) {
                log::error!("UI update failed: {:?}", e);
            }
        }

        let dt = self.clock.tick(time, PONG_DT);
        self.update(dt);
        self.draw();
    }

    fn apply(&mut self, action: Action) -> Result<(), JsValue> {
        if action.is_gesture() {
            self.audio.resume();
        }
        match action {
            Action::OpenSection(section) => {
                let previous = self.menu.click(section);
                if previous != Some(section) {
                    self.show_section(section)?;
                }
                self.menu_view.sync(&self.menu);
            }
            Action::MenuKey(section, command) => {
                let previous = self.menu.open;
                if self.menu.key(section, command) && previous != Some(section) {
                    self.show_section(section)?;
                }
                self.menu_view.sync(&self.menu);
            }
            Action::CloseModal => {
                if let Some(section) = self.menu.close() {
                    self.teardown_game();
                    self.selector.back();
                    self.panel = None;
                    self.menu_view.clear();
                    log::info!("Closed {}", section.label());
                }
                self.menu_view.sync(&self.menu);
            }
            Action::Hover(section) => {
                self.menu.hover(section);
                self.menu_view.sync(&self.menu);
            }
            Action::Focus(section) => {
                self.menu.focus(section);
                self.menu_view.sync(&self.menu);
            }
            Action::SelectGame(game) => self.select_game(game)?,
            Action::BackToPicker => {
                if self.selector.back().is_some() {
                    self.teardown_game();
                }
                if let Some(panel) = &self.panel {
                    panel.sync(&self.selector);
                }
            }
            Action::Key(command) => self.key(command)?,
            Action::PointerY(y) => {
                if let Some(ActiveGame::Pong(view)) = &mut self.game {
                    view.pointer(y);
                }
            }
            Action::TogglePause => {
                if let Some(game) = &mut self.game {
                    game.toggle_pause();
                }
            }
            Action::Restart => {
                if let Some(game) = &mut self.game {
                    game.restart();
                }
            }
            Action::Visibility(visible) => {
                self.sky.shooting.set_visible(visible);
                if !visible {
                    self.auto_pause("tab hidden");
                }
            }
            Action::WindowBlur => self.auto_pause("window blur"),
            Action::Resize => self.resize_sky(),
            Action::RendererReady {
                target,
                generation,
                render,
            } => self.attach_renderer(target, generation, render),
        }
        Ok(())
    }

    fn show_section(&mut self, section: Section) -> Result<(), JsValue> {
        self.teardown_game();
        self.selector.back();
        self.panel = None;
        self.panel = self.menu_view.show(&self.document, section, &self.queue)?;
        log::info!("Opened {}", section.label());
        Ok(())
    }

    fn select_game(&mut self, game: GameKind) -> Result<(), JsValue> {
        if self.panel.is_none() || self.selector.is_selected(game) {
            return Ok(());
        }
        if self.selector.select(game).is_some() {
            self.teardown_game();
        }
        let Some(panel) = &self.panel else {
            return Ok(());
        };

        let seed = self.rng.random::<u64>();
        let store = self.store.as_ref();
        let view = match game {
            GameKind::Snake => ActiveGame::Snake(SnakeView::mount(
                &self.document,
                &panel.host,
                store,
                seed,
                &self.game_focused,
                &self.queue,
            )?),
            GameKind::Pong => ActiveGame::Pong(PongView::mount(
                &self.document,
                &panel.host,
                store,
                seed,
                self.settings.quality.glow_layers(),
                &self.game_focused,
                &self.queue,
            )?),
        };
        panel.sync(&self.selector);

        self.spawn_renderer(Target::Game, view.canvas(), "game");
        self.game = Some(view);
        log::info!("{} mounted", game.as_str());
        Ok(())
    }

    fn teardown_game(&mut self) {
        if let Some(game) = self.game.take() {
            self.generation = self.generation.wrapping_add(1);
            self.game_focused.set(false);
            log::info!("{} unmounted", game.kind().as_str());
        }
    }

    fn key(&mut self, command: Command) -> Result<(), JsValue> {
        match command {
            Command::ToggleMute => self.toggle_mute(),
            Command::Escape => self.apply(Action::CloseModal)?,
            _ => match &mut self.game {
                // Snake only listens while it has focus; Pong takes Space anywhere
                Some(ActiveGame::Snake(view)) if self.game_focused.get() => view.handle(command),
                Some(ActiveGame::Pong(view)) => view.handle(command),
                _ => {}
            },
        }
        Ok(())
    }

    fn toggle_mute(&mut self) {
        let muted = self.settings.toggle_mute();
        self.audio.set_volume(self.settings.effective_volume());
        if let Err(e) = self.settings.save(self.store.as_ref()) {
            log::warn!("Could not save settings: {}", e);
        }
        log::info!("Sound {}", if muted { "muted" } else { "on" });
    }

    fn auto_pause(&mut self, reason: &str) {
        if !self.settings.pause_on_blur {
            return;
        }
        if let Some(game) = &mut self.game {
            game.pause();
            log::info!("Auto-paused ({})", reason);
        }
    }

    fn resize_sky(&mut self) {
        let (width, height, dpr) = viewport(&self.window);
        self.sky.field.resize(width, height);
        let (px_w, px_h) = ((width * dpr) as u32, (height * dpr) as u32);
        self.sky.canvas.set_width(px_w);
        self.sky.canvas.set_height(px_h);
        if let Some(render) = &mut self.sky.render {
            render.resize(px_w, px_h);
        }
    }

    fn spawn_renderer(&self, target: Target, canvas: HtmlCanvasElement, label: &'static str) {
        let instance = self.instance.clone();
        let queue = self.queue.clone();
        let generation = self.generation;
        wasm_bindgen_futures::spawn_local(async move {
            match gpu::create_renderer(instance, canvas, label, colors::GAME_BG).await {
                Ok(render) => push(
                    &queue,
                    Action::RendererReady {
                        target,
                        generation,
                        render,
                    },
                ),
                Err(e) => log::error!("{} renderer unavailable: {}", label, e),
            }
        });
    }

    fn attach_renderer(&mut self, target: Target, generation: u32, mut render: RenderState) {
        match target {
            Target::Sky => {
                // The window may have been resized while the device was opening
                render.resize(self.sky.canvas.width(), self.sky.canvas.height());
                self.sky.render = Some(render);
            }
            Target::Game if generation == self.generation => {
                if let Some(game) = &mut self.game {
                    game.attach(render);
                }
            }
            Target::Game => log::debug!("Dropping renderer for an unmounted game"),
        }
    }

    fn update(&mut self, dt: f32) {
        let dt_ms = dt as f64 * 1000.0;
        let size = self.sky.field.size;
        self.sky.shooting.advance(&mut self.rng, dt_ms, size.x, size.y);

        match &mut self.game {
            Some(ActiveGame::Snake(view)) => {
                for event in view.update(dt_ms) {
                    match event {
                        SnakeEvent::Ate => self.audio.play(SoundEffect::SnakeEat),
                        SnakeEvent::Died => {
                            self.audio.play(SoundEffect::SnakeGameOver);
                            if self.settings.game_over_flash() {
                                view.flash();
                            }
                        }
                        SnakeEvent::Won => log::info!("Snake filled the board"),
                    }
                    if matches!(event, SnakeEvent::Died | SnakeEvent::Won) {
                        log::info!("Snake over, score {}", view.score());
                        if view.submit_score(self.store.as_ref()) {
                            self.audio.play(SoundEffect::NewHighScore);
                        }
                    }
                }
            }
            Some(ActiveGame::Pong(view)) => {
                for event in view.update(dt) {
                    match event {
                        PongEvent::PaddleHit => self.audio.play(SoundEffect::PongPaddleHit),
                        PongEvent::WallBounce => self.audio.play(SoundEffect::PongWallBounce),
                        PongEvent::Missed => {
                            self.audio.play(SoundEffect::PongGameOver);
                            log::info!("Pong over, score {}", view.score());
                            if view.submit_score(self.store.as_ref()) {
                                self.audio.play(SoundEffect::NewHighScore);
                            }
                        }
                    }
                }
            }
            None => {}
        }
    }

    fn draw(&mut self) {
        if let Some(render) = &mut self.sky.render {
            render.present(&starfield_scene(&self.sky.field, &self.sky.shooting));
        }
        let focused = self.game_focused.get();
        if let Some(game) = &mut self.game {
            game.draw(focused);
        }
    }
}
