//! Galaxy menu, section modal and game picker

use rand::Rng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, KeyboardEvent};

use galaxy_portfolio::GameKind;
use galaxy_portfolio::platform::Command;
use galaxy_portfolio::sim::StarCluster;
use galaxy_portfolio::ui::content::{FOOTER, SectionContent};
use galaxy_portfolio::ui::{GalaxyMenu, GameSelector, Section};

use super::dom::{self, Listener};
use super::{Action, Queue, push};

struct StarNodes {
    section: Section,
    root: Element,
    line: Element,
    label: Element,
}

/// DOM for the four menu stars and the shared modal
pub struct MenuView {
    stars: Vec<StarNodes>,
    modal: Element,
    content: Element,
    _listeners: Vec<Listener>,
}

impl MenuView {
    /// Populate `#galaxy-menu` and hook up `#modal`
    pub fn build<R: Rng>(document: &Document, rng: &mut R, queue: &Queue) -> Result<Self, JsValue> {
        let nav = dom::by_id(document, "galaxy-menu");
        let mut stars = Vec::with_capacity(Section::ALL.len());
        let mut listeners = Vec::new();

        for section in Section::ALL {
            let root = dom::element(document, "div", "galaxy-star")?;
            let (left, top) = section.position();
            dom::set_style(&root, "left", &format!("{left}%"));
            dom::set_style(&root, "top", &format!("{top}%"));
            root.set_attribute("tabindex", "0")?;
            root.set_attribute("role", "button")?;
            root.set_attribute("aria-label", section.tooltip())?;
            root.set_attribute("aria-pressed", "false")?;

            let cluster = dom::element(document, "div", "galaxy-cluster")?;
            let dots = StarCluster::new(rng, StarCluster::DEFAULT_COUNT, StarCluster::DEFAULT_RADIUS);
            for dot in dots.dots {
                let el = dom::element(document, "span", "galaxy-cluster-dot")?;
                dom::set_style(&el, "left", &format!("{:.1}%", dot.x));
                dom::set_style(&el, "top", &format!("{:.1}%", dot.y));
                cluster.append_child(&el)?;
            }
            root.append_child(&cluster)?;
            root.append_child(&dom::element(document, "div", "galaxy-ring")?)?;
            let line = dom::element(document, "div", "galaxy-line")?;
            root.append_child(&line)?;
            let label = dom::append_text(document, &root, "span", "galaxy-label", section.label())?;
            nav.append_child(&root)?;

            listeners.extend(star_listeners(&root, section, queue)?);
            stars.push(StarNodes {
                section,
                root,
                line,
                label,
            });
        }

        let modal = dom::by_id(document, "modal");
        let content = dom::by_id(document, "modal-content");
        let close = dom::by_id(document, "modal-close");
        {
            // Clicks inside the panel bubble up to the backdrop; ignore those
            let queue = queue.clone();
            listeners.push(Listener::new(&modal, "click", move |event| {
                if dom::is_self_target(&event) {
                    push(&queue, Action::CloseModal);
                }
            })?);
        }
        {
            let queue = queue.clone();
            listeners.push(Listener::new(&close, "click", move |_| {
                push(&queue, Action::CloseModal)
            })?);
        }

        dom::set_text(&dom::by_id(document, "footer"), FOOTER);

        Ok(Self {
            stars,
            modal,
            content,
            _listeners: listeners,
        })
    }

    /// Reflect hover, focus and the open section
    pub fn sync(&self, menu: &GalaxyMenu) {
        for star in &self.stars {
            let pressed = menu.is_pressed(star.section);
            dom::toggle_class(&star.root, "active", pressed);
            let _ = star
                .root
                .set_attribute("aria-pressed", if pressed { "true" } else { "false" });

            let visible = menu.label_visible(star.section);
            dom::toggle_class(&star.line, "visible", visible);
            dom::toggle_class(&star.label, "visible", visible);
        }
        dom::set_hidden(&self.modal, menu.open.is_none());
    }

    /// Fill the modal with a section's copy. The Games section also gets
    /// a game picker, returned so the caller can mount games into it.
    pub fn show(
        &self,
        document: &Document,
        section: Section,
        queue: &Queue,
    ) -> Result<Option<GamePanel>, JsValue> {
        self.clear();
        let copy = SectionContent::for_section(section);
        dom::append_text(document, &self.content, "h2", "", copy.title)?;
        for paragraph in copy.paragraphs {
            dom::append_text(document, &self.content, "p", "", paragraph)?;
        }
        if !copy.links.is_empty() {
            let p = dom::element(document, "p", "section-links")?;
            for link in copy.links {
                let a = dom::append_text(document, &p, "a", "", link.text)?;
                a.set_attribute("href", link.href)?;
            }
            self.content.append_child(&p)?;
        }

        if copy.hosts_games {
            GamePanel::build(document, &self.content, queue).map(Some)
        } else {
            Ok(None)
        }
    }

    pub fn clear(&self) {
        self.content.set_inner_html("");
    }
}

fn star_listeners(root: &Element, section: Section, queue: &Queue) -> Result<Vec<Listener>, JsValue> {
    let on = |event: &'static str, action: fn(Section) -> Action| {
        let queue = queue.clone();
        Listener::new(root, event, move |_| push(&queue, action(section)))
    };
    let mut listeners = vec![
        on("mouseenter", |s| Action::Hover(Some(s)))?,
        on("mouseleave", |_| Action::Hover(None))?,
        on("focus", |s| Action::Focus(Some(s)))?,
        on("blur", |_| Action::Focus(None))?,
        on("click", Action::OpenSection)?,
    ];

    let queue = queue.clone();
    listeners.push(Listener::new(root, "keydown", move |event| {
        let Some(command) = event
            .dyn_ref::<KeyboardEvent>()
            .and_then(|key| Command::from_key(&key.key()))
        else {
            return;
        };
        if command.activates() {
            // Space would otherwise scroll; the window handler must not see it
            event.prevent_default();
            event.stop_propagation();
            push(&queue, Action::MenuKey(section, command));
        }
    })?);
    Ok(listeners)
}

/// Game picker, back button and the slot a mounted game lives in
pub struct GamePanel {
    picker: Element,
    options: Vec<(GameKind, Element)>,
    back: Element,
    pub host: Element,
    _listeners: Vec<Listener>,
}

impl GamePanel {
    fn build(document: &Document, parent: &Element, queue: &Queue) -> Result<Self, JsValue> {
        let panel = dom::element(document, "div", "game-container")?;
        let mut listeners = Vec::new();

        let back = dom::append_text(
            document,
            &panel,
            "button",
            "game-back-button",
            "\u{2190} Back to Game Selection",
        )?;
        {
            let queue = queue.clone();
            listeners.push(Listener::new(&back, "click", move |_| {
                push(&queue, Action::BackToPicker)
            })?);
        }

        let picker = dom::element(document, "div", "game-selector")?;
        dom::append_text(document, &picker, "h3", "", "Select Your Game")?;
        let grid = dom::element(document, "div", "game-options")?;
        let mut options = Vec::new();
        for game in GameKind::ALL {
            let option = dom::element(document, "div", "game-option")?;
            option.set_attribute("tabindex", "0")?;
            option.set_attribute("role", "button")?;
            let icon_class = format!("game-icon {}-icon", game.as_str().to_lowercase());
            option.append_child(&dom::element(document, "div", &icon_class)?)?;
            dom::append_text(document, &option, "span", "", game.as_str())?;
            grid.append_child(&option)?;

            {
                let queue = queue.clone();
                listeners.push(Listener::new(&option, "click", move |_| {
                    push(&queue, Action::SelectGame(game))
                })?);
            }
            {
                let queue = queue.clone();
                listeners.push(Listener::new(&option, "keydown", move |event| {
                    let activates = event
                        .dyn_ref::<KeyboardEvent>()
                        .and_then(|key| Command::from_key(&key.key()))
                        .is_some_and(|command| command.activates());
                    if activates {
                        event.prevent_default();
                        event.stop_propagation();
                        push(&queue, Action::SelectGame(game));
                    }
                })?);
            }
            options.push((game, option));
        }
        picker.append_child(&grid)?;
        panel.append_child(&picker)?;

        let host = dom::element(document, "div", "game-host")?;
        panel.append_child(&host)?;
        parent.append_child(&panel)?;

        let panel = Self {
            picker,
            options,
            back,
            host,
            _listeners: listeners,
        };
        panel.sync(&GameSelector::new());
        Ok(panel)
    }

    pub fn sync(&self, selector: &GameSelector) {
        let picking = selector.showing_picker();
        dom::set_hidden(&self.picker, !picking);
        dom::set_hidden(&self.back, picking);
        for (game, option) in &self.options {
            dom::toggle_class(option, "selected", selector.is_selected(*game));
        }
    }
}
