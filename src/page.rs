//! Page wiring: binds the effect components to the live document, forwards
//! pointer events to them and advances their timelines every animation frame.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rand_chacha::ChaCha8Rng;
use tracing::{Level, debug, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, MouseEvent, window};

use crate::backdrop::Backdrop;
use crate::config::EffectsConfig;
use crate::dom::DomSurface;
use crate::error::{EffectsError, Result};
use crate::letters::LetterAnimator;
use crate::surface::{HeadingId, Point, Surface};
use crate::{logging, performance_now, random, styles};

struct PageState {
    surface: DomSurface,
    letters: LetterAnimator<ChaCha8Rng>,
    backdrop: Backdrop<ChaCha8Rng>,
}

impl PageState {
    fn tick(&mut self, now: f64) {
        self.letters.tick(now, &mut self.surface);
        self.backdrop.tick(now, &mut self.surface);
    }
}

thread_local! {
    static PAGE: RefCell<Option<PageState>> = const { RefCell::new(None) };
    static STARTED: Cell<bool> = const { Cell::new(false) };
}

fn with_page<T>(f: impl FnOnce(&mut PageState) -> T) -> Option<T> {
    PAGE.with(|cell| {
        let mut guard = cell.try_borrow_mut().ok()?;
        guard.as_mut().map(f)
    })
}

/// Validate `config`, install logging and mount once the DOM is ready.
pub fn start(config: EffectsConfig) -> Result<()> {
    config.validate()?;
    logging::init(config.log_level.parse().unwrap_or(Level::INFO));
    if !claim_start() {
        return Err(EffectsError::AlreadyStarted);
    }
    let result = mount_when_ready(config);
    if result.is_err() {
        release_start();
    }
    result
}

/// Marks the page as started; `false` if it already was.
fn claim_start() -> bool {
    !STARTED.with(|s| s.replace(true))
}

fn release_start() {
    STARTED.with(|s| s.set(false));
}

fn mount_when_ready(config: EffectsConfig) -> Result<()> {
    let win = window().ok_or(EffectsError::NoWindow)?;
    let doc = win.document().ok_or(EffectsError::NoDocument)?;

    if doc.ready_state() == "loading" {
        let mut pending = Some(config);
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            if let Some(cfg) = pending.take() {
                if let Err(err) = mount(cfg) {
                    release_start();
                    warn!(%err, "page effects failed to start");
                }
            }
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback("DOMContentLoaded", closure.as_ref().unchecked_ref())
            .map_err(EffectsError::dom)?;
        closure.forget();
        return Ok(());
    }
    mount(config)
}

fn mount(config: EffectsConfig) -> Result<()> {
    let mut surface = DomSurface::connect(&config.heading_selector)?;
    if config.inject_styles {
        surface.ensure_stylesheet(styles::STYLESHEET_ID, styles::STYLESHEET);
    }
    let now = performance_now();

    let mut letters = LetterAnimator::new(config.letters.clone(), random::from_entropy());
    let count = letters.adopt(&mut surface);
    letters.tick(now, &mut surface);
    letters.start_ambient();
    info!(headings = count, "letter animator ready");

    let mut backdrop = Backdrop::new(config.backdrop.clone(), random::from_entropy());
    backdrop.tick(now, &mut surface);
    backdrop.start(&mut surface);

    for heading in 0..surface.heading_count() {
        if let Some(el) = surface.heading_element(heading) {
            bind_heading(el, heading)?;
        }
    }
    bind_body(surface.body())?;

    PAGE.with(|p| p.replace(Some(PageState {
        surface,
        letters,
        backdrop,
    })));
    start_frame_loop();
    Ok(())
}

fn listen(
    target: &HtmlElement,
    event: &str,
    handler: impl FnMut(MouseEvent) + 'static,
) -> Result<()> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(MouseEvent)>);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(EffectsError::dom)?;
    closure.forget();
    Ok(())
}

fn bind_heading(el: &HtmlElement, heading: HeadingId) -> Result<()> {
    listen(el, "click", move |evt| {
        evt.prevent_default();
        with_page(|page| {
            let now = performance_now();
            page.letters.activate(heading, now, &mut page.surface);
        });
    })
}

fn point(evt: &MouseEvent) -> Point {
    Point {
        x: evt.client_x() as f64,
        y: evt.client_y() as f64,
    }
}

fn bind_body(body: &HtmlElement) -> Result<()> {
    listen(body, "click", |evt| {
        with_page(|page| {
            let target = page.surface.classify(evt.target());
            if page.backdrop.on_click(target, performance_now(), &mut page.surface) {
                debug!("pulse");
            }
        });
    })?;
    listen(body, "dblclick", |evt| {
        with_page(|page| {
            let target = page.surface.classify(evt.target());
            debug!(?target, "double-click");
            page.backdrop
                .on_double_click(target, point(&evt), performance_now(), &mut page.surface);
        });
    })?;
    listen(body, "contextmenu", |evt| {
        evt.prevent_default();
        with_page(|page| {
            let target = page.surface.classify(evt.target());
            debug!(?target, "right-click");
            page.backdrop
                .on_context_menu(target, point(&evt), performance_now(), &mut page.surface);
        });
    })
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn start_frame_loop() {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        with_page(|page| page.tick(ts));
        if let (Some(w), Some(cb)) = (window(), f.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let (Some(w), Some(cb)) = (window(), g.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

// --- Programmatic triggers --------------------------------------------------

/// Explode heading `index` as if it had been clicked.
#[wasm_bindgen]
pub fn explode_heading(index: usize) -> bool {
    with_page(|page| {
        page.letters
            .activate(index, performance_now(), &mut page.surface)
    })
    .unwrap_or(false)
}

/// Run the wild-colors burst from viewport point `(x, y)`.
#[wasm_bindgen]
pub fn trigger_wild_colors(x: f64, y: f64) -> bool {
    with_page(|page| {
        page.backdrop
            .trigger_wild_colors(Point { x, y }, performance_now(), &mut page.surface)
    })
    .unwrap_or(false)
}

/// Whether a wild-colors burst is currently running.
#[wasm_bindgen]
pub fn background_busy() -> bool {
    with_page(|page| page.backdrop.is_busy()).unwrap_or(false)
}
