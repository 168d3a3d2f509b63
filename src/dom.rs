//! web-sys backed [`Surface`].
//!
//! Keeps the heading elements in page order, the letter spans rendered into
//! each, and every live decoration by id. Individual style or class writes
//! that throw are dropped: the effect simply misses that frame's update.

use std::collections::HashMap;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, EventTarget, HtmlElement, Window};

use crate::error::{EffectsError, Result};
use crate::surface::{
    Anchor, Decoration, DecorationId, HeadingId, LetterGlyph, Rect, Surface, TargetKind, Viewport,
    parse_px,
};

const HEADING_MATCH: &str = "h1, h2, h3, h4, h5, h6";

pub struct DomSurface {
    window: Window,
    document: Document,
    body: HtmlElement,
    headings: Vec<HtmlElement>,
    letters: Vec<Vec<HtmlElement>>,
    decorations: HashMap<DecorationId, HtmlElement>,
    next_id: u64,
}

impl DomSurface {
    /// Bind to the current page and collect headings matching `selector`.
    pub fn connect(selector: &str) -> Result<Self> {
        let window = web_sys::window().ok_or(EffectsError::NoWindow)?;
        let document = window.document().ok_or(EffectsError::NoDocument)?;
        let body = document.body().ok_or(EffectsError::NoBody)?;
        let nodes = document
            .query_selector_all(selector)
            .map_err(EffectsError::dom)?;
        let mut headings = Vec::with_capacity(nodes.length() as usize);
        for i in 0..nodes.length() {
            if let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) {
                headings.push(el);
            }
        }
        let letters = vec![Vec::new(); headings.len()];
        Ok(Self {
            window,
            document,
            body,
            headings,
            letters,
            decorations: HashMap::new(),
            next_id: 0,
        })
    }

    pub fn body(&self) -> &HtmlElement {
        &self.body
    }

    pub fn heading_element(&self, heading: HeadingId) -> Option<&HtmlElement> {
        self.headings.get(heading)
    }

    /// Classify what a pointer event hit.
    pub fn classify(&self, target: Option<EventTarget>) -> TargetKind {
        let Some(el) = target.and_then(|t| t.dyn_into::<Element>().ok()) else {
            return TargetKind::Other;
        };
        if el.is_same_node(Some(self.body.as_ref())) {
            return TargetKind::Body;
        }
        let matches = |sel: &str| el.matches(sel).unwrap_or(false);
        if matches(HEADING_MATCH) {
            TargetKind::Heading
        } else if matches(".letter") {
            TargetKind::Letter
        } else if matches("button") {
            TargetKind::Button
        } else {
            TargetKind::Other
        }
    }

    fn letter(&self, heading: HeadingId, letter: usize) -> Option<&HtmlElement> {
        self.letters.get(heading)?.get(letter)
    }
}

fn set_style(el: &HtmlElement, property: &str, value: &str) {
    let style = el.style();
    if value.is_empty() {
        let _ = style.remove_property(property);
    } else {
        let _ = style.set_property(property, value);
    }
}

fn toggle_class(el: &HtmlElement, class: &str, on: bool) {
    let list = el.class_list();
    let _ = if on {
        list.add_1(class)
    } else {
        list.remove_1(class)
    };
}

impl Surface for DomSurface {
    fn viewport(&self) -> Viewport {
        let dim = |v: std::result::Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
            v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
        };
        Viewport {
            width: dim(self.window.inner_width()),
            height: dim(self.window.inner_height()),
        }
    }

    fn heading_count(&self) -> usize {
        self.headings.len()
    }

    fn heading_text(&self, heading: HeadingId) -> String {
        self.headings
            .get(heading)
            .and_then(|h| h.text_content())
            .map(|t| t.trim().to_string())
            .unwrap_or_default()
    }

    fn heading_rect(&self, heading: HeadingId) -> Rect {
        self.headings
            .get(heading)
            .map(|h| {
                let r = h.get_bounding_client_rect();
                Rect {
                    x: r.x(),
                    y: r.y(),
                    width: r.width(),
                    height: r.height(),
                }
            })
            .unwrap_or_default()
    }

    fn render_letters(&mut self, heading: HeadingId, glyphs: &[LetterGlyph<'_>]) {
        let Some(h) = self.headings.get(heading) else {
            return;
        };
        h.set_inner_html("");
        let mut spans = Vec::with_capacity(glyphs.len());
        for g in glyphs {
            let Some(span) = self
                .document
                .create_element("span")
                .ok()
                .and_then(|e| e.dyn_into::<HtmlElement>().ok())
            else {
                continue;
            };
            span.set_class_name("letter");
            span.set_text_content(Some(g.text));
            set_style(&span, "animation-delay", &format!("{}s", g.delay_s));
            if h.append_child(&span).is_ok() {
                spans.push(span);
            }
        }
        // Anything rendered earlier is gone with the old content.
        self.decorations.retain(|_, el| el.is_connected());
        self.letters[heading] = spans;
    }

    fn letter_font_size(&self, heading: HeadingId, letter: usize) -> Option<f64> {
        let el = self.letter(heading, letter)?;
        let computed = self.window.get_computed_style(el).ok()??;
        computed
            .get_property_value("font-size")
            .ok()
            .as_deref()
            .and_then(parse_px)
    }

    fn set_letter_style(&mut self, heading: HeadingId, letter: usize, property: &str, value: &str) {
        if let Some(el) = self.letter(heading, letter) {
            set_style(el, property, value);
        }
    }

    fn toggle_letter_class(&mut self, heading: HeadingId, letter: usize, class: &str, on: bool) {
        if let Some(el) = self.letter(heading, letter) {
            toggle_class(el, class, on);
        }
    }

    fn set_heading_style(&mut self, heading: HeadingId, property: &str, value: &str) {
        if let Some(el) = self.headings.get(heading) {
            set_style(el, property, value);
        }
    }

    fn toggle_heading_class(&mut self, heading: HeadingId, class: &str, on: bool) {
        if let Some(el) = self.headings.get(heading) {
            toggle_class(el, class, on);
        }
    }

    fn set_body_style(&mut self, property: &str, value: &str) {
        set_style(&self.body, property, value);
    }

    fn toggle_body_class(&mut self, class: &str, on: bool) {
        toggle_class(&self.body, class, on);
    }

    fn spawn(&mut self, anchor: Anchor, decoration: &Decoration) -> DecorationId {
        self.next_id += 1;
        let id = DecorationId(self.next_id);
        let parent = match anchor {
            Anchor::Heading(h) => self.headings.get(h).unwrap_or(&self.body),
            Anchor::Body => &self.body,
        };
        let el = self
            .document
            .create_element("div")
            .ok()
            .and_then(|e| e.dyn_into::<HtmlElement>().ok());
        if let Some(el) = el {
            el.set_class_name(decoration.class);
            let _ = el.set_attribute("style", &decoration.style);
            if parent.append_child(&el).is_ok() {
                self.decorations.insert(id, el);
            }
        }
        id
    }

    fn despawn(&mut self, id: DecorationId) -> bool {
        let Some(el) = self.decorations.remove(&id) else {
            return false;
        };
        match el.parent_node() {
            Some(parent) => parent.remove_child(&el).is_ok(),
            None => false,
        }
    }

    fn ensure_stylesheet(&mut self, id: &str, css: &str) {
        if self.document.get_element_by_id(id).is_some() {
            return;
        }
        let Ok(style) = self.document.create_element("style") else {
            return;
        };
        style.set_id(id);
        style.set_text_content(Some(css));
        match self.document.head() {
            Some(head) => {
                let _ = head.append_child(&style);
            }
            None => {
                let _ = self.body.append_child(&style);
            }
        }
    }
}
