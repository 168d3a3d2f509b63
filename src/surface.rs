//! Host abstraction over the page the effects draw on.
//!
//! The effect components only ever talk to a [`Surface`]: the browser build
//! uses the web-sys backed `DomSurface`, tests and headless previews use
//! [`MemorySurface`], which records every write.

use std::collections::{BTreeMap, BTreeSet};

pub type HeadingId = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DecorationId(pub u64);

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Where a transient decoration is attached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    Heading(HeadingId),
    Body,
}

/// A short-lived element: a class name plus its inline style text.
#[derive(Clone, Debug, PartialEq)]
pub struct Decoration {
    pub class: &'static str,
    pub style: String,
}

/// What a pointer event landed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetKind {
    Body,
    Heading,
    Letter,
    Button,
    Other,
}

impl TargetKind {
    /// Empty page area: the background effects only react to these.
    pub fn is_backdrop(self) -> bool {
        matches!(self, TargetKind::Body | TargetKind::Other)
    }
}

/// The DOM operations the effects need. Writes are fire-and-forget.
pub trait Surface {
    fn viewport(&self) -> Viewport;
    fn heading_count(&self) -> usize;
    fn heading_text(&self, heading: HeadingId) -> String;
    fn heading_rect(&self, heading: HeadingId) -> Rect;
    /// Replace the heading's content with one element per glyph, in order.
    fn render_letters(&mut self, heading: HeadingId, glyphs: &[LetterGlyph<'_>]);
    /// Rendered font size of a letter in px, when the host can measure it.
    fn letter_font_size(&self, heading: HeadingId, letter: usize) -> Option<f64>;
    /// An empty `value` clears the property.
    fn set_letter_style(&mut self, heading: HeadingId, letter: usize, property: &str, value: &str);
    fn toggle_letter_class(&mut self, heading: HeadingId, letter: usize, class: &str, on: bool);
    fn set_heading_style(&mut self, heading: HeadingId, property: &str, value: &str);
    fn toggle_heading_class(&mut self, heading: HeadingId, class: &str, on: bool);
    fn set_body_style(&mut self, property: &str, value: &str);
    fn toggle_body_class(&mut self, class: &str, on: bool);
    fn spawn(&mut self, anchor: Anchor, decoration: &Decoration) -> DecorationId;
    /// Detach a decoration; `false` when it was already gone.
    fn despawn(&mut self, id: DecorationId) -> bool;
    /// Install a `<style>` block once per `id`.
    fn ensure_stylesheet(&mut self, id: &str, css: &str);
}

/// Render description of one letter unit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LetterGlyph<'a> {
    pub text: &'a str,
    pub delay_s: f64,
}

// --- Headless host -----------------------------------------------------------

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryNode {
    pub text: String,
    pub style: BTreeMap<String, String>,
    pub classes: BTreeSet<String>,
}

impl MemoryNode {
    pub fn style(&self, property: &str) -> Option<&str> {
        self.style.get(property).map(String::as_str)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    fn set_style(&mut self, property: &str, value: &str) {
        if value.is_empty() {
            self.style.remove(property);
        } else {
            self.style.insert(property.to_string(), value.to_string());
        }
    }

    fn toggle(&mut self, class: &str, on: bool) {
        if on {
            self.classes.insert(class.to_string());
        } else {
            self.classes.remove(class);
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryHeading {
    pub node: MemoryNode,
    pub rect: Rect,
    pub letters: Vec<MemoryNode>,
}

/// Every decoration ever spawned, live or not.
#[derive(Clone, Debug, PartialEq)]
pub struct SpawnRecord {
    pub id: DecorationId,
    pub anchor: Anchor,
    pub decoration: Decoration,
}

#[derive(Clone, Debug)]
pub struct MemorySurface {
    pub viewport: Viewport,
    pub headings: Vec<MemoryHeading>,
    pub body: MemoryNode,
    pub live: BTreeMap<DecorationId, Anchor>,
    pub spawned: Vec<SpawnRecord>,
    pub stylesheets: BTreeMap<String, String>,
    /// `(heading, property, value)` for every heading style write, in order.
    pub heading_writes: Vec<(HeadingId, String, String)>,
    /// Every body background color written, in order.
    pub background_history: Vec<String>,
    next_id: u64,
}

impl MemorySurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            viewport: Viewport { width, height },
            headings: Vec::new(),
            body: MemoryNode::default(),
            live: BTreeMap::new(),
            spawned: Vec::new(),
            stylesheets: BTreeMap::new(),
            heading_writes: Vec::new(),
            background_history: Vec::new(),
            next_id: 0,
        }
    }

    pub fn with_heading(mut self, text: &str, width: f64, height: f64) -> Self {
        self.headings.push(MemoryHeading {
            node: MemoryNode {
                text: text.to_string(),
                ..MemoryNode::default()
            },
            rect: Rect {
                x: 0.0,
                y: 0.0,
                width,
                height,
            },
            letters: Vec::new(),
        });
        self
    }

    pub fn heading(&self, heading: HeadingId) -> &MemoryHeading {
        &self.headings[heading]
    }

    pub fn letter(&self, heading: HeadingId, letter: usize) -> &MemoryNode {
        &self.headings[heading].letters[letter]
    }

    /// Number of decorations with `class` spawned so far.
    pub fn spawned_with_class(&self, class: &str) -> usize {
        self.spawned
            .iter()
            .filter(|r| r.decoration.class == class)
            .count()
    }

    /// Number of times a heading received a new position.
    pub fn reposition_count(&self, heading: HeadingId) -> usize {
        self.heading_writes
            .iter()
            .filter(|(h, p, _)| *h == heading && p == "top")
            .count()
    }

    /// Forget a decoration as if something else had removed it from the page.
    pub fn detach(&mut self, id: DecorationId) {
        self.live.remove(&id);
    }
}

impl Surface for MemorySurface {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn heading_count(&self) -> usize {
        self.headings.len()
    }

    fn heading_text(&self, heading: HeadingId) -> String {
        self.headings
            .get(heading)
            .map(|h| h.node.text.clone())
            .unwrap_or_default()
    }

    fn heading_rect(&self, heading: HeadingId) -> Rect {
        self.headings.get(heading).map(|h| h.rect).unwrap_or_default()
    }

    fn render_letters(&mut self, heading: HeadingId, glyphs: &[LetterGlyph<'_>]) {
        let Some(h) = self.headings.get_mut(heading) else {
            return;
        };
        h.letters = glyphs
            .iter()
            .map(|g| {
                let mut node = MemoryNode {
                    text: g.text.to_string(),
                    ..MemoryNode::default()
                };
                node.toggle("letter", true);
                node.set_style("animation-delay", &format!("{}s", g.delay_s));
                node
            })
            .collect();
        h.node.text = glyphs.iter().map(|g| g.text).collect();
    }

    fn letter_font_size(&self, heading: HeadingId, letter: usize) -> Option<f64> {
        self.headings
            .get(heading)?
            .letters
            .get(letter)?
            .style("font-size")
            .and_then(parse_px)
    }

    fn set_letter_style(&mut self, heading: HeadingId, letter: usize, property: &str, value: &str) {
        if let Some(node) = self
            .headings
            .get_mut(heading)
            .and_then(|h| h.letters.get_mut(letter))
        {
            node.set_style(property, value);
        }
    }

    fn toggle_letter_class(&mut self, heading: HeadingId, letter: usize, class: &str, on: bool) {
        if let Some(node) = self
            .headings
            .get_mut(heading)
            .and_then(|h| h.letters.get_mut(letter))
        {
            node.toggle(class, on);
        }
    }

    fn set_heading_style(&mut self, heading: HeadingId, property: &str, value: &str) {
        if let Some(h) = self.headings.get_mut(heading) {
            h.node.set_style(property, value);
            self.heading_writes
                .push((heading, property.to_string(), value.to_string()));
        }
    }

    fn toggle_heading_class(&mut self, heading: HeadingId, class: &str, on: bool) {
        if let Some(h) = self.headings.get_mut(heading) {
            h.node.toggle(class, on);
        }
    }

    fn set_body_style(&mut self, property: &str, value: &str) {
        if property == "background-color" {
            self.background_history.push(value.to_string());
        }
        self.body.set_style(property, value);
    }

    fn toggle_body_class(&mut self, class: &str, on: bool) {
        self.body.toggle(class, on);
    }

    fn spawn(&mut self, anchor: Anchor, decoration: &Decoration) -> DecorationId {
        self.next_id += 1;
        let id = DecorationId(self.next_id);
        self.live.insert(id, anchor);
        self.spawned.push(SpawnRecord {
            id,
            anchor,
            decoration: decoration.clone(),
        });
        id
    }

    fn despawn(&mut self, id: DecorationId) -> bool {
        self.live.remove(&id).is_some()
    }

    fn ensure_stylesheet(&mut self, id: &str, css: &str) {
        self.stylesheets
            .entry(id.to_string())
            .or_insert_with(|| css.to_string());
    }
}

/// Parse a CSS pixel length such as `"16px"` or `"12.5"`.
pub fn parse_px(value: &str) -> Option<f64> {
    let v = value.trim();
    let v = v.strip_suffix("px").unwrap_or(v).trim();
    v.parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_px_accepts_units_and_bare_numbers() {
        assert_eq!(parse_px("16px"), Some(16.0));
        assert_eq!(parse_px(" 12.5 "), Some(12.5));
        assert_eq!(parse_px("auto"), None);
        assert_eq!(parse_px(""), None);
    }

    #[test]
    fn despawn_reports_already_detached() {
        let mut s = MemorySurface::new(800.0, 600.0);
        let id = s.spawn(
            Anchor::Body,
            &Decoration {
                class: "bg-particle",
                style: String::new(),
            },
        );
        assert!(s.despawn(id));
        assert!(!s.despawn(id));
    }

    #[test]
    fn empty_style_value_clears_property() {
        let mut s = MemorySurface::new(800.0, 600.0);
        s.set_body_style("animation", "screenShake 0.6s ease-out");
        s.set_body_style("animation", "");
        assert_eq!(s.body.style("animation"), None);
    }

    #[test]
    fn backdrop_targets() {
        assert!(TargetKind::Body.is_backdrop());
        assert!(TargetKind::Other.is_backdrop());
        assert!(!TargetKind::Letter.is_backdrop());
        assert!(!TargetKind::Heading.is_backdrop());
        assert!(!TargetKind::Button.is_backdrop());
    }
}
