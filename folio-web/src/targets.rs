//! Highlightable elements as spotlight targets.

use folio::{GlowEffect, Rect, Target, TargetStyler, Vec2};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlCollection, HtmlElement};

use crate::dom;

/// The highlightable elements of the page and the spotlight overlay.
///
/// Elements are held as a live collection, so cards rendered after mount
/// (the publication list, for one) are picked up on the next frame.
pub struct DomTargets {
    elements: HtmlCollection,
    seen: u32,
    spotlight: Option<HtmlElement>,
    highlighted_class: String,
}

impl DomTargets {
    pub fn collect(
        highlight_class: &str,
        highlighted_class: &str,
        spotlight_id: &str,
    ) -> Result<Self, JsValue> {
        let elements = dom::document()?.get_elements_by_class_name(highlight_class);
        Ok(Self {
            seen: elements.length(),
            elements,
            spotlight: dom::by_id(spotlight_id),
            highlighted_class: highlighted_class.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.elements.length() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn element(&self, index: usize) -> Option<Element> {
        self.elements.item(index as u32)
    }

    fn styled(&self, index: usize) -> Option<HtmlElement> {
        self.element(index)?.dyn_into::<HtmlElement>().ok()
    }

    /// Viewport rectangles and hover state, read fresh each frame.
    ///
    /// When the set of elements changed, indices from earlier frames no
    /// longer line up, so every highlight and glow is dropped first. The
    /// next render re-applies the current ones.
    pub fn snapshot(&mut self) -> Vec<Target> {
        let len = self.elements.length();
        if len != self.seen {
            log::debug!("highlightable elements changed: {} -> {}", self.seen, len);
            for i in 0..len as usize {
                self.set_highlighted(i, false);
                self.clear_glow(i);
            }
            self.seen = len;
        }
        (0..len as usize)
            .filter_map(|i| self.element(i))
            .map(|el| {
                let r = el.get_bounding_client_rect();
                let rect = Rect::new(r.left() as f32, r.top() as f32, r.width() as f32, r.height() as f32);
                let hovered = el.matches(":hover").unwrap_or(false);
                Target::new(rect).with_hovered(hovered)
            })
            .collect()
    }
}

impl TargetStyler for DomTargets {
    fn set_highlighted(&mut self, index: usize, highlighted: bool) {
        if let Some(el) = self.element(index) {
            let _ = el
                .class_list()
                .toggle_with_force(&self.highlighted_class, highlighted);
        }
    }

    fn apply_glow(&mut self, index: usize, glow: &GlowEffect) {
        if let Some(el) = self.styled(index) {
            let style = el.style();
            let _ = style.set_property("box-shadow", &glow.box_shadow());
            let _ = style.set_property("transform", &glow.transform());
        }
    }

    fn clear_glow(&mut self, index: usize) {
        if let Some(el) = self.styled(index) {
            let style = el.style();
            let _ = style.remove_property("box-shadow");
            let _ = style.remove_property("transform");
        }
    }

    fn move_spotlight(&mut self, position: Vec2) {
        if let Some(spot) = &self.spotlight {
            let style = spot.style();
            let _ = style.set_property("left", &format!("{:.1}px", position.x));
            let _ = style.set_property("top", &format!("{:.1}px", position.y));
        }
    }
}
