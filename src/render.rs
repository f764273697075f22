//! Rendering adapters.
//!
//! The animator computes positions, glows and highlight changes as plain
//! values; these traits are the thin seam that applies them to a real
//! presentation surface (a 2D canvas and the page's DOM in the browser, a
//! recorder in tests).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::spotlight::GlowEffect;

/// An opaque RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb` form.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// `rgba(r, g, b, a)` form with `alpha` clamped to `[0, 1]`.
    pub fn to_rgba(&self, alpha: f32) -> String {
        format!(
            "rgba({}, {}, {}, {:.3})",
            self.r,
            self.g,
            self.b,
            alpha.clamp(0.0, 1.0)
        )
    }
}

/// Soft drop shadow drawn under each particle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Shadow {
    pub blur: f32,
    pub color: Color,
    pub alpha: f32,
}

/// A 2D drawing surface for the particle background.
pub trait FieldCanvas {
    /// Fill the whole surface with `background`.
    fn clear(&mut self, size: Vec2, background: Color);

    /// Draw a filled circle.
    fn fill_circle(&mut self, center: Vec2, radius: f32, fill: Color, alpha: f32, shadow: &Shadow);
}

/// Applies spotlight output to the highlightable elements on the page.
///
/// Indices refer to the target slice passed to the frame that produced them.
pub trait TargetStyler {
    /// Add or remove the exclusive "highlighted" marker.
    fn set_highlighted(&mut self, index: usize, highlighted: bool);

    fn apply_glow(&mut self, index: usize, glow: &GlowEffect);

    fn clear_glow(&mut self, index: usize);

    /// Move the spotlight element to its rendered position.
    fn move_spotlight(&mut self, position: Vec2);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_formats() {
        let c = Color::rgb(10, 255, 0);
        assert_eq!(c.to_hex(), "#0aff00");
        assert_eq!(c.to_rgba(0.5), "rgba(10, 255, 0, 0.500)");
        assert_eq!(c.to_rgba(3.0), "rgba(10, 255, 0, 1.000)");
    }
}
