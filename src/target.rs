//! Highlightable targets.
//!
//! A target is anything on the page the spotlight can be drawn toward: a
//! gallery image, a publication card. The animator only needs its bounding
//! rectangle and whether the pointer is currently over it.

use glam::Vec2;

/// Axis-aligned rectangle in viewport pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }
}

/// A highlightable element as seen by the animator for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Target {
    pub rect: Rect,
    /// Pointer is directly over the element.
    pub hovered: bool,
}

impl Target {
    pub fn new(rect: Rect) -> Self {
        Self { rect, hovered: false }
    }

    pub fn with_hovered(mut self, hovered: bool) -> Self {
        self.hovered = hovered;
        self
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }
}

/// Index and distance of the target whose center is closest to `point`.
///
/// Ties keep the first target encountered. Returns `None` for an empty slice.
pub fn nearest_target(point: Vec2, targets: &[Target]) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32)> = None;
    for (i, target) in targets.iter().enumerate() {
        let d = point.distance(target.center());
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((i, d)),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: f32, y: f32) -> Target {
        Target::new(Rect::new(x, y, 10.0, 10.0))
    }

    #[test]
    fn test_rect_center() {
        let r = Rect::new(10.0, 20.0, 20.0, 40.0);
        assert_eq!(r.center(), Vec2::new(20.0, 40.0));
    }

    #[test]
    fn test_nearest_picks_minimum() {
        let targets = [square(100.0, 0.0), square(0.0, 0.0), square(50.0, 50.0)];
        let (idx, d) = nearest_target(Vec2::new(4.0, 6.0), &targets).unwrap();
        assert_eq!(idx, 1);
        assert!((d - 1.4142135).abs() < 1e-4);
    }

    #[test]
    fn test_nearest_tie_keeps_first() {
        // Both centers are 10 units from the pointer.
        let targets = [square(-15.0, -5.0), square(5.0, -5.0)];
        let (idx, _) = nearest_target(Vec2::ZERO, &targets).unwrap();
        assert_eq!(idx, 0);
    }

    #[test]
    fn test_nearest_empty() {
        assert!(nearest_target(Vec2::ZERO, &[]).is_none());
    }
}
