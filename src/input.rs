//! Pointer and viewport input.
//!
//! `PointerInput` turns raw page events into the state the animator reads
//! each frame: the last known pointer position, whether the pointer is still
//! over the page, and the current viewport size.
//!
//! # Usage
//!
//! ```ignore
//! input.handle_event(PointerEvent::Moved(Vec2::new(e.client_x() as f32, e.client_y() as f32)));
//!
//! // in the frame callback
//! if let Some(viewport) = input.take_resize() {
//!     field.reinitialize(viewport, &config, &mut rng);
//! }
//! ```

use glam::Vec2;

/// Raw page events the animator cares about.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Pointer moved to a position in viewport pixels.
    Moved(Vec2),
    /// Pointer left the page.
    Left,
    /// Viewport changed size.
    Resized { width: f32, height: f32 },
}

/// Pointer position and viewport tracking.
#[derive(Debug, Default, Clone)]
pub struct PointerInput {
    /// `None` until the first move event.
    position: Option<Vec2>,
    inside: bool,
    viewport: Vec2,
    resized: bool,
}

impl PointerInput {
    pub fn new(viewport: Vec2) -> Self {
        Self {
            viewport,
            ..Default::default()
        }
    }

    /// Last known pointer position.
    ///
    /// Stays at the exit point after the pointer leaves the page.
    pub fn position(&self) -> Option<Vec2> {
        self.position
    }

    /// Pointer position while it is over the page, `None` otherwise.
    pub fn active_position(&self) -> Option<Vec2> {
        self.position.filter(|_| self.inside)
    }

    /// Whether the pointer is currently over the page.
    pub fn is_inside(&self) -> bool {
        self.inside
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Returns the new viewport if a resize arrived since the last call.
    pub fn take_resize(&mut self) -> Option<Vec2> {
        if std::mem::take(&mut self.resized) {
            Some(self.viewport)
        } else {
            None
        }
    }

    pub fn handle_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Moved(pos) => {
                self.position = Some(pos);
                self.inside = true;
            }
            PointerEvent::Left => {
                self.inside = false;
            }
            PointerEvent::Resized { width, height } => {
                let size = Vec2::new(width.max(0.0), height.max(0.0));
                if size != self.viewport {
                    self.viewport = size;
                    self.resized = true;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_tracking() {
        let mut input = PointerInput::new(Vec2::new(800.0, 600.0));
        assert!(input.position().is_none());
        assert!(input.active_position().is_none());

        input.handle_event(PointerEvent::Moved(Vec2::new(10.0, 10.0)));
        input.handle_event(PointerEvent::Moved(Vec2::new(15.0, 12.0)));
        assert_eq!(input.position(), Some(Vec2::new(15.0, 12.0)));
        assert_eq!(input.active_position(), Some(Vec2::new(15.0, 12.0)));
        assert!(input.is_inside());

        input.handle_event(PointerEvent::Left);
        assert!(!input.is_inside());
        assert_eq!(input.position(), Some(Vec2::new(15.0, 12.0)));
        assert!(input.active_position().is_none());

        input.handle_event(PointerEvent::Moved(Vec2::new(20.0, 20.0)));
        assert_eq!(input.active_position(), Some(Vec2::new(20.0, 20.0)));
    }

    #[test]
    fn test_resize_reported_once() {
        let mut input = PointerInput::new(Vec2::new(800.0, 600.0));
        input.handle_event(PointerEvent::Resized { width: 800.0, height: 600.0 });
        assert!(input.take_resize().is_none());

        input.handle_event(PointerEvent::Resized { width: 1024.0, height: 768.0 });
        assert_eq!(input.take_resize(), Some(Vec2::new(1024.0, 768.0)));
        assert!(input.take_resize().is_none());
    }
}
