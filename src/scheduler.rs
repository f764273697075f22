//! Frame scheduling.
//!
//! The animator never loops on its own: after each frame it asks a
//! [`FrameScheduler`] for another one. In the browser that is
//! `requestAnimationFrame`; tests use [`ManualScheduler`] and step frames
//! by hand.

/// Something that can arrange for the next animation frame to run.
pub trait FrameScheduler {
    fn request_frame(&mut self);
}

/// A scheduler that only records requests.
///
/// ```ignore
/// let mut scheduler = ManualScheduler::default();
/// field.frame(1.0 / 60.0, &targets, &mut canvas, &mut styler, &mut scheduler);
/// while scheduler.take_pending() && frames < 10 {
///     field.frame(1.0 / 60.0, &targets, &mut canvas, &mut styler, &mut scheduler);
/// }
/// ```
#[derive(Debug, Default, Clone)]
pub struct ManualScheduler {
    pending: bool,
    requests: u64,
}

impl ManualScheduler {
    /// Consume the pending request, if any.
    pub fn take_pending(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Total requests ever made.
    pub fn requests(&self) -> u64 {
        self.requests
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) {
        self.pending = true;
        self.requests += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_scheduler() {
        let mut s = ManualScheduler::default();
        assert!(!s.take_pending());
        s.request_frame();
        s.request_frame();
        assert!(s.is_pending());
        assert!(s.take_pending());
        assert!(!s.take_pending());
        assert_eq!(s.requests(), 2);
    }
}
