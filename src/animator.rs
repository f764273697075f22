//! The cursor field animator.
//!
//! [`CursorField`] owns everything the per-frame loop touches: pointer input,
//! the spotlight, the particle field and the random source used to respawn
//! particles. One frame is [`CursorField::tick`] (pure state update) followed
//! by [`CursorField::render`] (apply to adapters); [`CursorField::frame`]
//! does both and asks the scheduler for the next frame.

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::field::{FieldConfig, ParticleField, Repulsor};
use crate::input::{PointerEvent, PointerInput};
use crate::render::{FieldCanvas, TargetStyler};
use crate::scheduler::FrameScheduler;
use crate::spotlight::{Spotlight, SpotlightConfig, SpotlightFrame, TargetEffect};
use crate::target::Target;

/// Animation context for one page.
pub struct CursorField {
    spotlight_config: SpotlightConfig,
    field_config: FieldConfig,
    input: PointerInput,
    spotlight: Spotlight,
    field: ParticleField,
    rng: StdRng,
    frames: u64,
    elapsed: f32,
}

impl CursorField {
    /// Create a context seeded from OS entropy.
    pub fn new(viewport: Vec2, spotlight_config: SpotlightConfig, field_config: FieldConfig) -> Self {
        Self::with_rng(viewport, spotlight_config, field_config, StdRng::from_entropy())
    }

    /// Create a context with an explicit random source.
    pub fn with_rng(
        viewport: Vec2,
        spotlight_config: SpotlightConfig,
        field_config: FieldConfig,
        mut rng: StdRng,
    ) -> Self {
        let field = ParticleField::new(viewport, &field_config, &mut rng);
        Self {
            spotlight: Spotlight::new(viewport * 0.5),
            input: PointerInput::new(viewport),
            spotlight_config,
            field_config,
            field,
            rng,
            frames: 0,
            elapsed: 0.0,
        }
    }

    pub fn handle_event(&mut self, event: PointerEvent) {
        self.input.handle_event(event);
    }

    pub fn input(&self) -> &PointerInput {
        &self.input
    }

    pub fn spotlight(&self) -> &Spotlight {
        &self.spotlight
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn spotlight_config(&self) -> &SpotlightConfig {
        &self.spotlight_config
    }

    pub fn field_config(&self) -> &FieldConfig {
        &self.field_config
    }

    /// Frames ticked so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Sum of the deltas passed to `tick`, in seconds.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Advance one frame.
    ///
    /// Motion constants are per frame; `dt` only feeds the frame statistics.
    /// A pending resize respawns the whole particle set first.
    pub fn tick(&mut self, dt: f32, targets: &[Target]) -> SpotlightFrame {
        if let Some(viewport) = self.input.take_resize() {
            log::info!("viewport resized to {}x{}, respawning particles", viewport.x, viewport.y);
            self.field.reinitialize(viewport, &self.field_config, &mut self.rng);
        }

        // The spotlight keeps easing toward the exit point after the pointer
        // leaves; only a pointer over the page pushes particles.
        let frame = self
            .spotlight
            .update(self.input.position(), targets, &self.spotlight_config);

        let mut repulsors = Vec::with_capacity(2);
        if let Some(pointer) = self.input.active_position() {
            repulsors.push(Repulsor::pointer(pointer, &self.field_config));
        }
        repulsors.push(Repulsor::spotlight(frame.position, &self.field_config));
        self.field.step(&repulsors, &self.field_config);

        self.frames += 1;
        self.elapsed += dt.max(0.0);
        frame
    }

    /// Apply a frame's results to the page and repaint the particles.
    pub fn render<C, S>(&self, frame: &SpotlightFrame, canvas: &mut C, styler: &mut S)
    where
        C: FieldCanvas + ?Sized,
        S: TargetStyler + ?Sized,
    {
        styler.move_spotlight(frame.position);
        if let Some(old) = frame.released {
            styler.set_highlighted(old, false);
        }
        if let Some(current) = frame.highlighted {
            styler.set_highlighted(current, true);
        }
        for (i, effect) in frame.effects.iter().enumerate() {
            match effect {
                TargetEffect::Glow(glow) => styler.apply_glow(i, glow),
                TargetEffect::Clear => styler.clear_glow(i),
                TargetEffect::Keep => {}
            }
        }
        self.field.draw(canvas, &self.field_config);
    }

    /// Tick, render, and schedule the next frame.
    pub fn frame<C, S, F>(
        &mut self,
        dt: f32,
        targets: &[Target],
        canvas: &mut C,
        styler: &mut S,
        scheduler: &mut F,
    ) -> SpotlightFrame
    where
        C: FieldCanvas + ?Sized,
        S: TargetStyler + ?Sized,
        F: FrameScheduler + ?Sized,
    {
        let frame = self.tick(dt, targets);
        self.render(&frame, canvas, styler);
        scheduler.request_frame();
        frame
    }
}
