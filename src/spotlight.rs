//! The cursor-following spotlight.
//!
//! Each frame the spotlight:
//!
//! 1. finds the highlightable target nearest to the pointer,
//! 2. if it is inside the capture radius, highlights it exclusively and
//!    bends the spotlight's target position toward its center,
//! 3. gives every other target within the proximity radius a glow whose
//!    strength grows as the spotlight gets closer,
//! 4. eases its rendered position toward the target position.
//!
//! The proximity pass measures from the position rendered on the *previous*
//! frame, while the attraction pass uses the current pointer. That one-frame
//! lag is intentional and is kept.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::render::Color;
use crate::target::{nearest_target, Target};

/// Tunables for the spotlight and target effects.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpotlightConfig {
    /// Distance under which the nearest target is highlighted and attracts.
    pub capture_radius: f32,
    /// Distance under which non-highlighted targets still glow.
    pub proximity_radius: f32,
    /// Upper clamp on attraction strength.
    pub max_attraction: f32,
    /// Fraction of the remaining distance covered per frame.
    pub follow: f32,
    /// Vertical lift of a fully glowing target, in pixels.
    pub glow_lift: f32,
    pub glow_color: Color,
}

impl Default for SpotlightConfig {
    fn default() -> Self {
        Self {
            capture_radius: 100.0,
            proximity_radius: 150.0,
            max_attraction: 0.4,
            follow: 0.8,
            glow_lift: 5.0,
            glow_color: Color::rgb(100, 181, 246),
        }
    }
}

/// Attraction toward a captured target, `clamp(1 - d / radius, 0, max)`.
///
/// Monotonically non-increasing in `distance`.
pub fn attraction_strength(distance: f32, radius: f32, max: f32) -> f32 {
    if radius <= 0.0 {
        return 0.0;
    }
    (1.0 - distance / radius).clamp(0.0, max)
}

/// Secondary glow for a target near, but not captured by, the spotlight.
#[derive(Clone, Debug, PartialEq)]
pub struct GlowEffect {
    /// `0.0` at the proximity radius, `1.0` at the center.
    pub intensity: f32,
    /// Upward offset in pixels.
    pub lift: f32,
    pub color: Color,
}

impl GlowEffect {
    pub fn new(intensity: f32, config: &SpotlightConfig) -> Self {
        let intensity = intensity.clamp(0.0, 1.0);
        Self {
            intensity,
            lift: config.glow_lift * intensity,
            color: config.glow_color,
        }
    }

    /// Layered `box-shadow` value: a tight inner halo and a wide outer one.
    pub fn box_shadow(&self) -> String {
        let i = self.intensity;
        format!(
            "0 0 {:.1}px {}, 0 0 {:.1}px {}",
            20.0 * i,
            self.color.to_rgba(0.6 * i),
            40.0 * i,
            self.color.to_rgba(0.3 * i),
        )
    }

    /// `transform` value for the lift.
    pub fn transform(&self) -> String {
        format!("translateY({:.2}px)", -self.lift)
    }
}

/// What to do with one target's glow this frame.
#[derive(Clone, Debug, PartialEq)]
pub enum TargetEffect {
    Glow(GlowEffect),
    Clear,
    /// Leave as is: the target is highlighted, or the pointer is over it.
    Keep,
}

/// Everything a frame decided about the spotlight and the targets.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpotlightFrame {
    /// Target highlighted after this frame.
    pub highlighted: Option<usize>,
    /// Target whose highlight was removed this frame.
    pub released: Option<usize>,
    /// Current attraction strength (zero when nothing is captured).
    pub attraction: f32,
    /// One entry per target, same order as the input slice.
    pub effects: Vec<TargetEffect>,
    /// Rendered spotlight position after easing.
    pub position: Vec2,
}

/// Spotlight position state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Spotlight {
    current: Vec2,
    target: Vec2,
    highlighted: Option<usize>,
}

impl Spotlight {
    pub fn new(start: Vec2) -> Self {
        Self {
            current: start,
            target: start,
            highlighted: None,
        }
    }

    /// Rendered position.
    #[inline]
    pub fn current(&self) -> Vec2 {
        self.current
    }

    /// Position the spotlight is easing toward.
    #[inline]
    pub fn target(&self) -> Vec2 {
        self.target
    }

    #[inline]
    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// Advance one frame.
    ///
    /// With no pointer yet, the target position is left alone and no target
    /// is captured; the glow and easing passes still run.
    pub fn update(
        &mut self,
        pointer: Option<Vec2>,
        targets: &[Target],
        config: &SpotlightConfig,
    ) -> SpotlightFrame {
        let previous = self.highlighted;
        let mut attraction = 0.0;
        let mut captured = None;

        if let Some(pointer) = pointer {
            self.target = pointer;
            if let Some((idx, distance)) = nearest_target(pointer, targets) {
                if distance < config.capture_radius {
                    attraction =
                        attraction_strength(distance, config.capture_radius, config.max_attraction);
                    self.target = pointer.lerp(targets[idx].center(), attraction);
                    captured = Some(idx);
                }
            }
        }

        // A shrinking target list can orphan the old index.
        let previous = previous.filter(|&i| i < targets.len());
        self.highlighted = captured;
        let released = match (previous, captured) {
            (Some(old), Some(new)) if old == new => None,
            (old, _) => old,
        };

        let origin = self.current;
        let effects = targets
            .iter()
            .enumerate()
            .map(|(i, target)| {
                if Some(i) == captured {
                    return TargetEffect::Keep;
                }
                let d = origin.distance(target.center());
                if d < config.proximity_radius {
                    TargetEffect::Glow(GlowEffect::new(1.0 - d / config.proximity_radius, config))
                } else if target.hovered {
                    TargetEffect::Keep
                } else {
                    TargetEffect::Clear
                }
            })
            .collect();

        self.current += (self.target - self.current) * config.follow;

        SpotlightFrame {
            highlighted: captured,
            released,
            attraction,
            effects,
            position: self.current,
        }
    }
}
