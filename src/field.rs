//! The particle background.
//!
//! A fixed batch of particles rests at random positions across the viewport.
//! The pointer and the spotlight push nearby particles away; damping and a
//! weak pull toward each particle's rest position bring the field back to
//! calm. Everything is stepped once per displayed frame, so all constants
//! are per-frame rather than per-second.
//!
//! # Example
//!
//! ```ignore
//! let mut rng = StdRng::seed_from_u64(7);
//! let config = FieldConfig::default();
//! let mut field = ParticleField::new(Vec2::new(1280.0, 720.0), &config, &mut rng);
//!
//! let pointer = Repulsor::pointer(Vec2::new(640.0, 360.0), &config);
//! field.step(&[pointer], &config);
//! field.draw(&mut canvas, &config);
//! ```

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::render::{Color, FieldCanvas, Shadow};

/// Particle field tunables.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Number of particles spawned per viewport.
    pub particle_count: usize,
    pub pointer_radius: f32,
    pub pointer_strength: f32,
    pub spotlight_radius: f32,
    pub spotlight_strength: f32,
    /// Velocity multiplier applied every frame.
    pub damping: f32,
    /// Fraction of the distance to the rest position recovered every frame.
    pub spring: f32,
    /// Velocity multiplier on wall contact (negative reverses direction).
    pub bounce: f32,
    /// Opacity range for spawned particles, `[min, max)`.
    pub opacity_range: (f32, f32),
    /// Radius range for spawned particles, `[min, max)`.
    pub radius_range: (f32, f32),
    pub background: Color,
    pub particle_color: Color,
    pub shadow: Shadow,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: 100,
            pointer_radius: 150.0,
            pointer_strength: 3.0,
            spotlight_radius: 100.0,
            spotlight_strength: 2.5,
            damping: 0.92,
            spring: 0.04,
            bounce: -0.3,
            opacity_range: (0.2, 0.7),
            radius_range: (1.0, 3.0),
            background: Color::rgb(10, 10, 15),
            particle_color: Color::rgb(100, 181, 246),
            shadow: Shadow {
                blur: 6.0,
                color: Color::rgb(100, 181, 246),
                alpha: 0.5,
            },
        }
    }
}

/// A single background particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    /// Rest position the spring pulls toward.
    pub base: Vec2,
    pub velocity: Vec2,
    /// Render alpha.
    pub opacity: f32,
    pub radius: f32,
}

impl Particle {
    pub fn at_rest(position: Vec2, opacity: f32, radius: f32) -> Self {
        Self {
            position,
            base: position,
            velocity: Vec2::ZERO,
            opacity,
            radius,
        }
    }
}

/// A point that pushes particles away within a radius.
///
/// Impulse magnitude falls off linearly from `strength` at the center to zero
/// at `radius`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Repulsor {
    pub position: Vec2,
    pub radius: f32,
    pub strength: f32,
}

impl Repulsor {
    pub fn new(position: Vec2, radius: f32, strength: f32) -> Self {
        Self { position, radius, strength }
    }

    /// Repulsor for the raw pointer.
    pub fn pointer(position: Vec2, config: &FieldConfig) -> Self {
        Self::new(position, config.pointer_radius, config.pointer_strength)
    }

    /// Repulsor for the rendered spotlight.
    pub fn spotlight(position: Vec2, config: &FieldConfig) -> Self {
        Self::new(position, config.spotlight_radius, config.spotlight_strength)
    }

    /// Velocity impulse on a particle at `at`.
    ///
    /// Zero outside the radius and at the exact center, where the push
    /// direction is undefined.
    pub fn impulse(&self, at: Vec2) -> Vec2 {
        let offset = at - self.position;
        let distance = offset.length();
        if distance <= 0.0 || distance >= self.radius {
            return Vec2::ZERO;
        }
        let falloff = (self.radius - distance) / self.radius;
        offset / distance * falloff * self.strength
    }
}

/// The full particle set for one viewport.
#[derive(Clone, Debug)]
pub struct ParticleField {
    particles: Vec<Particle>,
    viewport: Vec2,
}

impl ParticleField {
    /// Spawn `config.particle_count` particles at random rest positions.
    pub fn new<R: Rng + ?Sized>(viewport: Vec2, config: &FieldConfig, rng: &mut R) -> Self {
        let mut field = Self {
            particles: Vec::new(),
            viewport,
        };
        field.reinitialize(viewport, config, rng);
        field
    }

    /// Replace every particle with a fresh batch sized for `viewport`.
    ///
    /// Nothing carries over from the old set.
    pub fn reinitialize<R: Rng + ?Sized>(&mut self, viewport: Vec2, config: &FieldConfig, rng: &mut R) {
        self.viewport = viewport.max(Vec2::ZERO);
        let (w, h) = (self.viewport.x, self.viewport.y);
        self.particles = (0..config.particle_count)
            .map(|_| {
                let position = Vec2::new(sample(rng, 0.0, w), sample(rng, 0.0, h));
                let opacity = sample(rng, config.opacity_range.0, config.opacity_range.1);
                let radius = sample(rng, config.radius_range.0, config.radius_range.1);
                Particle::at_rest(position, opacity, radius)
            })
            .collect();
        log::debug!(
            "particle field reset: {} particles over {}x{}",
            self.particles.len(),
            w,
            h
        );
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[inline]
    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Advance every particle one frame.
    ///
    /// Order per particle: repulsion impulses, integrate, damp, spring toward
    /// rest, clamp to the viewport with an inelastic bounce.
    pub fn step(&mut self, repulsors: &[Repulsor], config: &FieldConfig) {
        let bounds = self.viewport;
        for p in &mut self.particles {
            for r in repulsors {
                p.velocity += r.impulse(p.position);
            }

            p.position += p.velocity;
            p.velocity *= config.damping;
            p.position += (p.base - p.position) * config.spring;

            if p.position.x < 0.0 || p.position.x > bounds.x {
                p.position.x = p.position.x.clamp(0.0, bounds.x);
                p.velocity.x *= config.bounce;
            }
            if p.position.y < 0.0 || p.position.y > bounds.y {
                p.position.y = p.position.y.clamp(0.0, bounds.y);
                p.velocity.y *= config.bounce;
            }
        }
    }

    /// Clear the canvas and draw every particle.
    pub fn draw<C: FieldCanvas + ?Sized>(&self, canvas: &mut C, config: &FieldConfig) {
        canvas.clear(self.viewport, config.background);
        for p in &self.particles {
            canvas.fill_circle(p.position, p.radius, config.particle_color, p.opacity, &config.shadow);
        }
    }
}

fn sample<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max > min {
        rng.gen_range(min..max)
    } else {
        min
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn field(w: f32, h: f32) -> (ParticleField, FieldConfig) {
        let config = FieldConfig::default();
        let mut rng = StdRng::seed_from_u64(42);
        (ParticleField::new(Vec2::new(w, h), &config, &mut rng), config)
    }

    #[test]
    fn test_spawn_within_viewport() {
        let (field, config) = field(800.0, 600.0);
        assert_eq!(field.len(), config.particle_count);
        for p in field.particles() {
            assert!(p.position.x >= 0.0 && p.position.x <= 800.0);
            assert!(p.position.y >= 0.0 && p.position.y <= 600.0);
            assert_eq!(p.position, p.base);
            assert_eq!(p.velocity, Vec2::ZERO);
            assert!(p.opacity >= 0.2 && p.opacity < 0.7);
        }
    }

    #[test]
    fn test_impulse_direction_and_falloff() {
        let r = Repulsor::new(Vec2::ZERO, 150.0, 3.0);
        let near = r.impulse(Vec2::new(30.0, 0.0));
        assert!((near.x - 3.0 * 120.0 / 150.0).abs() < 1e-5);
        assert_eq!(near.y, 0.0);

        let far = r.impulse(Vec2::new(0.0, -149.0));
        assert!(far.y < 0.0 && far.y > -0.1);

        assert_eq!(r.impulse(Vec2::new(150.0, 0.0)), Vec2::ZERO);
        assert_eq!(r.impulse(Vec2::ZERO), Vec2::ZERO);
    }

    #[test]
    fn test_step_integrates_damps_and_springs() {
        let config = FieldConfig::default();
        let mut field = ParticleField {
            particles: vec![Particle {
                position: Vec2::new(100.0, 100.0),
                base: Vec2::new(100.0, 100.0),
                velocity: Vec2::new(10.0, 0.0),
                opacity: 0.5,
                radius: 2.0,
            }],
            viewport: Vec2::new(500.0, 500.0),
        };
        field.step(&[], &config);
        let p = &field.particles()[0];
        // 110 then 4% back toward 100
        assert!((p.position.x - 109.6).abs() < 1e-4);
        assert!((p.velocity.x - 9.2).abs() < 1e-5);
    }

    #[test]
    fn test_wall_bounce_is_inelastic() {
        let config = FieldConfig::default();
        let mut field = ParticleField {
            particles: vec![Particle {
                position: Vec2::new(2.0, 50.0),
                base: Vec2::new(2.0, 50.0),
                velocity: Vec2::new(-20.0, 0.0),
                opacity: 0.5,
                radius: 2.0,
            }],
            viewport: Vec2::new(100.0, 100.0),
        };
        field.step(&[], &config);
        let p = &field.particles()[0];
        assert_eq!(p.position.x, 0.0);
        // damped to -18.4, then reversed and attenuated
        assert!((p.velocity.x - 5.52).abs() < 1e-4);
    }

    #[test]
    fn test_particles_stay_in_bounds_under_heavy_repulsion() {
        let (mut field, config) = field(320.0, 240.0);
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..500 {
            let pointer = Vec2::new(rng.gen_range(0.0..320.0), rng.gen_range(0.0..240.0));
            let repulsors = [
                Repulsor::new(pointer, 400.0, 60.0),
                Repulsor::spotlight(pointer * 0.5, &config),
            ];
            field.step(&repulsors, &config);
            for p in field.particles() {
                assert!(p.position.x >= 0.0 && p.position.x <= 320.0);
                assert!(p.position.y >= 0.0 && p.position.y <= 240.0);
            }
        }
    }

    #[test]
    fn test_field_settles_back_to_rest() {
        let (mut field, config) = field(400.0, 400.0);
        let pointer = Repulsor::pointer(Vec2::new(200.0, 200.0), &config);
        for _ in 0..30 {
            field.step(&[pointer], &config);
        }
        for _ in 0..2000 {
            field.step(&[], &config);
        }
        for p in field.particles() {
            assert!(p.position.distance(p.base) < 0.5);
        }
    }

    #[test]
    fn test_reinitialize_replaces_particles() {
        let (mut field, config) = field(800.0, 600.0);
        let before: Vec<Vec2> = field.particles().iter().map(|p| p.base).collect();
        let mut rng = StdRng::seed_from_u64(1);
        field.reinitialize(Vec2::new(200.0, 100.0), &config, &mut rng);
        assert_eq!(field.viewport(), Vec2::new(200.0, 100.0));
        assert_eq!(field.len(), before.len());
        for p in field.particles() {
            assert!(p.base.x <= 200.0 && p.base.y <= 100.0);
        }
    }
}
