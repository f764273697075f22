//! Integration tests for the cursor field animator.
//!
//! Frames are stepped by hand through a `ManualScheduler`, with seeded
//! randomness so every run sees the same particles and pointer paths.

use folio::prelude::*;
use folio::spotlight::{attraction_strength, TargetEffect};
use folio::target::nearest_target;
use folio::{Shadow, SpotlightFrame};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Default)]
struct NullCanvas {
    circles: usize,
}

impl FieldCanvas for NullCanvas {
    fn clear(&mut self, _size: Vec2, _background: Color) {}

    fn fill_circle(&mut self, _c: Vec2, _r: f32, _fill: Color, _alpha: f32, _shadow: &Shadow) {
        self.circles += 1;
    }
}

/// Tracks which targets carry the highlight class, like the DOM would.
#[derive(Default)]
struct ClassList {
    highlighted: Vec<bool>,
    glowing: Vec<bool>,
}

impl ClassList {
    fn with_len(n: usize) -> Self {
        Self {
            highlighted: vec![false; n],
            glowing: vec![false; n],
        }
    }
}

impl TargetStyler for ClassList {
    fn set_highlighted(&mut self, index: usize, highlighted: bool) {
        self.highlighted[index] = highlighted;
    }

    fn apply_glow(&mut self, index: usize, _glow: &GlowEffect) {
        self.glowing[index] = true;
    }

    fn clear_glow(&mut self, index: usize) {
        self.glowing[index] = false;
    }

    fn move_spotlight(&mut self, _position: Vec2) {}
}

fn gallery() -> Vec<Target> {
    (0..12)
        .map(|i| {
            let col = (i % 4) as f32;
            let row = (i / 4) as f32;
            Target::new(Rect::new(40.0 + col * 220.0, 60.0 + row * 200.0, 120.0, 90.0))
        })
        .collect()
}

fn context(seed: u64) -> CursorField {
    CursorField::with_rng(
        Vec2::new(960.0, 640.0),
        SpotlightConfig::default(),
        FieldConfig::default(),
        StdRng::seed_from_u64(seed),
    )
}

#[test]
fn test_nearest_target_is_euclidean_minimum() {
    let targets = gallery();
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..1000 {
        let p = Vec2::new(rng.gen_range(-100.0..1100.0), rng.gen_range(-100.0..800.0));
        let (idx, d) = nearest_target(p, &targets).unwrap();
        for (j, t) in targets.iter().enumerate() {
            let dj = p.distance(t.center());
            assert!(d <= dj);
            if j < idx {
                assert!(dj > d, "earlier target {} ties with chosen {}", j, idx);
            }
        }
    }
}

#[test]
fn test_attraction_bounds_hold_everywhere() {
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..1000 {
        let a = rng.gen_range(0.0..500.0f32);
        let b = rng.gen_range(0.0..500.0f32);
        let (near, far) = if a < b { (a, b) } else { (b, a) };
        let sa = attraction_strength(near, 100.0, 0.4);
        let sb = attraction_strength(far, 100.0, 0.4);
        assert!((0.0..=0.4).contains(&sa));
        assert!(sb <= sa);
    }
}

#[test]
fn test_particles_stay_in_viewport_while_pointer_sweeps() {
    let mut ctx = context(1);
    let targets = gallery();
    let mut canvas = NullCanvas::default();
    let mut styler = ClassList::with_len(targets.len());
    let mut scheduler = ManualScheduler::default();
    let mut rng = StdRng::seed_from_u64(2);

    scheduler.request_frame();
    let mut frames = 0;
    while scheduler.take_pending() && frames < 600 {
        let pointer = Vec2::new(rng.gen_range(-50.0..1010.0), rng.gen_range(-50.0..690.0));
        ctx.handle_event(PointerEvent::Moved(pointer));
        ctx.frame(1.0 / 60.0, &targets, &mut canvas, &mut styler, &mut scheduler);
        frames += 1;

        let viewport = ctx.field().viewport();
        for p in ctx.field().particles() {
            assert!(p.position.x >= 0.0 && p.position.x <= viewport.x);
            assert!(p.position.y >= 0.0 && p.position.y <= viewport.y);
        }
    }
    assert_eq!(frames, 600);
}

#[test]
fn test_at_most_one_target_highlighted() {
    let mut ctx = context(3);
    let targets = gallery();
    let mut canvas = NullCanvas::default();
    let mut styler = ClassList::with_len(targets.len());

    // Walk the pointer across the whole first row of cards and back out.
    for step in 0..200 {
        let x = step as f32 * 5.0;
        ctx.handle_event(PointerEvent::Moved(Vec2::new(x, 105.0)));
        let frame: SpotlightFrame = ctx.tick(1.0 / 60.0, &targets);
        ctx.render(&frame, &mut canvas, &mut styler);

        let count = styler.highlighted.iter().filter(|h| **h).count();
        assert!(count <= 1);
        if let Some(idx) = frame.highlighted {
            assert!(styler.highlighted[idx]);
            assert_eq!(frame.effects[idx], TargetEffect::Keep);
        }
    }

    ctx.handle_event(PointerEvent::Moved(Vec2::new(950.0, 630.0)));
    for _ in 0..3 {
        let frame = ctx.tick(1.0 / 60.0, &targets);
        ctx.render(&frame, &mut canvas, &mut styler);
    }
    assert!(styler.highlighted.iter().all(|h| !h));
}

#[test]
fn test_resize_replaces_particle_set() {
    let mut ctx = context(4);
    let before: Vec<Vec2> = ctx.field().particles().iter().map(|p| p.base).collect();

    ctx.handle_event(PointerEvent::Resized { width: 480.0, height: 320.0 });
    ctx.tick(1.0 / 60.0, &[]);

    assert_eq!(ctx.field().len(), before.len());
    let after: Vec<Vec2> = ctx.field().particles().iter().map(|p| p.base).collect();
    assert_ne!(before, after);
    for base in after {
        assert!(base.x <= 480.0 && base.y <= 320.0);
    }
}
