//! The `requestAnimationFrame` loop driving the cursor field.

use std::cell::RefCell;
use std::rc::Rc;

use folio::time::FrameClock;
use folio::{CursorField, FolioConfig, FrameScheduler, PointerEvent, Vec2};
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, MouseEvent};

use crate::canvas::CanvasRenderer;
use crate::dom;
use crate::targets::DomTargets;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Schedules the stored callback on the next display frame.
struct RafScheduler {
    callback: FrameCallback,
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) {
        if let Some(cb) = self.callback.borrow().as_ref() {
            if let Err(e) = dom::request_animation_frame(cb) {
                log::error!("requestAnimationFrame failed: {:?}", e);
            }
        }
    }
}

struct Animation {
    field: CursorField,
    canvas: CanvasRenderer,
    targets: DomTargets,
    clock: FrameClock,
}

impl Animation {
    fn frame(&mut self, scheduler: &mut RafScheduler) {
        let dt = self.clock.tick();
        let targets = self.targets.snapshot();
        self.field
            .frame(dt, &targets, &mut self.canvas, &mut self.targets, scheduler);
        if self.field.frames() % 600 == 0 {
            log::debug!("cursor field at {:.0} fps", self.clock.fps());
        }
    }

    fn handle_event(&mut self, event: PointerEvent) {
        if let PointerEvent::Resized { width, height } = event {
            self.canvas.resize(Vec2::new(width, height));
        }
        self.field.handle_event(event);
    }
}

/// Start the animation if the page has a field canvas.
///
/// Returns `Ok(false)` when the canvas is absent.
pub fn mount(config: &FolioConfig) -> Result<bool, JsValue> {
    let Some(canvas) = dom::by_id::<HtmlCanvasElement>(&config.dom.canvas_id) else {
        log::debug!("no #{} on this page, skipping cursor field", config.dom.canvas_id);
        return Ok(false);
    };

    let viewport = dom::viewport_size();
    let mut renderer = CanvasRenderer::new(canvas)?;
    renderer.resize(viewport);

    let targets = DomTargets::collect(
        &config.dom.highlight_class,
        &config.dom.highlighted_class,
        &config.dom.spotlight_id,
    )?;
    log::info!(
        "cursor field: {} particles, {} highlightable elements",
        config.field.particle_count,
        targets.len()
    );

    let state = Rc::new(RefCell::new(Animation {
        field: CursorField::new(viewport, config.spotlight.clone(), config.field.clone()),
        canvas: renderer,
        targets,
        clock: FrameClock::new(),
    }));

    bind_input(&state)?;

    let callback: FrameCallback = Rc::new(RefCell::new(None));
    let handle = callback.clone();
    let loop_state = state.clone();
    *handle.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let mut scheduler = RafScheduler {
            callback: callback.clone(),
        };
        loop_state.borrow_mut().frame(&mut scheduler);
    }) as Box<dyn FnMut()>));

    RafScheduler { callback: handle }.request_frame();
    Ok(true)
}

fn bind_input(state: &Rc<RefCell<Animation>>) -> Result<(), JsValue> {
    let win = dom::window()?;
    let doc = dom::document()?;

    let s = state.clone();
    dom::listen(&doc, "mousemove", move |e: MouseEvent| {
        let at = Vec2::new(e.client_x() as f32, e.client_y() as f32);
        s.borrow_mut().handle_event(PointerEvent::Moved(at));
    })?;

    if let Some(root) = doc.document_element() {
        let s = state.clone();
        dom::listen(&root, "mouseleave", move |_: web_sys::Event| {
            s.borrow_mut().handle_event(PointerEvent::Left);
        })?;
    }

    let s = state.clone();
    dom::listen(&win, "resize", move |_: web_sys::Event| {
        let size = dom::viewport_size();
        s.borrow_mut().handle_event(PointerEvent::Resized {
            width: size.x,
            height: size.y,
        });
    })?;

    Ok(())
}
