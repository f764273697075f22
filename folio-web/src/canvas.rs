//! Canvas 2D backend for the particle field.

use std::f64::consts::TAU;

use folio::{Color, FieldCanvas, Shadow, Vec2};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    dpr: f64,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
        Ok(Self { canvas, ctx, dpr })
    }

    /// Match the backing store to `size` CSS pixels.
    pub fn resize(&mut self, size: Vec2) {
        let w = (size.x as f64 * self.dpr).round().max(1.0) as u32;
        let h = (size.y as f64 * self.dpr).round().max(1.0) as u32;
        if self.canvas.width() != w || self.canvas.height() != h {
            self.canvas.set_width(w);
            self.canvas.set_height(h);
        }
        let _ = self.ctx.set_transform(self.dpr, 0.0, 0.0, self.dpr, 0.0, 0.0);
    }
}

impl FieldCanvas for CanvasRenderer {
    fn clear(&mut self, size: Vec2, background: Color) {
        self.ctx.set_global_alpha(1.0);
        self.ctx.set_shadow_blur(0.0);
        self.ctx.set_fill_style_str(&background.to_hex());
        self.ctx.fill_rect(0.0, 0.0, size.x as f64, size.y as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, fill: Color, alpha: f32, shadow: &Shadow) {
        self.ctx.set_global_alpha(alpha as f64);
        self.ctx.set_shadow_blur(shadow.blur as f64);
        self.ctx.set_shadow_color(&shadow.color.to_rgba(shadow.alpha));
        self.ctx.set_fill_style_str(&fill.to_hex());
        self.ctx.begin_path();
        if self
            .ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU)
            .is_ok()
        {
            self.ctx.fill();
        }
    }
}
