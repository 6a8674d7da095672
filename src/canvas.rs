use glam::Vec2;
use starburst_core::{Blend, Color, Paint, Painter};
use std::f64::consts::TAU;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// `Painter` over a 2D canvas context.
pub struct CanvasPainter {
    ctx: web::CanvasRenderingContext2d,
}

impl CanvasPainter {
    pub fn from_canvas(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("get_context failed: {:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
        ctx.set_line_cap("round");
        Ok(Self { ctx })
    }

    /// Reset state and map CSS pixels onto the backing store.
    pub fn begin_frame(&self, pixel_ratio: f64) {
        _ = self.ctx.set_transform(pixel_ratio, 0.0, 0.0, pixel_ratio, 0.0, 0.0);
        self.ctx.set_global_alpha(1.0);
        _ = self.ctx.set_global_composite_operation("source-over");
        self.ctx.set_shadow_blur(0.0);
    }

    fn apply_fill(&self, paint: &Paint) {
        match paint {
            Paint::Solid(c) => self.ctx.set_fill_style_str(&c.to_string()),
            Paint::Linear { from, to, stops } => {
                let g = self.ctx.create_linear_gradient(
                    from.x as f64,
                    from.y as f64,
                    to.x as f64,
                    to.y as f64,
                );
                add_stops(&g, stops);
                self.ctx.set_fill_style_canvas_gradient(&g);
            }
            Paint::Radial {
                center,
                radius,
                stops,
            } => {
                let (x, y) = (center.x as f64, center.y as f64);
                match self
                    .ctx
                    .create_radial_gradient(x, y, 0.0, x, y, *radius as f64)
                {
                    Ok(g) => {
                        add_stops(&g, stops);
                        self.ctx.set_fill_style_canvas_gradient(&g);
                    }
                    Err(_) => self.ctx.set_fill_style_str("transparent"),
                }
            }
        }
    }
}

fn add_stops(gradient: &web::CanvasGradient, stops: &[(f32, Color)]) {
    for (offset, color) in stops {
        _ = gradient.add_color_stop(offset.clamp(0.0, 1.0), &color.to_string());
    }
}

impl Painter for CanvasPainter {
    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.ctx.set_global_alpha(alpha.clamp(0.0, 1.0) as f64);
    }

    fn set_blend(&mut self, blend: Blend) {
        let op = match blend {
            Blend::SourceOver => "source-over",
            Blend::Lighter => "lighter",
        };
        _ = self.ctx.set_global_composite_operation(op);
    }

    fn set_shadow(&mut self, blur: f32, color: Color) {
        self.ctx.set_shadow_blur(blur as f64);
        self.ctx.set_shadow_color(&color.to_string());
    }

    fn translate(&mut self, offset: Vec2) {
        _ = self.ctx.translate(offset.x as f64, offset.y as f64);
    }

    fn rotate(&mut self, radians: f32) {
        _ = self.ctx.rotate(radians as f64);
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, paint: &Paint) {
        self.apply_fill(paint);
        self.ctx
            .fill_rect(origin.x as f64, origin.y as f64, size.x as f64, size.y as f64);
    }

    fn fill_rounded_rect(&mut self, origin: Vec2, size: Vec2, radius: f32, paint: &Paint) {
        let (x0, y0) = (origin.x as f64, origin.y as f64);
        let (x1, y1) = (x0 + size.x as f64, y0 + size.y as f64);
        let r = radius as f64;
        self.apply_fill(paint);
        self.ctx.begin_path();
        self.ctx.move_to(x0 + r, y0);
        _ = self.ctx.arc_to(x1, y0, x1, y1, r);
        _ = self.ctx.arc_to(x1, y1, x0, y1, r);
        _ = self.ctx.arc_to(x0, y1, x0, y0, r);
        _ = self.ctx.arc_to(x0, y0, x1, y0, r);
        self.ctx.close_path();
        self.ctx.fill();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: &Paint) {
        if radius <= 0.0 {
            return;
        }
        self.apply_fill(paint);
        self.ctx.begin_path();
        _ = self
            .ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU);
        self.ctx.fill();
    }

    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, paint: &Paint) {
        self.apply_fill(paint);
        self.ctx.begin_path();
        _ = self.ctx.ellipse(
            center.x as f64,
            center.y as f64,
            radii.x.max(0.0) as f64,
            radii.y.max(0.0) as f64,
            0.0,
            0.0,
            TAU,
        );
        self.ctx.fill();
    }

    fn fill_arc(&mut self, center: Vec2, radius: f32, start: f32, end: f32, paint: &Paint) {
        self.apply_fill(paint);
        self.ctx.begin_path();
        _ = self.ctx.arc(
            center.x as f64,
            center.y as f64,
            radius.max(0.0) as f64,
            start as f64,
            end as f64,
        );
        self.ctx.fill();
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color, dash: Option<[f32; 2]>) {
        if let Some([on, off]) = dash {
            let pattern = js_sys::Array::of2(&JsValue::from_f64(on as f64), &JsValue::from_f64(off as f64));
            _ = self.ctx.set_line_dash(&pattern);
        }
        self.ctx.set_stroke_style_str(&color.to_string());
        self.ctx.set_line_width(width.max(0.1) as f64);
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.stroke();
        if dash.is_some() {
            _ = self.ctx.set_line_dash(&js_sys::Array::new());
        }
    }

    fn fill_text(&mut self, text: &str, at: Vec2, size_px: f32, color: Color) {
        self.ctx.set_font(&format!("{:.0}px serif", size_px));
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        self.ctx.set_fill_style_str(&color.to_string());
        _ = self.ctx.fill_text(text, at.x as f64, at.y as f64);
    }
}
