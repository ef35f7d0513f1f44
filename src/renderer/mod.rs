//! Canvas 2D rendering module
//!
//! Draws the whole scene every frame: drops as filled teardrop curves with
//! their problem text, then the sea as a flat band over the bottom edge.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::consts::*;
use crate::sim::{Drop, GameState};

const SEA_COLOR: &str = "#00bcd4";
const DROP_COLOR: &str = "#00bcd4";
const GOLDEN_DROP_COLOR: &str = "#ffeb3b";
const DROP_OUTLINE_COLOR: &str = "#fff";
const TEXT_COLOR: &str = "#333";

pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    /// Wrap an existing canvas, sizing its backing store for the device pixel ratio
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let dpr = web_sys::window()
            .map(|w| w.device_pixel_ratio())
            .unwrap_or(1.0)
            .max(1.0);

        canvas.set_width((CANVAS_WIDTH as f64 * dpr) as u32);
        canvas.set_height((CANVAS_HEIGHT as f64 * dpr) as u32);

        let style = canvas.style();
        style.set_property("width", &format!("{}px", CANVAS_WIDTH))?;
        style.set_property("height", &format!("{}px", CANVAS_HEIGHT))?;

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into()?;
        ctx.scale(dpr, dpr)?;

        Ok(Self { canvas, ctx })
    }

    /// Clear the whole backing store
    pub fn clear(&self) {
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
    }

    /// Draw every live drop
    pub fn draw_drops(&self, state: &GameState) {
        for drop in &state.drops {
            self.draw_drop(drop);
        }
    }

    fn draw_drop(&self, drop: &Drop) {
        let x = drop.pos.x as f64;
        let y = drop.pos.y as f64;
        let w = drop.size as f64;
        let h = drop.size as f64;

        let fill = if drop.golden {
            GOLDEN_DROP_COLOR
        } else {
            DROP_COLOR
        };

        self.ctx.set_fill_style_str(fill);
        self.ctx.set_stroke_style_str(DROP_OUTLINE_COLOR);
        self.ctx.set_line_width(4.0);

        // Teardrop: one bezier from the tip swinging wide on both sides
        self.ctx.begin_path();
        self.ctx.move_to(x, y);
        self.ctx.bezier_curve_to(x + w, y + h, x - w, y + h, x, y);
        self.ctx.close_path();
        self.ctx.fill();
        self.ctx.stroke();

        self.ctx.set_fill_style_str(TEXT_COLOR);
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");

        self.ctx.set_font("20px Arial");
        self.ctx
            .fill_text(&drop.problem.a.to_string(), x + 3.0, y + 32.0)
            .ok();
        self.ctx
            .fill_text(&drop.problem.b.to_string(), x + 3.0, y + 64.0)
            .ok();

        self.ctx.set_font("32px Arial");
        self.ctx
            .fill_text(&drop.problem.op.glyph().to_string(), x - 16.0, y + 48.0)
            .ok();
    }

    /// Draw the sea band over the bottom of the playfield
    pub fn draw_sea(&self, state: &GameState) {
        let h = (CANVAS_HEIGHT * state.sea_level) as f64;

        self.ctx.set_fill_style_str(SEA_COLOR);
        self.ctx
            .fill_rect(0.0, CANVAS_HEIGHT as f64 - h, CANVAS_WIDTH as f64, h);
    }
}
