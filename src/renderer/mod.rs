//! Canvas 2D rendering
//!
//! Draws a sim `Snapshot` onto the HTML canvas. The simulation never sees
//! this module; it only exposes grid-cell coordinates which are scaled by
//! the grid's `cell_size` here. Visual preferences (palette, grid lines)
//! come from `Settings` each frame so toggles apply immediately.

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::settings::Settings;
use crate::sim::Snapshot;

/// Neon palette from the PlayPoints theme
mod palette {
    pub const BACKGROUND: &str = "#0b0c15";
    pub const FOOD: &str = "#ff0055";
    pub const HEAD: &str = "#00f3ff";
    pub const BODY: &str = "#bc13fe";
    pub const OUTLINE: &str = "#000";
    pub const GRID_LINE: &str = "#1c1e2e";

    pub const HC_BACKGROUND: &str = "#000000";
    pub const HC_FOOD: &str = "#ffff00";
    pub const HC_HEAD: &str = "#ffffff";
    pub const HC_BODY: &str = "#00ff00";
    pub const HC_GRID_LINE: &str = "#444444";
}

/// Renders snapshots onto one canvas
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas 2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self {
            ctx,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
        })
    }

    /// Clear to the background color (also used by `start()` to wipe the
    /// previous run)
    pub fn clear(&self, settings: &Settings) {
        self.ctx.set_fill_style_str(if settings.high_contrast {
            palette::HC_BACKGROUND
        } else {
            palette::BACKGROUND
        });
        self.ctx.fill_rect(0.0, 0.0, self.width, self.height);
    }

    /// Draw one frame
    pub fn draw(&self, snapshot: &Snapshot, settings: &Settings) {
        self.clear(settings);

        let cell = snapshot.grid.cell_size as f64;
        let (food_color, head_color, body_color) = if settings.high_contrast {
            (palette::HC_FOOD, palette::HC_HEAD, palette::HC_BODY)
        } else {
            (palette::FOOD, palette::HEAD, palette::BODY)
        };

        if settings.show_grid {
            self.draw_grid_lines(snapshot, settings.high_contrast);
        }

        // Food, with a neon glow
        self.ctx.set_fill_style_str(food_color);
        self.ctx.set_shadow_blur(10.0);
        self.ctx.set_shadow_color(food_color);
        self.ctx.fill_rect(
            snapshot.food.x as f64 * cell,
            snapshot.food.y as f64 * cell,
            cell,
            cell,
        );
        self.ctx.set_shadow_blur(0.0);

        // Snake, head glowing
        for (i, segment) in snapshot.snake.iter().enumerate() {
            let is_head = i == 0;
            self.ctx
                .set_fill_style_str(if is_head { head_color } else { body_color });
            self.ctx.set_shadow_blur(if is_head { 15.0 } else { 0.0 });
            self.ctx.set_shadow_color(head_color);

            let x = segment.x as f64 * cell;
            let y = segment.y as f64 * cell;
            self.ctx.fill_rect(x, y, cell, cell);

            self.ctx.set_stroke_style_str(palette::OUTLINE);
            self.ctx.stroke_rect(x, y, cell, cell);
        }
        self.ctx.set_shadow_blur(0.0);
    }

    fn draw_grid_lines(&self, snapshot: &Snapshot, high_contrast: bool) {
        let cell = snapshot.grid.cell_size as f64;
        self.ctx.set_stroke_style_str(if high_contrast {
            palette::HC_GRID_LINE
        } else {
            palette::GRID_LINE
        });
        self.ctx.begin_path();
        for col in 0..=snapshot.grid.cols {
            let x = col as f64 * cell;
            self.ctx.move_to(x, 0.0);
            self.ctx.line_to(x, snapshot.grid.rows as f64 * cell);
        }
        for row in 0..=snapshot.grid.rows {
            let y = row as f64 * cell;
            self.ctx.move_to(0.0, y);
            self.ctx.line_to(snapshot.grid.cols as f64 * cell, y);
        }
        self.ctx.stroke();
    }
}
