//! Canvas2D renderer

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::colors;
use super::layout::CanvasLayout;
use super::{RenderError, Renderer};
use crate::sim::{BoardView, Cell};

pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    layout: CanvasLayout,
    grid: i32,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement, grid: i32) -> Result<Self, RenderError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| RenderError(format!("getContext failed: {:?}", e)))?
            .ok_or_else(|| RenderError("2d context unavailable".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| RenderError("context is not a CanvasRenderingContext2d".into()))?;

        let size = canvas.width();
        Ok(Self {
            canvas,
            ctx,
            layout: CanvasLayout {
                size,
                cell: size as f64 / grid as f64,
            },
            grid,
        })
    }

    pub fn layout(&self) -> CanvasLayout {
        self.layout
    }

    fn fill_cell(&self, cell: Cell) {
        let (x, y, w, h) = self.layout.cell_rect(cell);
        self.ctx.fill_rect(x, y, w, h);
    }
}

impl Renderer for CanvasRenderer {
    fn draw(&mut self, board: &BoardView<'_>) -> Result<(), RenderError> {
        let side = self.layout.size as f64;
        self.ctx.clear_rect(0.0, 0.0, side, side);

        self.ctx.set_fill_style_str(colors::BACKGROUND);
        self.ctx.fill_rect(0.0, 0.0, side, side);

        self.ctx.set_fill_style_str(colors::FOOD);
        self.fill_cell(board.food);

        for (i, cell) in board.snake.iter().enumerate() {
            let color = if i == 0 {
                colors::SNAKE_HEAD
            } else {
                colors::SNAKE_BODY
            };
            self.ctx.set_fill_style_str(color);
            self.fill_cell(*cell);
        }
        Ok(())
    }

    fn resize(&mut self, viewport_w: f64, viewport_h: f64, fullscreen: bool) {
        self.layout = CanvasLayout::fit(viewport_w, viewport_h, fullscreen, self.grid);
        self.canvas.set_width(self.layout.size);
        self.canvas.set_height(self.layout.size);
        log::debug!(
            "Canvas resized to {}px (cell {:.1}px, fullscreen: {})",
            self.layout.size,
            self.layout.cell,
            fullscreen
        );
    }
}
