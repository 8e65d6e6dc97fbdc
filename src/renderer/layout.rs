//! Responsive canvas sizing

use crate::sim::Cell;

/// Largest canvas side in windowed mode (px)
pub const MAX_WINDOWED_SIZE: f64 = 480.0;
/// Smallest canvas side (px)
pub const MIN_SIZE: f64 = 200.0;
/// Margin kept around the windowed canvas (px)
pub const PADDING: f64 = 32.0;
/// Share of the viewport the canvas may use
pub const VIEWPORT_FILL: f64 = 0.95;
/// Gap between neighbouring cells (px, per side)
pub const CELL_INSET: f64 = 1.0;

/// Square canvas geometry for a `grid` x `grid` board
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasLayout {
    /// Canvas side (px)
    pub size: u32,
    /// Cell side (px)
    pub cell: f64,
}

impl CanvasLayout {
    /// Fit the canvas into a viewport
    pub fn fit(viewport_w: f64, viewport_h: f64, fullscreen: bool, grid: i32) -> Self {
        let size = if fullscreen {
            (viewport_w.min(viewport_h) * VIEWPORT_FILL).floor().max(MIN_SIZE)
        } else {
            let max = MAX_WINDOWED_SIZE.min((viewport_w * VIEWPORT_FILL).floor());
            (max - PADDING).max(MIN_SIZE)
        };
        let size = size as u32;
        Self {
            size,
            cell: size as f64 / grid as f64,
        }
    }

    /// Pixel rectangle `(x, y, w, h)` for a cell, inset so cells don't touch
    pub fn cell_rect(&self, cell: Cell) -> (f64, f64, f64, f64) {
        (
            cell.x as f64 * self.cell + CELL_INSET,
            cell.y as f64 * self.cell + CELL_INSET,
            self.cell - 2.0 * CELL_INSET,
            self.cell - 2.0 * CELL_INSET,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_windowed_size() {
        // Wide window: capped at 480 minus padding
        let layout = CanvasLayout::fit(1920.0, 1080.0, false, 20);
        assert_eq!(layout.size, 448);
        assert!((layout.cell - 22.4).abs() < 1e-9);

        // Phone: 95% of width minus padding
        let layout = CanvasLayout::fit(400.0, 800.0, false, 20);
        assert_eq!(layout.size, 348);

        // Tiny viewport clamps up
        let layout = CanvasLayout::fit(100.0, 100.0, false, 20);
        assert_eq!(layout.size, 200);
    }

    #[test]
    fn test_fullscreen_uses_short_side() {
        let layout = CanvasLayout::fit(1920.0, 1080.0, true, 20);
        assert_eq!(layout.size, 1026);
    }

    #[test]
    fn test_cell_rect_inset() {
        let layout = CanvasLayout { size: 400, cell: 20.0 };
        assert_eq!(layout.cell_rect(Cell::new(0, 0)), (1.0, 1.0, 18.0, 18.0));
        assert_eq!(layout.cell_rect(Cell::new(3, 2)), (61.0, 41.0, 18.0, 18.0));
    }
}
