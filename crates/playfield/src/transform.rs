/// Edge length of one grid cell at scale 1.0, in pixels.
pub const CELL_SIZE: f64 = 32.0;
pub const SCALE_MIN: f64 = 0.4;
pub const SCALE_MAX: f64 = 10.0;

/// Pan/zoom state mapping cell coordinates to screen pixels.
///
/// The initial view places cell (0, 0) one cell in from the window corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldTransform {
    offset_x: f64,
    offset_y: f64,
    scale: f64,
}

impl Default for FieldTransform {
    fn default() -> Self {
        Self {
            offset_x: CELL_SIZE,
            offset_y: CELL_SIZE,
            scale: 1.0,
        }
    }
}

impl FieldTransform {
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn offset(&self) -> (f64, f64) {
        (self.offset_x, self.offset_y)
    }

    /// Screen size of one cell at the current zoom.
    pub fn cell_size_px(&self) -> f64 {
        CELL_SIZE * self.scale
    }

    pub fn cell_to_screen(&self, x: f64, y: f64) -> (i32, i32) {
        let cell = self.cell_size_px();
        (
            (x * cell + self.offset_x).round() as i32,
            (y * cell + self.offset_y).round() as i32,
        )
    }

    pub fn screen_to_cell(&self, px: i32, py: i32) -> (i32, i32) {
        let cell = self.cell_size_px();
        (
            ((px as f64 - self.offset_x) / cell).floor() as i32,
            ((py as f64 - self.offset_y) / cell).floor() as i32,
        )
    }

    pub fn pan(&mut self, dx: i32, dy: i32) {
        self.offset_x += dx as f64;
        self.offset_y += dy as f64;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Zooms by `wheel_delta` notches around `pivot` (screen pixels).
    ///
    /// Positive delta zooms out. The step grows with the current scale so
    /// zooming feels uniform across the range, and the grid point under the
    /// pivot stays put.
    pub fn zoom(&mut self, wheel_delta: i32, pivot: (i32, i32)) {
        let step = 0.1 * self.scale.ceil();
        let new_scale = (self.scale - wheel_delta as f64 * step).clamp(SCALE_MIN, SCALE_MAX);
        let stretch = new_scale / self.scale;
        let pivot_dx = pivot.0 as f64 - self.offset_x;
        let pivot_dy = pivot.1 as f64 - self.offset_y;
        self.offset_x += pivot_dx * (1.0 - stretch);
        self.offset_y += pivot_dy * (1.0 - stretch);
        self.scale = new_scale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_view_offsets_by_one_cell() {
        let t = FieldTransform::default();
        assert_eq!(t.cell_to_screen(0.0, 0.0), (32, 32));
        assert_eq!(t.screen_to_cell(32, 32), (0, 0));
        assert_eq!(t.screen_to_cell(31, 31), (-1, -1));
    }

    #[test]
    fn cell_mapping_rounds_to_nearest_pixel() {
        let mut t = FieldTransform::default();
        t.zoom(-1, (0, 0));
        // scale 1.1: cell 3 sits at 3 * 35.2 + offset
        let (x, _) = t.cell_to_screen(3.0, 0.0);
        let (ox, _) = t.offset();
        assert_eq!(x, (3.0 * 35.2 + ox).round() as i32);
    }

    #[test]
    fn zoom_step_scales_with_current_zoom() {
        let mut t = FieldTransform::default();
        t.zoom(-1, (0, 0));
        assert!((t.scale() - 1.1).abs() < 1e-9);

        let mut far = FieldTransform::default();
        far.zoom(-40, (0, 0));
        assert!((far.scale() - 5.0).abs() < 1e-9);
        far.zoom(-1, (0, 0));
        assert!((far.scale() - 5.5).abs() < 1e-9);
    }

    #[test]
    fn zoom_clamps_to_scale_range() {
        let mut t = FieldTransform::default();
        t.zoom(1000, (0, 0));
        assert_eq!(t.scale(), SCALE_MIN);
        t.zoom(-100_000, (0, 0));
        assert_eq!(t.scale(), SCALE_MAX);
    }

    #[test]
    fn zoom_keeps_cell_under_pivot() {
        let mut t = FieldTransform::default();
        let before = t.screen_to_cell(100, 100);
        t.zoom(-1, (100, 100));
        assert!((t.scale() - 1.1).abs() < 1e-9);
        assert_eq!(t.screen_to_cell(100, 100), before);
    }

    #[test]
    fn reset_restores_initial_state_idempotently() {
        let mut t = FieldTransform::default();
        t.pan(123, -45);
        t.zoom(-3, (200, 150));
        t.reset();
        assert_eq!(t, FieldTransform::default());
        t.reset();
        assert_eq!(t, FieldTransform::default());
    }
}
