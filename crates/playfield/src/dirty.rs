use crate::rect::Rect;

/// Margin added around the animated bounding rect before repainting, so
/// rounded sprite edges from the previous frame are always covered.
pub const REDRAW_MARGIN_PX: i32 = 5;

/// One entry of the deferred paint queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintRegion {
    Full,
    Area(Rect),
}

/// Decides how much of the viewport a draw tick has to repaint.
///
/// Starts in the full-repaint state; every drawable replacement puts it back
/// there. Between replacements only the union of the animated drawables'
/// screen rects (plus margin) is repainted, together with whatever the
/// previous tick painted.
#[derive(Debug)]
pub struct RedrawPlanner {
    full_repaint_needed: bool,
    last_redraw_area: Option<Rect>,
}

impl Default for RedrawPlanner {
    fn default() -> Self {
        Self {
            full_repaint_needed: true,
            last_redraw_area: None,
        }
    }
}

impl RedrawPlanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_all_dirty(&mut self) {
        self.full_repaint_needed = true;
    }

    pub fn full_repaint_needed(&self) -> bool {
        self.full_repaint_needed
    }

    /// Consumes a pending full repaint, if any.
    pub fn take_full_repaint(&mut self) -> bool {
        let pending = self.full_repaint_needed;
        self.full_repaint_needed = false;
        pending
    }

    pub fn last_redraw_area(&self) -> Option<Rect> {
        self.last_redraw_area
    }

    /// Plans the incremental repaint for one animated tick.
    ///
    /// Animated rects outside the viewport are ignored; when none remain the
    /// recorded area is cleared and nothing is painted. Otherwise the
    /// previous tick's area is repainted first (FIFO order), then the new
    /// expanded area, which becomes the recorded area.
    pub fn plan_incremental(
        &mut self,
        animated_rects: impl IntoIterator<Item = Rect>,
        viewport: Rect,
    ) -> Vec<PaintRegion> {
        let mut bounds: Option<Rect> = None;
        for rect in animated_rects {
            if !rect.intersects(&viewport) {
                continue;
            }
            bounds = Some(match bounds {
                Some(current) => current.union(&rect),
                None => rect,
            });
        }

        let Some(bounds) = bounds else {
            self.last_redraw_area = None;
            return Vec::new();
        };

        let expanded = bounds.expand(REDRAW_MARGIN_PX);
        let mut regions = Vec::with_capacity(2);
        if let Some(previous) = self.last_redraw_area {
            regions.push(PaintRegion::Area(previous));
        }
        regions.push(PaintRegion::Area(expanded));
        self.last_redraw_area = Some(expanded);
        regions
    }
}
