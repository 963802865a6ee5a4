use std::collections::{HashSet, VecDeque};

use tracing::warn;

use crate::dirty::{PaintRegion, RedrawPlanner};
use crate::drawable::{sort_drawables, Drawable};
use crate::grouping::{group_runs, SlotLayout};
use crate::proxy::{CommandSink, Tool};
use crate::rect::Rect;
use crate::surface::Surface;
use crate::text;
use crate::textures::TextureRegistry;
use crate::transform::FieldTransform;

/// Height of the cell-coordinate readout along the bottom edge.
pub const INFO_BAR_HEIGHT: i32 = 25;

const BACKGROUND_COLOR: [u8; 4] = [255, 255, 255, 255];
const BACKGROUND_COLOR_TRANSPARENT: [u8; 4] = [255, 255, 255, 230];
const GRID_COLOR: [u8; 4] = [46, 52, 54, 255];
const OVERLAY_COLOR: [u8; 4] = [0, 40, 255, 50];
const INFO_BAR_TEXT_INSET: i32 = 5;

/// Renders the playfield and owns all view/interaction state.
///
/// Drawing is deferred: `set_drawables`, `draw` and the pointer handlers only
/// enqueue paint regions; the owning event loop drains the queue with
/// `take_pending` and paints each region via `paint_region`.
pub struct PlayfieldDrawer {
    textures: TextureRegistry,
    sink: Box<dyn CommandSink>,
    transform: FieldTransform,
    viewport_width: u32,
    viewport_height: u32,

    drawables: Vec<Drawable>,
    animated: Vec<Drawable>,
    planner: RedrawPlanner,
    current_tick: u64,

    pending: VecDeque<PaintRegion>,
    double_buffering: bool,
    sync_to_screen: bool,

    tool: Tool,
    selected_entity_type: Option<String>,
    selected_entity_texture: Option<String>,

    pointer_x: i32,
    pointer_y: i32,
    pointer_in_bounds: bool,
    drag_anchor: (i32, i32),
    drag_in_progress: bool,

    user_warning: Option<String>,
    warned_missing_textures: HashSet<String>,
}

impl PlayfieldDrawer {
    pub fn new(
        textures: TextureRegistry,
        sink: Box<dyn CommandSink>,
        viewport_width: u32,
        viewport_height: u32,
    ) -> Self {
        let mut pending = VecDeque::new();
        pending.push_back(PaintRegion::Full);
        Self {
            textures,
            sink,
            transform: FieldTransform::default(),
            viewport_width,
            viewport_height,
            drawables: Vec::new(),
            animated: Vec::new(),
            planner: RedrawPlanner::new(),
            current_tick: 0,
            pending,
            double_buffering: true,
            sync_to_screen: true,
            tool: Tool::default(),
            selected_entity_type: None,
            selected_entity_texture: None,
            pointer_x: 0,
            pointer_y: 0,
            pointer_in_bounds: false,
            drag_anchor: (0, 0),
            drag_in_progress: false,
            user_warning: None,
            warned_missing_textures: HashSet::new(),
        }
    }

    pub fn textures(&self) -> &TextureRegistry {
        &self.textures
    }

    pub fn textures_mut(&mut self) -> &mut TextureRegistry {
        &mut self.textures
    }

    pub fn transform(&self) -> &FieldTransform {
        &self.transform
    }

    pub fn viewport(&self) -> Rect {
        Rect::new(0, 0, self.viewport_width as i32, self.viewport_height as i32)
    }

    // --- drawable state ---

    /// Replaces the drawn set. Triggers a full repaint on the next flush.
    pub fn set_drawables(&mut self, mut drawables: Vec<Drawable>) {
        sort_drawables(&mut drawables);
        self.drawables = drawables;
        self.recompute_animated();
        self.planner.mark_all_dirty();
        self.draw(self.current_tick);
    }

    /// Advances the drawn frame to `tick` and enqueues the needed repaints.
    pub fn draw(&mut self, tick: u64) {
        self.current_tick = tick;
        if !self.animated.is_empty() {
            sort_drawables(&mut self.drawables);
        }
        if self.planner.take_full_repaint() {
            self.request_repaint_all();
        } else if !self.animated.is_empty() {
            let cell = self.transform.cell_size_px().round() as i32;
            let rects: Vec<Rect> = self
                .animated
                .iter()
                .map(|drawable| {
                    let (x, y) = self.transform.cell_to_screen(drawable.x, drawable.y);
                    Rect::new(x, y, cell, cell)
                })
                .collect();
            let viewport = self.viewport();
            for region in self.planner.plan_incremental(rects, viewport) {
                self.pending.push_back(region);
            }
        }
        // finished one-shot animations drop out of the animated set here
        self.recompute_animated();
    }

    fn recompute_animated(&mut self) {
        self.animated = self
            .drawables
            .iter()
            .filter(|drawable| {
                drawable.animated || self.textures.is_animated(&drawable.texture_handle)
            })
            .cloned()
            .collect();
    }

    // --- view state ---

    pub fn reset_zoom_and_pan(&mut self) {
        self.transform.reset();
    }

    pub fn set_double_buffering(&mut self, enabled: bool) {
        self.double_buffering = enabled;
    }

    pub fn double_buffering(&self) -> bool {
        self.double_buffering
    }

    pub fn set_sync_to_screen(&mut self, enabled: bool) {
        self.sync_to_screen = enabled;
    }

    pub fn sync_to_screen(&self) -> bool {
        self.sync_to_screen
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == self.viewport_width && height == self.viewport_height {
            return;
        }
        self.viewport_width = width;
        self.viewport_height = height;
        self.request_repaint_all();
    }

    // --- tool state ---

    pub fn set_selected_tool(&mut self, tool: Tool) {
        self.tool = tool;
        self.repaint_pointer_area();
    }

    pub fn selected_tool(&self) -> Tool {
        self.tool
    }

    pub fn set_selected_entity_type(
        &mut self,
        type_name: impl Into<String>,
        texture_handle: impl Into<String>,
    ) {
        self.selected_entity_type = Some(type_name.into());
        self.selected_entity_texture = Some(texture_handle.into());
        self.repaint_pointer_area();
    }

    pub fn clear_selected_entity_type(&mut self) {
        self.selected_entity_type = None;
        self.selected_entity_texture = None;
        self.repaint_pointer_area();
    }

    // --- pointer protocol ---

    pub fn pointer_pressed(&mut self, x: i32, y: i32) {
        self.drag_anchor = (x, y);
        self.drag_in_progress = false;
    }

    pub fn pointer_released(&mut self, _x: i32, _y: i32) {
        if !self.drag_in_progress {
            let (anchor_x, anchor_y) = self.drag_anchor;
            self.click_at(anchor_x, anchor_y);
        }
        self.drag_in_progress = false;
    }

    pub fn pointer_moved(&mut self, x: i32, y: i32) {
        let old = (self.pointer_x, self.pointer_y);
        self.pointer_x = x;
        self.pointer_y = y;
        self.repaint_highlight_around(old.0, old.1);
        self.repaint_highlight_around(x, y);
        self.pending.push_back(PaintRegion::Area(self.info_bar_rect()));
    }

    pub fn pointer_dragged(&mut self, x: i32, y: i32) {
        self.drag_in_progress = true;
        let (anchor_x, anchor_y) = self.drag_anchor;
        self.transform.pan(x - anchor_x, y - anchor_y);
        self.drag_anchor = (x, y);
        self.pointer_x = x;
        self.pointer_y = y;
        self.request_repaint_all();
    }

    pub fn set_pointer_in_bounds(&mut self, in_bounds: bool) {
        self.pointer_in_bounds = in_bounds;
        self.repaint_pointer_area();
    }

    pub fn wheel(&mut self, delta: i32, x: i32, y: i32) {
        self.transform.zoom(delta, (x, y));
        self.request_repaint_all();
    }

    fn click_at(&mut self, x: i32, y: i32) {
        let (cell_x, cell_y) = self.transform.screen_to_cell(x, y);
        match self.tool {
            Tool::Add => match self.selected_entity_type.clone() {
                None => {
                    warn!("spawn_requested_without_selected_type");
                    self.user_warning =
                        Some("Could not add an entity: no entity type selected.".to_string());
                }
                Some(type_name) => {
                    if let Err(error) = self.sink.spawn_entity_at(&type_name, cell_x, cell_y, None)
                    {
                        warn!(
                            error = %error,
                            type_name = %type_name,
                            x = cell_x,
                            y = cell_y,
                            "spawn_entity_failed"
                        );
                        self.user_warning = Some(format!(
                            "Could not add an entity of type {type_name} at (x={cell_x}, y={cell_y})."
                        ));
                    }
                }
            },
            Tool::Sub => {
                if let Err(error) = self.sink.clear_cell(cell_x, cell_y) {
                    warn!(error = %error, x = cell_x, y = cell_y, "clear_cell_failed");
                    self.user_warning =
                        Some(format!("Could not clear cell (x={cell_x}, y={cell_y})."));
                }
            }
            Tool::View | Tool::Blocked => {}
        }
        self.request_repaint_all();
    }

    /// Hands out the last user-facing warning, if one is pending.
    pub fn take_user_warning(&mut self) -> Option<String> {
        self.user_warning.take()
    }

    // --- paint queue ---

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Drains the queued paint regions in FIFO order.
    pub fn take_pending(&mut self) -> Vec<PaintRegion> {
        self.pending.drain(..).collect()
    }

    fn request_repaint_all(&mut self) {
        if self.pending.back() != Some(&PaintRegion::Full) {
            self.pending.push_back(PaintRegion::Full);
        }
    }

    fn repaint_highlight_around(&mut self, x: i32, y: i32) {
        let cell = self.transform.cell_size_px().round() as i32;
        self.pending.push_back(PaintRegion::Area(Rect::new(
            x - cell,
            y - cell,
            cell * 2,
            cell * 2,
        )));
    }

    fn repaint_pointer_area(&mut self) {
        self.repaint_highlight_around(self.pointer_x, self.pointer_y);
        self.pending.push_back(PaintRegion::Area(self.info_bar_rect()));
    }

    fn info_bar_rect(&self) -> Rect {
        Rect::new(
            0,
            self.viewport_height as i32 - INFO_BAR_HEIGHT,
            self.viewport_width as i32,
            INFO_BAR_HEIGHT,
        )
    }

    // --- painting ---

    /// Paints one queued region into the RGBA frame.
    pub fn paint_region(&mut self, frame: &mut [u8], region: PaintRegion) {
        let mut surface = match region {
            PaintRegion::Full => Surface::new(frame, self.viewport_width, self.viewport_height),
            PaintRegion::Area(rect) => {
                Surface::with_clip(frame, self.viewport_width, self.viewport_height, rect)
            }
        };
        self.paint_component(&mut surface);
    }

    fn paint_component(&mut self, surface: &mut Surface<'_>) {
        surface.fill_clip(BACKGROUND_COLOR);
        self.paint_grid(surface);
        self.paint_drawables(surface);
        self.paint_overlay(surface);
    }

    fn paint_grid(&self, surface: &mut Surface<'_>) {
        let clip = surface.clip_bounds();
        let cell = self.transform.cell_size_px();
        if clip.is_empty() || cell <= 0.0 {
            return;
        }
        let (offset_x, offset_y) = self.transform.offset();

        let mut x = offset_x + ((clip.x as f64 - offset_x) / cell).floor() * cell;
        while x <= clip.right() as f64 {
            surface.vline(x.round() as i32, GRID_COLOR);
            x += cell;
        }
        let mut y = offset_y + ((clip.y as f64 - offset_y) / cell).floor() * cell;
        while y <= clip.bottom() as f64 {
            surface.hline(y.round() as i32, GRID_COLOR);
            y += cell;
        }
    }

    fn paint_drawables(&mut self, surface: &mut Surface<'_>) {
        let cell = self.transform.cell_size_px();
        let size = cell.round() as i32;
        for group in group_runs(&self.drawables) {
            let first = &self.drawables[group.start];
            let (x, y) = self.transform.cell_to_screen(first.x, first.y);
            if !surface.hit_clip(&Rect::new(x, y, size, size)) {
                continue;
            }
            let texture = match self.textures.resolve(&first.texture_handle) {
                Ok(texture) => texture,
                Err(error) => {
                    // the item is skipped, everything else still paints
                    if self.warned_missing_textures.insert(first.texture_handle.clone()) {
                        warn!(
                            handle = %first.texture_handle,
                            error = %error,
                            "texture_resolve_failed"
                        );
                    }
                    continue;
                }
            };
            let layout = SlotLayout::for_group(group.count, group.tilable);
            let slot_size = (cell * layout.scale_adjust()).round() as i32;
            for (slot_x, slot_y) in layout.offsets().iter().take(group.count) {
                let slot_px = x + (cell * slot_x).round() as i32;
                let slot_py = y + (cell * slot_y).round() as i32;
                texture.draw(self.current_tick, surface, slot_px, slot_py, slot_size);
            }
        }
    }

    fn paint_overlay(&self, surface: &mut Surface<'_>) {
        if !self.pointer_in_bounds {
            return;
        }
        let size = self.transform.cell_size_px().round() as i32;
        let (cell_x, cell_y) = self.transform.screen_to_cell(self.pointer_x, self.pointer_y);
        let (x, y) = self.transform.cell_to_screen(cell_x as f64, cell_y as f64);
        let cell_rect = Rect::new(x, y, size, size);
        if surface.hit_clip(&cell_rect) {
            match self.tool {
                Tool::Add => {
                    if let Some(handle) = &self.selected_entity_texture {
                        // an unresolvable preview handle just shows no preview
                        if let Ok(texture) = self.textures.resolve(handle) {
                            texture.draw(self.current_tick, surface, x, y, size);
                        }
                    }
                }
                Tool::Sub => surface.blend_rect(cell_rect, BACKGROUND_COLOR_TRANSPARENT),
                Tool::View | Tool::Blocked => {}
            }
            surface.blend_rect(cell_rect, OVERLAY_COLOR);
        }

        let bar = self.info_bar_rect();
        if surface.hit_clip(&bar) {
            surface.fill_rect(bar, BACKGROUND_COLOR);
            let centered =
                (INFO_BAR_HEIGHT as f64 / 2.0 - text::FONT_ASCENT as f64 / 2.0).round() as i32;
            let baseline = self.viewport_height as i32 - centered.max(text::FONT_DESCENT);
            text::draw_text(
                surface,
                INFO_BAR_TEXT_INSET,
                baseline,
                &format!("Cell (x={cell_x}, y={cell_y})"),
                GRID_COLOR,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::proxy::CommandError;
    use crate::textures::TextureImage;

    const RED: [u8; 4] = [200, 30, 30, 255];

    #[derive(Default)]
    struct CommandLog {
        spawns: Vec<(String, i32, i32)>,
        clears: Vec<(i32, i32)>,
        fail: bool,
    }

    struct RecordingSink(Rc<RefCell<CommandLog>>);

    impl CommandSink for RecordingSink {
        fn spawn_entity_at(
            &mut self,
            type_name: &str,
            x: i32,
            y: i32,
            _program: Option<&str>,
        ) -> Result<(), CommandError> {
            let mut log = self.0.borrow_mut();
            if log.fail {
                return Err("simulation rejected the command".into());
            }
            log.spawns.push((type_name.to_string(), x, y));
            Ok(())
        }

        fn clear_cell(&mut self, x: i32, y: i32) -> Result<(), CommandError> {
            let mut log = self.0.borrow_mut();
            if log.fail {
                return Err("simulation rejected the command".into());
            }
            log.clears.push((x, y));
            Ok(())
        }
    }

    fn solid(color: [u8; 4]) -> TextureImage {
        TextureImage::from_rgba(1, 1, color.to_vec()).unwrap()
    }

    fn test_drawer() -> (PlayfieldDrawer, Rc<RefCell<CommandLog>>) {
        let mut textures = TextureRegistry::new();
        textures.register_static("wall", solid(RED)).unwrap();
        textures
            .register_animated("coin", vec![solid(RED), solid([30, 200, 30, 255])], 1, true)
            .unwrap();
        let log = Rc::new(RefCell::new(CommandLog::default()));
        let drawer = PlayfieldDrawer::new(textures, Box::new(RecordingSink(log.clone())), 200, 200);
        (drawer, log)
    }

    fn frame_for(drawer: &PlayfieldDrawer) -> Vec<u8> {
        vec![0; (drawer.viewport_width * drawer.viewport_height * 4) as usize]
    }

    fn pixel(frame: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
        let offset = ((y * width + x) * 4) as usize;
        [
            frame[offset],
            frame[offset + 1],
            frame[offset + 2],
            frame[offset + 3],
        ]
    }

    #[test]
    fn click_without_drag_spawns_at_the_pressed_cell() {
        let (mut drawer, log) = test_drawer();
        drawer.set_selected_tool(Tool::Add);
        drawer.set_selected_entity_type("crate", "wall");
        drawer.pointer_pressed(70, 70);
        drawer.pointer_released(70, 70);
        assert_eq!(log.borrow().spawns, vec![("crate".to_string(), 1, 1)]);
        assert!(drawer.take_user_warning().is_none());
    }

    #[test]
    fn drag_pans_and_suppresses_the_click() {
        let (mut drawer, log) = test_drawer();
        drawer.set_selected_tool(Tool::Sub);
        drawer.pointer_pressed(70, 70);
        drawer.pointer_dragged(80, 75);
        drawer.pointer_dragged(85, 75);
        drawer.pointer_released(85, 75);
        assert!(log.borrow().clears.is_empty());
        assert_eq!(drawer.transform().offset(), (32.0 + 15.0, 32.0 + 5.0));
    }

    #[test]
    fn add_without_selected_type_warns_and_does_nothing() {
        let (mut drawer, log) = test_drawer();
        drawer.set_selected_tool(Tool::Add);
        drawer.pointer_pressed(70, 70);
        drawer.pointer_released(70, 70);
        assert!(log.borrow().spawns.is_empty());
        assert!(drawer.take_user_warning().is_some());
        // the warning is handed out once
        assert!(drawer.take_user_warning().is_none());
    }

    #[test]
    fn failing_commands_are_caught_and_surfaced() {
        let (mut drawer, log) = test_drawer();
        log.borrow_mut().fail = true;
        drawer.set_selected_tool(Tool::Sub);
        drawer.pointer_pressed(10, 10);
        drawer.pointer_released(10, 10);
        assert!(log.borrow().clears.is_empty());
        assert!(drawer.take_user_warning().is_some());
    }

    #[test]
    fn view_and_blocked_tools_ignore_clicks() {
        let (mut drawer, log) = test_drawer();
        for tool in [Tool::View, Tool::Blocked] {
            drawer.set_selected_tool(tool);
            drawer.pointer_pressed(70, 70);
            drawer.pointer_released(70, 70);
        }
        let log = log.borrow();
        assert!(log.spawns.is_empty() && log.clears.is_empty());
    }

    #[test]
    fn replacing_drawables_requests_a_full_repaint_each_time() {
        let (mut drawer, _) = test_drawer();
        drawer.take_pending();
        drawer.set_drawables(vec![Drawable::new(1.0, 1.0, 0, "wall")]);
        assert_eq!(drawer.take_pending(), vec![PaintRegion::Full]);
        drawer.set_drawables(vec![Drawable::new(2.0, 1.0, 0, "wall")]);
        assert_eq!(drawer.take_pending(), vec![PaintRegion::Full]);
    }

    #[test]
    fn static_scenes_skip_redundant_draw_ticks() {
        let (mut drawer, _) = test_drawer();
        drawer.set_drawables(vec![Drawable::new(1.0, 1.0, 0, "wall")]);
        drawer.take_pending();
        drawer.draw(1);
        drawer.draw(2);
        assert!(!drawer.has_pending());
    }

    #[test]
    fn animated_scenes_enqueue_incremental_regions() {
        let (mut drawer, _) = test_drawer();
        drawer.set_drawables(vec![Drawable::new(1.0, 1.0, 0, "coin")]);
        drawer.take_pending();
        drawer.draw(1);
        let first = drawer.take_pending();
        assert_eq!(first.len(), 1);
        assert!(matches!(first[0], PaintRegion::Area(_)));
        drawer.draw(2);
        // previous area plus the new one
        assert_eq!(drawer.take_pending().len(), 2);
    }

    #[test]
    fn full_paint_fills_background_and_grid() {
        let (mut drawer, _) = test_drawer();
        let mut frame = frame_for(&drawer);
        drawer.paint_region(&mut frame, PaintRegion::Full);
        assert_eq!(pixel(&frame, 200, 5, 5), BACKGROUND_COLOR);
        // grid lines run through offset + k * cell
        assert_eq!(pixel(&frame, 200, 32, 10), GRID_COLOR);
        assert_eq!(pixel(&frame, 200, 10, 64), GRID_COLOR);
    }

    #[test]
    fn drawables_paint_into_their_cells() {
        let (mut drawer, _) = test_drawer();
        drawer.set_drawables(vec![Drawable::new(1.0, 1.0, 0, "wall")]);
        let mut frame = frame_for(&drawer);
        drawer.paint_region(&mut frame, PaintRegion::Full);
        assert_eq!(pixel(&frame, 200, 70, 70), RED);
        assert_eq!(pixel(&frame, 200, 70, 100), BACKGROUND_COLOR);
    }

    #[test]
    fn three_stacked_drawables_fill_three_quarter_slots() {
        let (mut drawer, _) = test_drawer();
        drawer.set_drawables(vec![
            Drawable::new(1.0, 1.0, 0, "wall"),
            Drawable::new(1.0, 1.0, 0, "wall"),
            Drawable::new(1.0, 1.0, 0, "wall"),
        ]);
        let mut frame = frame_for(&drawer);
        drawer.paint_region(&mut frame, PaintRegion::Full);
        // quarter slots at (64,64), (80,64) and (64,80) are painted
        assert_eq!(pixel(&frame, 200, 70, 70), RED);
        assert_eq!(pixel(&frame, 200, 85, 70), RED);
        assert_eq!(pixel(&frame, 200, 70, 85), RED);
        // the fourth slot stays empty
        assert_eq!(pixel(&frame, 200, 85, 85), BACKGROUND_COLOR);
    }

    #[test]
    fn unknown_texture_skips_the_item_but_keeps_painting() {
        let (mut drawer, _) = test_drawer();
        drawer.set_drawables(vec![
            Drawable::new(1.0, 1.0, 0, "ghost"),
            Drawable::new(2.0, 1.0, 0, "wall"),
        ]);
        let mut frame = frame_for(&drawer);
        drawer.paint_region(&mut frame, PaintRegion::Full);
        assert_eq!(pixel(&frame, 200, 70, 70), BACKGROUND_COLOR);
        assert_eq!(pixel(&frame, 200, 102, 70), RED);
    }

    #[test]
    fn hover_highlight_and_info_bar_paint_when_pointer_is_in_bounds() {
        let (mut drawer, _) = test_drawer();
        drawer.set_pointer_in_bounds(true);
        drawer.pointer_moved(70, 70);
        let mut frame = frame_for(&drawer);
        drawer.paint_region(&mut frame, PaintRegion::Full);

        let highlighted = pixel(&frame, 200, 70, 70);
        assert_ne!(highlighted, BACKGROUND_COLOR);
        assert!(highlighted[2] > highlighted[0], "expected a blue tint");

        // info bar carries grid-colored text
        let mut text_pixels = 0;
        for y in (200 - INFO_BAR_HEIGHT as u32)..200 {
            for x in 0..200 {
                if pixel(&frame, 200, x, y) == GRID_COLOR {
                    text_pixels += 1;
                }
            }
        }
        assert!(text_pixels > 0);
    }

    #[test]
    fn pointer_out_of_bounds_paints_no_overlay() {
        let (mut drawer, _) = test_drawer();
        drawer.pointer_moved(70, 70);
        let mut frame = frame_for(&drawer);
        drawer.paint_region(&mut frame, PaintRegion::Full);
        assert_eq!(pixel(&frame, 200, 70, 70), BACKGROUND_COLOR);
    }

    #[test]
    fn resize_requests_a_full_repaint() {
        let (mut drawer, _) = test_drawer();
        drawer.take_pending();
        drawer.resize(300, 300);
        assert_eq!(drawer.take_pending(), vec![PaintRegion::Full]);
        drawer.resize(300, 300);
        assert!(!drawer.has_pending());
    }

    #[test]
    fn reset_restores_the_initial_view() {
        let (mut drawer, _) = test_drawer();
        drawer.pointer_pressed(0, 0);
        drawer.pointer_dragged(50, 80);
        drawer.wheel(-2, 100, 100);
        drawer.reset_zoom_and_pan();
        assert_eq!(drawer.transform(), &FieldTransform::default());
    }
}
