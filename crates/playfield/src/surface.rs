use crate::rect::Rect;

/// CPU paint target over an RGBA frame buffer, with a clip rect.
///
/// All primitives clip against both the frame bounds and the clip rect, so
/// region-limited repaints can reuse the full-frame paint path unchanged.
pub struct Surface<'a> {
    frame: &'a mut [u8],
    width: u32,
    height: u32,
    clip: Rect,
}

impl<'a> Surface<'a> {
    pub fn new(frame: &'a mut [u8], width: u32, height: u32) -> Self {
        let clip = Rect::new(0, 0, width as i32, height as i32);
        Self {
            frame,
            width,
            height,
            clip,
        }
    }

    pub fn with_clip(frame: &'a mut [u8], width: u32, height: u32, clip: Rect) -> Self {
        let bounds = Rect::new(0, 0, width as i32, height as i32);
        let clip = bounds.intersection(&clip).unwrap_or(Rect::new(0, 0, 0, 0));
        Self {
            frame,
            width,
            height,
            clip,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn clip_bounds(&self) -> Rect {
        self.clip
    }

    /// Whether painting `rect` would touch the clipped area at all.
    pub fn hit_clip(&self, rect: &Rect) -> bool {
        self.clip.intersects(rect)
    }

    /// Fills the whole clipped area.
    pub fn fill_clip(&mut self, color: [u8; 4]) {
        self.fill_rect(self.clip, color);
    }

    pub fn fill_rect(&mut self, rect: Rect, color: [u8; 4]) {
        let Some(clipped) = rect.intersection(&self.clip) else {
            return;
        };
        for py in clipped.y..clipped.bottom() {
            for px in clipped.x..clipped.right() {
                self.write_pixel(px as u32, py as u32, color);
            }
        }
    }

    /// Source-over blends `color` (using its alpha) onto the clipped area.
    pub fn blend_rect(&mut self, rect: Rect, color: [u8; 4]) {
        let Some(clipped) = rect.intersection(&self.clip) else {
            return;
        };
        for py in clipped.y..clipped.bottom() {
            for px in clipped.x..clipped.right() {
                self.blend_pixel(px as u32, py as u32, color);
            }
        }
    }

    /// Horizontal line across the full clip width.
    pub fn hline(&mut self, y: i32, color: [u8; 4]) {
        self.fill_rect(Rect::new(self.clip.x, y, self.clip.width, 1), color);
    }

    /// Vertical line across the full clip height.
    pub fn vline(&mut self, x: i32, color: [u8; 4]) {
        self.fill_rect(Rect::new(x, self.clip.y, 1, self.clip.height), color);
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: [u8; 4]) {
        if !self.clip.contains(x, y) {
            return;
        }
        self.write_pixel(x as u32, y as u32, color);
    }

    /// Nearest-neighbour blits an RGBA image into `dest`.
    ///
    /// Fully transparent source pixels are skipped; partially transparent
    /// ones are source-over blended.
    pub fn blit_scaled(&mut self, src_width: u32, src_height: u32, src_rgba: &[u8], dest: Rect) {
        if dest.is_empty() || src_width == 0 || src_height == 0 {
            return;
        }
        if src_rgba.len() < (src_width as usize * src_height as usize) * 4 {
            return;
        }
        let Some(clipped) = dest.intersection(&self.clip) else {
            return;
        };
        for py in clipped.y..clipped.bottom() {
            let sy = ((py - dest.y) as i64 * src_height as i64 / dest.height as i64) as u32;
            for px in clipped.x..clipped.right() {
                let sx = ((px - dest.x) as i64 * src_width as i64 / dest.width as i64) as u32;
                let offset = ((sy * src_width + sx) * 4) as usize;
                let pixel = [
                    src_rgba[offset],
                    src_rgba[offset + 1],
                    src_rgba[offset + 2],
                    src_rgba[offset + 3],
                ];
                match pixel[3] {
                    0 => {}
                    255 => self.write_pixel(px as u32, py as u32, pixel),
                    _ => self.blend_pixel(px as u32, py as u32, pixel),
                }
            }
        }
    }

    fn write_pixel(&mut self, x: u32, y: u32, color: [u8; 4]) {
        let offset = ((y * self.width + x) * 4) as usize;
        if offset + 4 > self.frame.len() {
            return;
        }
        self.frame[offset..offset + 4].copy_from_slice(&color);
    }

    fn blend_pixel(&mut self, x: u32, y: u32, color: [u8; 4]) {
        let offset = ((y * self.width + x) * 4) as usize;
        if offset + 4 > self.frame.len() {
            return;
        }
        let alpha = color[3] as u32;
        let inverse = 255 - alpha;
        for channel in 0..3 {
            let src = color[channel] as u32;
            let dst = self.frame[offset + channel] as u32;
            self.frame[offset + channel] = ((src * alpha + dst * inverse) / 255) as u8;
        }
        self.frame[offset + 3] = 255;
    }
}
