//! Raster probe collision
//!
//! The trail game decides collisions by sampling the committed frame: a
//! mover looks a fixed multiple of its own per-tick travel ahead and dies if
//! that pixel is anything but background. The frame is a [`FrameBuffer`]
//! owned and drawn by the simulation, so detection does not depend on any
//! presentation layer.

use glam::Vec2;

use super::state::Color;

/// Minimal drawing surface the simulation paints onto and probes
pub trait RenderSurface {
    /// Surface size in pixels (width, height)
    fn size(&self) -> (u32, u32);
    /// Fill the whole surface with one color
    fn fill(&mut self, color: Color);
    /// Paint a filled circle; pixels outside the surface are ignored
    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color);
    /// Color of the pixel containing `point`, or `None` if it cannot be sampled
    fn sample(&self, point: Vec2) -> Option<Color>;
}

/// Software RGBA frame buffer
#[derive(Clone)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl std::fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![background; width as usize * height as usize],
        }
    }

    /// Buffer covering a world of the given float extent
    pub fn for_world(size: Vec2, background: Color) -> Self {
        Self::new(size.x.max(0.0).ceil() as u32, size.y.max(0.0).ceil() as u32, background)
    }

    /// Pixel index for a point, `None` when off-surface or non-finite
    fn index_of(&self, point: Vec2) -> Option<usize> {
        if !point.is_finite() {
            return None;
        }
        let x = point.x.floor();
        let y = point.y.floor();
        if x < 0.0 || y < 0.0 || x >= self.width as f32 || y >= self.height as f32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Number of pixels not equal to `background`
    pub fn occupied_count(&self, background: Color) -> usize {
        self.pixels.iter().filter(|&&c| c != background).count()
    }
}

impl RenderSurface for FrameBuffer {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn fill(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        if !center.is_finite() || !radius.is_finite() || radius < 0.0 {
            return;
        }
        if self.width == 0 || self.height == 0 {
            return;
        }
        let max_x = self.width as f32 - 1.0;
        let max_y = self.height as f32 - 1.0;
        let x0 = (center.x - radius).floor().max(0.0);
        let x1 = (center.x + radius).ceil().min(max_x);
        let y0 = (center.y - radius).floor().max(0.0);
        let y1 = (center.y + radius).ceil().min(max_y);
        if x0 > x1 || y0 > y1 {
            return;
        }

        let r2 = radius * radius;
        let width = self.width as usize;
        for y in y0 as usize..=y1 as usize {
            let dy = y as f32 - center.y;
            for x in x0 as usize..=x1 as usize {
                let dx = x as f32 - center.x;
                if dx * dx + dy * dy <= r2 {
                    self.pixels[y * width + x] = color;
                }
            }
        }
    }

    fn sample(&self, point: Vec2) -> Option<Color> {
        self.index_of(point).map(|i| self.pixels[i])
    }
}

/// Whether `point` reads as free space
///
/// Off-surface, non-finite and otherwise unsampleable points count as
/// background: movers routinely probe past the edge before wrapping.
pub fn is_background(surface: &dyn RenderSurface, point: Vec2, background: Color) -> bool {
    match surface.sample(point) {
        Some(color) => color == background,
        None => true,
    }
}

/// Probe point `factor` ticks of travel ahead of a mover
#[inline]
pub fn look_ahead(pos: Vec2, facing: Vec2, speed: f32, factor: f32) -> Vec2 {
    pos + facing * speed * factor
}

/// Whether a mover's look-ahead point hits something already drawn
pub fn probe_collides(
    surface: &dyn RenderSurface,
    pos: Vec2,
    facing: Vec2,
    speed: f32,
    factor: f32,
    background: Color,
) -> bool {
    !is_background(surface, look_ahead(pos, facing, speed, factor), background)
}
