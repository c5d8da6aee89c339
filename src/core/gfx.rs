use log::info;
use std::{error::Error, num::NonZeroU32, sync::Arc};
use winit::{dpi::PhysicalSize, window::Window};

/* ---------------------------- CPU canvas ---------------------------- */

/// A CPU-side pixel canvas in softbuffer's native layout (packed 0x00RRGGBB,
/// row-major). All drawing in this crate happens here; the `Presenter` only
/// copies the finished frame out.
pub struct Frame {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl Frame {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; (width as usize) * (height as usize)],
        }
    }

    #[inline(always)]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[inline(always)]
    pub const fn height(&self) -> u32 {
        self.height
    }

    #[inline(always)]
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Reallocates to the new dimensions. Previous contents are discarded;
    /// the canvas comes back black.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels
            .resize((width as usize) * (height as usize), 0);
    }

    pub fn clear(&mut self, color: u32) {
        self.pixels.fill(color & 0x00FF_FFFF);
    }

    /// Reads one pixel; out-of-range coordinates read as black, mirroring the
    /// clipping write path.
    #[inline(always)]
    pub fn pixel(&self, x: u32, y: u32) -> u32 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.pixels[(y as usize) * (self.width as usize) + (x as usize)]
    }

    #[inline(always)]
    pub fn put_pixel(&mut self, x: i32, y: i32, color: u32) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        self.pixels[(y as usize) * (self.width as usize) + (x as usize)] = color & 0x00FF_FFFF;
    }

    /// Composites a black overlay of the given alpha over the whole canvas.
    /// This is what leaves the rain trails behind: the canvas is dimmed, not
    /// cleared, before the next row of glyphs lands.
    pub fn fade_to_black(&mut self, alpha: f32) {
        let keep = ((1.0 - alpha.clamp(0.0, 1.0)) * 255.0).round() as u32;
        if keep >= 255 {
            return;
        }
        if keep == 0 {
            self.pixels.fill(0);
            return;
        }
        for px in &mut self.pixels {
            *px = scale_packed(*px, keep);
        }
    }

    /// Opaque axis-aligned rectangle. Off-canvas portions are clipped.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: u32) {
        let Some((x0, y0, x1, y1)) = self.clip_rect(x, y, w, h) else {
            return;
        };
        let color = color & 0x00FF_FFFF;
        let stride = self.width as usize;
        for row in y0..y1 {
            let start = row * stride + x0;
            self.pixels[start..start + (x1 - x0)].fill(color);
        }
    }

    /// Rectangle blended over the existing contents at the given alpha.
    pub fn blend_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: u32, alpha: f32) {
        let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u32;
        if a == 0 {
            return;
        }
        if a >= 255 {
            self.fill_rect(x, y, w, h, color);
            return;
        }
        let Some((x0, y0, x1, y1)) = self.clip_rect(x, y, w, h) else {
            return;
        };
        let src = scale_packed(color, a);
        let keep = 255 - a;
        let stride = self.width as usize;
        for row in y0..y1 {
            let start = row * stride + x0;
            for px in &mut self.pixels[start..start + (x1 - x0)] {
                *px = add_packed(scale_packed(*px, keep), src);
            }
        }
    }

    /// One-pixel-unit border of the given thickness, drawn inside the rect.
    pub fn stroke_rect(&mut self, x: i32, y: i32, w: u32, h: u32, thickness: u32, color: u32) {
        if w == 0 || h == 0 {
            return;
        }
        let t = thickness.min(w / 2).min(h / 2).max(1);
        self.fill_rect(x, y, w, t, color);
        self.fill_rect(x, y + (h - t) as i32, w, t, color);
        self.fill_rect(x, y, t, h, color);
        self.fill_rect(x + (w - t) as i32, y, t, h, color);
    }

    /// Copies a same-sized source canvas underneath at reduced brightness.
    /// Used to lay the rain layer down at its fixed opacity before the page
    /// content is drawn on top. Dimension mismatches (a resize landed between
    /// the two canvases being updated) copy the overlapping region only.
    pub fn blit_attenuated(&mut self, src: &Frame, opacity: f32) {
        let keep = (opacity.clamp(0.0, 1.0) * 255.0).round() as u32;
        if keep == 0 {
            return;
        }
        let rows = self.height.min(src.height) as usize;
        let cols = self.width.min(src.width) as usize;
        let dst_stride = self.width as usize;
        let src_stride = src.width as usize;
        for row in 0..rows {
            let d = row * dst_stride;
            let s = row * src_stride;
            if keep >= 255 {
                self.pixels[d..d + cols].copy_from_slice(&src.pixels[s..s + cols]);
            } else {
                for col in 0..cols {
                    self.pixels[d + col] = scale_packed(src.pixels[s + col], keep);
                }
            }
        }
    }

    /// Clips a rect to the canvas; `None` when nothing is visible.
    fn clip_rect(&self, x: i32, y: i32, w: u32, h: u32) -> Option<(usize, usize, usize, usize)> {
        if w == 0 || h == 0 || self.width == 0 || self.height == 0 {
            return None;
        }
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = x.saturating_add(w as i32).min(self.width as i32);
        let y1 = y.saturating_add(h as i32).min(self.height as i32);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as usize, y0 as usize, x1 as usize, y1 as usize))
    }
}

/// Scales each channel of a packed pixel by `factor / 255`.
#[inline(always)]
const fn scale_packed(px: u32, factor: u32) -> u32 {
    let rb = ((px & 0x00FF_00FF) * factor >> 8) & 0x00FF_00FF;
    let g = ((px & 0x0000_FF00) * factor >> 8) & 0x0000_FF00;
    rb | g
}

/// Per-channel saturating add of two packed pixels.
#[inline(always)]
fn add_packed(a: u32, b: u32) -> u32 {
    let r = ((a >> 16) & 0xFF) + ((b >> 16) & 0xFF);
    let g = ((a >> 8) & 0xFF) + ((b >> 8) & 0xFF);
    let bl = (a & 0xFF) + (b & 0xFF);
    (r.min(255) << 16) | (g.min(255) << 8) | bl.min(255)
}

/* ---------------------------- presenter ---------------------------- */

/// Owns the softbuffer surface for the window and pushes finished frames to
/// it. Kept separate from `Frame` so the app keeps running (rendering
/// nothing) when the surface cannot be acquired.
pub struct Presenter {
    _context: softbuffer::Context<Arc<Window>>,
    surface: softbuffer::Surface<Arc<Window>, Arc<Window>>,
    window_size: PhysicalSize<u32>,
}

pub fn init(window: Arc<Window>) -> Result<Presenter, Box<dyn Error>> {
    info!("Initializing software presenter (softbuffer)...");

    let window_size = window.inner_size();
    let context = softbuffer::Context::new(window.clone())?;
    let surface = softbuffer::Surface::new(&context, window)?;

    Ok(Presenter {
        _context: context,
        surface,
        window_size,
    })
}

impl Presenter {
    pub const fn resize(&mut self, width: u32, height: u32) {
        self.window_size = PhysicalSize::new(width, height);
    }

    pub fn present(&mut self, frame: &Frame) -> Result<(), Box<dyn Error>> {
        let PhysicalSize { width, height } = self.window_size;
        if width == 0 || height == 0 {
            return Ok(());
        }
        let (Some(w), Some(h)) = (NonZeroU32::new(width), NonZeroU32::new(height)) else {
            return Ok(());
        };
        self.surface.resize(w, h)?;

        let mut buffer = self.surface.buffer_mut()?;
        let n = buffer.len().min(frame.pixels.len());
        buffer[..n].copy_from_slice(&frame.pixels[..n]);
        buffer.present()?;
        Ok(())
    }
}
