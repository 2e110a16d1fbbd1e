//! Rendering buffer

use crate::Pixel;

/// Rendering Buffer
///
/// Pixels and clip coverage are stored in row-major order (C-format) with
/// the same indexing, so one index addresses both.
#[derive(Debug,Default,Clone)]
pub struct RenderingBuffer<P> {
    /// Pixel data of Image
    pub pixels: Vec<P>,
    /// Clip coverage in [0,1], 1 where drawing is unrestricted
    pub clip: Vec<f32>,
    /// Image Width in pixels
    pub width: usize,
    /// Image Height in pixels
    pub height: usize,
}

impl<P: Pixel> RenderingBuffer<P> {
    /// Create a new buffer of width and height
    ///
    /// Pixels start at their default value with an open clip
    pub fn new(width: usize, height: usize) -> Self {
        RenderingBuffer {
            width, height,
            pixels: vec![P::default(); width * height],
            clip: vec![1.0; width * height],
        }
    }
    /// Size of underlying Rendering Buffer
    pub fn len(&self) -> usize {
        self.pixels.len()
    }
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }
    /// Exclusive view for the duration of one draw
    pub fn surface(&mut self) -> Surface<'_, P> {
        Surface {
            pixels: &mut self.pixels,
            clip: &self.clip,
            width: self.width,
            height: self.height,
        }
    }
    /// Fill every pixel with `color`, ignoring the clip
    pub fn clear(&mut self, color: P) {
        self.pixels.iter_mut().for_each(|v| *v = color);
    }
}

/// Destination pixels and their clip coverage, borrowed together
#[derive(Debug)]
pub struct Surface<'a, P> {
    pixels: &'a mut [P],
    clip: &'a [f32],
    pub width: usize,
    pub height: usize,
}

/// Position in a surface
///
/// The single index addresses destination and clip together, so the two
/// can never drift apart.
#[derive(Debug,Copy,Clone,PartialEq)]
pub struct Cursor {
    index: usize,
}

impl Cursor {
    /// Move to the next pixel of the row
    pub fn advance(&mut self) {
        self.index += 1;
    }
}

impl<'a, P: Pixel> Surface<'a, P> {
    /// Cursor at (x,y), `None` outside the surface
    pub fn cursor(&self, x: i64, y: i64) -> Option<Cursor> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(Cursor { index: y as usize * self.width + x as usize })
    }
    pub fn clip(&self, c: &Cursor) -> f32 {
        self.clip[c.index]
    }
    pub fn pixel_mut(&mut self, c: &Cursor) -> &mut P {
        &mut self.pixels[c.index]
    }
}
