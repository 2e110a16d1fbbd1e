//! Canvas: render state and the drawing entry points
//!
//!     use raster2d::{Canvas, Shape, FillingRule, Rgba8};
//!
//!     let mut canvas = Canvas::<Rgba8>::new(4, 4).unwrap();
//!     canvas.clip(&Shape::rectangle(1.0, 1.0, 3.0, 3.0), FillingRule::NonZero);
//!     assert_eq!(canvas.coverage(1, 1), Some(1.0));
//!     assert_eq!(canvas.coverage(0, 0), Some(0.0));
//!
//!     let red = Rgba8::new(255, 0, 0, 255);
//!     canvas.fill(&Shape::rectangle(0.0, 0.0, 4.0, 4.0), FillingRule::NonZero, red);
//!     assert_eq!(canvas.get(2, 2), Some(red));
//!     assert_eq!(canvas.get(0, 0), Some(Rgba8::default()));
//!

use crate::Pixel;
use crate::blend::Blender;
use crate::blend::Shadow;
use crate::blend::composite_shadow;
use crate::buffer::RenderingBuffer;
use crate::buffer::Surface;
use crate::error::Error;
use crate::error::Result;
use crate::error::ShaderError;
use crate::path::Shape;
use crate::stencil::MAX_ANTIALIAS;
use crate::stencil::Stencil;
use crate::transform::Transform;
use crate::triangle;
use crate::triangle::Interpolate;
use crate::winding::FillingRule;

use std::convert::Infallible;

/// Destination buffer plus the state applied to every draw
#[derive(Debug)]
pub struct Canvas<P: Pixel> {
    buffer: RenderingBuffer<P>,
    opacity: f64,
    compositing: P::Compositing,
    blend_mode: P::BlendMode,
    antialias: usize,
    transform: Transform,
    shadow: Option<Shadow<P>>,
}

impl<P: Pixel> Canvas<P> {
    /// Canvas of width x height default pixels with an open clip
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 || width.checked_mul(height).is_none() {
            return Err(Error::InvalidDimensions { width, height });
        }
        Ok(Canvas {
            buffer: RenderingBuffer::new(width, height),
            opacity: 1.0,
            compositing: P::Compositing::default(),
            blend_mode: P::BlendMode::default(),
            antialias: 1,
            transform: Transform::new(),
            shadow: None,
        })
    }
    pub fn width(&self) -> usize {
        self.buffer.width
    }
    pub fn height(&self) -> usize {
        self.buffer.height
    }
    /// Global opacity, clamped to [0,1]
    pub fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity.max(0.0).min(1.0);
    }
    pub fn set_compositing(&mut self, compositing: P::Compositing) {
        self.compositing = compositing;
    }
    pub fn set_blend_mode(&mut self, mode: P::BlendMode) {
        self.blend_mode = mode;
    }
    /// Samples per pixel in each direction for clips and fills
    ///
    /// Clamped to `1 ..= MAX_ANTIALIAS`.
    pub fn set_antialias(&mut self, n: usize) {
        self.antialias = n.max(1).min(MAX_ANTIALIAS);
    }
    pub fn antialias(&self) -> usize {
        self.antialias
    }
    /// User to device transform for clips and fills
    pub fn set_transform(&mut self, t: Transform) {
        self.transform = t;
    }
    pub fn set_shadow(&mut self, shadow: Option<Shadow<P>>) {
        self.shadow = shadow;
    }
    pub fn blender(&self) -> Blender<P> {
        Blender {
            opacity: self.opacity,
            compositing: self.compositing,
            blend_mode: self.blend_mode,
        }
    }
    fn stencil(&self, shape: &Shape, rule: FillingRule) -> Vec<f32> {
        let mut s = Stencil::new(self.width(), self.height(), self.antialias);
        s.coverage(shape, rule, &self.transform)
    }
    /// Replace the clip with the coverage of `shape`
    pub fn clip(&mut self, shape: &Shape, rule: FillingRule) {
        let cov = self.stencil(shape, rule);
        log::debug!("CLIP: {} pixels with coverage", cov.iter().filter(|&&c| c > 0.0).count());
        self.buffer.clip = cov;
    }
    /// Open the clip over the whole canvas
    pub fn reset_clip(&mut self) {
        self.buffer.clip.iter_mut().for_each(|v| *v = 1.0);
    }
    /// Fill every pixel, ignoring clip and blending
    pub fn clear(&mut self, color: P) {
        self.buffer.clear(color);
    }
    /// Pixel at (x,y)
    pub fn get(&self, x: usize, y: usize) -> Option<P> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.buffer.pixels[y * self.width() + x])
    }
    /// Clip coverage at (x,y)
    pub fn coverage(&self, x: usize, y: usize) -> Option<f32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.buffer.clip[y * self.width() + x])
    }
    pub fn pixels(&self) -> &[P] {
        &self.buffer.pixels
    }
    /// Scoped exclusive access to the destination and clip
    pub fn with_surface<F, R>(&mut self, f: F) -> R
        where F: FnOnce(&mut Surface<P>, &Blender<P>) -> R
    {
        let blender = self.blender();
        let mut surface = self.buffer.surface();
        f(&mut surface, &blender)
    }
    /// Draw through the shadow layer when a shadow is set, then directly
    fn draw<E, F>(&mut self, mut draw: F) -> std::result::Result<(), E>
        where F: FnMut(&mut Surface<P>, &Blender<P>) -> std::result::Result<(), E>
    {
        let blender = self.blender();
        if let Some(shadow) = self.shadow {
            let mut layer = RenderingBuffer::<P>::new(self.width(), self.height());
            layer.clear(P::default().with_opacity(0.0));
            draw(&mut layer.surface(), &blender)?;
            composite_shadow(&layer.pixels, layer.width, &mut self.buffer.surface(), &shadow, &blender);
        }
        draw(&mut self.buffer.surface(), &blender)
    }
    /// Fill `shape` with `color` under `rule`
    pub fn fill(&mut self, shape: &Shape, rule: FillingRule, color: P) {
        let cov = self.stencil(shape, rule);
        let width = self.width();
        let res : std::result::Result<(), Infallible> = self.draw(|surface, blender| {
            for (i, &c) in cov.iter().enumerate() {
                if c <= 0.0 {
                    continue;
                }
                if let Some(cur) = surface.cursor((i % width) as i64, (i / width) as i64) {
                    blender.blend_at(surface, &cur, color, c);
                }
            }
            Ok(())
        });
        if let Err(e) = res {
            match e {}
        }
    }
    /// Rasterize the triangle `v0, v1, v2` in device space
    ///
    /// With a shadow set the shader runs once for the shadow layer and
    /// once for the direct draw.  Pixels outside the clip never reach the
    /// shader, so it cannot fail there.
    pub fn rasterize<V, F>(&mut self, v0: V, v1: V, v2: V, mut shader: F) -> Result<()>
        where V: Interpolate,
              F: FnMut(V) -> std::result::Result<P, ShaderError>
    {
        self.draw(|surface, blender| triangle::rasterize(surface, blender, v0, v1, v2, &mut shader))
    }
}
