//! Colors

use crate::Color;
use crate::Pixel;
use crate::composite::composite;
use crate::composite::BlendMode;
use crate::composite::CompositingMode;

/// Convert an f64 [0,1] component to a u8 [0,255] component
pub fn cu8(v: f64) -> u8 {
    (v.max(0.0).min(1.0) * 255.0).round() as u8
}

fn color_u8_to_f64(x: u8) -> f64 {
    f64::from(x) / 255.0
}

fn components<C: Color>(c: &C) -> [f64; 4] {
    [c.red(), c.green(), c.blue(), c.alpha()]
}

/// Color as Red, Green, Blue, and Alpha
#[derive(Debug,Default,Copy,Clone,PartialEq)]
pub struct Rgba8 {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
    /// Alpha
    pub a: u8,
}

impl Rgba8 {
    /// White Color (255,255,255,255)
    pub fn white() -> Self {
        Self::new(255,255,255,255)
    }
    /// Black Color (0,0,0,255)
    pub fn black() -> Self {
        Self::new(0,0,0,255)
    }
    /// Fully transparent (0,0,0,0)
    pub fn transparent() -> Self {
        Self::new(0,0,0,0)
    }
    /// Create new color
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba8 { r, g, b, a }
    }
    fn from_components(c: [f64; 4]) -> Self {
        Self::new(cu8(c[0]), cu8(c[1]), cu8(c[2]), cu8(c[3]))
    }
}

impl Color for Rgba8 {
    fn   red(&self) -> f64 { color_u8_to_f64(self.r) }
    fn green(&self) -> f64 { color_u8_to_f64(self.g) }
    fn  blue(&self) -> f64 { color_u8_to_f64(self.b) }
    fn alpha(&self) -> f64 { color_u8_to_f64(self.a) }
    fn alpha8(&self) -> u8 { self.a }
    fn red8(&self) -> u8 { self.r }
    fn green8(&self) -> u8 { self.g }
    fn blue8(&self) -> u8 { self.b }
}

impl Pixel for Rgba8 {
    type Compositing = CompositingMode;
    type BlendMode = BlendMode;
    fn opacity(&self) -> f64 {
        self.alpha()
    }
    fn with_opacity(&self, opacity: f64) -> Self {
        Rgba8 { a: cu8(opacity), .. *self }
    }
    fn blend(&mut self, source: Self, compositing: CompositingMode, mode: BlendMode) {
        *self = Rgba8::from_components(composite(components(self), components(&source), compositing, mode));
    }
}

/// Color as floating point Red, Green, Blue, and Alpha, not premultiplied
#[derive(Debug,Default,Copy,Clone,PartialEq)]
pub struct Rgba32 {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba32 {
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Rgba32 { r, g, b, a }
    }
    fn from_components(c: [f64; 4]) -> Self {
        Self::new(c[0] as f32, c[1] as f32, c[2] as f32, c[3] as f32)
    }
}

impl Color for Rgba32 {
    fn   red(&self) -> f64 { f64::from(self.r) }
    fn green(&self) -> f64 { f64::from(self.g) }
    fn  blue(&self) -> f64 { f64::from(self.b) }
    fn alpha(&self) -> f64 { f64::from(self.a) }
}

impl Pixel for Rgba32 {
    type Compositing = CompositingMode;
    type BlendMode = BlendMode;
    fn opacity(&self) -> f64 {
        self.alpha()
    }
    fn with_opacity(&self, opacity: f64) -> Self {
        Rgba32 { a: opacity.max(0.0).min(1.0) as f32, .. *self }
    }
    fn blend(&mut self, source: Self, compositing: CompositingMode, mode: BlendMode) {
        *self = Rgba32::from_components(composite(components(self), components(&source), compositing, mode));
    }
}

impl From<Rgba8> for Rgba32 {
    fn from(c: Rgba8) -> Rgba32 {
        Rgba32::from_components(components(&c))
    }
}
impl From<Rgba32> for Rgba8 {
    fn from(c: Rgba32) -> Rgba8 {
        Rgba8::from_components(components(&c))
    }
}
