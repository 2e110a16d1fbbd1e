//! How does this work
//!
//! ```text
//!    canvas = Canvas::new(w, h)
//!  Clip / Fill
//!    clip(shape, rule), fill(shape, rule, color)
//!      Stencil::coverage()
//!        decompose()        -- cut self crossings, 'DECOMPOSE'
//!          find_crossings()
//!          LoopGraph::extract_loops()
//!        flatten_loop()     -- device space polylines
//!        scan()             -- 'STENCIL' winding counters per sample row
//!        resolve()          -- coverage per pixel
//!      Blender::blend_at()
//!  Triangles
//!    rasterize(v0, v1, v2, shader)
//!      triangle::rasterize()  -- 'TRIANGLE' trapezoid walk
//!        shader(a*v0 + b*v1 + c*v2)
//!        Blender::blend()
//!          Pixel::blend()     -- compositing and blend modes
//!  Regions
//!    Region::from_shape(shape, rule)
//!    union, intersect, subtract, xor   -- 'REGION' cut, classify, relink
//! ```

pub mod math;
pub mod rect;
pub mod segment;
pub mod intersect;
pub mod split;
pub mod graph;
pub mod decompose;
pub mod winding;
pub mod region;
pub mod path;
pub mod transform;
pub mod stencil;
pub mod triangle;
pub mod composite;
pub mod color;
pub mod blend;
pub mod buffer;
pub mod canvas;
pub mod error;
pub mod export;

pub use math::*;
pub use rect::*;
pub use segment::*;
pub use intersect::*;
pub use split::*;
pub use graph::*;
pub use decompose::*;
pub use winding::*;
pub use region::*;
pub use path::*;
pub use transform::*;
pub use stencil::*;
pub use triangle::*;
pub use composite::*;
pub use color::*;
pub use blend::*;
pub use buffer::*;
pub use canvas::*;
pub use error::*;
pub use export::*;

/// Access to Color properties and components
pub trait Color: std::fmt::Debug + Copy {
    /// Get red value [0,1] as f64
    fn red(&self) -> f64;
    /// Get green value [0,1] as f64
    fn green(&self) -> f64;
    /// Get blue value [0,1] as f64
    fn blue(&self) -> f64;
    /// Get alpha value [0,1] as f64
    fn alpha(&self) -> f64;
    /// Get red value [0,255] as u8
    fn red8(&self) -> u8 { cu8(self.red()) }
    /// Get green value [0,255] as u8
    fn green8(&self) -> u8 { cu8(self.green()) }
    /// Get blue value [0,255] as u8
    fn blue8(&self) -> u8 { cu8(self.blue()) }
    /// Get alpha value [0,255] as u8
    fn alpha8(&self) -> u8 { cu8(self.alpha()) }
    /// Return if the color is completely transparent, alpha = 0.0
    fn is_transparent(&self) -> bool { self.alpha() == 0.0 }
    /// Return if the color is completely opaque, alpha = 1.0
    fn is_opaque(&self) -> bool { self.alpha() >= 1.0 }
}

/// Destination pixel type
///
/// The compositing and blend modes are associated types so each pixel
/// format brings its own and blending is resolved statically.
pub trait Pixel: Copy + Default + std::fmt::Debug {
    /// Porter-Duff style combination of source and destination
    type Compositing: Copy + Default + std::fmt::Debug + PartialEq;
    /// Color mixing function
    type BlendMode: Copy + Default + std::fmt::Debug + PartialEq;
    /// Opacity in [0,1]
    fn opacity(&self) -> f64;
    /// Same pixel with a different opacity
    fn with_opacity(&self, opacity: f64) -> Self;
    /// Blend `source` into `self`
    fn blend(&mut self, source: Self, compositing: Self::Compositing, mode: Self::BlendMode);
}
