//! Triangle rasterizer
//!
//! Pixel `(x,y)` is sampled at the lattice point `(x,y)`.  A triangle owns
//! the samples inside it with half-open spans on both axes, so triangles
//! sharing an edge in a mesh neither overlap nor leave gaps.
//!
//! The vertices are sorted by y and the middle vertex splits the triangle
//! into an upper and a lower trapezoid.  The long edge (top to bottom)
//! and the short edges are stepped by their slope once per row.  Vertex
//! attributes are interpolated with barycentric weights taken from the
//! unsorted vertex positions.
//!
//!     use raster2d::{RenderingBuffer, Blender, Point, Rgba8, rasterize};
//!
//!     let mut buf = RenderingBuffer::<Rgba8>::new(4, 4);
//!     let red = Rgba8::new(255, 0, 0, 255);
//!     let (a, b, c) = (Point::new(0.0, 0.0), Point::new(4.0, 0.0), Point::new(0.0, 4.0));
//!     rasterize(&mut buf.surface(), &Blender::default(), a, b, c, |_| Ok(red)).unwrap();
//!     assert_eq!(buf.pixels[0], red);
//!     assert_eq!(buf.pixels[3], red);
//!     assert_eq!(buf.pixels[4 * 3 + 1], Rgba8::default());
//!

use crate::Pixel;
use crate::blend::Blender;
use crate::buffer::Surface;
use crate::error::Error;
use crate::error::Result;
use crate::error::ShaderError;
use crate::math::Point;

use std::ops::Add;
use std::ops::Mul;

/// Vertex data interpolated across a triangle
pub trait Interpolate: Copy + Add<Output=Self> + Mul<f64, Output=Self> {
    /// Device position of the vertex
    fn position(&self) -> Point;
}

impl Interpolate for Point {
    fn position(&self) -> Point {
        *self
    }
}

/// Position with an attribute
#[derive(Debug,Default,Copy,Clone,PartialEq)]
pub struct Vertex<A> {
    pub position: Point,
    pub attribute: A,
}

impl<A> Vertex<A> {
    pub fn new(x: f64, y: f64, attribute: A) -> Self {
        Vertex { position: Point::new(x, y), attribute }
    }
}

impl<A: Add<Output=A>> Add for Vertex<A> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Vertex { position: self.position + rhs.position,
                 attribute: self.attribute + rhs.attribute }
    }
}
impl<A: Mul<f64, Output=A>> Mul<f64> for Vertex<A> {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Vertex { position: self.position * rhs, attribute: self.attribute * rhs }
    }
}
impl<A> Interpolate for Vertex<A> where A: Copy + Add<Output=A> + Mul<f64, Output=A> {
    fn position(&self) -> Point {
        self.position
    }
}

/// Edge x advanced one row at a time
#[derive(Debug,Copy,Clone)]
struct EdgeStep {
    x: f64,
    dxdy: f64,
}

impl EdgeStep {
    /// Edge from `a` to `b` positioned on row `row`
    fn new(a: Point, b: Point, row: i64) -> Self {
        let dxdy = (b.x - a.x) / (b.y - a.y);
        EdgeStep { x: a.x + (row as f64 - a.y) * dxdy, dxdy }
    }
    fn step(&mut self) {
        self.x += self.dxdy;
    }
}

/// Rasterize one triangle, shading every covered pixel
///
/// Pixels with zero clip coverage are skipped without calling the shader,
/// so the shader cannot fail on a fully clipped pixel.
/// A shader error stops the triangle; pixels already written stay written.
pub fn rasterize<V, P, F>(surface: &mut Surface<P>, blender: &Blender<P>,
                          v0: V, v1: V, v2: V, mut shader: F) -> Result<()>
    where V: Interpolate,
          P: Pixel,
          F: FnMut(V) -> std::result::Result<P, ShaderError>
{
    let p = [v0.position(), v1.position(), v2.position()];
    let (w, h) = (surface.width as f64, surface.height as f64);
    let xmin = p[0].x.min(p[1].x).min(p[2].x);
    let xmax = p[0].x.max(p[1].x).max(p[2].x);
    let ymin = p[0].y.min(p[1].y).min(p[2].y);
    let ymax = p[0].y.max(p[1].y).max(p[2].y);
    if !p.iter().all(|q| q.is_finite()) || xmax <= 0.0 || ymax <= 0.0 || xmin >= w || ymin >= h {
        log::trace!("TRIANGLE: outside viewport {:?}", p);
        return Ok(());
    }
    let area2 = (p[1] - p[0]).cross(p[2] - p[0]);
    if area2 == 0.0 {
        log::trace!("TRIANGLE: zero area {:?}", p);
        return Ok(());
    }

    let mut order = [0, 1, 2];
    order.sort_by(|&i, &j| p[i].y.partial_cmp(&p[j].y).unwrap_or(std::cmp::Ordering::Equal));
    let (top, mid, bot) = (p[order[0]], p[order[1]], p[order[2]]);

    // Long edge x at the middle vertex decides which side the middle is on
    let x_long = top.x + (mid.y - top.y) * (bot.x - top.x) / (bot.y - top.y);
    let mid_left = mid.x < x_long;

    let row0 = (top.y.ceil() as i64).max(0);
    let row2 = (bot.y.ceil() as i64).min(surface.height as i64);
    let row1 = (mid.y.ceil() as i64).max(row0).min(row2.max(row0));

    let mut long = EdgeStep::new(top, bot, row0);
    let mut upper = EdgeStep::new(top, mid, row0);
    let mut lower = EdgeStep::new(mid, bot, row1);
    let width = surface.width as i64;

    for y in row0 .. row2 {
        let short = if y < row1 { &mut upper } else { &mut lower };
        let (xl, xr) = if mid_left { (short.x, long.x) } else { (long.x, short.x) };
        let x0 = (xl.ceil() as i64).max(0);
        let x1 = (xr.ceil() as i64).min(width);
        if x0 < x1 {
            if let Some(mut cur) = surface.cursor(x0, y) {
                for x in x0 .. x1 {
                    let clip = surface.clip(&cur);
                    if clip > 0.0 {
                        let c = Point::new(x as f64, y as f64);
                        let a = (p[1] - c).cross(p[2] - c) / area2;
                        let b = (p[2] - c).cross(p[0] - c) / area2;
                        let v = v0 * a + v1 * b + v2 * (1.0 - a - b);
                        let color = shader(v).map_err(Error::Shader)?;
                        blender.blend(surface.pixel_mut(&cur), color, clip);
                    }
                    cur.advance();
                }
            }
        }
        short.step();
        long.step();
    }
    Ok(())
}
