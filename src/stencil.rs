//! Stencil rasterizer
//!
//! Shapes are decomposed into simple loops, flattened in device space and
//! scan converted into a grid of signed winding counters, `antialias`
//! samples per pixel in each direction.  With one sample per pixel, sample
//! `(i,j)` sits on the lattice point `(i,j)`; with `N > 1` samples it sits at
//! the subpixel center `((i + 0.5)/N, (j + 0.5)/N)`.  Each scanline collects the edges it
//! crosses (half-open in y), drops a +-1 step at the first sample right of
//! every crossing and accumulates the steps along the row.
//!
//!     use raster2d::{Stencil, Shape, FillingRule, Transform};
//!
//!     let mut s = Stencil::new(4, 4, 1);
//!     let square = Shape::rectangle(1.0, 1.0, 3.0, 3.0);
//!     let cov = s.coverage(&square, FillingRule::NonZero, &Transform::new());
//!     assert_eq!(cov[1 * 4 + 1], 1.0);
//!     assert_eq!(cov[0], 0.0);
//!

use crate::decompose::decompose;
use crate::math::Point;
use crate::path::Shape;
use crate::transform::Transform;
use crate::winding::FillingRule;

/// Flattening tolerance in sample units
const FLATTEN_TOLERANCE: f64 = 0.1;

/// Largest antialias factor, larger requests are clamped
pub const MAX_ANTIALIAS: usize = 16;

/// Line edge with `y0 < y1`, in sample units
#[derive(Debug,Copy,Clone,PartialEq)]
struct Edge {
    x0: f64,
    y0: f64,
    slope: f64,
    /// First and one-past-last sample rows crossed
    rows: (i64, i64),
    /// +1 when the unflipped edge ran towards +y
    ///
    /// Samples left of an upward edge gain one, so loops with a positive
    /// area count +1 inside.
    dir: i32,
}

/// Oversampled winding counters for a width x height pixel grid
#[derive(Debug,Default,Clone)]
pub struct Stencil {
    width: usize,
    height: usize,
    antialias: usize,
    counts: Vec<i32>,
}

impl Stencil {
    /// New stencil, `antialias` is clamped to `1 ..= MAX_ANTIALIAS`
    ///
    /// A grid too large to address has no samples and covers nothing.
    pub fn new(width: usize, height: usize, antialias: usize) -> Self {
        let antialias = antialias.max(1).min(MAX_ANTIALIAS);
        let size = width.checked_mul(antialias)
            .and_then(|w| w.checked_mul(height))
            .and_then(|w| w.checked_mul(antialias));
        let counts = match size {
            Some(n) => vec![0; n],
            None => {
                log::debug!("STENCIL: {}x{} at {}x does not fit", width, height, antialias);
                vec![]
            }
        };
        Self { width, height, antialias, counts }
    }
    pub fn antialias(&self) -> usize {
        self.antialias
    }
    fn sample_width(&self) -> usize {
        self.width * self.antialias
    }
    fn sample_height(&self) -> usize {
        self.height * self.antialias
    }
    /// Zero every counter
    pub fn clear(&mut self) {
        self.counts.iter_mut().for_each(|v| *v = 0);
    }
    /// Winding counter of sample `(i,j)`
    pub fn count(&self, i: usize, j: usize) -> i32 {
        self.counts[j * self.sample_width() + i]
    }
    /// Coverage of `shape` under `transform`, one value per pixel
    ///
    /// A non-invertible transform or a shape without finite extent is not
    /// visible and yields all zeros.
    pub fn coverage(&mut self, shape: &Shape, rule: FillingRule, transform: &Transform) -> Vec<f32> {
        self.clear();
        if !self.add_shape(shape, transform) {
            return vec![0.0; self.width * self.height];
        }
        self.resolve(rule)
    }
    /// Accumulate the winding of `shape`, false if nothing is visible
    pub fn add_shape(&mut self, shape: &Shape, transform: &Transform) -> bool {
        if self.counts.is_empty() {
            return false;
        }
        if !transform.is_invertible() {
            log::debug!("STENCIL: non-invertible transform {:?}", transform);
            return false;
        }
        let bounds = match shape.bounds() {
            Some(b) if b.is_finite() && (b.width() > 0.0 || b.height() > 0.0) => b,
            _ => {
                log::debug!("STENCIL: empty bounds");
                return false;
            }
        };
        let n = self.antialias as f64;
        let mut t = *transform * Transform::new_scale(n, n);
        if self.antialias > 1 {
            t.translate(-0.5, -0.5);
        }
        let mut edges = vec![];
        for c in &shape.components {
            for solid in decompose(c) {
                let points = flatten_loop(&solid.segments, &t, bounds.diagonal());
                if !points.iter().all(|p| p.is_finite()) {
                    log::debug!("STENCIL: loop maps outside the finite plane");
                    return false;
                }
                for w in points.windows(2) {
                    if let Some(e) = Edge::new(w[0], w[1]) {
                        edges.push(e);
                    }
                }
            }
        }
        log::debug!("STENCIL: {} edges, {}x{} samples", edges.len(), self.sample_width(), self.sample_height());
        self.scan(edges);
        true
    }
    /// Walk the sample rows with an active edge list
    fn scan(&mut self, mut edges: Vec<Edge>) {
        let (w, h) = (self.sample_width(), self.sample_height() as i64);
        edges.sort_by(|a, b| a.y0.partial_cmp(&b.y0).unwrap_or(std::cmp::Ordering::Equal));
        let mut next = 0;
        let mut active : Vec<Edge> = vec![];
        let mut row = vec![0i32; w + 1];
        let first = edges.first().map(|e| e.rows.0.max(0)).unwrap_or(h);
        for r in first .. h {
            while next < edges.len() && edges[next].rows.0 <= r {
                active.push(edges[next]);
                next += 1;
            }
            active.retain(|e| e.rows.1 > r);
            if active.is_empty() {
                if next >= edges.len() {
                    break;
                }
                continue;
            }
            row.iter_mut().for_each(|v| *v = 0);
            for e in &active {
                let x = e.x0 + (r as f64 - e.y0) * e.slope;
                let i = x.ceil().max(0.0);
                if i < w as f64 {
                    row[i as usize] -= e.dir;
                }
            }
            let base = r as usize * w;
            let mut acc = 0;
            for (i, d) in row.iter().take(w).enumerate() {
                acc += *d;
                self.counts[base + i] += acc;
            }
        }
    }
    /// Fraction of each pixel's samples inside under `rule`
    pub fn resolve(&self, rule: FillingRule) -> Vec<f32> {
        let n = self.antialias;
        let total = n * n;
        let sw = self.sample_width();
        let mut out = vec![0.0; self.width * self.height];
        if self.counts.is_empty() {
            return out;
        }
        for py in 0 .. self.height {
            for px in 0 .. self.width {
                let mut inside = 0;
                for j in py * n .. (py + 1) * n {
                    let row = &self.counts[j * sw + px * n .. j * sw + (px + 1) * n];
                    inside += row.iter().filter(|&&c| rule.is_inside(c)).count();
                }
                out[py * self.width + px] = if inside == total {
                    1.0
                } else {
                    inside as f32 / total as f32
                };
            }
        }
        out
    }
}

impl Edge {
    fn new(a: Point, b: Point) -> Option<Edge> {
        if a.y == b.y {
            return None;
        }
        let (p, q, dir) = if a.y < b.y { (a, b, 1) } else { (b, a, -1) };
        let rows = (p.y.ceil() as i64, q.y.ceil() as i64);
        if rows.0 >= rows.1 {
            return None;
        }
        Some(Edge { x0: p.x, y0: p.y, slope: (q.x - p.x) / (q.y - p.y), rows, dir })
    }
}

/// Closed polyline of a loop in sample space
///
/// Affine maps transform the control points and flatten in sample space,
/// projective maps flatten in user space first.
fn flatten_loop(segments: &[crate::segment::Segment], t: &Transform, size: f64) -> Vec<Point> {
    let mut out = vec![];
    let start = match segments.first() {
        Some(s) => s.start,
        None => return out,
    };
    if t.is_affine() {
        out.push(t.transform_point(start));
        for s in segments {
            let d = s.map(|p| t.transform_point(p));
            out.extend(d.flatten(FLATTEN_TOLERANCE));
        }
    } else {
        let tol = (size * 1e-4).max(std::f64::MIN_POSITIVE);
        out.push(t.transform_point(start));
        for s in segments {
            out.extend(s.flatten(tol).into_iter().map(|p| t.transform_point(p)));
        }
    }
    out
}
