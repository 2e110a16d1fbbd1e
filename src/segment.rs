//! Bezier Segments
//!
//! A segment is a start point plus a line, quadratic or cubic tail.  All
//! curve math used by the decomposer, the region algebra and the
//! rasterizers lives here.
//!
//!     use raster2d::{Point, Segment};
//!
//!     let s = Segment::line(Point::new(0.0, 0.0), Point::new(4.0, 2.0));
//!     let (a, b) = s.split(0.5);
//!     assert_eq!(a.end(), Point::new(2.0, 1.0));
//!     assert_eq!(b.start, Point::new(2.0, 1.0));
//!

use crate::math::Point;
use crate::math::Tolerance;
use crate::math::PARAM_EPSILON;
use crate::rect::Rectangle;

/// Segment tail, the control points following the start point
#[derive(Debug,Copy,Clone,PartialEq)]
pub enum SegmentKind {
    Line(Point),
    Quad(Point, Point),
    Cubic(Point, Point, Point),
}

/// Line, quadratic or cubic Bezier segment
#[derive(Debug,Copy,Clone,PartialEq)]
pub struct Segment {
    pub start: Point,
    pub kind: SegmentKind,
}

impl Segment {
    pub fn line(p0: Point, p1: Point) -> Self {
        Segment { start: p0, kind: SegmentKind::Line(p1) }
    }
    pub fn quad(p0: Point, p1: Point, p2: Point) -> Self {
        Segment { start: p0, kind: SegmentKind::Quad(p1, p2) }
    }
    pub fn cubic(p0: Point, p1: Point, p2: Point, p3: Point) -> Self {
        Segment { start: p0, kind: SegmentKind::Cubic(p1, p2, p3) }
    }
    /// Build from 2, 3 or 4 control points
    fn from_points(p: &[Point]) -> Self {
        match p.len() {
            2 => Segment::line(p[0], p[1]),
            3 => Segment::quad(p[0], p[1], p[2]),
            _ => Segment::cubic(p[0], p[1], p[2], p[3]),
        }
    }
    pub fn end(&self) -> Point {
        match self.kind {
            SegmentKind::Line(p1) => p1,
            SegmentKind::Quad(_, p2) => p2,
            SegmentKind::Cubic(_, _, p3) => p3,
        }
    }
    pub fn is_line(&self) -> bool {
        match self.kind {
            SegmentKind::Line(_) => true,
            _ => false,
        }
    }
    /// Control points, start and end included
    pub fn control_points(&self) -> Vec<Point> {
        match self.kind {
            SegmentKind::Line(p1) => vec![self.start, p1],
            SegmentKind::Quad(p1, p2) => vec![self.start, p1, p2],
            SegmentKind::Cubic(p1, p2, p3) => vec![self.start, p1, p2, p3],
        }
    }
    /// Apply `f` to every control point
    pub fn map<F>(&self, f: F) -> Segment where F: Fn(Point) -> Point {
        let pts : Vec<_> = self.control_points().into_iter().map(f).collect();
        Segment::from_points(&pts)
    }
    pub fn with_start(&self, p: Point) -> Segment {
        Segment { start: p, kind: self.kind }
    }
    pub fn with_end(&self, p: Point) -> Segment {
        let kind = match self.kind {
            SegmentKind::Line(_) => SegmentKind::Line(p),
            SegmentKind::Quad(p1, _) => SegmentKind::Quad(p1, p),
            SegmentKind::Cubic(p1, p2, _) => SegmentKind::Cubic(p1, p2, p),
        };
        Segment { start: self.start, kind }
    }
    /// Same curve traversed from end to start
    pub fn reversed(&self) -> Segment {
        let mut pts = self.control_points();
        pts.reverse();
        Segment::from_points(&pts)
    }

    /// Point at parameter `t`
    pub fn point(&self, t: f64) -> Point {
        let p0 = self.start;
        let mt = 1.0 - t;
        match self.kind {
            SegmentKind::Line(p1) => p0.lerp(p1, t),
            SegmentKind::Quad(p1, p2) => {
                p0 * (mt * mt) + p1 * (2.0 * mt * t) + p2 * (t * t)
            },
            SegmentKind::Cubic(p1, p2, p3) => {
                p0 * (mt * mt * mt) + p1 * (3.0 * mt * mt * t)
                    + p2 * (3.0 * mt * t * t) + p3 * (t * t * t)
            },
        }
    }
    /// First derivative at `t`
    pub fn derivative(&self, t: f64) -> Point {
        let p0 = self.start;
        let mt = 1.0 - t;
        match self.kind {
            SegmentKind::Line(p1) => p1 - p0,
            SegmentKind::Quad(p1, p2) => {
                ((p1 - p0) * mt + (p2 - p1) * t) * 2.0
            },
            SegmentKind::Cubic(p1, p2, p3) => {
                ((p1 - p0) * (mt * mt) + (p2 - p1) * (2.0 * mt * t)
                 + (p3 - p2) * (t * t)) * 3.0
            },
        }
    }
    /// Second derivative at `t`
    pub fn second_derivative(&self, t: f64) -> Point {
        let p0 = self.start;
        match self.kind {
            SegmentKind::Line(_) => Point::default(),
            SegmentKind::Quad(p1, p2) => (p2 - p1 * 2.0 + p0) * 2.0,
            SegmentKind::Cubic(p1, p2, p3) => {
                ((p2 - p1 * 2.0 + p0) * (1.0 - t) + (p3 - p2 * 2.0 + p1) * t) * 6.0
            },
        }
    }

    /// Split at `t` using de Casteljau's algorithm
    pub fn split(&self, t: f64) -> (Segment, Segment) {
        let mut work = self.control_points();
        let n = work.len();
        let mut left = vec![work[0]];
        let mut right = vec![work[n-1]];
        for k in 1 .. n {
            for i in 0 .. n-k {
                work[i] = work[i].lerp(work[i+1], t);
            }
            left.push(work[0]);
            right.push(work[n-1-k]);
        }
        right.reverse();
        (Segment::from_points(&left), Segment::from_points(&right))
    }
    /// Part of the segment between `t0` and `t1`, `t0 < t1`
    pub fn subsegment(&self, t0: f64, t1: f64) -> Segment {
        let head = if t1 >= 1.0 { *self } else { self.split(t1).0 };
        if t0 <= 0.0 {
            return head;
        }
        let t1 = t1.min(1.0);
        if t1 <= 0.0 {
            return head;
        }
        head.split(t0 / t1).1
    }
    /// Split at every parameter of `ts`, which are sorted and clamped first
    pub fn split_at(&self, ts: &[f64]) -> Vec<Segment> {
        let mut ts : Vec<f64> = ts.iter()
            .cloned()
            .filter(|t| *t > PARAM_EPSILON && *t < 1.0 - PARAM_EPSILON)
            .collect();
        ts.sort_by(|a,b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        ts.dedup_by(|a,b| (*a - *b).abs() <= PARAM_EPSILON);
        let mut out = vec![];
        let mut t0 = 0.0;
        for t in ts {
            out.push(self.subsegment(t0, t));
            t0 = t;
        }
        out.push(self.subsegment(t0, 1.0));
        weld(&mut out);
        out
    }

    /// Bounds of the control polygon, which contain the curve
    pub fn bounds(&self) -> Rectangle<f64> {
        let p0 = self.start;
        let mut r = Rectangle::new(p0.x, p0.y, p0.x, p0.y);
        for p in self.control_points() {
            r.expand(p.x, p.y);
        }
        r
    }
    /// Largest distance of an inner control point from the chord
    pub fn flatness(&self) -> f64 {
        let p0 = self.start;
        let p1 = self.end();
        let chord = p1 - p0;
        let len = chord.length();
        let inner = match self.kind {
            SegmentKind::Line(_) => return 0.0,
            SegmentKind::Quad(c, _) => vec![c],
            SegmentKind::Cubic(c1, c2, _) => vec![c1, c2],
        };
        inner.iter()
            .map(|&c| if len > 0.0 { (c - p0).cross(chord).abs() / len } else { c.distance(p0) })
            .fold(0.0, f64::max)
    }
    /// All control points lie within `eps` of the start
    pub fn is_degenerate(&self, eps: f64) -> bool {
        self.control_points().iter().all(|p| p.almost_equal(self.start, eps))
    }
    /// Signed area swept between the segment and the origin
    ///
    /// Summed over a closed loop this is the enclosed area, positive when
    /// the loop turns from +x towards +y.
    pub fn signed_area(&self) -> f64 {
        let p0 = self.start;
        match self.kind {
            SegmentKind::Line(p1) => p0.cross(p1) * 0.5,
            SegmentKind::Quad(p1, p2) => {
                (p0.x * (2.0 * p1.y + p2.y)
                 + 2.0 * p1.x * (p2.y - p0.y)
                 - p2.x * (p0.y + 2.0 * p1.y)) / 6.0
            },
            SegmentKind::Cubic(p1, p2, p3) => {
                (p0.x * (6.0 * p1.y + 3.0 * p2.y + p3.y)
                 + 3.0 * (p1.x * (-2.0 * p0.y + p2.y + p3.y)
                          - p2.x * (p0.y + p1.y - 2.0 * p3.y))
                 - p3.x * (p0.y + 3.0 * p1.y + 6.0 * p2.y)) / 20.0
            },
        }
    }

    /// Polyline approximation, start excluded and end included
    pub fn flatten(&self, tolerance: f64) -> Vec<Point> {
        let mut out = vec![];
        flatten_into(self, tolerance, 0, &mut out);
        out
    }

    /// Parameter of the point on the segment closest to `p`
    pub fn closest_point(&self, p: Point) -> f64 {
        if let SegmentKind::Line(p1) = self.kind {
            let d = p1 - self.start;
            let len2 = d.dot(d);
            if len2 == 0.0 {
                return 0.0;
            }
            return ((p - self.start).dot(d) / len2).max(0.0).min(1.0);
        }
        let samples = 16;
        let mut best = 0.0;
        let mut best_d = std::f64::MAX;
        for i in 0 ..= samples {
            let t = i as f64 / samples as f64;
            let d = self.point(t).distance(p);
            if d < best_d {
                best_d = d;
                best = t;
            }
        }
        // Newton on (B(t) - p) . B'(t) = 0
        let mut t = best;
        for _ in 0 .. 8 {
            let q = self.point(t) - p;
            let d1 = self.derivative(t);
            let d2 = self.second_derivative(t);
            let f = q.dot(d1);
            let df = d1.dot(d1) + q.dot(d2);
            if df.abs() <= std::f64::EPSILON {
                break;
            }
            t = (t - f / df).max(0.0).min(1.0);
        }
        if self.point(t).distance(p) <= best_d { t } else { best }
    }

    /// Parameters `(t0, t1)`, `t0 < t1`, where a cubic crosses itself
    ///
    /// Solves `B(s) = B(t)` for `s != t` in closed form; lines and
    /// quadratics never self-intersect.
    pub fn self_intersection(&self) -> Option<(f64, f64)> {
        let (p0, p1, p2, p3) = match self.kind {
            SegmentKind::Cubic(p1, p2, p3) => (self.start, p1, p2, p3),
            _ => return None,
        };
        // Power basis, B(t) = a t^3 + b t^2 + c t + p0
        let a = p3 - p2 * 3.0 + p1 * 3.0 - p0;
        let b = (p2 - p1 * 2.0 + p0) * 3.0;
        let c = (p1 - p0) * 3.0;
        // With sigma = s + t and q = s^2 + s t + t^2:  a q + b sigma + c = 0
        let det = a.cross(b);
        if det.abs() <= 1e-12 * a.length() * b.length() || det == 0.0 {
            return None;
        }
        let q = b.cross(c) / det;
        let sigma = c.cross(a) / det;
        let disc = 4.0 * q - 3.0 * sigma * sigma;
        if !(disc > 0.0) {
            return None;
        }
        let root = disc.sqrt();
        let t0 = (sigma - root) / 2.0;
        let t1 = (sigma + root) / 2.0;
        if t0 < -PARAM_EPSILON || t1 > 1.0 + PARAM_EPSILON {
            return None;
        }
        let (t0, t1) = (t0.max(0.0), t1.min(1.0));
        if t1 - t0 <= PARAM_EPSILON {
            return None;
        }
        Some((t0, t1))
    }
}

fn flatten_into(seg: &Segment, tolerance: f64, depth: usize, out: &mut Vec<Point>) {
    if depth >= 16 || seg.flatness() <= tolerance {
        out.push(seg.end());
        return;
    }
    let (a, b) = seg.split(0.5);
    flatten_into(&a, tolerance, depth + 1, out);
    flatten_into(&b, tolerance, depth + 1, out);
}

/// Make consecutive segments share their joint points exactly
pub fn weld(segments: &mut [Segment]) {
    for i in 1 .. segments.len() {
        let p = segments[i-1].end();
        segments[i] = segments[i].with_start(p);
    }
}

/// Weld and close a loop onto its first point
pub fn weld_loop(segments: &mut [Segment]) {
    weld(segments);
    if let Some(first) = segments.first().map(|s| s.start) {
        let n = segments.len();
        segments[n-1] = segments[n-1].with_end(first);
    }
}

/// Signed area of a closed loop
pub fn loop_area(segments: &[Segment]) -> f64 {
    segments.iter().map(|s| s.signed_area()).sum()
}

/// Bounds of a list of segments
pub fn loop_bounds(segments: &[Segment]) -> Option<Rectangle<f64>> {
    let mut iter = segments.iter();
    let mut r = iter.next()?.bounds();
    for s in iter {
        r.expand_rect(&s.bounds());
    }
    Some(r)
}

/// Same loop traversed backwards
pub fn reverse_loop(segments: &[Segment]) -> Vec<Segment> {
    segments.iter().rev().map(|s| s.reversed()).collect()
}

/// Pieces of a cubic once its self-loop has been cut out
///
/// `kept` continues the input path from start to end, `looped` is the
/// closed loop that was removed.
#[derive(Debug,Copy,Clone,PartialEq)]
pub struct LoopCut {
    pub kept: [Option<Segment>; 2],
    pub looped: Option<Segment>,
}

/// Cut the self-intersection loop out of a cubic
///
/// The two crossing parameters can fall inside the segment, touch its
/// start, touch its end, or touch both (a closed cubic).
pub fn split_self_loop(seg: &Segment, tol: &Tolerance) -> LoopCut {
    let (t0, t1) = match seg.self_intersection() {
        Some(v) => v,
        None => return LoopCut { kept: [Some(*seg), None], looped: None },
    };
    let at_start = t0 <= PARAM_EPSILON || seg.point(t0).almost_equal(seg.start, tol.eps);
    let at_end = t1 >= 1.0 - PARAM_EPSILON || seg.point(t1).almost_equal(seg.end(), tol.eps);
    let keep = |s: Segment| if s.is_degenerate(tol.eps) { None } else { Some(s) };
    match (at_start, at_end) {
        (false, false) => {
            let head = seg.subsegment(0.0, t0);
            let x = head.end();
            let tail = seg.subsegment(t1, 1.0).with_start(x);
            let looped = seg.subsegment(t0, t1).with_start(x).with_end(x);
            LoopCut { kept: [keep(head), keep(tail)], looped: Some(looped) }
        },
        (true, false) => {
            let x = seg.start;
            let tail = seg.subsegment(t1, 1.0).with_start(x);
            let looped = seg.subsegment(0.0, t1).with_end(x);
            LoopCut { kept: [keep(tail), None], looped: Some(looped) }
        },
        (false, true) => {
            let x = seg.end();
            let head = seg.subsegment(0.0, t0).with_end(x);
            let looped = seg.subsegment(t0, 1.0).with_start(x);
            LoopCut { kept: [keep(head), None], looped: Some(looped) }
        },
        (true, true) => {
            let looped = seg.with_end(seg.start);
            LoopCut { kept: [None, None], looped: Some(looped) }
        },
    }
}
