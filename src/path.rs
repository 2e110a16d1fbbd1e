//! Paths
//!
//! A [`Shape`] is a list of [`Component`]s, each a run of connected
//! segments.  Shapes are usually built with [`Path`]:
//!
//!     use raster2d::Path;
//!
//!     let mut p = Path::new();
//!     p.move_to(1.0, 1.0);
//!     p.line_to(3.0, 1.0);
//!     p.line_to(3.0, 3.0);
//!     p.line_to(1.0, 3.0);
//!     p.close_polygon();
//!     let shape = p.finish();
//!     assert_eq!(shape.components.len(), 1);
//!     assert_eq!(shape.components[0].segments.len(), 4);
//!

use crate::math::Point;
use crate::rect::Rectangle;
use crate::segment::Segment;
use crate::segment::loop_area;
use crate::segment::loop_bounds;
use crate::segment::reverse_loop;

/// One contiguous subpath
#[derive(Debug,Default,Clone,PartialEq)]
pub struct Component {
    pub segments: Vec<Segment>,
    pub closed: bool,
}

impl Component {
    pub fn new(segments: Vec<Segment>, closed: bool) -> Self {
        Self { segments, closed }
    }
    /// Closed polygon through `points`
    pub fn polygon(points: &[(f64, f64)]) -> Self {
        let n = points.len();
        let segments = (0 .. n)
            .map(|i| {
                let (x0, y0) = points[i];
                let (x1, y1) = points[(i + 1) % n];
                Segment::line(Point::new(x0, y0), Point::new(x1, y1))
            })
            .collect();
        Self::new(segments, true)
    }
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
    pub fn bounds(&self) -> Option<Rectangle<f64>> {
        loop_bounds(&self.segments)
    }
    /// Segments with the implicit closing line added when needed
    pub fn closed_segments(&self) -> Vec<Segment> {
        let mut segs = self.segments.clone();
        if let (Some(first), Some(last)) = (segs.first().cloned(), segs.last().cloned()) {
            if last.end() != first.start {
                segs.push(Segment::line(last.end(), first.start));
            }
        }
        segs
    }
    /// Signed area of the closed component
    pub fn area(&self) -> f64 {
        loop_area(&self.closed_segments())
    }
    pub fn reverse(&mut self) {
        self.segments = reverse_loop(&self.segments);
    }
}

/// Ordered set of components
#[derive(Debug,Default,Clone,PartialEq)]
pub struct Shape {
    pub components: Vec<Component>,
}

impl Shape {
    pub fn new() -> Self {
        Self { components: vec![] }
    }
    pub fn push(&mut self, c: Component) {
        self.components.push(c);
    }
    /// Axis aligned rectangle, counter clockwise
    pub fn rectangle(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::polygon(&[(x1, y1), (x2, y1), (x2, y2), (x1, y2)])
    }
    pub fn polygon(points: &[(f64, f64)]) -> Self {
        Self { components: vec![Component::polygon(points)] }
    }
    pub fn is_empty(&self) -> bool {
        self.components.iter().all(|c| c.is_empty())
    }
    pub fn bounds(&self) -> Option<Rectangle<f64>> {
        let mut iter = self.components.iter().filter_map(|c| c.bounds());
        let mut r = iter.next()?;
        for b in iter {
            r.expand_rect(&b);
        }
        Some(r)
    }
}

/// Shape builder
#[derive(Debug,Default)]
pub struct Path {
    shape: Shape,
    current: Vec<Segment>,
    start: Option<Point>,
    last: Option<Point>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }
    fn flush(&mut self, closed: bool) {
        if !self.current.is_empty() {
            let segments = std::mem::replace(&mut self.current, vec![]);
            self.shape.push(Component::new(segments, closed));
        }
    }
    /// Start a new component at (x,y)
    pub fn move_to(&mut self, x: f64, y: f64) {
        self.flush(false);
        let p = Point::new(x, y);
        self.start = Some(p);
        self.last = Some(p);
    }
    fn current_point(&mut self, x: f64, y: f64) -> Point {
        match self.last {
            Some(p) => p,
            None => {
                self.move_to(x, y);
                Point::new(x, y)
            }
        }
    }
    pub fn line_to(&mut self, x: f64, y: f64) {
        let p0 = self.current_point(x, y);
        let p1 = Point::new(x, y);
        self.current.push(Segment::line(p0, p1));
        self.last = Some(p1);
    }
    pub fn quad_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
        let p0 = self.current_point(cx, cy);
        let p2 = Point::new(x, y);
        self.current.push(Segment::quad(p0, Point::new(cx, cy), p2));
        self.last = Some(p2);
    }
    pub fn cubic_to(&mut self, c1x: f64, c1y: f64, c2x: f64, c2y: f64, x: f64, y: f64) {
        let p0 = self.current_point(c1x, c1y);
        let p3 = Point::new(x, y);
        self.current.push(Segment::cubic(p0, Point::new(c1x, c1y), Point::new(c2x, c2y), p3));
        self.last = Some(p3);
    }
    /// Close the current component with a line back to its start
    pub fn close_polygon(&mut self) {
        if self.current.is_empty() {
            return;
        }
        if let (Some(start), Some(last)) = (self.start, self.last) {
            if start != last {
                self.current.push(Segment::line(last, start));
            }
        }
        self.flush(true);
        self.last = self.start;
    }
    pub fn finish(mut self) -> Shape {
        self.flush(false);
        self.shape
    }
}
