//! Bounding rectangles

/// Rectangle
#[derive(Debug,Default,Copy,Clone,PartialEq)]
pub struct Rectangle<T: std::cmp::PartialOrd + Copy> {
    /// Minimum x value
    pub x1: T,
    /// Minimum y value
    pub y1: T,
    /// Maximum x value
    pub x2: T,
    /// Maximum y value
    pub y2: T,
}

impl<T> Rectangle<T> where T: std::cmp::PartialOrd + Copy {
    /// Create a new Rectangle
    ///
    /// Values are sorted before storing
    pub fn new(x1: T, y1: T, x2: T, y2: T) -> Self {
        let (x1, x2) = if x1 > x2 { (x2,x1) } else { (x1,x2) };
        let (y1, y2) = if y1 > y2 { (y2,y1) } else { (y1,y2) };
        Self { x1,y1,x2,y2 }
    }
    /// Expand if the point (x,y) is outside
    pub fn expand(&mut self, x: T, y: T) {
        if x < self.x1 { self.x1 = x; }
        if x > self.x2 { self.x2 = x; }
        if y < self.y1 { self.y1 = y; }
        if y > self.y2 { self.y2 = y; }
    }
    /// Expand if the rectangle is outside
    pub fn expand_rect(&mut self, r: &Rectangle<T>) {
        self.expand(r.x1, r.y1);
        self.expand(r.x2, r.y2);
    }
    /// Rectangles share at least one point, edges included
    pub fn overlaps(&self, r: &Rectangle<T>) -> bool {
        self.x1 <= r.x2 && r.x1 <= self.x2 &&
        self.y1 <= r.y2 && r.y1 <= self.y2
    }
    /// Point is inside or on the edge
    pub fn contains(&self, x: T, y: T) -> bool {
        x >= self.x1 && x <= self.x2 && y >= self.y1 && y <= self.y2
    }
}

impl Rectangle<f64> {
    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }
    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }
    /// Grow by `d` on every side
    pub fn inflate(&self, d: f64) -> Self {
        Self { x1: self.x1 - d, y1: self.y1 - d,
               x2: self.x2 + d, y2: self.y2 + d }
    }
    /// Length of the diagonal
    pub fn diagonal(&self) -> f64 {
        self.width().hypot(self.height())
    }
    pub fn is_finite(&self) -> bool {
        self.x1.is_finite() && self.x2.is_finite() &&
        self.y1.is_finite() && self.y2.is_finite()
    }
}
