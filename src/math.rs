//! Points, tolerances and small numeric helpers

use crate::rect::Rectangle;

use std::ops::Add;
use std::ops::Sub;
use std::ops::Mul;
use std::ops::Div;
use std::ops::Neg;

/// Relative epsilon, scaled by the reference size of the geometry
pub const EPSILON: f64 = 1e-8;

/// Parameter distance below which two curve parameters are the same
pub const PARAM_EPSILON: f64 = 1e-9;

/// Point or vector in the plane
#[derive(Debug,Default,Copy,Clone,PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
    pub fn dot(self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }
    /// z component of the 3D cross product
    pub fn cross(self, other: Point) -> f64 {
        self.x * other.y - self.y * other.x
    }
    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }
    pub fn distance(self, other: Point) -> f64 {
        (self - other).length()
    }
    /// Linear interpolation, `t = 0` is `self`, `t = 1` is `other`
    pub fn lerp(self, other: Point, t: f64) -> Point {
        Point::new(self.x + (other.x - self.x) * t,
                   self.y + (other.y - self.y) * t)
    }
    /// Unit vector in the same direction, the zero vector stays zero
    pub fn normalize(self) -> Point {
        let len = self.length();
        if len > 0.0 {
            self / len
        } else {
            self
        }
    }
    /// Rotate by +90 degrees
    pub fn perp(self) -> Point {
        Point::new(-self.y, self.x)
    }
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
    pub fn almost_equal(self, other: Point, eps: f64) -> bool {
        (self.x - other.x).abs() <= eps && (self.y - other.y).abs() <= eps
    }
    /// Round both coordinates to the nearest single precision value
    pub fn snap(self) -> Point {
        Point::new(snap(self.x), snap(self.y))
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}
impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}
impl Mul<f64> for Point {
    type Output = Point;
    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}
impl Div<f64> for Point {
    type Output = Point;
    fn div(self, rhs: f64) -> Point {
        Point::new(self.x / rhs, self.y / rhs)
    }
}
impl Neg for Point {
    type Output = Point;
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

/// Round to the nearest value representable as an `f32`
pub fn snap(v: f64) -> f64 {
    f64::from(v as f32)
}

/// Scale-relative tolerances
///
/// The reference size is the square root of the bounding area, so every
/// zero and equality test behaves the same at any drawing scale.
#[derive(Debug,Copy,Clone,PartialEq)]
pub struct Tolerance {
    /// Reference size of the geometry
    pub reference: f64,
    /// Largest absolute coordinate
    pub magnitude: f64,
    /// Distance below which two points are equal
    pub eps: f64,
}

impl Tolerance {
    pub fn new(reference: f64) -> Self {
        let reference = if reference.is_finite() && reference > 0.0 {
            reference
        } else {
            1.0
        };
        Tolerance { reference, magnitude: reference, eps: reference * EPSILON }
    }
    pub fn from_rect(r: &Rectangle<f64>) -> Self {
        let (w, h) = (r.width(), r.height());
        let reference = if w * h > 0.0 { (w * h).sqrt() } else { w.max(h) };
        let mut tol = Tolerance::new(reference);
        tol.magnitude = r.x1.abs().max(r.x2.abs()).max(r.y1.abs()).max(r.y2.abs());
        tol
    }
    /// Distance under which an endpoint counts as touching another segment
    pub fn touch(&self) -> f64 {
        self.eps * 100.0
    }
    /// Distance under which snapped points are linked together
    ///
    /// Snapping to single precision moves points by up to half an `f32`
    /// ulp of the largest coordinate.
    pub fn link(&self) -> f64 {
        self.touch().max(self.magnitude * f64::from(f32::EPSILON) * 4.0)
    }
    /// Area below which a loop is considered empty
    pub fn area(&self) -> f64 {
        self.reference * self.reference * EPSILON
    }
}

/// Real roots of `a t^2 + b t + c`
pub fn solve_quadratic(a: f64, b: f64, c: f64) -> Vec<f64> {
    let scale = b.abs().max(c.abs());
    if a.abs() <= 1e-12 * scale || a == 0.0 {
        if b == 0.0 {
            return vec![];
        }
        return vec![-c / b];
    }
    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return vec![];
    }
    if disc == 0.0 {
        return vec![-b / (2.0 * a)];
    }
    // Avoids cancellation between -b and the square root
    let q = -0.5 * (b + b.signum() * disc.sqrt());
    let mut roots = vec![q / a];
    if q != 0.0 {
        roots.push(c / q);
    }
    roots.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    roots
}
