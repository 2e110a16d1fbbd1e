//! Transformations
//!
//! Points are row vectors multiplied from the left, so
//!
//! ```text
//! x' = (x * sx  + y * shx + tx) / w
//! y' = (x * shy + y * sy  + ty) / w
//! w  =  x * w0  + y * w1  + w2
//! ```
//!
//! Affine transforms keep `w0 = w1 = 0` and `w2 = 1`.

use crate::math::Point;

use std::ops::Mul;

/// Projective transformation
#[derive(Debug,Copy,Clone,PartialEq)]
pub struct Transform {
    pub sx: f64,
    pub shy: f64,
    pub w0: f64,
    pub shx: f64,
    pub sy: f64,
    pub w1: f64,
    pub tx: f64,
    pub ty: f64,
    pub w2: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform {
    /// Creates a new identity Transform
    pub fn new() -> Self {
        Self { sx: 1.0,  shy: 0.0, w0: 0.0,
               shx: 0.0, sy: 1.0,  w1: 0.0,
               tx: 0.0,  ty: 0.0,  w2: 1.0,
        }
    }
    /// Add a translation to the transform
    pub fn translate(&mut self, dx: f64, dy: f64) {
        *self = self.mul_transform(&Transform::new_translate(dx, dy));
    }
    /// Add a scaling to the transform
    pub fn scale(&mut self, sx: f64, sy: f64) {
        *self = self.mul_transform(&Transform::new_scale(sx, sy));
    }
    /// Add a rotation to the transform
    ///
    /// angle is in radians
    pub fn rotate(&mut self, angle: f64) {
        *self = self.mul_transform(&Transform::new_rotate(angle));
    }

    /// Perform the transform
    pub fn transform(&self, x: f64, y: f64) -> (f64, f64) {
        let w = x * self.w0 + y * self.w1 + self.w2;
        ((x * self.sx  + y * self.shx + self.tx) / w,
         (x * self.shy + y * self.sy  + self.ty) / w)
    }
    pub fn transform_point(&self, p: Point) -> Point {
        let (x, y) = self.transform(p.x, p.y);
        Point::new(x, y)
    }
    pub fn is_affine(&self) -> bool {
        self.w0 == 0.0 && self.w1 == 0.0 && self.w2 == 1.0
    }
    fn determinant(&self) -> f64 {
        self.sx  * (self.sy * self.w2 - self.w1 * self.ty)
            - self.shy * (self.shx * self.w2 - self.w1 * self.tx)
            + self.w0 * (self.shx * self.ty - self.sy * self.tx)
    }
    fn values(&self) -> [f64; 9] {
        [self.sx, self.shy, self.w0, self.shx, self.sy, self.w1, self.tx, self.ty, self.w2]
    }
    /// Determinant is finite and not vanishing relative to the coefficients
    pub fn is_invertible(&self) -> bool {
        if !self.values().iter().all(|v| v.is_finite()) {
            return false;
        }
        let row = |a: f64, b: f64, c: f64| a.hypot(b).hypot(c);
        let scale = row(self.sx, self.shy, self.w0)
            * row(self.shx, self.sy, self.w1)
            * row(self.tx, self.ty, self.w2);
        let d = self.determinant();
        d.is_finite() && d.abs() > 1e-12 * scale
    }
    /// Inverse transform, `None` when singular
    pub fn invert(&self) -> Option<Transform> {
        if !self.is_invertible() {
            return None;
        }
        let k = 1.0 / self.determinant();
        // Adjugate of the row-major matrix [a b c; d e f; g h i]
        let [a, b, c, d, e, f, g, h, i] = self.values();
        Some(Transform {
            sx:  (e * i - f * h) * k,
            shy: (c * h - b * i) * k,
            w0:  (b * f - c * e) * k,
            shx: (f * g - d * i) * k,
            sy:  (a * i - c * g) * k,
            w1:  (c * d - a * f) * k,
            tx:  (d * h - e * g) * k,
            ty:  (b * g - a * h) * k,
            w2:  (a * e - b * d) * k,
        })
    }
    /// Apply `self`, then `m`
    pub fn mul_transform(&self, m: &Transform) -> Self {
        let a = self;
        Transform {
            sx:  a.sx  * m.sx  + a.shy * m.shx + a.w0 * m.tx,
            shy: a.sx  * m.shy + a.shy * m.sy  + a.w0 * m.ty,
            w0:  a.sx  * m.w0  + a.shy * m.w1  + a.w0 * m.w2,
            shx: a.shx * m.sx  + a.sy  * m.shx + a.w1 * m.tx,
            sy:  a.shx * m.shy + a.sy  * m.sy  + a.w1 * m.ty,
            w1:  a.shx * m.w0  + a.sy  * m.w1  + a.w1 * m.w2,
            tx:  a.tx  * m.sx  + a.ty  * m.shx + a.w2 * m.tx,
            ty:  a.tx  * m.shy + a.ty  * m.sy  + a.w2 * m.ty,
            w2:  a.tx  * m.w0  + a.ty  * m.w1  + a.w2 * m.w2,
        }
    }
    pub fn new_scale(sx: f64, sy: f64) -> Transform {
        Transform { sx, sy, .. Self::new() }
    }
    pub fn new_translate(tx: f64, ty: f64) -> Transform {
        Transform { tx, ty, .. Self::new() }
    }
    pub fn new_rotate(ang: f64) -> Transform {
        let (sa, ca) = ang.sin_cos();
        Transform { sx: ca, shy: sa, shx: -sa, sy: ca, .. Self::new() }
    }
    /// Perspective divide by `x * w0 + y * w1 + 1`
    pub fn new_perspective(w0: f64, w1: f64) -> Transform {
        Transform { w0, w1, .. Self::new() }
    }
}

impl Mul<Transform> for Transform {
    type Output = Transform;
    fn mul(self, rhs: Transform) -> Self {
        self.mul_transform(&rhs)
    }
}
