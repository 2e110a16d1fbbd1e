//! Addresses along a closed loop and the crossings between them

use crate::intersect::intersect;
use crate::intersect::touch;
use crate::math::Point;
use crate::math::Tolerance;
use crate::math::PARAM_EPSILON;
use crate::segment::Segment;

use std::cmp::Ordering;

/// Location along a closed loop
///
/// A split resolving onto the end of a segment is always stored as the
/// start of the next segment, so each location has one address.
#[derive(Debug,Copy,Clone,PartialEq)]
pub struct Split {
    /// Segment index
    pub index: usize,
    /// Local parameter on the segment
    pub t: f64,
    /// Resolved point
    pub point: Point,
}

impl Split {
    /// Resolve parameter `t` on segment `index` of the closed loop `segments`
    pub fn resolve(segments: &[Segment], index: usize, t: f64, tol: &Tolerance) -> Split {
        let seg = &segments[index];
        let t = t.max(0.0).min(1.0);
        let point = seg.point(t);
        if t >= 1.0 - PARAM_EPSILON || point.almost_equal(seg.end(), tol.eps) {
            let next = (index + 1) % segments.len();
            Split { index: next, t: 0.0, point: segments[next].start }
        } else if t <= PARAM_EPSILON || point.almost_equal(seg.start, tol.eps) {
            Split { index, t: 0.0, point: seg.start }
        } else {
            Split { index, t, point }
        }
    }
    /// Same address within tolerance
    pub fn almost_equal(&self, other: &Split, tol: &Tolerance) -> bool {
        self.index == other.index &&
            ((self.t - other.t).abs() <= PARAM_EPSILON ||
             self.point.almost_equal(other.point, tol.touch()))
    }
    /// Order along the loop
    pub fn position_cmp(&self, other: &Split) -> Ordering {
        self.index.cmp(&other.index)
            .then(self.t.partial_cmp(&other.t).unwrap_or(Ordering::Equal))
    }
}

/// Two addresses resolving to the same point
#[derive(Debug,Copy,Clone,PartialEq)]
pub struct Crossing {
    pub a: Split,
    pub b: Split,
}

impl Crossing {
    /// Same pair of splits, in either order
    pub fn same(&self, other: &Crossing, tol: &Tolerance) -> bool {
        (self.a.almost_equal(&other.a, tol) && self.b.almost_equal(&other.b, tol)) ||
            (self.a.almost_equal(&other.b, tol) && self.b.almost_equal(&other.a, tol))
    }
}

/// Every crossing between loops `a` and `b`
///
/// With `same` set `b` is `a` itself: only distinct segment pairs are
/// scanned and the joints shared by neighbours are ignored. Endpoints that
/// lie on another segment without a proper intersection produce a touch
/// crossing through closest-point projection.
pub fn find_crossings(a: &[Segment], b: &[Segment], same: bool, tol: &Tolerance) -> Vec<Crossing> {
    let mut out : Vec<Crossing> = vec![];
    let (na, nb) = (a.len(), b.len());
    if na == 0 || nb == 0 {
        return out;
    }
    {
        let mut push = |ia: usize, ta: f64, ib: usize, tb: f64| {
            let sa = Split::resolve(a, ia, ta, tol);
            let sb = Split::resolve(b, ib, tb, tol);
            if same && sa.almost_equal(&sb, tol) {
                return;
            }
            let c = Crossing { a: sa, b: sb };
            if !out.iter().any(|o| o.same(&c, tol)) {
                log::trace!("CROSSING: {:?}", c);
                out.push(c);
            }
        };
        for i in 0 .. na {
            let first = if same { i + 1 } else { 0 };
            for j in first .. nb {
                for (ta, tb) in intersect(&a[i], &b[j], tol) {
                    push(i, ta, j, tb);
                }
            }
        }
        // Touching endpoints
        for i in 0 .. na {
            for j in 0 .. nb {
                if same && (j == i || (j + 1) % nb == i) {
                    continue;
                }
                if let Some(t) = touch(a[i].start, &b[j], tol) {
                    push(i, 0.0, j, t);
                }
            }
        }
        if !same {
            for j in 0 .. nb {
                for i in 0 .. na {
                    if let Some(t) = touch(b[j].start, &a[i], tol) {
                        push(i, t, j, 0.0);
                    }
                }
            }
        }
    }
    out
}

/// Sort splits along the loop and drop duplicates
pub fn sort_splits(splits: &mut Vec<Split>, tol: &Tolerance) {
    splits.sort_by(|a, b| a.position_cmp(b));
    let mut out : Vec<Split> = vec![];
    for s in splits.iter() {
        if !out.iter().any(|o| o.almost_equal(s, tol)) {
            out.push(*s);
        }
    }
    *splits = out;
}

/// Segments of the closed loop running forward from `from` to `to`
///
/// When both splits are the same address the whole loop is returned.
pub fn path_between(segments: &[Segment], from: &Split, to: &Split) -> Vec<Segment> {
    let n = segments.len();
    let mut out = vec![];
    let mut index = from.index;
    let mut t0 = from.t;
    let mut first = true;
    loop {
        let seg = &segments[index];
        let ends_here = index == to.index &&
            if first { to.t > t0 + PARAM_EPSILON } else { to.t >= t0 };
        if ends_here {
            if to.t - t0 > PARAM_EPSILON {
                out.push(seg.subsegment(t0, to.t));
            }
            break;
        }
        if 1.0 - t0 > PARAM_EPSILON {
            out.push(if t0 <= 0.0 { *seg } else { seg.subsegment(t0, 1.0) });
        }
        index = (index + 1) % n;
        t0 = 0.0;
        first = false;
    }
    if let Some(s) = out.first_mut() {
        *s = s.with_start(from.point);
    }
    if let Some(s) = out.last_mut() {
        *s = s.with_end(to.point);
    }
    crate::segment::weld(&mut out);
    out
}
