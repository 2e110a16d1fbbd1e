//! Segment / segment intersection
//!
//! Lines are intersected exactly.  Curves are subdivided until both pieces
//! are flat within the tolerance, the chords are intersected, and the
//! result is polished with Newton iterations on `A(s) - B(t) = 0`.  When
//! the Jacobian is singular (tangent or near-zero derivative) the closest
//! point projection is used instead.

use crate::math::Point;
use crate::math::Tolerance;
use crate::segment::Segment;

const MAX_DEPTH: usize = 48;
/// Subdivision steps allowed per pair, overlapping curves exhaust it
const MAX_STEPS: usize = 4096;

/// Parameters `(ta, tb)` where `a` and `b` meet
pub fn intersect(a: &Segment, b: &Segment, tol: &Tolerance) -> Vec<(f64, f64)> {
    if !a.bounds().inflate(tol.eps).overlaps(&b.bounds().inflate(tol.eps)) {
        return vec![];
    }
    if a.is_line() && b.is_line() {
        return line_line(a.start, a.end(), b.start, b.end(), tol)
            .into_iter()
            .collect();
    }
    if same_curve(a, b, tol) {
        return vec![];
    }
    let mut raw = vec![];
    let mut steps = 0;
    subdivide(a, (0.0, 1.0), b, (0.0, 1.0), tol, 0, &mut steps, &mut raw);
    if steps >= MAX_STEPS {
        log::trace!("INTERSECT: overlapping curves {:?} {:?}", a, b);
        return vec![];
    }
    let mut out : Vec<(f64, f64)> = raw.into_iter()
        .filter_map(|(s,t)| polish(a, b, s, t, tol))
        .collect();
    dedupe(a, &mut out, tol);
    out
}

/// Exact intersection of two line segments
///
/// Parallel lines never intersect here; collinear overlaps are found by
/// the endpoint touch test instead.
pub fn line_line(a0: Point, a1: Point, b0: Point, b1: Point, tol: &Tolerance) -> Option<(f64, f64)> {
    let r = a1 - a0;
    let s = b1 - b0;
    let denom = r.cross(s);
    let (lr, ls) = (r.length(), s.length());
    if denom.abs() <= 1e-12 * lr * ls || lr == 0.0 || ls == 0.0 {
        return None;
    }
    let q = b0 - a0;
    let ta = q.cross(s) / denom;
    let tb = q.cross(r) / denom;
    let (da, db) = (tol.eps / lr, tol.eps / ls);
    if ta < -da || ta > 1.0 + da || tb < -db || tb > 1.0 + db {
        return None;
    }
    Some((ta.max(0.0).min(1.0), tb.max(0.0).min(1.0)))
}

/// Parameter on `seg` that `p` touches, if it lies within the touch distance
pub fn touch(p: Point, seg: &Segment, tol: &Tolerance) -> Option<f64> {
    if !seg.bounds().inflate(tol.touch()).contains(p.x, p.y) {
        return None;
    }
    let t = seg.closest_point(p);
    if seg.point(t).distance(p) <= tol.touch() {
        Some(t)
    } else {
        None
    }
}

fn same_curve(a: &Segment, b: &Segment, tol: &Tolerance) -> bool {
    let pa = a.control_points();
    let pb = b.control_points();
    if pa.len() != pb.len() {
        return false;
    }
    let fwd = pa.iter().zip(pb.iter()).all(|(p,q)| p.almost_equal(*q, tol.eps));
    let rev = pa.iter().zip(pb.iter().rev()).all(|(p,q)| p.almost_equal(*q, tol.eps));
    fwd || rev
}

#[allow(clippy::too_many_arguments)]
fn subdivide(a: &Segment, ra: (f64, f64), b: &Segment, rb: (f64, f64),
             tol: &Tolerance, depth: usize, steps: &mut usize,
             out: &mut Vec<(f64, f64)>) {
    *steps += 1;
    if *steps >= MAX_STEPS {
        return;
    }
    let ba = a.bounds();
    let bb = b.bounds();
    if !ba.inflate(tol.eps).overlaps(&bb.inflate(tol.eps)) {
        return;
    }
    let flat_a = a.flatness() <= tol.eps;
    let flat_b = b.flatness() <= tol.eps;
    if (flat_a && flat_b) || depth >= MAX_DEPTH {
        let hit = line_line(a.start, a.end(), b.start, b.end(), tol)
            .or_else(|| {
                // Parallel chords: tangency, project instead
                let pm = a.point(0.5);
                let t = b.closest_point(pm);
                if b.point(t).distance(pm) <= tol.eps { Some((0.5, t)) } else { None }
            });
        if let Some((s, t)) = hit {
            out.push((ra.0 + s * (ra.1 - ra.0), rb.0 + t * (rb.1 - rb.0)));
        }
        return;
    }
    if !flat_a && (flat_b || ba.diagonal() >= bb.diagonal()) {
        let (l, r) = a.split(0.5);
        let m = (ra.0 + ra.1) / 2.0;
        subdivide(&l, (ra.0, m), b, rb, tol, depth + 1, steps, out);
        subdivide(&r, (m, ra.1), b, rb, tol, depth + 1, steps, out);
    } else {
        let (l, r) = b.split(0.5);
        let m = (rb.0 + rb.1) / 2.0;
        subdivide(a, ra, &l, (rb.0, m), tol, depth + 1, steps, out);
        subdivide(a, ra, &r, (m, rb.1), tol, depth + 1, steps, out);
    }
}

/// Newton refinement of an approximate intersection
fn polish(a: &Segment, b: &Segment, s0: f64, t0: f64, tol: &Tolerance) -> Option<(f64, f64)> {
    let (mut s, mut t) = (s0, t0);
    for _ in 0 .. 8 {
        let f = a.point(s) - b.point(t);
        if f.length() <= tol.eps * 1e-3 {
            break;
        }
        let c1 = a.derivative(s);
        let c2 = -b.derivative(t);
        let det = c1.cross(c2);
        if det.abs() <= 1e-9 * c1.length() * c2.length() || det == 0.0 {
            // Singular, fall back to projecting onto b
            t = b.closest_point(a.point(s));
            break;
        }
        let r = -f;
        s = (s + r.cross(c2) / det).max(0.0).min(1.0);
        t = (t + c1.cross(r) / det).max(0.0).min(1.0);
    }
    let polished = a.point(s).distance(b.point(t));
    let raw = a.point(s0).distance(b.point(t0));
    let (s, t, d) = if polished <= raw { (s, t, polished) } else { (s0, t0, raw) };
    if d <= tol.touch() {
        Some((s, t))
    } else {
        None
    }
}

fn dedupe(a: &Segment, hits: &mut Vec<(f64, f64)>, tol: &Tolerance) {
    hits.sort_by(|x, y| x.0.partial_cmp(&y.0).unwrap_or(std::cmp::Ordering::Equal));
    let mut out : Vec<(f64, f64)> = vec![];
    for h in hits.iter() {
        let dup = out.iter().any(|o| a.point(o.0).almost_equal(a.point(h.0), tol.touch()));
        if !dup {
            out.push(*h);
        }
    }
    *hits = out;
}
