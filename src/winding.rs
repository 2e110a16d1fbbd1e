//! Winding numbers and filling rules

use crate::math::Point;
use crate::math::solve_quadratic;
use crate::math::PARAM_EPSILON;
use crate::segment::Segment;
use crate::segment::SegmentKind;

/// Predicate turning a winding number into inside / outside
#[derive(Debug,PartialEq,Copy,Clone)]
pub enum FillingRule {
    NonZero,
    EvenOdd,
}
impl Default for FillingRule {
    fn default() -> FillingRule {
        FillingRule::NonZero
    }
}

impl FillingRule {
    pub fn is_inside(self, winding: i32) -> bool {
        match self {
            FillingRule::NonZero => winding != 0,
            FillingRule::EvenOdd => winding % 2 != 0,
        }
    }
}

/// Winding number of the closed loop `segments` around `p`
///
/// A ray is cast towards +x.  Each segment is cut into y-monotonic pieces
/// and a piece counts when `p.y` lies in its half-open y range, upward
/// pieces adding one and downward pieces subtracting one.  Loops with a
/// positive signed area wind +1 around their interior.
pub fn winding(segments: &[Segment], p: Point) -> i32 {
    segments.iter().map(|s| segment_winding(s, p)).sum()
}

/// Winding number summed over several loops
pub fn winding_loops(loops: &[Vec<Segment>], p: Point) -> i32 {
    loops.iter().map(|l| winding(l, p)).sum()
}

fn segment_winding(seg: &Segment, p: Point) -> i32 {
    let b = seg.bounds();
    if p.y < b.y1 || p.y > b.y2 || p.x > b.x2 {
        return 0;
    }
    if let SegmentKind::Line(p1) = seg.kind {
        return line_winding(seg.start, p1, p);
    }
    // Parameters and exact y values bounding the monotonic pieces
    let mut knots = vec![(0.0, seg.start.y)];
    for t in y_extrema(seg) {
        knots.push((t, seg.point(t).y));
    }
    knots.push((1.0, seg.end().y));
    let mut w = 0;
    for k in knots.windows(2) {
        let ((t0, y0), (t1, y1)) = (k[0], k[1]);
        let dir = if y0 <= p.y && p.y < y1 {
            1
        } else if y1 <= p.y && p.y < y0 {
            -1
        } else {
            continue;
        };
        let t = bisect_y(seg, t0, t1, y0, y1, p.y);
        if seg.point(t).x > p.x {
            w += dir;
        }
    }
    w
}

fn line_winding(p0: Point, p1: Point, p: Point) -> i32 {
    let dir = if p0.y <= p.y && p.y < p1.y {
        1
    } else if p1.y <= p.y && p.y < p0.y {
        -1
    } else {
        return 0;
    };
    let t = (p.y - p0.y) / (p1.y - p0.y);
    let x = p0.x + t * (p1.x - p0.x);
    if x > p.x { dir } else { 0 }
}

/// Interior parameters where dy/dt vanishes, sorted
fn y_extrema(seg: &Segment) -> Vec<f64> {
    let p0 = seg.start.y;
    let mut ts = match seg.kind {
        SegmentKind::Line(_) => vec![],
        SegmentKind::Quad(p1, p2) => {
            let den = p0 - 2.0 * p1.y + p2.y;
            if den == 0.0 { vec![] } else { vec![(p0 - p1.y) / den] }
        },
        SegmentKind::Cubic(p1, p2, p3) => {
            let a = p1.y - p0;
            let b = p2.y - p1.y;
            let c = p3.y - p2.y;
            solve_quadratic(a - 2.0 * b + c, 2.0 * (b - a), a)
        },
    };
    ts.retain(|t| *t > PARAM_EPSILON && *t < 1.0 - PARAM_EPSILON);
    ts.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    ts
}

/// Parameter in `[t0, t1]` where the monotonic piece reaches `y`
fn bisect_y(seg: &Segment, mut t0: f64, mut t1: f64, y0: f64, y1: f64, y: f64) -> f64 {
    let up = y1 > y0;
    for _ in 0 .. 64 {
        let tm = 0.5 * (t0 + t1);
        let ym = seg.point(tm).y;
        if (ym < y) == up {
            t0 = tm;
        } else {
            t1 = tm;
        }
        if t1 - t0 <= PARAM_EPSILON * 1e-3 {
            break;
        }
    }
    0.5 * (t0 + t1)
}
