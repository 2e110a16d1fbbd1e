//! Boolean algebra over filled regions
//!
//! Every loop of both operands is cut at all mutual crossings.  Each piece
//! is sampled just left and right of its midpoint; the operator decides
//! from the operands' winding at those samples whether the piece bounds
//! the result, and on which side the result lies.  Kept pieces are
//! oriented with the result on their left, linked back into loops, and
//! nested into outer solids and their holes.
//!
//!     use raster2d::{Region, Shape, FillingRule};
//!
//!     let a = Region::from_shape(&Shape::rectangle(0.0, 0.0, 2.0, 2.0), FillingRule::NonZero);
//!     let b = Region::from_shape(&Shape::rectangle(1.0, 1.0, 3.0, 3.0), FillingRule::NonZero);
//!     assert!((a.intersect(&b).area() - 1.0).abs() < 1e-9);
//!     assert!((a.union(&b).area() - 7.0).abs() < 1e-9);
//!

use crate::decompose::Solid;
use crate::decompose::decompose;
use crate::graph::LoopGraph;
use crate::graph::same_path;
use crate::math::Point;
use crate::math::Tolerance;
use crate::path::Component;
use crate::path::Shape;
use crate::segment::Segment;
use crate::segment::loop_bounds;
use crate::segment::reverse_loop;
use crate::segment::weld_loop;
use crate::split::Split;
use crate::split::find_crossings;
use crate::split::path_between;
use crate::split::sort_splits;
use crate::winding::FillingRule;
use crate::winding::winding;
use crate::winding::winding_loops;

/// Binary region operator
#[derive(Debug,Copy,Clone,PartialEq)]
pub enum BooleanOp {
    Union,
    Intersect,
    Subtract,
    Xor,
}

impl BooleanOp {
    /// Truth table over membership in the two operands
    pub fn keep(self, a: bool, b: bool) -> bool {
        match self {
            BooleanOp::Union => a || b,
            BooleanOp::Intersect => a && b,
            BooleanOp::Subtract => a && !b,
            BooleanOp::Xor => a != b,
        }
    }
}

/// Normalized region: outer solids, positive area, with negative holes
#[derive(Debug,Default,Clone,PartialEq)]
pub struct Region {
    solids: Vec<Solid>,
}

/// Loops of one operand and the rule deciding its inside
struct Operand {
    loops: Vec<Vec<Segment>>,
    rule: FillingRule,
}

impl Operand {
    fn contains(&self, p: Point) -> bool {
        self.rule.is_inside(winding_loops(&self.loops, p))
    }
}

impl Region {
    pub fn new() -> Self {
        Self { solids: vec![] }
    }
    /// Normalize a shape filled with `rule`
    pub fn from_shape(shape: &Shape, rule: FillingRule) -> Region {
        let loops = shape.components.iter()
            .flat_map(|c| decompose(c))
            .flat_map(|s| s.loops())
            .collect();
        combine(&[Operand { loops, rule }], |inside| inside[0])
    }
    /// Outer solids, sorted top to bottom then left to right
    pub fn solids(&self) -> &[Solid] {
        &self.solids
    }
    fn loops(&self) -> Vec<Vec<Segment>> {
        self.solids.iter().flat_map(|s| s.loops()).collect()
    }
    fn operand(&self) -> Operand {
        Operand { loops: self.loops(), rule: FillingRule::NonZero }
    }
    pub fn boolean(&self, other: &Region, op: BooleanOp) -> Region {
        log::debug!("REGION: {:?} of {} and {} solids", op, self.solids.len(), other.solids.len());
        combine(&[self.operand(), other.operand()], |inside| op.keep(inside[0], inside[1]))
    }
    pub fn union(&self, other: &Region) -> Region {
        self.boolean(other, BooleanOp::Union)
    }
    pub fn intersect(&self, other: &Region) -> Region {
        self.boolean(other, BooleanOp::Intersect)
    }
    pub fn subtract(&self, other: &Region) -> Region {
        self.boolean(other, BooleanOp::Subtract)
    }
    pub fn xor(&self, other: &Region) -> Region {
        self.boolean(other, BooleanOp::Xor)
    }
    pub fn contains(&self, p: Point) -> bool {
        self.solids.iter().map(|s| s.winding(p)).sum::<i32>() != 0
    }
    /// Area enclosed, holes subtracted
    pub fn area(&self) -> f64 {
        fn solid_area(s: &Solid) -> f64 {
            s.area + s.holes.iter().map(solid_area).sum::<f64>()
        }
        self.solids.iter().map(solid_area).sum()
    }
    pub fn is_empty(&self) -> bool {
        self.solids.is_empty()
    }
    /// Regions cover the same area up to the tolerance of their geometry
    pub fn approx_eq(&self, other: &Region) -> bool {
        let x = self.xor(other);
        if x.is_empty() {
            return true;
        }
        let mut loops = self.loops();
        loops.extend(other.loops());
        let tol = tolerance(&loops);
        x.area().abs() <= tol.area()
    }
    /// Closed components, each outer followed by its holes
    pub fn to_shape(&self) -> Shape {
        Shape {
            components: self.loops().into_iter()
                .map(|l| Component::new(l, true))
                .collect()
        }
    }
}

fn tolerance(loops: &[Vec<Segment>]) -> Tolerance {
    let mut iter = loops.iter().filter_map(|l| loop_bounds(l));
    match iter.next() {
        Some(mut r) => {
            for b in iter {
                r.expand_rect(&b);
            }
            Tolerance::from_rect(&r)
        },
        None => Tolerance::new(1.0),
    }
}

/// Cut, classify, link and nest the loops of all operands
fn combine<F>(operands: &[Operand], keep: F) -> Region
    where F: Fn(&[bool]) -> bool
{
    let loops : Vec<&Vec<Segment>> = operands.iter()
        .flat_map(|o| o.loops.iter())
        .filter(|l| !l.is_empty())
        .collect();
    if loops.is_empty() {
        return Region::new();
    }
    let all : Vec<Vec<Segment>> = loops.iter().map(|l| l.to_vec()).collect();
    let tol = tolerance(&all);

    let mut splits : Vec<Vec<Split>> = vec![vec![]; loops.len()];
    for i in 0 .. loops.len() {
        for j in i .. loops.len() {
            for c in find_crossings(loops[i], loops[j], i == j, &tol) {
                splits[i].push(c.a);
                splits[j].push(c.b);
            }
        }
    }

    let h = tol.reference * 1e-6;
    let inside = |p: Point| -> bool {
        let v : Vec<bool> = operands.iter().map(|o| o.contains(p)).collect();
        keep(&v)
    };
    let mut pieces : Vec<Vec<Segment>> = vec![];
    for (l, s) in loops.iter().zip(splits.iter_mut()) {
        sort_splits(s, &tol);
        let cut = match s.len() {
            0 => vec![l.to_vec()],
            n => (0 .. n).map(|k| path_between(l, &s[k], &s[(k + 1) % n])).collect(),
        };
        for piece in cut.into_iter().filter(|p| !p.is_empty()) {
            let (m, normal) = sample(&piece);
            let left = inside(m + normal * h);
            let right = inside(m - normal * h);
            if left == right {
                continue;
            }
            let piece = if left { piece } else { reverse_loop(&piece) };
            if !pieces.iter().any(|p| same_path(p, &piece, &tol)) {
                pieces.push(piece);
            }
        }
    }
    log::debug!("REGION: {} loops cut into {} boundary pieces", loops.len(), pieces.len());

    // Pieces meet at nodes identified by position
    let mut nodes : Vec<Point> = vec![];
    let mut node = |p: Point| -> usize {
        match nodes.iter().position(|q| q.almost_equal(p, tol.link())) {
            Some(i) => i,
            None => {
                nodes.push(p);
                nodes.len() - 1
            }
        }
    };
    let mut graph = LoopGraph::new();
    for piece in pieces {
        let (a, b) = match (piece.first(), piece.last()) {
            (Some(first), Some(last)) => (first.start, last.end()),
            _ => continue,
        };
        let (from, to) = (node(a), node(b));
        graph.add_edge(from, to, piece, &tol);
    }

    let mut outers = vec![];
    let mut holes = vec![];
    for l in graph.extract_loops() {
        let mut segs : Vec<Segment> = l.iter()
            .map(|s| s.map(|p| p.snap()))
            .filter(|s| !s.is_degenerate(tol.eps))
            .collect();
        if segs.is_empty() {
            continue;
        }
        weld_loop(&mut segs);
        let solid = Solid::new(segs);
        if solid.area.abs() <= tol.area() {
            continue;
        }
        if solid.is_hole() {
            holes.push(solid);
        } else {
            outers.push(solid);
        }
    }
    nest(outers, holes, h)
}

/// Point in the middle of a path and the unit normal to its left
fn sample(path: &[Segment]) -> (Point, Point) {
    let seg = &path[path.len() / 2];
    let m = seg.point(0.5);
    let mut d = seg.derivative(0.5);
    if d.length() == 0.0 {
        d = seg.end() - seg.start;
    }
    (m, d.normalize().perp())
}

/// Give every hole to the smallest outer containing it
fn nest(mut outers: Vec<Solid>, holes: Vec<Solid>, h: f64) -> Region {
    for hole in holes {
        // Just outside the hole, inside whatever contains it
        let (m, normal) = sample(&hole.segments);
        let p = m + normal * h;
        let best = outers.iter_mut()
            .filter(|o| winding(&o.segments, p) != 0)
            .min_by(|a, b| a.area.partial_cmp(&b.area).unwrap_or(std::cmp::Ordering::Equal));
        match best {
            Some(o) => o.holes.push(hole),
            None => log::debug!("REGION: dropping hole without outer, area {}", hole.area),
        }
    }
    outers.sort_by(|a, b| {
        let key = |s: &Solid| s.bounds().map(|r| (r.y1, r.x1)).unwrap_or((0.0, 0.0));
        let (ka, kb) = (key(a), key(b));
        ka.partial_cmp(&kb).unwrap_or(std::cmp::Ordering::Equal)
    });
    Region { solids: outers }
}
