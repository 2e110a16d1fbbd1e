//! Loop decomposition
//!
//! A closed component that crosses itself is cut at every crossing and the
//! pieces are re-linked through a [`LoopGraph`] into simple loops.  The
//! signed loops wind around every point exactly as the input loop did, so
//! their nonzero union is the input fill.
//!
//!     use raster2d::{Component, decompose};
//!
//!     // Figure eight, two lobes of opposite orientation
//!     let c = Component::polygon(&[(0.0,0.0), (2.0,2.0), (2.0,0.0), (0.0,2.0)]);
//!     let solids = decompose(&c);
//!     assert_eq!(solids.len(), 2);
//!     let total : f64 = solids.iter().map(|s| s.area.abs()).sum();
//!     assert!((total - 2.0).abs() < 1e-9);
//!

use crate::graph::LoopGraph;
use crate::math::Point;
use crate::math::Tolerance;
use crate::path::Component;
use crate::rect::Rectangle;
use crate::segment::Segment;
use crate::segment::loop_area;
use crate::segment::loop_bounds;
use crate::segment::split_self_loop;
use crate::segment::weld_loop;
use crate::split::Split;
use crate::split::find_crossings;
use crate::split::path_between;
use crate::split::sort_splits;
use crate::winding::winding;

/// Simple closed loop with its signed area and the holes nested inside it
#[derive(Debug,Clone,PartialEq)]
pub struct Solid {
    pub segments: Vec<Segment>,
    /// Signed area, positive for loops turning from +x to +y
    pub area: f64,
    pub holes: Vec<Solid>,
}

impl Solid {
    pub fn new(segments: Vec<Segment>) -> Self {
        let area = loop_area(&segments);
        Solid { segments, area, holes: vec![] }
    }
    pub fn bounds(&self) -> Option<Rectangle<f64>> {
        loop_bounds(&self.segments)
    }
    pub fn is_hole(&self) -> bool {
        self.area < 0.0
    }
    /// Winding of the loop and its holes around `p`
    pub fn winding(&self, p: Point) -> i32 {
        winding(&self.segments, p) +
            self.holes.iter().map(|h| h.winding(p)).sum::<i32>()
    }
    /// All loops, the outer one first
    pub fn loops(&self) -> Vec<Vec<Segment>> {
        let mut out = vec![self.segments.clone()];
        for h in &self.holes {
            out.extend(h.loops());
        }
        out
    }
}

/// Decompose one component into simple loops
pub fn decompose(c: &Component) -> Vec<Solid> {
    let segs = c.closed_segments();
    if !segs.iter().all(|s| s.control_points().iter().all(|p| p.is_finite())) {
        log::debug!("DECOMPOSE: non-finite control point, component dropped");
        return vec![];
    }
    let tol = match loop_bounds(&segs) {
        Some(b) if b.is_finite() => Tolerance::from_rect(&b),
        _ => return vec![],
    };
    decompose_loop(&segs, &tol)
}

/// Drop degenerate segments and close the loop
fn prepare(segments: &[Segment], tol: &Tolerance) -> Vec<Segment> {
    let mut segs : Vec<Segment> = segments.iter()
        .filter(|s| !s.is_degenerate(tol.eps))
        .cloned()
        .collect();
    if let (Some(first), Some(last)) = (segs.first().cloned(), segs.last().cloned()) {
        if !last.end().almost_equal(first.start, tol.eps) {
            segs.push(Segment::line(last.end(), first.start));
        }
        weld_loop(&mut segs);
    }
    segs
}

/// Decompose the closed loop `segments`
pub fn decompose_loop(segments: &[Segment], tol: &Tolerance) -> Vec<Solid> {
    let segs = prepare(segments, tol);
    let mut solids = vec![];

    // Cubic self-loops become standalone solids before the pairwise scan
    let mut kept = vec![];
    for s in &segs {
        let cut = split_self_loop(s, tol);
        kept.extend(cut.kept.iter().filter_map(|k| *k));
        if let Some(l) = cut.looped {
            log::trace!("DECOMPOSE: cubic self loop cut out {:?}", l);
            push_solid(&mut solids, vec![l], tol);
        }
    }
    if kept.is_empty() {
        return solids;
    }
    weld_loop(&mut kept);
    let segs = kept;

    let crossings = find_crossings(&segs, &segs, true, tol);
    log::debug!("DECOMPOSE: {} segments, {} crossings", segs.len(), crossings.len());
    if crossings.is_empty() {
        let area = loop_area(&segs);
        if area.abs() > tol.area() {
            solids.push(Solid { segments: segs, area, holes: vec![] });
        }
        return solids;
    }

    let mut splits = vec![];
    for c in &crossings {
        splits.push(c.a);
        splits.push(c.b);
    }
    sort_splits(&mut splits, tol);

    // Splits of one crossing, or at the same point, share a node
    let mut nodes = UnionFind::new(splits.len());
    let find = |s: &Split| splits.iter().position(|o| o.almost_equal(s, tol));
    for c in &crossings {
        if let (Some(i), Some(j)) = (find(&c.a), find(&c.b)) {
            nodes.union(i, j);
        }
    }
    for i in 0 .. splits.len() {
        for j in i + 1 .. splits.len() {
            if splits[i].point.almost_equal(splits[j].point, tol.touch()) {
                nodes.union(i, j);
            }
        }
    }

    let mut graph = LoopGraph::new();
    let n = splits.len();
    for k in 0 .. n {
        let (from, to) = (&splits[k], &splits[(k + 1) % n]);
        let path = path_between(&segs, from, to);
        if path.is_empty() {
            continue;
        }
        graph.add_edge(nodes.find(k), nodes.find((k + 1) % n), path, tol);
    }
    for l in graph.extract_loops() {
        push_solid(&mut solids, l, tol);
    }
    log::debug!("DECOMPOSE: {} solids", solids.len());
    solids
}

/// Snap, weld and keep the loop unless its area vanishes
fn push_solid(solids: &mut Vec<Solid>, segments: Vec<Segment>, tol: &Tolerance) {
    let mut segs : Vec<Segment> = segments.iter()
        .map(|s| s.map(|p| p.snap()))
        .filter(|s| !s.is_degenerate(tol.eps))
        .collect();
    if segs.is_empty() {
        return;
    }
    weld_loop(&mut segs);
    let solid = Solid::new(segs);
    if solid.area.abs() <= tol.area() {
        log::trace!("DECOMPOSE: dropping empty loop, area {}", solid.area);
        return;
    }
    solids.push(solid);
}

/// Disjoint sets over split indices
struct UnionFind {
    parent: Vec<usize>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        UnionFind { parent: (0 .. n).collect() }
    }
    fn find(&mut self, mut i: usize) -> usize {
        while self.parent[i] != i {
            self.parent[i] = self.parent[self.parent[i]];
            i = self.parent[i];
        }
        i
    }
    fn union(&mut self, i: usize, j: usize) {
        let (a, b) = (self.find(i), self.find(j));
        if a != b {
            self.parent[a.max(b)] = a.min(b);
        }
    }
}
