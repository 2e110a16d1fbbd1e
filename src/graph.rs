//! Intersection graph and loop extraction
//!
//! Nodes are crossing locations identified by small integers, edges carry
//! the path pieces running between two crossings.  Edges live in an arena
//! and nodes keep the ids of their outgoing edges in insertion order.

use crate::math::Tolerance;
use crate::segment::Segment;

use std::collections::HashMap;

pub type NodeId = usize;
pub type EdgeId = usize;

/// Path piece between two nodes
#[derive(Debug,Clone,PartialEq)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub path: Vec<Segment>,
    /// Number of identical copies still in the graph
    pub multiplicity: usize,
}

/// Directed multigraph of path pieces
#[derive(Debug,Default,Clone)]
pub struct LoopGraph {
    edges: Vec<Edge>,
    outgoing: Vec<Vec<EdgeId>>,
}

impl LoopGraph {
    pub fn new() -> Self {
        Self { edges: vec![], outgoing: vec![] }
    }
    pub fn add_node(&mut self) -> NodeId {
        self.outgoing.push(vec![]);
        self.outgoing.len() - 1
    }
    /// Add an edge, an identical parallel edge raises its multiplicity
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, path: Vec<Segment>, tol: &Tolerance) -> EdgeId {
        while self.outgoing.len() <= from.max(to) {
            self.add_node();
        }
        for &e in &self.outgoing[from] {
            let edge = &self.edges[e];
            if edge.to == to && same_path(&edge.path, &path, tol) {
                self.edges[e].multiplicity += 1;
                return e;
            }
        }
        self.edges.push(Edge { from, to, path, multiplicity: 1 });
        let id = self.edges.len() - 1;
        self.outgoing[from].push(id);
        id
    }
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id]
    }
    /// Remaining edges, copies included
    pub fn len(&self) -> usize {
        self.edges.iter().map(|e| e.multiplicity).sum()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Remaining outgoing edges of `node`, oldest first
    pub fn outgoing(&self, node: NodeId) -> &[EdgeId] {
        &self.outgoing[node]
    }
    fn consume(&mut self, id: EdgeId) {
        let e = &mut self.edges[id];
        e.multiplicity -= 1;
        if e.multiplicity == 0 {
            let from = e.from;
            self.outgoing[from].retain(|&x| x != id);
        }
    }
    fn first_remaining(&self) -> Option<EdgeId> {
        self.edges.iter().position(|e| e.multiplicity > 0)
    }
    /// Edge to follow out of `node`
    ///
    /// Edges leading back onto the current walk win over the others, and
    /// among equals the most recently added edge wins.  With parallel edges
    /// between a repeated node pair this picks the newest one.
    pub fn next_edge(&self, node: NodeId, on_walk: &HashMap<NodeId, usize>) -> Option<EdgeId> {
        let out = &self.outgoing[node];
        out.iter()
            .rev()
            .find(|&&e| on_walk.contains_key(&self.edges[e].to))
            .or_else(|| out.last())
            .cloned()
    }
    /// Consume the graph into closed walks that never repeat a node
    pub fn extract_loops(&mut self) -> Vec<Vec<Segment>> {
        let mut loops = vec![];
        while let Some(first) = self.first_remaining() {
            let mut walk = vec![first];
            let mut on_walk = HashMap::new();
            on_walk.insert(self.edges[first].from, 0);
            let mut node = self.edges[first].to;
            loop {
                if let Some(&k) = on_walk.get(&node) {
                    let cycle = walk.split_off(k);
                    let path : Vec<Segment> = cycle.iter()
                        .flat_map(|&e| self.edges[e].path.iter().cloned())
                        .collect();
                    for e in cycle {
                        self.consume(e);
                    }
                    log::trace!("EXTRACT LOOPS: closed walk at node {} with {} segments", node, path.len());
                    loops.push(path);
                    break;
                }
                on_walk.insert(node, walk.len());
                match self.next_edge(node, &on_walk) {
                    Some(e) => {
                        walk.push(e);
                        node = self.edges[e].to;
                    },
                    None => {
                        log::debug!("EXTRACT LOOPS: dead end at node {}, dropping edge {}", node, walk[0]);
                        self.consume(walk[0]);
                        break;
                    }
                }
            }
        }
        loops
    }
}

/// Paths with the same control points within the link tolerance
pub fn same_path(a: &[Segment], b: &[Segment], tol: &Tolerance) -> bool {
    a.len() == b.len() &&
        a.iter().zip(b.iter()).all(|(s, t)| {
            let (ps, pt) = (s.control_points(), t.control_points());
            ps.len() == pt.len() &&
                ps.iter().zip(pt.iter()).all(|(p, q)| p.almost_equal(*q, tol.link()))
        })
}
