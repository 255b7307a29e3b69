//! Generic pseudo-multigraph storage.
//!
//! One storage type serves all four graph variants. Directedness decides
//! how an endpoint pair is keyed; weighting decides whether a weight column
//! is kept at all. Parallel edges and self-loops are always allowed.

use std::fmt;

use hashbrown::{HashMap, HashSet};
use smallvec::SmallVec;

use crate::model::{Direction, Edge, EdgeHandle, EdgeId, VertexHandle};
use crate::{Error, Result};

// ============================================================================
// Markers
// ============================================================================

/// How endpoint pairs are matched.
pub trait Directedness: fmt::Debug + Clone + Default + Send + Sync + 'static {
    const DIRECTED: bool;

    /// Lookup key for the pair. Directed graphs keep the order,
    /// undirected graphs sort it.
    fn pair_key(source: VertexHandle, target: VertexHandle) -> (VertexHandle, VertexHandle);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Directed;

#[derive(Debug, Clone, Copy, Default)]
pub struct Undirected;

impl Directedness for Directed {
    const DIRECTED: bool = true;

    fn pair_key(source: VertexHandle, target: VertexHandle) -> (VertexHandle, VertexHandle) {
        (source, target)
    }
}

impl Directedness for Undirected {
    const DIRECTED: bool = false;

    fn pair_key(source: VertexHandle, target: VertexHandle) -> (VertexHandle, VertexHandle) {
        if source <= target { (source, target) } else { (target, source) }
    }
}

/// Per-edge weight storage.
pub trait Weighting: fmt::Debug + Clone + Default + Send + Sync + 'static {
    const WEIGHTED: bool;

    fn push(&mut self, weight: f64);

    fn weight(&self, index: usize) -> f64;
}

/// Every edge weighs 1.0; nothing is stored.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unweighted;

/// Weights kept verbatim, indexed by edge handle.
#[derive(Debug, Clone, Default)]
pub struct Weighted {
    weights: Vec<f64>,
}

impl Weighting for Unweighted {
    const WEIGHTED: bool = false;

    fn push(&mut self, _weight: f64) {}

    fn weight(&self, _index: usize) -> f64 {
        1.0
    }
}

impl Weighting for Weighted {
    const WEIGHTED: bool = true;

    fn push(&mut self, weight: f64) {
        self.weights.push(weight);
    }

    fn weight(&self, index: usize) -> f64 {
        self.weights[index]
    }
}

// ============================================================================
// Multigraph
// ============================================================================

#[derive(Debug, Clone, Copy)]
struct EdgeRecord {
    id: EdgeId,
    source: VertexHandle,
    target: VertexHandle,
}

type EdgeList = SmallVec<[EdgeHandle; 2]>;

/// Pseudo-multigraph over registry-issued vertex handles.
#[derive(Debug, Clone, Default)]
pub struct Multigraph<D: Directedness, W: Weighting> {
    vertices: HashSet<VertexHandle>,
    /// Vertices in insertion order, for deterministic snapshots.
    vertex_order: Vec<VertexHandle>,
    edges: Vec<EdgeRecord>,
    weights: W,
    /// pair key → edges between that pair, in insertion order
    pairs: HashMap<(VertexHandle, VertexHandle), EdgeList>,
    /// vertex → incident edges (a self-loop is listed once)
    incidence: HashMap<VertexHandle, SmallVec<[EdgeHandle; 4]>>,
    /// row identity → edges carrying it; duplicate row ids are kept
    by_id: HashMap<EdgeId, SmallVec<[EdgeHandle; 1]>>,
    _direction: D,
}

impl<D: Directedness, W: Weighting> Multigraph<D, W> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_directed(&self) -> bool {
        D::DIRECTED
    }

    pub fn is_weighted(&self) -> bool {
        W::WEIGHTED
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Add a vertex. Returns `false` if it was already present.
    pub fn add_vertex(&mut self, vertex: VertexHandle) -> bool {
        if !self.vertices.insert(vertex) {
            return false;
        }
        self.vertex_order.push(vertex);
        self.incidence.insert(vertex, SmallVec::new());
        true
    }

    /// Add an edge between two vertices already in the graph.
    ///
    /// The weight is ignored by unweighted graphs.
    pub fn add_edge(
        &mut self,
        id: EdgeId,
        source: VertexHandle,
        target: VertexHandle,
        weight: f64,
    ) -> Result<EdgeHandle> {
        if !self.contains_vertex(source) {
            return Err(Error::NotFound(format!("Source vertex {source}")));
        }
        if !self.contains_vertex(target) {
            return Err(Error::NotFound(format!("Target vertex {target}")));
        }

        let raw = u32::try_from(self.edges.len())
            .map_err(|_| Error::CapacityExceeded("edges"))?;
        let handle = EdgeHandle(raw);

        self.edges.push(EdgeRecord { id, source, target });
        self.weights.push(weight);
        self.pairs.entry(D::pair_key(source, target)).or_default().push(handle);
        self.by_id.entry(id).or_default().push(handle);

        // Update incidence for both endpoints
        self.incidence.entry(source).or_default().push(handle);
        if source != target {
            self.incidence.entry(target).or_default().push(handle);
        }

        Ok(handle)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn contains_vertex(&self, vertex: VertexHandle) -> bool {
        self.vertices.contains(&vertex)
    }

    pub fn contains_edge(&self, edge: EdgeHandle) -> bool {
        edge.index() < self.edges.len()
    }

    /// Some edge between `u` and `v`. Which one, among parallel edges,
    /// is unspecified.
    pub fn get_edge(&self, u: VertexHandle, v: VertexHandle) -> Option<EdgeHandle> {
        self.pairs.get(&D::pair_key(u, v)).and_then(|edges| edges.first().copied())
    }

    /// Every edge between `u` and `v`, in insertion order.
    pub fn get_all_edges(&self, u: VertexHandle, v: VertexHandle) -> Vec<EdgeHandle> {
        self.pairs
            .get(&D::pair_key(u, v))
            .map(|edges| edges.to_vec())
            .unwrap_or_default()
    }

    pub fn edge_weight(&self, edge: EdgeHandle) -> Option<f64> {
        self.contains_edge(edge).then(|| self.weights.weight(edge.index()))
    }

    pub fn edge(&self, edge: EdgeHandle) -> Option<Edge> {
        let rec = self.edges.get(edge.index())?;
        Some(Edge {
            handle: edge,
            id: rec.id,
            source: rec.source,
            target: rec.target,
            weight: self.weights.weight(edge.index()),
        })
    }

    /// Edges incident to `vertex`, filtered by direction.
    ///
    /// In an undirected graph every incident edge is both outgoing and incoming.
    pub fn edges_of(&self, vertex: VertexHandle, dir: Direction) -> Vec<EdgeHandle> {
        let Some(incident) = self.incidence.get(&vertex) else {
            return Vec::new();
        };
        incident
            .iter()
            .copied()
            .filter(|h| {
                if !D::DIRECTED {
                    return true;
                }
                let rec = &self.edges[h.index()];
                match dir {
                    Direction::Outgoing => rec.source == vertex,
                    Direction::Incoming => rec.target == vertex,
                    Direction::Both => true,
                }
            })
            .collect()
    }

    /// Number of edge endpoints at `vertex`; a self-loop counts twice.
    pub fn degree(&self, vertex: VertexHandle) -> usize {
        self.incidence.get(&vertex).map_or(0, |incident| {
            incident
                .iter()
                .map(|h| {
                    let rec = &self.edges[h.index()];
                    if rec.source == rec.target { 2 } else { 1 }
                })
                .sum()
        })
    }

    pub fn vertex_set(&self) -> Vec<VertexHandle> {
        self.vertex_order.clone()
    }

    pub fn edge_set(&self) -> Vec<EdgeHandle> {
        (0..self.edges.len() as u32).map(EdgeHandle).collect()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_order.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Edges carrying row identity `id`, in insertion order.
    pub fn edges_with_id(&self, id: EdgeId) -> Vec<EdgeHandle> {
        self.by_id.get(&id).map(|edges| edges.to_vec()).unwrap_or_default()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn v(i: u32) -> VertexHandle {
        VertexHandle(i)
    }

    fn with_vertices<D: Directedness, W: Weighting>(n: u32) -> Multigraph<D, W> {
        let mut g = Multigraph::new();
        for i in 0..n {
            g.add_vertex(v(i));
        }
        g
    }

    #[test]
    fn test_add_vertex_is_idempotent() {
        let mut g: Multigraph<Directed, Unweighted> = Multigraph::new();
        assert!(g.add_vertex(v(3)));
        assert!(!g.add_vertex(v(3)));
        assert_eq!(g.vertex_count(), 1);
        assert_eq!(g.vertex_set(), vec![v(3)]);
    }

    #[test]
    fn test_add_edge_requires_known_vertices() {
        let mut g: Multigraph<Directed, Unweighted> = with_vertices(1);
        let err = g.add_edge(EdgeId::row(1), v(0), v(7), 1.0).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_directed_pair_is_ordered() {
        let mut g: Multigraph<Directed, Unweighted> = with_vertices(2);
        let e = g.add_edge(EdgeId::row(1), v(0), v(1), 1.0).unwrap();

        assert_eq!(g.get_edge(v(0), v(1)), Some(e));
        assert_eq!(g.get_edge(v(1), v(0)), None);
        assert!(g.get_all_edges(v(1), v(0)).is_empty());
    }

    #[test]
    fn test_undirected_pair_is_unordered() {
        let mut g: Multigraph<Undirected, Unweighted> = with_vertices(2);
        let a = g.add_edge(EdgeId::row(1), v(0), v(1), 1.0).unwrap();
        let b = g.add_edge(EdgeId::row(2), v(1), v(0), 1.0).unwrap();

        assert_eq!(g.get_all_edges(v(0), v(1)), vec![a, b]);
        assert_eq!(g.get_all_edges(v(1), v(0)), vec![a, b]);
    }

    #[test]
    fn test_parallel_edges_and_self_loops() {
        let mut g: Multigraph<Directed, Weighted> = with_vertices(2);
        let a = g.add_edge(EdgeId::row(1), v(0), v(1), 2.5).unwrap();
        let b = g.add_edge(EdgeId::row(2), v(0), v(1), 4.0).unwrap();
        let l = g.add_edge(EdgeId::row(3), v(1), v(1), 1.5).unwrap();

        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.get_all_edges(v(0), v(1)), vec![a, b]);
        assert_eq!(g.get_all_edges(v(1), v(1)), vec![l]);
        assert_eq!(g.edge_weight(b), Some(4.0));
        assert_eq!(g.degree(v(1)), 4);
        assert_eq!(g.edges_of(v(1), Direction::Both), vec![a, b, l]);
    }

    #[test]
    fn test_unweighted_ignores_weight() {
        let mut g: Multigraph<Undirected, Unweighted> = with_vertices(2);
        let e = g.add_edge(EdgeId::row(1), v(0), v(1), 42.0).unwrap();
        assert_eq!(g.edge_weight(e), Some(1.0));
        assert_eq!(g.edge(e).unwrap().weight, 1.0);
        assert_eq!(g.edge_weight(EdgeHandle(9)), None);
    }

    #[test]
    fn test_directed_incidence_filters() {
        let mut g: Multigraph<Directed, Unweighted> = with_vertices(3);
        let out = g.add_edge(EdgeId::row(1), v(0), v(1), 1.0).unwrap();
        let inc = g.add_edge(EdgeId::row(2), v(2), v(0), 1.0).unwrap();

        assert_eq!(g.edges_of(v(0), Direction::Outgoing), vec![out]);
        assert_eq!(g.edges_of(v(0), Direction::Incoming), vec![inc]);
        assert_eq!(g.edges_of(v(0), Direction::Both), vec![out, inc]);
        assert!(g.edges_of(v(9), Direction::Both).is_empty());
    }

    #[test]
    fn test_edges_with_id_finds_companion() {
        let mut g: Multigraph<Directed, Unweighted> = with_vertices(2);
        let fwd = g.add_edge(EdgeId::row(10), v(0), v(1), 1.0).unwrap();
        let back = g.add_edge(EdgeId::companion_of(10), v(1), v(0), 1.0).unwrap();

        assert_eq!(g.edges_with_id(EdgeId::row(10)), vec![fwd]);
        assert_eq!(g.edges_with_id(EdgeId::companion_of(10)), vec![back]);
        assert_eq!(g.edge_set(), vec![fwd, back]);
    }

    #[test]
    fn test_edges_with_id_keeps_duplicates_in_order() {
        let mut g: Multigraph<Undirected, Unweighted> = with_vertices(3);
        let a = g.add_edge(EdgeId::row(5), v(0), v(1), 1.0).unwrap();
        g.add_edge(EdgeId::row(6), v(1), v(2), 1.0).unwrap();
        let b = g.add_edge(EdgeId::row(5), v(2), v(0), 1.0).unwrap();

        assert_eq!(g.edges_with_id(EdgeId::row(5)), vec![a, b]);
        assert!(g.edges_with_id(EdgeId::companion_of(5)).is_empty());
        assert!(g.edges_with_id(EdgeId::row(7)).is_empty());
    }
}
