//! # Graph Model
//!
//! Four pseudo-multigraph variants, chosen once by (directed?, weighted?):
//!
//! | directed | weighted | variant |
//! |----------|----------|---------|
//! | no  | no  | `PseudoGraph` |
//! | no  | yes | `WeightedPseudoGraph` |
//! | yes | no  | `DirectedPseudoGraph` |
//! | yes | yes | `DirectedWeightedPseudoGraph` |
//!
//! [`GraphModel`] is the tagged union the builder fills. [`Graph`] is the
//! finished, read-only result: the model plus the vertex registry used to
//! build it, so vertices stay addressable by their relational id.

pub mod multigraph;
pub mod registry;

use serde::{Deserialize, Serialize};

use crate::model::{Direction, Edge, EdgeHandle, EdgeId, Vertex, VertexHandle};
use crate::Result;

pub use multigraph::{Directed, Directedness, Multigraph, Undirected, Unweighted, Weighted, Weighting};
pub use registry::VertexRegistry;

pub type PseudoGraph = Multigraph<Undirected, Unweighted>;
pub type WeightedPseudoGraph = Multigraph<Undirected, Weighted>;
pub type DirectedPseudoGraph = Multigraph<Directed, Unweighted>;
pub type DirectedWeightedPseudoGraph = Multigraph<Directed, Weighted>;

/// Orientation and weight class of a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphKind {
    pub directed: bool,
    pub weighted: bool,
}

// ============================================================================
// GraphModel
// ============================================================================

/// One of the four multigraph variants.
#[derive(Debug, Clone)]
pub enum GraphModel {
    Pseudo(PseudoGraph),
    WeightedPseudo(WeightedPseudoGraph),
    DirectedPseudo(DirectedPseudoGraph),
    DirectedWeightedPseudo(DirectedWeightedPseudoGraph),
}

macro_rules! dispatch {
    ($model:expr, $g:ident => $body:expr) => {
        match $model {
            GraphModel::Pseudo($g) => $body,
            GraphModel::WeightedPseudo($g) => $body,
            GraphModel::DirectedPseudo($g) => $body,
            GraphModel::DirectedWeightedPseudo($g) => $body,
        }
    };
}

impl GraphModel {
    /// Empty graph of the given kind.
    pub fn new(kind: GraphKind) -> Self {
        match (kind.directed, kind.weighted) {
            (false, false) => GraphModel::Pseudo(Multigraph::new()),
            (false, true) => GraphModel::WeightedPseudo(Multigraph::new()),
            (true, false) => GraphModel::DirectedPseudo(Multigraph::new()),
            (true, true) => GraphModel::DirectedWeightedPseudo(Multigraph::new()),
        }
    }

    pub fn kind(&self) -> GraphKind {
        dispatch!(self, g => GraphKind { directed: g.is_directed(), weighted: g.is_weighted() })
    }

    pub fn add_vertex(&mut self, vertex: VertexHandle) -> bool {
        dispatch!(self, g => g.add_vertex(vertex))
    }

    pub fn add_edge(
        &mut self,
        id: EdgeId,
        source: VertexHandle,
        target: VertexHandle,
        weight: f64,
    ) -> Result<EdgeHandle> {
        dispatch!(self, g => g.add_edge(id, source, target, weight))
    }

    pub fn contains_vertex(&self, vertex: VertexHandle) -> bool {
        dispatch!(self, g => g.contains_vertex(vertex))
    }

    pub fn contains_edge(&self, edge: EdgeHandle) -> bool {
        dispatch!(self, g => g.contains_edge(edge))
    }

    pub fn get_edge(&self, u: VertexHandle, v: VertexHandle) -> Option<EdgeHandle> {
        dispatch!(self, g => g.get_edge(u, v))
    }

    pub fn get_all_edges(&self, u: VertexHandle, v: VertexHandle) -> Vec<EdgeHandle> {
        dispatch!(self, g => g.get_all_edges(u, v))
    }

    pub fn edge_weight(&self, edge: EdgeHandle) -> Option<f64> {
        dispatch!(self, g => g.edge_weight(edge))
    }

    pub fn edge(&self, edge: EdgeHandle) -> Option<Edge> {
        dispatch!(self, g => g.edge(edge))
    }

    pub fn edges_of(&self, vertex: VertexHandle, dir: Direction) -> Vec<EdgeHandle> {
        dispatch!(self, g => g.edges_of(vertex, dir))
    }

    pub fn degree(&self, vertex: VertexHandle) -> usize {
        dispatch!(self, g => g.degree(vertex))
    }

    pub fn edges_with_id(&self, id: EdgeId) -> Vec<EdgeHandle> {
        dispatch!(self, g => g.edges_with_id(id))
    }

    pub fn vertex_set(&self) -> Vec<VertexHandle> {
        dispatch!(self, g => g.vertex_set())
    }

    pub fn edge_set(&self) -> Vec<EdgeHandle> {
        dispatch!(self, g => g.edge_set())
    }

    pub fn vertex_count(&self) -> usize {
        dispatch!(self, g => g.vertex_count())
    }

    pub fn edge_count(&self) -> usize {
        dispatch!(self, g => g.edge_count())
    }
}

// ============================================================================
// Graph
// ============================================================================

/// A finished network graph.
///
/// Read-only: nothing reachable from a `Graph` mutates it, so it can be
/// shared across threads by downstream algorithms.
#[derive(Debug, Clone)]
pub struct Graph {
    registry: VertexRegistry,
    model: GraphModel,
}

impl Graph {
    pub(crate) fn from_parts(registry: VertexRegistry, model: GraphModel) -> Self {
        Self { registry, model }
    }

    /// The concrete variant, for callers that want to match on it.
    pub fn model(&self) -> &GraphModel {
        &self.model
    }

    pub fn kind(&self) -> GraphKind {
        self.model.kind()
    }

    pub fn is_directed(&self) -> bool {
        self.kind().directed
    }

    pub fn is_weighted(&self) -> bool {
        self.kind().weighted
    }

    // ---- keyed vertex lookup ------------------------------------------------

    /// Handle of the vertex with relational id `id`.
    pub fn vertex(&self, id: i64) -> Option<VertexHandle> {
        self.registry.get(id)
    }

    /// Relational id of `handle`.
    pub fn vertex_id(&self, handle: VertexHandle) -> Option<i64> {
        self.registry.id_of(handle)
    }

    /// All vertices with their relational ids, in creation order.
    pub fn vertices(&self) -> impl Iterator<Item = Vertex> + '_ {
        self.registry.iter().filter(|v| self.model.contains_vertex(v.handle))
    }

    // ---- graph queries ------------------------------------------------------

    pub fn contains_vertex(&self, vertex: VertexHandle) -> bool {
        self.model.contains_vertex(vertex)
    }

    pub fn contains_edge(&self, edge: EdgeHandle) -> bool {
        self.model.contains_edge(edge)
    }

    pub fn get_edge(&self, u: VertexHandle, v: VertexHandle) -> Option<EdgeHandle> {
        self.model.get_edge(u, v)
    }

    pub fn get_all_edges(&self, u: VertexHandle, v: VertexHandle) -> Vec<EdgeHandle> {
        self.model.get_all_edges(u, v)
    }

    pub fn edge_weight(&self, edge: EdgeHandle) -> Option<f64> {
        self.model.edge_weight(edge)
    }

    pub fn edge(&self, edge: EdgeHandle) -> Option<Edge> {
        self.model.edge(edge)
    }

    pub fn edges_of(&self, vertex: VertexHandle, dir: Direction) -> Vec<EdgeHandle> {
        self.model.edges_of(vertex, dir)
    }

    pub fn degree(&self, vertex: VertexHandle) -> usize {
        self.model.degree(vertex)
    }

    pub fn edges_with_id(&self, id: EdgeId) -> Vec<EdgeHandle> {
        self.model.edges_with_id(id)
    }

    pub fn vertex_set(&self) -> Vec<VertexHandle> {
        self.model.vertex_set()
    }

    pub fn edge_set(&self) -> Vec<EdgeHandle> {
        self.model.edge_set()
    }

    pub fn vertex_count(&self) -> usize {
        self.model.vertex_count()
    }

    pub fn edge_count(&self) -> usize {
        self.model.edge_count()
    }
}
