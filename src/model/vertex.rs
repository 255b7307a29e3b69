//! Vertex in the network graph.

use serde::{Deserialize, Serialize};

/// Internal vertex handle, dense and assigned in order of first appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VertexHandle(pub u32);

impl VertexHandle {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for VertexHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// A vertex: its handle plus the external id the edge table used for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vertex {
    pub handle: VertexHandle,
    /// Node id as it appears in the `start_node` / `end_node` columns.
    pub id: i64,
}

impl Vertex {
    pub fn new(handle: VertexHandle, id: i64) -> Self {
        Self { handle, id }
    }
}
