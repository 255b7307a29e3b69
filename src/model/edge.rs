//! Edge in the network graph.

use std::fmt;

use serde::{Deserialize, Serialize};
use super::VertexHandle;

/// Internal edge handle, dense and assigned in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeHandle(pub u32);

impl EdgeHandle {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EdgeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// Row identity of an edge.
///
/// `magnitude` is the `edge_id` of the row that produced the edge.
/// `synthesized` marks the companion edge added in the opposite direction
/// when the row asked for both directions. The conventional signed form
/// (`-k` for the companion of row `k`) is available through [`EdgeId::signed`],
/// but the pair is what the graph stores, so rows with negative ids stay
/// unambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeId {
    pub magnitude: i64,
    pub synthesized: bool,
}

impl EdgeId {
    /// Identity of the edge inserted in the row's own direction.
    pub const fn row(magnitude: i64) -> Self {
        Self { magnitude, synthesized: false }
    }

    /// Identity of the companion edge synthesized for `magnitude`.
    pub const fn companion_of(magnitude: i64) -> Self {
        Self { magnitude, synthesized: true }
    }

    /// The companion identity of this edge.
    pub const fn companion(self) -> Self {
        Self { magnitude: self.magnitude, synthesized: !self.synthesized }
    }

    /// Signed rendering: the magnitude, negated for synthesized edges.
    ///
    /// Lossy: a row id `-k` renders like the companion of `k`, and
    /// `i64::MIN` has no negation, so its companion renders as `i64::MIN`
    /// too. Compare `EdgeId` values, not their signed form, when identity
    /// matters.
    pub const fn signed(self) -> i64 {
        if self.synthesized { self.magnitude.wrapping_neg() } else { self.magnitude }
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.synthesized {
            write!(f, "-({})", self.magnitude)
        } else {
            write!(f, "{}", self.magnitude)
        }
    }
}

/// Traversal direction relative to a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Outgoing,
    Incoming,
    Both,
}

/// Snapshot view of a stored edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub handle: EdgeHandle,
    pub id: EdgeId,
    pub source: VertexHandle,
    pub target: VertexHandle,
    pub weight: f64,
}

impl Edge {
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }

    /// The "other" end of the edge from the given vertex.
    pub fn other_vertex(&self, from: VertexHandle) -> Option<VertexHandle> {
        if from == self.source { Some(self.target) }
        else if from == self.target { Some(self.source) }
        else { None }
    }
}
