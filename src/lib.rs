//! # netgraph — Network Graphs from Edge Tables
//!
//! Builds in-memory pseudo-multigraphs for network analysis (shortest path,
//! centrality, ...) from a relational edge table: one row per edge with an
//! `edge_id`, a `start_node`, an `end_node`, and optionally a weight and a
//! per-row orientation code.
//!
//! ## Design Principles
//!
//! 1. **Trait at the input seam**: `RowSource` is the contract between the
//!    builder and whatever produces rows
//! 2. **Closed set of graph variants**: directed/undirected × weighted/unweighted
//!    is a tagged union fixed before the first row is read
//! 3. **All or nothing**: a build returns a complete `Graph` or an `Error`,
//!    never a half-built graph
//! 4. **Row identity survives**: every edge carries the id of the row that
//!    produced it; companion edges are marked, not renumbered
//!
//! ## Quick Start
//!
//! ```rust
//! use netgraph::{build_graph, BuildConfig, MemoryRowSource, Orientation};
//!
//! # fn example() -> netgraph::Result<()> {
//! let rows = MemoryRowSource::edges([(1, 1, 2), (2, 2, 3), (3, 3, 1)]);
//! let graph = build_graph(rows, &BuildConfig::new(Orientation::Directed))?;
//!
//! let (a, b) = (graph.vertex(1).unwrap(), graph.vertex(2).unwrap());
//! let edge = graph.get_edge(a, b).unwrap();
//! assert_eq!(graph.edge(edge).unwrap().id.signed(), 1);
//! assert_eq!(graph.edge_weight(edge), Some(1.0));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Orientation
//!
//! | Global mode | No orientation column | With orientation column |
//! |-------------|-----------------------|-------------------------|
//! | `directed` | `start -> end` | code decides: keep / reverse / both |
//! | `reversed` | `end -> start` | code applied on top of the reversal |
//! | `undirected` | unordered pair | column ignored |

use std::fmt;

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod source;
pub mod config;
pub mod graph;
pub mod builder;

// ============================================================================
// Re-exports
// ============================================================================

pub use model::{
    Direction, Edge, EdgeHandle, EdgeId, Orientation, OrientationCodes,
    RowOrientation, Value, Vertex, VertexHandle,
};

pub use source::{Column, ColumnType, MemoryRowSource, Row, RowSource, Schema};

pub use config::{BuildConfig, ColumnRef, ResolvedConfig};

pub use graph::{
    Graph, GraphKind, GraphModel, VertexRegistry,
    PseudoGraph, WeightedPseudoGraph, DirectedPseudoGraph, DirectedWeightedPseudoGraph,
};

pub use builder::{build_graph, BuildStats, GraphBuilder};

// ============================================================================
// Error Types
// ============================================================================

/// Position of a row in the source, for error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowContext {
    /// 1-based ordinal of the row in source order.
    pub row: u64,
    /// The row's `edge_id`, when it could be read.
    pub edge_id: Option<i64>,
}

impl fmt::Display for RowContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.edge_id {
            Some(id) => write!(f, "row {} (edge_id {id})", self.row),
            None => write!(f, "row {}", self.row),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    // ---- configuration (reported before any row is read) ----

    #[error("Unknown column '{0}' in edge table")]
    UnknownColumn(String),

    #[error("Column '{column}' has type {got}, expected {expected}")]
    ColumnType { column: String, expected: &'static str, got: ColumnType },

    #[error("Unknown orientation '{0}': expected directed, reversed or undirected")]
    UnknownOrientation(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Malformed configuration: {0}")]
    Json(#[from] serde_json::Error),

    // ---- row validation (aborts the build) ----

    #[error("{at}: column '{column}' is NULL")]
    NullValue { at: RowContext, column: String },

    #[error("{at}: column '{column}' expected {expected}, got {got}")]
    InvalidValue { at: RowContext, column: String, expected: &'static str, got: String },

    #[error("{at}: orientation column '{column}' is NULL")]
    NullOrientation { at: RowContext, column: String },

    #[error("{at}: unrecognized orientation code {code} in column '{column}'")]
    InvalidOrientation { at: RowContext, column: String, code: String },

    // ---- collaborators / internal ----

    #[error("Row source error: {0}")]
    Source(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Too many {0} for 32-bit handles")]
    CapacityExceeded(&'static str),
}

impl Error {
    /// Errors raised while resolving the configuration, before any row is read.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Error::UnknownColumn(_)
                | Error::ColumnType { .. }
                | Error::UnknownOrientation(_)
                | Error::ConfigError(_)
                | Error::Json(_)
        )
    }

    /// Errors raised by an invalid row.
    pub fn is_row_error(&self) -> bool {
        matches!(
            self,
            Error::NullValue { .. }
                | Error::InvalidValue { .. }
                | Error::NullOrientation { .. }
                | Error::InvalidOrientation { .. }
        )
    }

    /// Location of the offending row, for row errors.
    pub fn row_context(&self) -> Option<RowContext> {
        match self {
            Error::NullValue { at, .. }
            | Error::InvalidValue { at, .. }
            | Error::NullOrientation { at, .. }
            | Error::InvalidOrientation { at, .. } => Some(*at),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_context_display() {
        let at = RowContext { row: 3, edge_id: Some(7) };
        assert_eq!(at.to_string(), "row 3 (edge_id 7)");
        let at = RowContext { row: 1, edge_id: None };
        assert_eq!(at.to_string(), "row 1");
    }

    #[test]
    fn test_error_classification() {
        let err = Error::UnknownColumn("w".into());
        assert!(err.is_config_error());
        assert!(!err.is_row_error());

        let at = RowContext { row: 2, edge_id: Some(1) };
        let err = Error::NullOrientation { at, column: "edge_orientation".into() };
        assert!(err.is_row_error());
        assert_eq!(err.row_context(), Some(at));
        assert_eq!(
            err.to_string(),
            "row 2 (edge_id 1): orientation column 'edge_orientation' is NULL"
        );
    }
}
