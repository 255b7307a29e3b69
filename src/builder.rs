//! Graph construction from a row source.
//!
//! One pass, in source order:
//!
//! ```text
//! row → weight → effective direction → registry (both endpoints)
//!     → add_edge (+ companion edge for "both directions")
//! ```
//!
//! The first invalid row aborts the build. The partially filled graph never
//! leaves this module.

use serde::{Deserialize, Serialize};

use crate::config::{BuildConfig, ColumnRef, ResolvedConfig};
use crate::graph::{Graph, GraphModel, VertexRegistry};
use crate::model::{EdgeId, Orientation, RowOrientation, Value, VertexHandle};
use crate::source::{Row, RowSource};
use crate::{Error, Result, RowContext};

/// Counters collected during one build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildStats {
    pub rows_read: u64,
    pub edges_inserted: u64,
    /// Companion edges added for rows stored in both directions.
    pub companion_edges: u64,
    pub vertices_created: u64,
}

/// Builds a [`Graph`] from any [`RowSource`].
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    config: BuildConfig,
}

impl GraphBuilder {
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Consume `source` and build the graph.
    pub fn build<S: RowSource>(&self, source: S) -> Result<Graph> {
        self.build_with_stats(source).map(|(graph, _)| graph)
    }

    /// Like [`GraphBuilder::build`], also returning the build counters.
    pub fn build_with_stats<S: RowSource>(&self, mut source: S) -> Result<(Graph, BuildStats)> {
        let resolved = self.config.resolve(source.schema())?;
        tracing::debug!(
            orientation = %resolved.orientation,
            weighted = resolved.is_weighted(),
            row_orientation = resolved.row_orientation.as_ref().map(|c| c.name.as_str()),
            "Building graph"
        );

        let mut build = Build::new(&resolved);
        while let Some(row) = source.next_row()? {
            build.insert_row(row)?;
        }

        let Build { registry, model, stats, .. } = build;
        tracing::info!(
            vertices = model.vertex_count(),
            edges = model.edge_count(),
            rows = stats.rows_read,
            companions = stats.companion_edges,
            "Graph built"
        );
        Ok((Graph::from_parts(registry, model), stats))
    }
}

/// Build a graph from `source` under `config`.
pub fn build_graph<S: RowSource>(source: S, config: &BuildConfig) -> Result<Graph> {
    GraphBuilder::new(config.clone()).build(source)
}

// ============================================================================
// One build in progress
// ============================================================================

struct Build<'c> {
    config: &'c ResolvedConfig,
    registry: VertexRegistry,
    model: GraphModel,
    stats: BuildStats,
}

impl<'c> Build<'c> {
    fn new(config: &'c ResolvedConfig) -> Self {
        Self {
            config,
            registry: VertexRegistry::new(),
            model: GraphModel::new(config.kind()),
            stats: BuildStats::default(),
        }
    }

    fn insert_row(&mut self, row: Row) -> Result<()> {
        self.stats.rows_read += 1;
        let mut at = RowContext { row: self.stats.rows_read, edge_id: None };

        let result = self.insert_row_at(&row, &mut at);
        if let Err(err) = &result {
            tracing::warn!(row = at.row, edge_id = at.edge_id, error = %err, "Aborting graph build");
        }
        result
    }

    fn insert_row_at(&mut self, row: &Row, at: &mut RowContext) -> Result<()> {
        let cfg = self.config;

        let edge_id = integer_cell(row, &cfg.edge_id, *at)?;
        at.edge_id = Some(edge_id);
        let start = integer_cell(row, &cfg.start_node, *at)?;
        let end = integer_cell(row, &cfg.end_node, *at)?;

        let weight = match &cfg.weight {
            Some(col) => numeric_cell(row, col, *at)?,
            None => 1.0,
        };

        let row_orientation = match &cfg.row_orientation {
            Some(col) => decode_orientation(row, col, cfg, *at)?,
            None => RowOrientation::Keep,
        };

        let start = self.vertex(start)?;
        let end = self.vertex(end)?;

        let (mut source, mut target) = (start, end);
        if cfg.orientation == Orientation::Reversed {
            std::mem::swap(&mut source, &mut target);
        }
        if row_orientation == RowOrientation::Reverse {
            std::mem::swap(&mut source, &mut target);
        }

        let id = EdgeId::row(edge_id);
        self.model.add_edge(id, source, target, weight)?;
        self.stats.edges_inserted += 1;
        tracing::trace!(edge = %id, %source, %target, weight, "Inserted edge");

        if row_orientation == RowOrientation::Both {
            let companion = id.companion();
            self.model.add_edge(companion, target, source, weight)?;
            self.stats.edges_inserted += 1;
            self.stats.companion_edges += 1;
            tracing::trace!(edge = %companion, source = %target, target = %source, weight, "Inserted companion edge");
        }

        Ok(())
    }

    fn vertex(&mut self, id: i64) -> Result<VertexHandle> {
        let handle = self.registry.resolve(id)?;
        if self.model.add_vertex(handle) {
            self.stats.vertices_created += 1;
        }
        Ok(handle)
    }
}

// ============================================================================
// Cell extraction
// ============================================================================

fn integer_cell(row: &Row, col: &ColumnRef, at: RowContext) -> Result<i64> {
    let value = row.get(col.index);
    if value.is_null() {
        return Err(Error::NullValue { at, column: col.name.clone() });
    }
    value.as_int().ok_or_else(|| invalid(at, col, "INTEGER", value))
}

fn numeric_cell(row: &Row, col: &ColumnRef, at: RowContext) -> Result<f64> {
    let value = row.get(col.index);
    if value.is_null() {
        return Err(Error::NullValue { at, column: col.name.clone() });
    }
    value.as_float().ok_or_else(|| invalid(at, col, "a numeric value", value))
}

fn decode_orientation(
    row: &Row,
    col: &ColumnRef,
    cfg: &ResolvedConfig,
    at: RowContext,
) -> Result<RowOrientation> {
    let value = row.get(col.index);
    if value.is_null() {
        return Err(Error::NullOrientation { at, column: col.name.clone() });
    }
    value
        .as_int()
        .and_then(|code| cfg.codes.decode(code))
        .ok_or_else(|| Error::InvalidOrientation {
            at,
            column: col.name.clone(),
            code: value.to_string(),
        })
}

fn invalid(at: RowContext, col: &ColumnRef, expected: &'static str, got: &Value) -> Error {
    Error::InvalidValue {
        at,
        column: col.name.clone(),
        expected,
        got: format!("{} {got}", got.type_name()),
    }
}

// ============================================================================
// Tests
// ============================================================================
