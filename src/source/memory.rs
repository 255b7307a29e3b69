//! In-memory row source.
//!
//! This is the reference implementation of `RowSource`.
//! It holds a schema and a vector of rows and yields them in order.
//!
//! ## Limitations
//!
//! - **Forward-only**: once drained it stays drained, like a query cursor.
//! - **No type checking**: cells are handed to the builder as stored; the
//!   builder's row validation decides what is acceptable.
//!
//! Use this source for:
//! - Testing the configuration resolver and graph builder
//! - Embedding the builder in applications that already hold their edges

use std::collections::VecDeque;

use super::{Column, ColumnType, Row, RowSource, Schema};
use crate::model::Value;
use crate::Result;

/// Vector-backed edge table.
#[derive(Debug, Clone, Default)]
pub struct MemoryRowSource {
    schema: Schema,
    rows: VecDeque<Row>,
}

impl MemoryRowSource {
    pub fn new(schema: Schema) -> Self {
        Self { schema, rows: VecDeque::new() }
    }

    pub fn with_rows(schema: Schema, rows: impl IntoIterator<Item = Row>) -> Self {
        Self { schema, rows: rows.into_iter().collect() }
    }

    /// A plain `(edge_id, start_node, end_node)` table.
    pub fn edges(rows: impl IntoIterator<Item = (i64, i64, i64)>) -> Self {
        let schema = Schema::new([
            Column::new("edge_id", ColumnType::Integer),
            Column::new("start_node", ColumnType::Integer),
            Column::new("end_node", ColumnType::Integer),
        ]);
        let rows = rows.into_iter().map(|(id, s, d)| {
            Row::new([Value::Int(id), Value::Int(s), Value::Int(d)])
        });
        Self::with_rows(schema, rows)
    }

    /// Append a row at the end of the table.
    pub fn push(&mut self, row: impl Into<Row>) {
        self.rows.push_back(row.into());
    }

    /// Rows not yet consumed.
    pub fn remaining(&self) -> usize {
        self.rows.len()
    }
}

impl RowSource for MemoryRowSource {
    fn schema(&self) -> &Schema {
        &self.schema
    }

    fn next_row(&mut self) -> Result<Option<Row>> {
        Ok(self.rows.pop_front())
    }
}

// ============================================================================
// Tests
// ============================================================================
