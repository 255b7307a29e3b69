//! # Row Source Trait
//!
//! The contract between the graph builder and whatever produces edge rows
//! (a query cursor, a file reader, an in-memory table).
//!
//! A row source is forward-only: it describes its columns once through
//! [`RowSource::schema`] and then yields each row exactly once.
//!
//! ## Implementations
//!
//! | Source | Module | Description |
//! |--------|--------|-------------|
//! | `MemoryRowSource` | `memory` | Vector-backed table for tests/embedding |

pub mod memory;

use std::fmt;

use serde::{Deserialize, Serialize};
use crate::model::Value;
use crate::Result;

pub use memory::MemoryRowSource;

// ============================================================================
// Schema
// ============================================================================

/// SQL-ish column type as reported by the source relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    Integer,
    Double,
    Boolean,
    Varchar,
}

impl ColumnType {
    pub fn is_integer(self) -> bool {
        matches!(self, ColumnType::Integer)
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Double)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Integer => "INTEGER",
            ColumnType::Double => "DOUBLE",
            ColumnType::Boolean => "BOOLEAN",
            ColumnType::Varchar => "VARCHAR",
        };
        f.write_str(name)
    }
}

/// A named, typed column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub column_type: ColumnType,
}

impl Column {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self { name: name.into(), column_type }
    }
}

/// Ordered column list of a relation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub columns: Vec<Column>,
}

impl Schema {
    pub fn new(columns: impl IntoIterator<Item = Column>) -> Self {
        Self { columns: columns.into_iter().collect() }
    }

    /// Column position by name. Identifiers compare case-insensitively,
    /// as unquoted SQL identifiers do.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name.eq_ignore_ascii_case(name))
    }

    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

// ============================================================================
// Row
// ============================================================================

/// One row of the edge relation, positionally aligned with the schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub values: Vec<Value>,
}

impl Row {
    pub fn new(values: impl IntoIterator<Item = Value>) -> Self {
        Self { values: values.into_iter().collect() }
    }

    /// Cell at `index`; a missing trailing cell reads as NULL.
    pub fn get(&self, index: usize) -> &Value {
        static NULL: Value = Value::Null;
        self.values.get(index).unwrap_or(&NULL)
    }
}

impl From<Vec<Value>> for Row {
    fn from(values: Vec<Value>) -> Self {
        Self { values }
    }
}

// ============================================================================
// RowSource Trait
// ============================================================================

/// A forward-only cursor over edge rows.
///
/// Implementations return `Ok(None)` once exhausted. Errors are surfaced
/// to the builder unchanged and abort the build.
pub trait RowSource {
    /// Column layout of every row this source yields.
    fn schema(&self) -> &Schema;

    /// Fetch the next row.
    fn next_row(&mut self) -> Result<Option<Row>>;
}

impl<S: RowSource + ?Sized> RowSource for Box<S> {
    fn schema(&self) -> &Schema {
        (**self).schema()
    }

    fn next_row(&mut self) -> Result<Option<Row>> {
        (**self).next_row()
    }
}
