//! Build configuration and its resolution against the edge table's schema.
//!
//! [`BuildConfig`] is what the caller asks for: a global orientation, an
//! optional weight column, an optional per-row orientation column.
//! [`BuildConfig::resolve`] checks it against a [`Schema`] and produces a
//! [`ResolvedConfig`] holding column positions. Every configuration error
//! surfaces here, before the builder reads a single row.

use serde::{Deserialize, Serialize};

use crate::graph::GraphKind;
use crate::model::{Orientation, OrientationCodes};
use crate::source::{ColumnType, Schema};
use crate::{Error, Result};

pub const DEFAULT_EDGE_ID_COLUMN: &str = "edge_id";
pub const DEFAULT_START_NODE_COLUMN: &str = "start_node";
pub const DEFAULT_END_NODE_COLUMN: &str = "end_node";

// ============================================================================
// BuildConfig
// ============================================================================

/// Caller-facing build request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    pub orientation: Orientation,
    /// Numeric column holding edge weights. `None` builds an unweighted graph.
    pub weight_column: Option<String>,
    /// Integer column holding per-row orientation codes.
    pub orientation_column: Option<String>,
    pub edge_id_column: String,
    pub start_node_column: String,
    pub end_node_column: String,
    /// Meaning of the values in `orientation_column`.
    pub codes: OrientationCodes,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self::new(Orientation::default())
    }
}

impl BuildConfig {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            weight_column: None,
            orientation_column: None,
            edge_id_column: DEFAULT_EDGE_ID_COLUMN.to_string(),
            start_node_column: DEFAULT_START_NODE_COLUMN.to_string(),
            end_node_column: DEFAULT_END_NODE_COLUMN.to_string(),
            codes: OrientationCodes::default(),
        }
    }

    pub fn with_weight_column(mut self, column: impl Into<String>) -> Self {
        self.weight_column = Some(column.into());
        self
    }

    pub fn with_orientation_column(mut self, column: impl Into<String>) -> Self {
        self.orientation_column = Some(column.into());
        self
    }

    pub fn with_codes(mut self, codes: OrientationCodes) -> Self {
        self.codes = codes;
        self
    }

    /// Override the names of the three structural columns.
    pub fn with_edge_columns(
        mut self,
        edge_id: impl Into<String>,
        start_node: impl Into<String>,
        end_node: impl Into<String>,
    ) -> Self {
        self.edge_id_column = edge_id.into();
        self.start_node_column = start_node.into();
        self.end_node_column = end_node.into();
        self
    }

    /// Parse the combined orientation form used by network functions:
    /// `"directed"`, `"reversed - edge_orientation"`, `"undirected"`.
    ///
    /// The part after `-` names the per-row orientation column.
    pub fn parse_orientation(spec: &str) -> Result<Self> {
        let (token, column) = match spec.split_once('-') {
            Some((token, column)) => {
                let column = column.trim();
                if column.is_empty() {
                    return Err(Error::ConfigError(format!(
                        "Missing orientation column after '-' in '{spec}'"
                    )));
                }
                (token, Some(column))
            }
            None => (spec, None),
        };

        let mut config = Self::new(token.parse()?);
        config.orientation_column = column.map(str::to_string);
        Ok(config)
    }

    /// Deserialize from JSON; absent fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check the request against `schema`.
    pub fn resolve(&self, schema: &Schema) -> Result<ResolvedConfig> {
        let edge_id = integer_column(schema, &self.edge_id_column)?;
        let start_node = integer_column(schema, &self.start_node_column)?;
        let end_node = integer_column(schema, &self.end_node_column)?;

        let weight = match &self.weight_column {
            Some(name) => {
                let col = lookup(schema, name)?;
                if !col.column_type.is_numeric() {
                    return Err(Error::ColumnType {
                        column: col.name,
                        expected: "a numeric type",
                        got: col.column_type,
                    });
                }
                Some(col.into_ref())
            }
            None => None,
        };

        let row_orientation = match &self.orientation_column {
            Some(name) => {
                let col = integer_column(schema, name)?;
                if !self.orientation.is_directed() {
                    tracing::warn!(
                        column = %col.name,
                        "Ignoring orientation column for an undirected graph"
                    );
                    None
                } else if !self.codes.is_unambiguous() {
                    return Err(Error::ConfigError(format!(
                        "Orientation codes must be distinct, got keep={} reverse={} both={}",
                        self.codes.keep, self.codes.reverse, self.codes.both
                    )));
                } else {
                    Some(col)
                }
            }
            None => None,
        };

        Ok(ResolvedConfig {
            orientation: self.orientation,
            edge_id,
            start_node,
            end_node,
            weight,
            row_orientation,
            codes: self.codes,
        })
    }
}

struct Found {
    index: usize,
    name: String,
    column_type: ColumnType,
}

impl Found {
    fn into_ref(self) -> ColumnRef {
        ColumnRef { index: self.index, name: self.name }
    }
}

fn lookup(schema: &Schema, name: &str) -> Result<Found> {
    let index = schema
        .index_of(name)
        .ok_or_else(|| Error::UnknownColumn(name.to_string()))?;
    let column = &schema.columns[index];
    Ok(Found { index, name: column.name.clone(), column_type: column.column_type })
}

fn integer_column(schema: &Schema, name: &str) -> Result<ColumnRef> {
    let col = lookup(schema, name)?;
    if !col.column_type.is_integer() {
        return Err(Error::ColumnType {
            column: col.name,
            expected: "INTEGER",
            got: col.column_type,
        });
    }
    Ok(col.into_ref())
}

// ============================================================================
// ResolvedConfig
// ============================================================================

/// Position and name of a configured column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRef {
    pub index: usize,
    /// Name as spelled in the schema.
    pub name: String,
}

/// A build request checked against a schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedConfig {
    pub orientation: Orientation,
    pub edge_id: ColumnRef,
    pub start_node: ColumnRef,
    pub end_node: ColumnRef,
    pub weight: Option<ColumnRef>,
    /// `None` when no orientation column was requested, or when the graph
    /// is undirected and the column is ignored.
    pub row_orientation: Option<ColumnRef>,
    pub codes: OrientationCodes,
}

impl ResolvedConfig {
    pub fn is_weighted(&self) -> bool {
        self.weight.is_some()
    }

    pub fn has_row_orientation(&self) -> bool {
        self.row_orientation.is_some()
    }

    /// Variant of graph this configuration builds.
    pub fn kind(&self) -> GraphKind {
        GraphKind {
            directed: self.orientation.is_directed(),
            weighted: self.is_weighted(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Column;
    use pretty_assertions::assert_eq;

    fn cormen_schema() -> Schema {
        Schema::new([
            Column::new("EDGE_ID", ColumnType::Integer),
            Column::new("START_NODE", ColumnType::Integer),
            Column::new("END_NODE", ColumnType::Integer),
            Column::new("WEIGHT", ColumnType::Double),
            Column::new("EDGE_ORIENTATION", ColumnType::Integer),
            Column::new("NAME", ColumnType::Varchar),
        ])
    }

    #[test]
    fn test_resolve_full_directed() {
        let cfg = BuildConfig::new(Orientation::Directed)
            .with_weight_column("weight")
            .with_orientation_column("edge_orientation")
            .resolve(&cormen_schema())
            .unwrap();

        assert_eq!(cfg.edge_id.index, 0);
        assert_eq!(cfg.end_node.index, 2);
        assert_eq!(cfg.weight, Some(ColumnRef { index: 3, name: "WEIGHT".into() }));
        assert_eq!(cfg.row_orientation.as_ref().map(|c| c.index), Some(4));
        assert_eq!(cfg.kind(), GraphKind { directed: true, weighted: true });
    }

    #[test]
    fn test_undirected_ignores_orientation_column() {
        let cfg = BuildConfig::new(Orientation::Undirected)
            .with_orientation_column("edge_orientation")
            .resolve(&cormen_schema())
            .unwrap();
        assert!(!cfg.has_row_orientation());
        assert_eq!(cfg.kind(), GraphKind { directed: false, weighted: false });
    }

    #[test]
    fn test_undirected_still_checks_orientation_column_exists() {
        let err = BuildConfig::new(Orientation::Undirected)
            .with_orientation_column("nope")
            .resolve(&cormen_schema())
            .unwrap_err();
        assert!(matches!(err, Error::UnknownColumn(c) if c == "nope"));
    }

    #[test]
    fn test_unknown_weight_column() {
        let err = BuildConfig::new(Orientation::Directed)
            .with_weight_column("cost")
            .resolve(&cormen_schema())
            .unwrap_err();
        assert!(err.is_config_error());
        assert!(matches!(err, Error::UnknownColumn(c) if c == "cost"));
    }

    #[test]
    fn test_incompatible_column_types() {
        let err = BuildConfig::new(Orientation::Directed)
            .with_weight_column("name")
            .resolve(&cormen_schema())
            .unwrap_err();
        assert!(matches!(err, Error::ColumnType { got: ColumnType::Varchar, .. }));

        let err = BuildConfig::new(Orientation::Directed)
            .with_orientation_column("weight")
            .resolve(&cormen_schema())
            .unwrap_err();
        assert!(matches!(err, Error::ColumnType { got: ColumnType::Double, .. }));
    }

    #[test]
    fn test_missing_structural_column() {
        let schema = Schema::new([
            Column::new("edge_id", ColumnType::Integer),
            Column::new("start_node", ColumnType::Integer),
        ]);
        let err = BuildConfig::default().resolve(&schema).unwrap_err();
        assert!(matches!(err, Error::UnknownColumn(c) if c == "end_node"));
    }

    #[test]
    fn test_custom_edge_columns() {
        let schema = Schema::new([
            Column::new("gid", ColumnType::Integer),
            Column::new("source", ColumnType::Integer),
            Column::new("target", ColumnType::Integer),
        ]);
        let cfg = BuildConfig::default()
            .with_edge_columns("gid", "source", "target")
            .resolve(&schema)
            .unwrap();
        assert_eq!(cfg.start_node.index, 1);
    }

    #[test]
    fn test_ambiguous_codes_rejected() {
        let err = BuildConfig::new(Orientation::Reversed)
            .with_orientation_column("edge_orientation")
            .with_codes(OrientationCodes { keep: 1, reverse: 1, both: 0 })
            .resolve(&cormen_schema())
            .unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }

    #[test]
    fn test_parse_orientation_forms() {
        let cfg = BuildConfig::parse_orientation("directed - edge_orientation").unwrap();
        assert_eq!(cfg.orientation, Orientation::Directed);
        assert_eq!(cfg.orientation_column.as_deref(), Some("edge_orientation"));

        let cfg = BuildConfig::parse_orientation("REVERSED-dir").unwrap();
        assert_eq!(cfg.orientation, Orientation::Reversed);
        assert_eq!(cfg.orientation_column.as_deref(), Some("dir"));

        let cfg = BuildConfig::parse_orientation("  undirected ").unwrap();
        assert_eq!(cfg.orientation, Orientation::Undirected);
        assert_eq!(cfg.orientation_column, None);
    }

    #[test]
    fn test_parse_orientation_errors() {
        assert!(matches!(
            BuildConfig::parse_orientation("bidirectional"),
            Err(Error::UnknownOrientation(_))
        ));
        assert!(matches!(
            BuildConfig::parse_orientation("directed - "),
            Err(Error::ConfigError(_))
        ));
    }

    #[test]
    fn test_from_json_defaults() {
        let cfg = BuildConfig::from_json(r#"{"orientation": "reversed", "weight_column": "weight"}"#)
            .unwrap();
        assert_eq!(cfg.orientation, Orientation::Reversed);
        assert_eq!(cfg.weight_column.as_deref(), Some("weight"));
        assert_eq!(cfg.edge_id_column, "edge_id");
        assert_eq!(cfg.codes, OrientationCodes::default());
    }

    #[test]
    fn test_from_json_rejects_unknown_orientation() {
        let err = BuildConfig::from_json(r#"{"orientation": "sideways"}"#).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
        assert!(err.is_config_error());
    }
}
