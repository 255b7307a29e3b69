//! Graph-wide orientation modes and per-row orientation codes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use crate::Error;

/// Graph-wide direction policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Edges run `start_node -> end_node`.
    #[default]
    Directed,
    /// Edges run `end_node -> start_node`.
    Reversed,
    /// Edges have no direction.
    Undirected,
}

impl Orientation {
    pub fn is_directed(self) -> bool {
        !matches!(self, Orientation::Undirected)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::Directed => "directed",
            Orientation::Reversed => "reversed",
            Orientation::Undirected => "undirected",
        }
    }
}

impl FromStr for Orientation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        if token.eq_ignore_ascii_case("directed") {
            Ok(Orientation::Directed)
        } else if token.eq_ignore_ascii_case("reversed") {
            Ok(Orientation::Reversed)
        } else if token.eq_ignore_ascii_case("undirected") {
            Ok(Orientation::Undirected)
        } else {
            Err(Error::UnknownOrientation(token.to_string()))
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a single row's orientation code asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RowOrientation {
    /// Keep the row as stored.
    Keep,
    /// Swap the row's endpoints.
    Reverse,
    /// Store the row and a companion edge in the opposite direction.
    Both,
}

/// Code table for the per-row orientation column.
///
/// Defaults to the usual network-table convention:
/// `1` keep, `-1` reverse, `0` both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrientationCodes {
    pub keep: i64,
    pub reverse: i64,
    pub both: i64,
}

impl Default for OrientationCodes {
    fn default() -> Self {
        Self { keep: 1, reverse: -1, both: 0 }
    }
}

impl OrientationCodes {
    /// Decode a column value; `None` for codes outside the table.
    pub fn decode(&self, code: i64) -> Option<RowOrientation> {
        if code == self.keep {
            Some(RowOrientation::Keep)
        } else if code == self.reverse {
            Some(RowOrientation::Reverse)
        } else if code == self.both {
            Some(RowOrientation::Both)
        } else {
            None
        }
    }

    /// True when the three codes are pairwise distinct.
    pub fn is_unambiguous(&self) -> bool {
        self.keep != self.reverse && self.keep != self.both && self.reverse != self.both
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_orientation_tokens() {
        assert_eq!("directed".parse::<Orientation>().unwrap(), Orientation::Directed);
        assert_eq!(" REVERSED ".parse::<Orientation>().unwrap(), Orientation::Reversed);
        assert_eq!("Undirected".parse::<Orientation>().unwrap(), Orientation::Undirected);
        assert!(matches!(
            "sideways".parse::<Orientation>(),
            Err(Error::UnknownOrientation(t)) if t == "sideways"
        ));
    }

    #[test]
    fn test_default_codes() {
        let codes = OrientationCodes::default();
        assert_eq!(codes.decode(1), Some(RowOrientation::Keep));
        assert_eq!(codes.decode(-1), Some(RowOrientation::Reverse));
        assert_eq!(codes.decode(0), Some(RowOrientation::Both));
        assert_eq!(codes.decode(2), None);
        assert!(codes.is_unambiguous());
    }

    #[test]
    fn test_custom_codes() {
        let codes = OrientationCodes { keep: 10, reverse: 20, both: 30 };
        assert_eq!(codes.decode(20), Some(RowOrientation::Reverse));
        assert_eq!(codes.decode(1), None);
        assert!(!OrientationCodes { keep: 1, reverse: 1, both: 0 }.is_unambiguous());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Orientation::Reversed).unwrap();
        assert_eq!(json, "\"reversed\"");
    }
}
