use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::math::Point2;

/// Identifier of a stored coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PointId(pub i64);

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A point in the shared coordinate pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub id: PointId,
    /// Generated `PT_####` name.
    pub name: String,
    pub position: Point2,
    pub created_at: NaiveDateTime,
}

/// Prefix of generated coordinate names.
pub(crate) const POINT_NAME_PREFIX: &str = "PT_";

/// Formats the name for sequence number `n`, zero-padded to four digits.
pub(crate) fn point_name(n: u64) -> String {
    format!("{POINT_NAME_PREFIX}{n:04}")
}

/// Extracts the sequence number from a generated name.
///
/// Names that do not follow the `PT_<digits>` pattern yield `None`.
pub(crate) fn point_sequence(name: &str) -> Option<u64> {
    let digits = name.strip_prefix(POINT_NAME_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
