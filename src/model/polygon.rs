use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Identifier of a stored polygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PolygonId(pub i64);

impl fmt::Display for PolygonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A stored polygon header. Its ring lives in the vertex link table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Polygon {
    pub id: PolygonId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub last_modified: NaiveDateTime,
}

/// A polygon together with the number of vertices linked to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolygonSummary {
    pub polygon: Polygon,
    pub vertex_count: usize,
}
