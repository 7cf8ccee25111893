//! Row types mapped to and from the schema.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Nullable, Text, Timestamp};

use super::schema::{coordinates, polygon_vertices, polygons};
use crate::math::Point2;
use crate::model::{Coordinate, PointId, Polygon, PolygonId, PolygonSummary};

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = coordinates)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct CoordinateRow {
    pub id: i64,
    pub point_name: String,
    pub x: f64,
    pub y: f64,
    pub created_at: NaiveDateTime,
}

impl From<CoordinateRow> for Coordinate {
    fn from(row: CoordinateRow) -> Self {
        Self {
            id: PointId(row.id),
            name: row.point_name,
            position: Point2::new(row.x, row.y),
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = coordinates)]
pub(crate) struct NewCoordinate<'a> {
    pub point_name: &'a str,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = polygons)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct PolygonRow {
    pub polygon_id: i64,
    pub polygon_name: String,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub last_modified: NaiveDateTime,
}

impl From<PolygonRow> for Polygon {
    fn from(row: PolygonRow) -> Self {
        Self {
            id: PolygonId(row.polygon_id),
            name: row.polygon_name,
            description: row.description,
            created_at: row.created_at,
            last_modified: row.last_modified,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = polygons)]
pub(crate) struct NewPolygon<'a> {
    pub polygon_name: &'a str,
    pub description: Option<&'a str>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = polygon_vertices)]
pub(crate) struct NewPolygonVertex {
    pub polygon_id: i64,
    pub point_id: i64,
    pub vertex_order: i32,
}

/// Result row of the polygon listing aggregate.
#[derive(Debug, QueryableByName)]
pub(crate) struct PolygonSummaryRow {
    #[diesel(sql_type = BigInt)]
    pub polygon_id: i64,
    #[diesel(sql_type = Text)]
    pub polygon_name: String,
    #[diesel(sql_type = Nullable<Text>)]
    pub description: Option<String>,
    #[diesel(sql_type = Timestamp)]
    pub created_at: NaiveDateTime,
    #[diesel(sql_type = Timestamp)]
    pub last_modified: NaiveDateTime,
    #[diesel(sql_type = BigInt)]
    pub vertex_count: i64,
}

impl From<PolygonSummaryRow> for PolygonSummary {
    fn from(row: PolygonSummaryRow) -> Self {
        Self {
            polygon: Polygon {
                id: PolygonId(row.polygon_id),
                name: row.polygon_name,
                description: row.description,
                created_at: row.created_at,
                last_modified: row.last_modified,
            },
            vertex_count: usize::try_from(row.vertex_count).unwrap_or(0),
        }
    }
}

/// Single-column row for polygon id scans.
#[derive(Debug, QueryableByName)]
pub(crate) struct PolygonIdRow {
    #[diesel(sql_type = BigInt)]
    pub polygon_id: i64,
}
