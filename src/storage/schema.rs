//! Table definitions for the parcel database.
//!
//! Table and column names on disk follow the layout of existing project
//! databases (`Coordinates.PointName`, ...); the Rust-side names are snake case.

diesel::table! {
    #[sql_name = "Coordinates"]
    coordinates (id) {
        #[sql_name = "ID"]
        id -> BigInt,
        #[sql_name = "PointName"]
        point_name -> Text,
        #[sql_name = "X"]
        x -> Double,
        #[sql_name = "Y"]
        y -> Double,
        #[sql_name = "CreatedAt"]
        created_at -> Timestamp,
    }
}

diesel::table! {
    #[sql_name = "Polygons"]
    polygons (polygon_id) {
        #[sql_name = "PolygonID"]
        polygon_id -> BigInt,
        #[sql_name = "PolygonName"]
        polygon_name -> Text,
        #[sql_name = "Description"]
        description -> Nullable<Text>,
        #[sql_name = "CreatedAt"]
        created_at -> Timestamp,
        #[sql_name = "LastModified"]
        last_modified -> Timestamp,
    }
}

diesel::table! {
    #[sql_name = "PolygonVertices"]
    polygon_vertices (polygon_id, point_id) {
        #[sql_name = "PolygonID"]
        polygon_id -> BigInt,
        #[sql_name = "PointID"]
        point_id -> BigInt,
        #[sql_name = "VertexOrder"]
        vertex_order -> Integer,
    }
}

diesel::joinable!(polygon_vertices -> coordinates (point_id));
diesel::joinable!(polygon_vertices -> polygons (polygon_id));

diesel::allow_tables_to_appear_in_same_query!(coordinates, polygons, polygon_vertices);

/// Idempotent DDL run when a database is opened.
///
/// `UNIQUE(X, Y)` backs up the tolerance search with an exact-pair check.
pub(crate) const CREATE_SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS Coordinates (
    ID INTEGER PRIMARY KEY AUTOINCREMENT,
    PointName TEXT NOT NULL UNIQUE,
    X REAL NOT NULL,
    Y REAL NOT NULL,
    CreatedAt TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
    UNIQUE(X, Y)
);
CREATE INDEX IF NOT EXISTS idx_coordinates_xy ON Coordinates(X, Y);

CREATE TABLE IF NOT EXISTS Polygons (
    PolygonID INTEGER PRIMARY KEY AUTOINCREMENT,
    PolygonName TEXT NOT NULL UNIQUE,
    Description TEXT,
    CreatedAt TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
    LastModified TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS PolygonVertices (
    PolygonID INTEGER NOT NULL,
    PointID INTEGER NOT NULL,
    VertexOrder INTEGER NOT NULL,
    FOREIGN KEY(PolygonID) REFERENCES Polygons(PolygonID) ON DELETE CASCADE,
    FOREIGN KEY(PointID) REFERENCES Coordinates(ID) ON DELETE CASCADE,
    PRIMARY KEY(PolygonID, PointID),
    UNIQUE(PolygonID, VertexOrder)
);
";
