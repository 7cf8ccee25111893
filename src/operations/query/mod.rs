mod find_by_vertices;
mod get_polygon;
mod get_vertices;
mod list_polygons;

pub use find_by_vertices::{FindPolygonByVertices, MatchOutcome};
pub use get_polygon::GetPolygon;
pub use get_vertices::GetVertices;
pub use list_polygons::ListPolygons;
