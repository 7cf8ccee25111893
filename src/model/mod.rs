pub mod coordinate;
pub mod name;
pub mod polygon;

pub use coordinate::{Coordinate, PointId};
pub use name::PolygonName;
pub use polygon::{Polygon, PolygonId, PolygonSummary};
