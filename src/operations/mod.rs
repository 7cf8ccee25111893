pub mod coordinate;
pub mod polygon;
pub mod query;
