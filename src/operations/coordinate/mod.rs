mod find_or_insert;
mod list;

pub use find_or_insert::FindOrInsertPoint;
pub use list::ListCoordinates;
