pub mod rows;
pub mod schema_gen;
pub mod sqlite;

pub use rows::SqlValue;
pub use sqlite::{count_entities, ExportStats, UniverseWriter, DEFAULT_BATCH_SIZE};
