pub mod tables;
pub mod types;

pub use tables::{table_names, ALL_TABLES};
pub use types::*;
