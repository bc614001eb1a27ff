pub mod entities;
pub mod overlay;
pub mod parse;

pub use entities::*;
pub use overlay::{apply_resource_overlay, apply_station_overlay};
pub use parse::{parse_universe, IngestContext};
