pub mod cli;
pub mod download;
pub mod ingest;
pub mod names;
pub mod parser;
pub mod schema;
pub mod types;
pub mod ui;
pub mod universe;
pub mod writer;

pub use cli::{Cli, Commands};
pub use ingest::{run_ingest, IngestOptions, IngestSummary};
pub use ui::{ConsoleUi, Phase, SilentUi, Ui};
