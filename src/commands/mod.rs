// ABOUTME: Command implementations for each CLI subcommand
// ABOUTME: Exports the export, list-tables, and validate commands

pub mod export;
pub mod list;
pub mod validate;

pub use export::export;
pub use list::list_tables;
pub use validate::validate;
