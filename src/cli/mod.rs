//! CLI command handlers
//!
//! Bridges clap argument parsing with the report and service layers: the
//! shared filter and output flags, the report writers used by one-shot
//! commands, and the interactive shell.

pub mod filter;
pub mod report;
pub mod shell;

pub use filter::{FilterArgs, OutputArgs};
pub use report::{write_breakdown, write_list, write_options, write_overview, write_summary};
pub use shell::{Flow, Shell};
