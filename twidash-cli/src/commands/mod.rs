//! CLI subcommands.

pub mod dashboard;
