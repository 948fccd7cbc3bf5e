//! Shared handlers for CLI and MCP.

pub mod dashboard;
