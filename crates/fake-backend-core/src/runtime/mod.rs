//! Runtime detection for the generated server
//!
//! This module provides:
//! - Advisory detection of Node.js and the available package managers
//! - A small tool manager backing the interactive "Node.js missing" flow

pub mod check;
pub mod tool;

pub use check::{check_node, check_npm, check_server_runtimes, check_yarn, RuntimeInfo};
pub use tool::{node_tool, ToolManager};
