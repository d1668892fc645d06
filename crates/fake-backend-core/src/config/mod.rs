//! Configuration utilities for generated projects

pub mod generator;

pub use generator::detect_install_command;
