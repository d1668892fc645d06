//! Fake Backend Core - Shared library for the fake backend scaffolding CLI
//!
//! This library provides the core functionality for generating fake HTTP
//! backend server projects from templates: prompt input validation,
//! placeholder rendering, and template fetching/copying.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Pure functions for input validation,
//!   placeholder rendering, template fetching and copying
//! - **Layer 2: Workflow Configuration** - `ProductConfig` trait describing
//!   the product a binary scaffolds
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts
//!   (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based prompt module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use fake_backend_core::{validate, Answers, TemplateFetcher};
//!
//! // Validate prompt input the way the interactive flow does
//! validate::validate_api_prefix("/api")?;
//!
//! // Use the low-level APIs
//! let mut fetcher = TemplateFetcher::from_local("templates".into(), "create-fake-backend");
//! let manifest = fetcher.fetch_template_manifest("http-fake-backend").await?;
//! ```

pub mod answers;
pub mod config;
pub mod product;
pub mod runtime;
pub mod templates;
pub mod validate;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use answers::{Answers, CustomHeader};
pub use product::ProductConfig;
pub use runtime::{check_server_runtimes, RuntimeInfo};
pub use templates::{
    copy_template, RenderRules, RootManifest, Substitutions, TemplateFetcher, TemplateManifest,
    TemplateSource,
};
pub use validate::{validate_api_prefix, validate_custom_header, ValidationError};

#[cfg(feature = "tui")]
pub use tui::run;

/// CLI version - used for template compatibility checking
/// Each binary should define its own version, but this provides a fallback
pub const DEFAULT_CLI_VERSION: &str = "0.1.0";
