//! Product configuration trait for CLI binaries
//!
//! This trait defines the interface a CLI binary implements to configure
//! the scaffolding behavior for its specific product.

use crate::answers::Answers;
use std::path::Path;

/// Configuration trait for a scaffolding CLI product
///
/// The binary implements this trait to define:
/// - Product identity (name, display name)
/// - Template source URLs
/// - Runtime requirements of the generated project
/// - Documentation links
/// - Post-setup instructions
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for CLI command, env vars)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Default URL for fetching templates
    fn default_template_url(&self) -> &'static str;

    /// Environment variable name for overriding template URL
    fn template_url_env(&self) -> &'static str;

    /// Whether to check for Node.js before scaffolding (the generated
    /// fake backend is a Node.js server)
    fn checks_node_runtime(&self) -> bool;

    /// URL for product documentation
    fn docs_url(&self) -> &'static str;

    /// Generate the "next steps" instructions after project creation
    fn next_steps(&self, dir: &Path, answers: &Answers) -> Vec<String>;

    /// CLI description shown in help text
    fn cli_description(&self) -> &'static str;

    /// Upgrade/install command shown in version warnings
    fn upgrade_command(&self) -> &'static str;

    /// User agent string for HTTP requests
    fn user_agent(&self) -> &'static str {
        self.name()
    }
}
