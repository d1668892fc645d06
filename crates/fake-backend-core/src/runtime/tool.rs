//! Runtime tool lookup for the generated server
//!
//! The scaffolded project needs Node.js to run. There is no one-line
//! install script worth piping into a shell, so the interactive flow only
//! detects the runtime and can open its download page.

use anyhow::Result;
use colored::Colorize;

/// Configuration for a required runtime tool
#[derive(Debug, Clone)]
pub struct ToolConfig {
    /// Name of the tool binary (e.g., "node")
    pub name: &'static str,
    /// Display name for user-facing messages
    pub display_name: &'static str,
    /// URL to the download/documentation page
    pub docs_url: &'static str,
}

/// Manager for checking a runtime tool
pub struct ToolManager {
    config: ToolConfig,
}

impl ToolManager {
    pub fn new(config: ToolConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ToolConfig {
        &self.config
    }

    /// Check if the tool is installed and available in PATH
    pub fn is_installed(&self) -> bool {
        std::process::Command::new(self.config.name)
            .arg("--version")
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    /// Get the installed tool version (if available)
    pub fn get_version(&self) -> Option<String> {
        std::process::Command::new(self.config.name)
            .arg("--version")
            .output()
            .ok()
            .and_then(|output| {
                if output.status.success() {
                    String::from_utf8(output.stdout)
                        .ok()
                        .map(|s| s.trim().to_string())
                } else {
                    None
                }
            })
    }

    /// Open the tool's download page in the default browser
    pub fn open_docs(&self) -> Result<()> {
        println!(
            "{}",
            format!(
                "Opening the {} download page in your browser...",
                self.config.display_name
            )
            .cyan()
        );
        open::that(self.config.docs_url)?;
        Ok(())
    }
}

/// Pre-configured tool manager for Node.js
pub fn node_tool() -> ToolManager {
    ToolManager::new(ToolConfig {
        name: "node",
        display_name: "Node.js",
        docs_url: "https://nodejs.org/en/download",
    })
}
