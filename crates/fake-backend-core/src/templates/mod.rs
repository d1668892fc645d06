//! Template fetching, rendering, and copying
//!
//! This module provides:
//! - Template manifest types (RootManifest, TemplateManifest, RenderRules)
//! - Template fetching from remote URLs or local directories
//! - Placeholder rendering and target-tree copying
//! - Version compatibility checking

pub mod copier;
pub mod fetcher;
pub mod manifest;
pub mod renderer;
pub mod version;

use crate::product::ProductConfig;
use anyhow::{Context, Result};
use colored::Colorize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub use copier::copy_template;
pub use fetcher::{TemplateFetcher, TemplateSource};
pub use manifest::{FileDisposition, RenderRules, RootManifest, TemplateManifest};
pub use renderer::{render_str, Substitutions};
pub use version::check_compatibility;

/// Build zip files for all templates in a directory
pub async fn build_zips<C: ProductConfig>(
    config: &C,
    template_dir: &Option<PathBuf>,
) -> Result<()> {
    let dir = template_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("templates"));

    if !dir.exists() {
        anyhow::bail!("Template directory not found: {}", dir.display());
    }

    let manifest_path = dir.join("template.yaml");
    if !manifest_path.exists() {
        anyhow::bail!("Root template.yaml not found in {}", dir.display());
    }

    let manifest_content = std::fs::read_to_string(&manifest_path)
        .with_context(|| format!("Failed to read {}", manifest_path.display()))?;
    let root_manifest: manifest::RootManifest = serde_yaml::from_str(&manifest_content)
        .context("Failed to parse root template.yaml")?;

    println!(
        "{}",
        format!("Building {} template zips...", config.display_name())
            .cyan()
            .bold()
    );
    println!();

    let mut built = 0;
    for template_name in &root_manifest.templates {
        let template_path = dir.join(template_name);
        if !template_path.exists() {
            eprintln!(
                "{} Template directory not found: {}",
                "Warning:".yellow(),
                template_path.display()
            );
            continue;
        }

        print!("  {} {}...", "->".blue(), template_name);

        match fetcher::TemplateFetcher::build_local_zip(&dir, template_name) {
            Ok(zip_bytes) => {
                let zip_path = dir.join(format!("{}.zip", template_name));
                std::fs::write(&zip_path, &zip_bytes)
                    .with_context(|| format!("Failed to write {}", zip_path.display()))?;
                println!(" {} ({} bytes)", "done".green(), zip_bytes.len());
                built += 1;

                let template_manifest_path = template_path.join("template.yaml");
                let template_content = std::fs::read_to_string(&template_manifest_path)
                    .with_context(|| {
                        format!("Failed to read {}", template_manifest_path.display())
                    })?;
                let template_manifest: manifest::TemplateManifest =
                    serde_yaml::from_str(&template_content).with_context(|| {
                        format!("Failed to parse template '{}' manifest", template_name)
                    })?;

                for unlisted in unlisted_files(&template_path, &template_manifest) {
                    eprintln!(
                        "    {} '{}' exists on disk but is not listed in template.yaml",
                        "Warning:".yellow(),
                        unlisted
                    );
                }
            }
            Err(e) => {
                println!(" {}", "failed".red());
                eprintln!("    Error: {}", e);
            }
        }
    }

    println!();
    println!(
        "{} {} template zip(s) in {}",
        "Built".green().bold(),
        built,
        dir.display()
    );

    Ok(())
}

/// Files present in the template directory that the manifest does not list.
/// These would silently be left out of the built zip.
fn unlisted_files(template_path: &Path, manifest: &TemplateManifest) -> Vec<String> {
    let listed: HashSet<&str> = manifest.files.iter().map(String::as_str).collect();

    let mut unlisted = Vec::new();
    for entry in WalkDir::new(template_path)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(template_path) else {
            continue;
        };
        let relative = relative.to_string_lossy().replace('\\', "/");
        if relative != "template.yaml" && !listed.contains(relative.as_str()) {
            unlisted.push(relative);
        }
    }

    unlisted.sort();
    unlisted
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_unlisted_files_reports_only_unknown_files() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("fake-backend");
        fs::create_dir_all(template.join("server")).unwrap();
        fs::write(template.join("template.yaml"), "manifest").unwrap();
        fs::write(template.join(".env"), "").unwrap();
        fs::write(template.join("server/index.js"), "").unwrap();
        fs::write(template.join("scratch.txt"), "").unwrap();

        let manifest = TemplateManifest {
            name: "Fake Backend".to_string(),
            description: "test".to_string(),
            version: "0.1.0".to_string(),
            files: vec![".env".to_string(), "server/index.js".to_string()],
            render: RenderRules::default(),
        };

        let unlisted = unlisted_files(&template, &manifest);
        assert_eq!(unlisted, vec!["scratch.txt".to_string()]);
    }
}
