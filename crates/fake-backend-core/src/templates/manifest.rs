//! Template manifest types and parsing

use serde::{Deserialize, Serialize};

/// File patterns deciding how a template file reaches the target tree
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderRules {
    /// Files run through the placeholder renderer
    #[serde(default)]
    pub templated: Vec<String>,

    /// Files copied byte-for-byte even when a templated pattern matches
    /// (binary fixtures, Handlebars views containing literal `{{`)
    #[serde(default)]
    pub raw: Vec<String>,
}

/// How a single template file is written to the target tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileDisposition {
    /// Placeholder-substituted text
    Templated,
    /// Byte-for-byte copy
    Raw,
}

impl RenderRules {
    /// Merge another set of rules into this one (template rules extend root rules)
    pub fn merge(&mut self, other: &RenderRules) {
        self.templated.extend(other.templated.iter().cloned());
        self.raw.extend(other.raw.iter().cloned());
    }

    /// Check if a filename matches any pattern in a list
    fn matches_any(filename: &str, patterns: &[String]) -> bool {
        patterns.iter().any(|pattern| {
            if let Some(suffix) = pattern.strip_prefix('*') {
                // Suffix match: *.json matches package.json
                filename.ends_with(suffix)
            } else if let Some(prefix) = pattern.strip_suffix('*') {
                // Prefix match: README* matches README.md
                filename.starts_with(prefix)
            } else {
                // Exact match
                filename == pattern
            }
        })
    }

    /// Decide how a file is written. `raw` wins over `templated`; files
    /// matching neither list are copied raw.
    pub fn disposition_for(&self, file_path: &str) -> FileDisposition {
        let filename = file_path.rsplit('/').next().unwrap_or(file_path);

        if Self::matches_any(filename, &self.raw) {
            return FileDisposition::Raw;
        }
        if Self::matches_any(filename, &self.templated) {
            return FileDisposition::Templated;
        }

        FileDisposition::Raw
    }
}

/// Root template manifest (templates/template.yaml)
/// Lists available template directories and global render rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootManifest {
    /// List of template directory names
    pub templates: Vec<String>,

    /// Global render rules applied to every template (optional)
    #[serde(default)]
    pub render: RenderRules,
}

/// Per-template manifest (templates/<name>/template.yaml)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateManifest {
    /// Display name of the template
    pub name: String,

    /// Description of what the template provides
    pub description: String,

    /// Semver version for CLI compatibility checking
    pub version: String,

    /// Explicit list of files to copy
    pub files: Vec<String>,

    /// Template-specific render rule overrides (merged with root)
    #[serde(default)]
    pub render: RenderRules,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_rules() -> RenderRules {
        RenderRules {
            templated: vec![
                ".env".to_string(),
                "README*".to_string(),
                "*.json".to_string(),
            ],
            raw: vec!["package-lock.json".to_string(), "*.pdf".to_string()],
        }
    }

    #[test]
    fn test_templated_patterns_match() {
        let rules = test_rules();
        assert_eq!(rules.disposition_for(".env"), FileDisposition::Templated);
        assert_eq!(
            rules.disposition_for("README.md"),
            FileDisposition::Templated
        );
        assert_eq!(
            rules.disposition_for("package.json"),
            FileDisposition::Templated
        );
    }

    #[test]
    fn test_matching_is_on_filename_not_path() {
        let rules = test_rules();
        assert_eq!(
            rules.disposition_for("docs/README.md"),
            FileDisposition::Templated
        );
    }

    #[test]
    fn test_raw_wins_over_templated() {
        let rules = test_rules();
        // package-lock.json also matches *.json but is pinned raw
        assert_eq!(
            rules.disposition_for("package-lock.json"),
            FileDisposition::Raw
        );
    }

    #[test]
    fn test_unmatched_files_are_raw() {
        let rules = test_rules();
        assert_eq!(rules.disposition_for("server.js"), FileDisposition::Raw);
        assert_eq!(
            rules.disposition_for("test/server/api/fixtures/example.pdf"),
            FileDisposition::Raw
        );
    }

    #[test]
    fn test_merge_extends_both_lists() {
        let mut rules = test_rules();
        rules.merge(&RenderRules {
            templated: vec!["config.js".to_string()],
            raw: vec!["*.hbs".to_string()],
        });

        assert_eq!(
            rules.disposition_for("config.js"),
            FileDisposition::Templated
        );
        assert_eq!(
            rules.disposition_for("server/web/views/index.hbs"),
            FileDisposition::Raw
        );
        // Root rules still apply after the merge
        assert_eq!(rules.disposition_for(".env"), FileDisposition::Templated);
    }

    #[test]
    fn test_manifest_yaml_parses() {
        let yaml = "\
name: HTTP Fake Backend
description: Fake backend server
version: 0.1.0
files:
  - .env
  - server.js
render:
  templated:
    - .env
";
        let manifest: TemplateManifest = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(manifest.name, "HTTP Fake Backend");
        assert_eq!(manifest.files.len(), 2);
        assert_eq!(
            manifest.render.disposition_for(".env"),
            FileDisposition::Templated
        );
        assert!(manifest.render.raw.is_empty());
    }
}
