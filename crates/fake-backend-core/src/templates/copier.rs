//! Template file copying with placeholder rendering

use crate::templates::fetcher::TemplateFetcher;
use crate::templates::manifest::{FileDisposition, RenderRules, TemplateManifest};
use crate::templates::renderer::{render_str, Substitutions};
use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

/// Copy template files into the target directory, rendering templated files
/// through the placeholder substitutions and copying the rest byte-for-byte.
pub async fn copy_template(
    fetcher: &mut TemplateFetcher,
    template_name: &str,
    manifest: &TemplateManifest,
    target_dir: &Path,
    substitutions: &Substitutions,
    rules: &RenderRules,
) -> Result<Vec<String>> {
    fs::create_dir_all(target_dir)
        .await
        .context("Failed to create target directory")?;

    let mut written_files = Vec::new();

    for file_path in &manifest.files {
        let target_path = target_dir.join(file_path);
        if let Some(parent) = target_path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        match rules.disposition_for(file_path) {
            FileDisposition::Templated => {
                let content = fetcher.fetch_file(template_name, file_path).await?;
                let rendered = render_str(&content, substitutions)
                    .with_context(|| format!("Failed to render template file '{}'", file_path))?;
                fs::write(&target_path, rendered)
                    .await
                    .with_context(|| format!("Failed to write file: {}", target_path.display()))?;
            }
            FileDisposition::Raw => {
                let content = fetcher.fetch_file_bytes(template_name, file_path).await?;
                fs::write(&target_path, &content)
                    .await
                    .with_context(|| format!("Failed to write file: {}", target_path.display()))?;
            }
        }

        written_files.push(file_path.clone());
    }

    Ok(written_files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::{Answers, CustomHeader};
    use std::fs as std_fs;

    fn write_template_dir(root: &Path) {
        let template = root.join("fake-backend");
        std_fs::create_dir_all(&template).unwrap();
        std_fs::write(
            root.join("template.yaml"),
            "templates:\n  - fake-backend\nrender:\n  templated:\n    - .env\n",
        )
        .unwrap();
        std_fs::write(
            template.join("template.yaml"),
            "name: Fake Backend\n\
             description: test\n\
             version: 0.1.0\n\
             files:\n  - .env\n  - server.js\n  - response-files/.gitkeep\n",
        )
        .unwrap();
        std_fs::write(
            template.join(".env"),
            "SERVER_PORT={{serverPort}}\n\
             API_PREFIX={{apiPrefix}}\n\
             CUSTOM_HEADER_NAME={{customHeaderName}}\n\
             CUSTOM_HEADER_VALUE={{customHeaderValue}}\n",
        )
        .unwrap();
        // Raw file that must survive untouched, braces included
        std_fs::write(template.join("server.js"), "// {{not a placeholder}}\n").unwrap();
        std_fs::create_dir_all(template.join("response-files")).unwrap();
        std_fs::write(template.join("response-files/.gitkeep"), "").unwrap();
    }

    #[tokio::test]
    async fn test_copy_renders_env_and_preserves_raw_files() {
        let source = tempfile::tempdir().unwrap();
        let target = tempfile::tempdir().unwrap();
        write_template_dir(source.path());

        let mut fetcher =
            TemplateFetcher::from_local(source.path().to_path_buf(), "create-fake-backend-test");
        let root = fetcher.fetch_root_manifest().await.unwrap();
        let manifest = fetcher.fetch_template_manifest("fake-backend").await.unwrap();

        let mut rules = root.render.clone();
        rules.merge(&manifest.render);

        let answers = Answers {
            server_port: 8081,
            api_prefix: "/api".to_string(),
            custom_header: Some(CustomHeader {
                name: "HeaderName".to_string(),
                value: "HeaderValue".to_string(),
            }),
        };

        let written = copy_template(
            &mut fetcher,
            "fake-backend",
            &manifest,
            target.path(),
            &answers.substitutions(),
            &rules,
        )
        .await
        .unwrap();

        assert_eq!(written.len(), 3);

        let env = std_fs::read_to_string(target.path().join(".env")).unwrap();
        assert!(env.contains("SERVER_PORT=8081\n"));
        assert!(env.contains("API_PREFIX=/api\n"));
        assert!(env.contains("CUSTOM_HEADER_NAME=HeaderName\n"));
        assert!(env.contains("CUSTOM_HEADER_VALUE=HeaderValue\n"));

        // Raw file is byte-identical, placeholders left alone
        let server = std_fs::read_to_string(target.path().join("server.js")).unwrap();
        assert_eq!(server, "// {{not a placeholder}}\n");

        assert!(target.path().join("response-files/.gitkeep").exists());
    }

    #[tokio::test]
    async fn test_copy_without_custom_header_leaves_env_values_empty() {
        let source = tempfile::tempdir().unwrap();
        let target = tempfile::tempdir().unwrap();
        write_template_dir(source.path());

        let mut fetcher =
            TemplateFetcher::from_local(source.path().to_path_buf(), "create-fake-backend-test");
        let root = fetcher.fetch_root_manifest().await.unwrap();
        let manifest = fetcher.fetch_template_manifest("fake-backend").await.unwrap();

        let mut rules = root.render.clone();
        rules.merge(&manifest.render);

        let answers = Answers {
            server_port: 3000,
            api_prefix: "/rest".to_string(),
            custom_header: None,
        };

        copy_template(
            &mut fetcher,
            "fake-backend",
            &manifest,
            target.path(),
            &answers.substitutions(),
            &rules,
        )
        .await
        .unwrap();

        let env = std_fs::read_to_string(target.path().join(".env")).unwrap();
        assert!(env.contains("SERVER_PORT=3000\n"));
        assert!(env.contains("API_PREFIX=/rest\n"));
        assert!(env.contains("CUSTOM_HEADER_NAME=\n"));
        assert!(env.contains("CUSTOM_HEADER_VALUE=\n"));
    }
}
