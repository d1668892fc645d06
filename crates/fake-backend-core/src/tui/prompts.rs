//! Charm-style CLI prompts using cliclack

use crate::answers::{
    Answers, CustomHeader, DEFAULT_API_PREFIX, DEFAULT_HEADER_NAME, DEFAULT_HEADER_VALUE,
    DEFAULT_SERVER_PORT,
};
use crate::product::ProductConfig;
use crate::runtime;
use crate::templates::manifest::{RenderRules, TemplateManifest};
use crate::templates::{copier, fetcher::TemplateFetcher, version};
use crate::validate::{validate_api_prefix, validate_custom_header};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// CLI arguments for the create command
#[derive(Debug, Clone)]
pub struct CreateArgs {
    /// Local directory to use for templates instead of fetching from remote
    pub template_dir: Option<PathBuf>,

    /// Template name to use
    pub template: Option<String>,

    /// Project directory to create
    pub directory: Option<PathBuf>,

    /// Server port for the generated backend
    pub port: Option<u16>,

    /// API URL prefix for the generated backend
    pub api_prefix: Option<String>,

    /// Custom response header name
    pub header_name: Option<String>,

    /// Custom response header value
    pub header_value: Option<String>,

    /// Generate without a custom response header
    pub no_custom_header: bool,

    /// Skip the Node.js runtime check
    pub skip_node_check: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

impl Default for CreateArgs {
    fn default() -> Self {
        Self {
            template_dir: None,
            template: None,
            directory: None,
            port: None,
            api_prefix: None,
            header_name: None,
            header_value: None,
            no_custom_header: false,
            skip_node_check: false,
            yes: false,
        }
    }
}

/// Run the CLI with interactive prompts
pub async fn run<C: ProductConfig>(config: &C, args: CreateArgs, cli_version: &str) -> Result<()> {
    cliclack::intro(config.display_name())?;

    // Step 1: Check for Node.js (the generated server needs it to run)
    if config.checks_node_runtime() && !args.skip_node_check {
        handle_node_check(&args)?;
    } else if args.skip_node_check {
        cliclack::log::info("Skipping Node.js check")?;
    }

    // Step 2: Setup template fetcher
    let mut fetcher = setup_fetcher(config, &args.template_dir)?;

    // Step 3: Select template (also returns merged render rules)
    let (template_name, manifest, render_rules) =
        select_template(&mut fetcher, args.template.as_deref()).await?;

    // Check version compatibility
    if let Some(warning) =
        version::check_compatibility(cli_version, &manifest.version, config.upgrade_command())
    {
        cliclack::log::warning(format!(
            "Version warning: {}",
            warning.lines().next().unwrap_or(&warning)
        ))?;
    }

    // Step 4: Select directory
    let project_dir = select_directory(&args)?;

    // Step 5: Collect answers (port, API prefix, custom header)
    let answers = collect_answers(&args)?;

    // Step 6: Report detected runtimes (advisory, never blocks)
    report_runtimes();

    // Step 7: Create project
    create_project(
        &mut fetcher,
        &template_name,
        &manifest,
        &project_dir,
        &answers,
        &render_rules,
    )
    .await?;

    // Step 8: Show next steps
    print_next_steps(config, &project_dir, &answers)?;

    Ok(())
}

fn handle_node_check(args: &CreateArgs) -> Result<()> {
    let tool = runtime::node_tool();

    if tool.is_installed() {
        let version = tool.get_version().unwrap_or_else(|| "unknown".to_string());
        cliclack::log::success(format!(
            "{} installed ({})",
            tool.config().display_name,
            version
        ))?;
        return Ok(());
    }

    cliclack::log::warning(format!(
        "{} is not installed - the generated server needs it to run",
        tool.config().display_name
    ))?;

    // In non-interactive mode, just continue
    if args.yes {
        cliclack::log::info(format!(
            "Continuing without {} (--yes mode)",
            tool.config().display_name
        ))?;
        return Ok(());
    }

    let action: &str = cliclack::select("What would you like to do?")
        .item(
            "docs",
            format!("Open the download page ({})", tool.config().docs_url),
            "",
        )
        .item(
            "skip",
            format!("Skip and continue without {}", tool.config().display_name),
            "",
        )
        .interact()?;

    match action {
        "docs" => {
            tool.open_docs()?;
            cliclack::outro(format!(
                "After installing {}, run this command again.",
                tool.config().display_name
            ))?;
            std::process::exit(0);
        }
        "skip" => {
            cliclack::log::info(format!(
                "Continuing without {}. The generated project is plain files, but the server won't start until it is installed.",
                tool.config().display_name
            ))?;
        }
        _ => {}
    }

    Ok(())
}

fn setup_fetcher<C: ProductConfig>(
    config: &C,
    template_dir: &Option<PathBuf>,
) -> Result<TemplateFetcher> {
    let fetcher = match template_dir {
        Some(path) => {
            cliclack::log::info(format!("Using local templates from {}", path.display()))?;
            TemplateFetcher::from_local(path.clone(), config.user_agent())
        }
        None => {
            cliclack::log::info("Using remote templates")?;
            TemplateFetcher::from_config(config)?
        }
    };

    Ok(fetcher)
}

async fn select_template(
    fetcher: &mut TemplateFetcher,
    specified_template: Option<&str>,
) -> Result<(String, TemplateManifest, RenderRules)> {
    let spinner = cliclack::spinner();
    spinner.start("Loading templates...");

    let root_manifest = fetcher.fetch_root_manifest().await?;

    // Helper to merge render rules from root and template
    let merge_rules = |manifest: &TemplateManifest| -> RenderRules {
        let mut merged = root_manifest.render.clone();
        merged.merge(&manifest.render);
        merged
    };

    // If a template was specified via --template flag, use it directly
    if let Some(template_name) = specified_template {
        if !root_manifest.templates.contains(&template_name.to_string()) {
            spinner.stop("Failed to load templates");
            let available = root_manifest.templates.join(", ");
            anyhow::bail!(
                "Template '{}' not found. Available templates: {}",
                template_name,
                available
            );
        }

        let manifest = fetcher.fetch_template_manifest(template_name).await?;
        let rules = merge_rules(&manifest);
        spinner.stop(format!(
            "Template: {} - {}",
            manifest.name, manifest.description
        ));
        return Ok((template_name.to_string(), manifest, rules));
    }

    let mut templates: Vec<(String, TemplateManifest)> = Vec::new();
    for template_name in &root_manifest.templates {
        let manifest = fetcher.fetch_template_manifest(template_name).await?;
        templates.push((template_name.clone(), manifest));
    }

    spinner.stop("Templates loaded");

    if templates.is_empty() {
        anyhow::bail!("No templates found.");
    }

    // If only one template, use it automatically
    if templates.len() == 1 {
        let (name, manifest) = templates.into_iter().next().unwrap();
        let rules = merge_rules(&manifest);
        cliclack::log::info(format!(
            "Using template: {} - {}",
            manifest.name, manifest.description
        ))?;
        return Ok((name, manifest, rules));
    }

    // Build select prompt - use indices to avoid borrow issues
    let mut select = cliclack::select("Select a template");
    for (idx, (_, manifest)) in templates.iter().enumerate() {
        select = select.item(idx, &manifest.name, &manifest.description);
    }

    let selected_idx: usize = select.interact()?;

    let (name, manifest) = templates.into_iter().nth(selected_idx).unwrap();

    let rules = merge_rules(&manifest);

    Ok((name, manifest, rules))
}

fn select_directory(args: &CreateArgs) -> Result<PathBuf> {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    // Use --directory flag if provided
    let path = if let Some(dir) = &args.directory {
        let p = if dir.is_absolute() {
            dir.clone()
        } else {
            current_dir.join(dir)
        };
        cliclack::log::info(format!("Using directory: {}", p.display()))?;
        p
    } else {
        let input: String = cliclack::input("Project directory")
            .placeholder(".")
            .default_input(".")
            .interact()?;

        if input.is_empty() || input == "." {
            current_dir
        } else {
            let p = PathBuf::from(&input);
            if p.is_absolute() {
                p
            } else {
                current_dir.join(p)
            }
        }
    };

    // Validate parent directory exists
    if let Some(parent) = path.parent() {
        if !parent.exists() && parent != std::path::Path::new("") {
            anyhow::bail!("Parent directory does not exist: {}", parent.display());
        }
    }

    // Warn if directory exists and has files
    if path.exists() && path.is_dir() {
        if let Ok(entries) = std::fs::read_dir(&path) {
            let count = entries.count();
            if count > 0 {
                cliclack::log::warning(format!("Directory has {} existing items", count))?;

                // Auto-confirm with --yes flag
                let confirm = if args.yes {
                    true
                } else {
                    cliclack::confirm("Continue anyway?")
                        .initial_value(true)
                        .interact()?
                };

                if !confirm {
                    anyhow::bail!("Setup cancelled.");
                }
            }
        }
    }

    Ok(path)
}

fn collect_answers(args: &CreateArgs) -> Result<Answers> {
    let server_port = prompt_server_port(args)?;
    let api_prefix = prompt_api_prefix(args)?;
    let custom_header = prompt_custom_header(args)?;

    Ok(Answers {
        server_port,
        api_prefix,
        custom_header,
    })
}

fn prompt_server_port(args: &CreateArgs) -> Result<u16> {
    if let Some(port) = args.port {
        cliclack::log::info(format!("Server port: {}", port))?;
        return Ok(port);
    }

    if args.yes {
        return Ok(DEFAULT_SERVER_PORT);
    }

    let input: String = cliclack::input("Server port")
        .default_input(&DEFAULT_SERVER_PORT.to_string())
        .validate(|value: &String| match value.parse::<u16>() {
            Ok(_) => Ok(()),
            Err(_) => Err("please enter a valid port number."),
        })
        .interact()?;

    input.parse().context("Server port is not a valid number")
}

fn prompt_api_prefix(args: &CreateArgs) -> Result<String> {
    if let Some(prefix) = &args.api_prefix {
        // Flag values go through the same validator as prompt input
        validate_api_prefix(prefix)
            .map_err(|e| anyhow::anyhow!("Invalid --api-prefix: {}", e))?;
        cliclack::log::info(format!("API prefix: {}", prefix))?;
        return Ok(prefix.clone());
    }

    if args.yes {
        return Ok(DEFAULT_API_PREFIX.to_string());
    }

    let input: String = cliclack::input("API URL prefix")
        .default_input(DEFAULT_API_PREFIX)
        .validate(|value: &String| validate_api_prefix(value))
        .interact()?;

    Ok(input)
}

fn prompt_custom_header(args: &CreateArgs) -> Result<Option<CustomHeader>> {
    if args.no_custom_header {
        return Ok(None);
    }

    // A header flag implies a custom header without asking
    if args.header_name.is_some() || args.header_value.is_some() {
        let name = args
            .header_name
            .clone()
            .unwrap_or_else(|| DEFAULT_HEADER_NAME.to_string());
        let value = args
            .header_value
            .clone()
            .unwrap_or_else(|| DEFAULT_HEADER_VALUE.to_string());

        validate_custom_header(&name)
            .map_err(|e| anyhow::anyhow!("Invalid --header-name: {}", e))?;
        validate_custom_header(&value)
            .map_err(|e| anyhow::anyhow!("Invalid --header-value: {}", e))?;

        cliclack::log::info(format!("Custom header: {}: {}", name, value))?;
        return Ok(Some(CustomHeader { name, value }));
    }

    if args.yes {
        return Ok(Some(CustomHeader {
            name: DEFAULT_HEADER_NAME.to_string(),
            value: DEFAULT_HEADER_VALUE.to_string(),
        }));
    }

    let wants_header: bool = cliclack::confirm("Send a custom header with every response?")
        .initial_value(true)
        .interact()?;

    if !wants_header {
        return Ok(None);
    }

    let name: String = cliclack::input("Custom header name")
        .default_input(DEFAULT_HEADER_NAME)
        .validate(|value: &String| validate_custom_header(value))
        .interact()?;

    let value: String = cliclack::input("Custom header value")
        .default_input(DEFAULT_HEADER_VALUE)
        .validate(|value: &String| validate_custom_header(value))
        .interact()?;

    Ok(Some(CustomHeader { name, value }))
}

fn report_runtimes() {
    let spinner = cliclack::spinner();
    spinner.start("Checking runtimes...");

    let runtimes = runtime::check_server_runtimes();
    let runtime_info: Vec<String> = runtimes
        .iter()
        .map(|r| {
            if r.available {
                format!("{} ({})", r.name, r.version.as_deref().unwrap_or("unknown"))
            } else {
                format!("{} (not installed)", r.name)
            }
        })
        .collect();
    spinner.stop(format!("Detected runtimes: {}", runtime_info.join(", ")));
}

async fn create_project(
    fetcher: &mut TemplateFetcher,
    template_name: &str,
    manifest: &TemplateManifest,
    project_dir: &PathBuf,
    answers: &Answers,
    render_rules: &RenderRules,
) -> Result<()> {
    let spinner = cliclack::spinner();
    spinner.start("Creating project...");

    let written_files = copier::copy_template(
        fetcher,
        template_name,
        manifest,
        project_dir,
        &answers.substitutions(),
        render_rules,
    )
    .await?;

    spinner.stop(format!(
        "Created {} files in {}",
        written_files.len(),
        project_dir.display()
    ));

    Ok(())
}

fn print_next_steps<C: ProductConfig>(
    config: &C,
    project_dir: &PathBuf,
    answers: &Answers,
) -> Result<()> {
    let steps = config.next_steps(project_dir, answers);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Happy faking!")?;

    Ok(())
}
