//! create-fake-backend CLI - Project scaffolding for fake HTTP backend servers

use anyhow::Result;
use clap::{Parser, Subcommand};
use fake_backend_core::answers::Answers;
use fake_backend_core::config::detect_install_command;
use fake_backend_core::tui::CreateArgs;
use fake_backend_core::ProductConfig;
use std::path::{Path, PathBuf};

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Fake backend product configuration
#[derive(Clone)]
pub struct FakeBackendConfig;

impl ProductConfig for FakeBackendConfig {
    fn name(&self) -> &'static str {
        "create-fake-backend"
    }

    fn display_name(&self) -> &'static str {
        "http-fake-backend"
    }

    fn default_template_url(&self) -> &'static str {
        "https://api.github.com/repos/micromata/fake-backend-tools/contents/templates"
    }

    fn template_url_env(&self) -> &'static str {
        "FAKE_BACKEND_TEMPLATE_URL"
    }

    fn checks_node_runtime(&self) -> bool {
        true
    }

    fn docs_url(&self) -> &'static str {
        "https://github.com/micromata/http-fake-backend"
    }

    fn cli_description(&self) -> &'static str {
        "CLI for scaffolding fake HTTP backend servers"
    }

    fn upgrade_command(&self) -> &'static str {
        "cargo install fake-backend-tools --force"
    }

    fn next_steps(&self, dir: &Path, answers: &Answers) -> Vec<String> {
        let mut steps = Vec::new();
        let current = std::env::current_dir().ok();

        // Step 1: cd to directory if not current
        if current.as_deref() != Some(dir) {
            steps.push(format!("cd {}", dir.display()));
        }

        // Step 2: Install dependencies with whatever package manager is around
        steps.push(detect_install_command().to_string());

        // Step 3: Start the server and try an endpoint
        steps.push("npm run start:dev".to_string());
        steps.push(format!(
            "Open http://localhost:{}{} in your browser",
            answers.server_port, answers.api_prefix
        ));

        steps
    }
}

#[derive(Parser, Debug)]
#[command(name = "create-fake-backend")]
#[command(about = "CLI for scaffolding fake HTTP backend servers")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new fake backend project
    Create(CliCreateArgs),
    /// Build zip files for all templates in the template directory (for development use)
    BuildZips(BuildZipsArgs),
}

#[derive(Parser, Debug)]
pub struct CliCreateArgs {
    /// Local directory to use for templates instead of fetching from remote (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Template name to use
    #[arg(short, long)]
    pub template: Option<String>,

    /// Project directory to create
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Port the generated server listens on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// URL prefix of the faked API (e.g. /api)
    #[arg(short = 'a', long = "api-prefix")]
    pub api_prefix: Option<String>,

    /// Name of the custom response header
    #[arg(long = "header-name")]
    pub header_name: Option<String>,

    /// Value of the custom response header
    #[arg(long = "header-value")]
    pub header_value: Option<String>,

    /// Generate without a custom response header
    #[arg(long = "no-custom-header", conflicts_with_all = ["header_name", "header_value"])]
    pub no_custom_header: bool,

    /// Skip the Node.js check
    #[arg(long = "skip-node-check")]
    pub skip_node_check: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        CreateArgs {
            template_dir: args.template_dir,
            template: args.template,
            directory: args.directory,
            port: args.port,
            api_prefix: args.api_prefix,
            header_name: args.header_name,
            header_value: args.header_value,
            no_custom_header: args.no_custom_header,
            skip_node_check: args.skip_node_check,
            yes: args.yes,
        }
    }
}

#[derive(Parser, Debug)]
pub struct BuildZipsArgs {
    /// Local directory containing templates to build zips from (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    let config = FakeBackendConfig;

    // Handle subcommands
    match args.command {
        Some(Command::Create(create_args)) => {
            // Run the TUI application with the create args
            let result = fake_backend_core::run(&config, create_args.into(), CLI_VERSION).await;

            // Ensure cursor is visible on normal exit
            let _ = console::Term::stderr().show_cursor();

            result
        }
        Some(Command::BuildZips(build_args)) => {
            // Build zip files for templates
            fake_backend_core::templates::build_zips(&config, &build_args.template_dir).await
        }
        None => {
            // No subcommand provided, default to create behavior (interactive mode)
            let create_args = CreateArgs::default();
            let result = fake_backend_core::run(&config, create_args, CLI_VERSION).await;

            // Ensure cursor is visible on normal exit
            let _ = console::Term::stderr().show_cursor();

            result
        }
    }
}
