use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use postbuild::build::{build_all, Summary};
use postbuild::config::{Config, Settings};
use postbuild::homepage::build_homepage;
use postbuild::sitemap::build_sitemap;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Post-processing steps for a static book site.
#[derive(Parser)]
#[command(name = "postbuild", version, about)]
struct Cli {
    /// Project file (default: search for postbuild.yaml in this directory
    /// and its parents).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Build output directory (overrides config).
    #[arg(short, long, global = true)]
    root: Option<PathBuf>,

    /// Log every book and page considered.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write the homepage listing every book under the build root.
    Homepage {
        /// Homepage template (overrides config).
        #[arg(short, long)]
        template: Option<PathBuf>,

        /// Where to write the homepage (default: {root}/index.html).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write sitemap.xml for every page under the build root.
    Sitemap {
        /// Public site origin, e.g. https://example.com (overrides config).
        #[arg(short, long)]
        base_url: Option<String>,

        /// Where to write the sitemap (default: {root}/sitemap.xml).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write the homepage and then the sitemap.
    All {
        /// Homepage template (overrides config).
        #[arg(short, long)]
        template: Option<PathBuf>,

        /// Public site origin (overrides config).
        #[arg(short, long)]
        base_url: Option<String>,
    },
}

impl Command {
    fn settings(&self) -> Settings {
        match self {
            Command::Homepage { template, output } => Settings {
                template_path: template.clone(),
                homepage_output: output.clone(),
                ..Settings::default()
            },
            Command::Sitemap { base_url, output } => Settings {
                base_url: base_url.clone(),
                sitemap_output: output.clone(),
                ..Settings::default()
            },
            Command::All { template, base_url } => Settings {
                template_path: template.clone(),
                base_url: base_url.clone(),
                ..Settings::default()
            },
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // --verbose forces DEBUG; otherwise honor RUST_LOG, defaulting to WARN.
    let filter = match cli.verbose {
        true => EnvFilter::new("debug"),
        false => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(cli) {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?.apply(Settings {
        root_directory: cli.root.clone(),
        ..cli.command.settings()
    })?;
    tracing::debug!(?config, "resolved configuration");

    let summaries: Vec<Summary> = match cli.command {
        Command::Homepage { .. } => vec![build_homepage(&config).context("Building homepage")?],
        Command::Sitemap { .. } => vec![build_sitemap(&config).context("Building sitemap")?],
        Command::All { .. } => build_all(&config).context("Building site")?,
    };
    for summary in summaries {
        println!("{}", summary);
    }
    Ok(())
}

fn load_config(cli: &Cli) -> Result<Config> {
    Ok(match &cli.config {
        Some(path) => Config::from_project_file(path)?,
        None => {
            let cwd = std::env::current_dir().context("Getting current directory")?;
            Config::from_directory(&cwd)?
        }
    })
}
