mod commands;
mod config;
mod logging;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use css_vendor::{SourceRegistry, Vendor};
use css_vendor_github::{GitHubTreeLister, ReqwestClient};

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "css-vendor")]
#[command(about = "Vendor third-party CSS into a local tree and check its imports")]
struct Cli {
    /// Config file (defaults to ./css-vendor.toml, then the user config)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch or copy configured sources into the output directory (default)
    Sync {
        /// Output directory, overriding the configured one
        #[arg(long)]
        output: Option<PathBuf>,
        /// Only sync these sources, in this order
        sources: Vec<String>,
    },
    /// List configured sources and how each one syncs
    Sources,
    /// Check @import statements against the files on disk
    Validate {
        /// Stylesheet to validate; omit to analyze the whole CSS directory
        main_css: Option<PathBuf>,
        /// Directory that rooted (`/...`) imports resolve against
        #[arg(default_value = ".")]
        base_dir: PathBuf,
        /// Directory scanned when no stylesheet is given
        #[arg(long, default_value = "css")]
        css_dir: PathBuf,
    },
}

fn build_vendor(config: AppConfig) -> Vendor {
    let registry: SourceRegistry = config.sources.into_iter().collect();
    Vendor::new(
        config.output_dir,
        registry,
        Arc::new(ReqwestClient::new()),
        Arc::new(GitHubTreeLister::default()),
    )
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init() {
        eprintln!("warning: could not initialize logging: {e}");
    }

    let command = cli.command.unwrap_or(Command::Sync {
        output: None,
        sources: Vec::new(),
    });

    match command {
        Command::Sync { output, sources } => {
            let mut config = config::load_config(cli.config.as_deref())?;
            if let Some(output) = output {
                config.output_dir = output;
            }
            let vendor = build_vendor(config);
            commands::sync::run(&vendor, &sources).await;
            Ok(())
        }
        Command::Sources => {
            let config = config::load_config(cli.config.as_deref())?;
            let registry: SourceRegistry = config.sources.into_iter().collect();
            commands::sources::run(&registry, &config.output_dir);
            Ok(())
        }
        Command::Validate {
            main_css,
            base_dir,
            css_dir,
        } => {
            commands::validate::run(main_css.as_deref(), &base_dir, &css_dir);
            Ok(())
        }
    }
}
