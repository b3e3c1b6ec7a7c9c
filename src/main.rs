//! CLI entry point for deftly

use anyhow::{bail, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use deftly::commands::watch::WatchOptions;
use deftly::config::SiteConfig;
use deftly::server::DEFAULT_ADDR;
use deftly::Site;

#[derive(Parser)]
#[command(name = "deftly")]
#[command(version)]
#[command(about = "Generate a static blog from a directory of markdown posts", long_about = None)]
struct Cli {
    /// Directory of markdown posts
    src: Option<PathBuf>,

    /// Directory of *.html templates
    templates: Option<PathBuf>,

    /// Output directory
    dst: Option<PathBuf>,

    /// Enable 'watch' mode. Requires --wdir and --wcmd.
    #[arg(short, long, requires = "wdir", requires = "wcmd")]
    watch: bool,

    /// Watch a directory for changes, run a command when a change happens
    #[arg(long)]
    wdir: Option<PathBuf>,

    /// Command to run when changes are detected in --wdir
    #[arg(long)]
    wcmd: Option<String>,

    /// Address to serve the static files on
    #[arg(long, default_value = DEFAULT_ADDR)]
    port: String,

    /// Directory served in watch mode
    #[arg(long, default_value = "static")]
    serve_dir: PathBuf,

    /// Site configuration file (defaults to ./_config.yml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "deftly=debug,info"
    } else {
        "deftly=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if cli.watch {
        let (Some(watch_dir), Some(command)) = (cli.wdir, cli.wcmd) else {
            bail!("--watch requires --wdir and --wcmd");
        };
        deftly::commands::watch::run(WatchOptions {
            watch_dir,
            command,
            serve_dir: cli.serve_dir,
            addr: cli.port,
        })
        .await?;
        return Ok(());
    }

    let (Some(src), Some(templates), Some(dst)) = (cli.src, cli.templates, cli.dst) else {
        println!("Wrong number of arguments");
        std::process::exit(1);
    };

    let base_dir = std::env::current_dir()?;
    let config = SiteConfig::resolve(cli.config.as_deref(), &base_dir)?;
    let site = Site::new(config, src, templates, dst);
    site.build()?;

    Ok(())
}
