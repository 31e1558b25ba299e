use anyhow::Result;
use clap::Parser;

use gooo_init::commands::create::{self, CreateOptions};

#[derive(Parser)]
#[clap(name = "gooo-init")]
#[clap(about = "Download the Gooo project template into a directory")]
#[clap(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Directory to set the project up in (prompted for when omitted)
    path: Option<String>,

    /// Archive URL to download instead of the Gooo main branch
    #[clap(long, env = "GOOO_ARCHIVE_URL")]
    url: Option<String>,

    /// Keep the archive's top-level folder instead of unwrapping it
    #[clap(long)]
    no_strip: bool,

    /// Give up on the download after this many seconds (default: wait indefinitely)
    #[clap(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Show debug logging
    #[clap(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = create::create_project(CreateOptions {
        path: cli.path,
        url: cli.url,
        no_strip: cli.no_strip,
        timeout_secs: cli.timeout,
    })
    .map_err(|e| anyhow::anyhow!(e));

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    Ok(())
}
