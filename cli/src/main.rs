mod config;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{error, info};
use video_info::{Config, EmbedOptions, VideoInfo};

/// Print normalized metadata for video and playlist URLs.
///
/// API credentials come from `YOUTUBE_API_KEY` and `VIMEO_ACCESS_TOKEN`
/// (a `.env` file is read too); without them public pages are scraped.
#[derive(Parser, Debug)]
#[command(name = "video-info", author, version, about)]
struct Cli {
    /// Also print the `<iframe>` embed code
    #[arg(long)]
    embed: bool,

    /// Prefix embed URLs with `https:`
    #[arg(long, requires = "embed")]
    https: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,

    #[arg(required = true, value_name = "URL")]
    urls: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    config::load_environment();
    config::init_logger(cli.verbose);

    let info = VideoInfo::new(Config::from_env()).context("failed to build http client")?;
    let options = if cli.https {
        EmbedOptions::new().url_scheme("https")
    } else {
        EmbedOptions::new()
    };

    let mut failed = 0;
    for url in &cli.urls {
        let resolved = match info.resolve(url).await {
            Ok(resolved) => resolved,
            Err(e) => {
                error!("{url}: {e}");
                failed += 1;
                continue;
            }
        };

        let json = serde_json::to_string_pretty(&resolved)
            .with_context(|| format!("failed to serialize metadata for {url}"))?;
        println!("{json}");
        if cli.embed {
            println!("{}", resolved.embed_code(&options));
        }
    }

    if failed > 0 {
        bail!("{failed} of {} urls could not be resolved", cli.urls.len());
    }
    info!("Resolved {} urls", cli.urls.len());
    Ok(())
}
