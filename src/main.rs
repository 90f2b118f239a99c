//! `globeplay` CLI - extract streams from Globe Wien / Hader player pages

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use globeplay::{Config, HttpHost, ProviderRouter, StreamFormat, StreamInfo};

#[derive(Parser)]
#[command(name = "globeplay")]
#[command(about = "Extract HLS, DASH and audio streams from Globe Wien and Hader player pages")]
#[command(version)]
struct Cli {
    /// Player page URL (player.globe.wien or player.hader.at)
    url: String,

    /// Print the extraction result as JSON
    #[arg(short = 'j', long, conflicts_with_all = ["get_url", "list_formats"])]
    dump_json: bool,

    /// Print only the URL of the best format
    #[arg(short = 'g', long, conflicts_with = "list_formats")]
    get_url: bool,

    /// List available formats only
    #[arg(short = 'F', long)]
    list_formats: bool,

    /// Config file (default: ~/.config/globeplay/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };

    let host = HttpHost::with_config(&config)?;
    let router = ProviderRouter::from_config(&config);

    let info = router
        .extract(&cli.url, &host)
        .await
        .with_context(|| format!("extraction failed for {}", cli.url))?;

    if cli.dump_json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else if cli.get_url {
        let best = info
            .best_format()
            .with_context(|| format!("no playable formats for {}", info.id))?;
        println!("{}", best.url);
    } else if cli.list_formats {
        print_formats(&info.formats);
    } else {
        print_info(&info);
    }

    Ok(())
}

fn print_info(info: &StreamInfo) {
    println!("🎬 {}", info.title);
    println!("   ID: {}", info.id);
    if let Some(ref desc) = info.description {
        println!("   Description: {desc}");
    }
    if let Some(ref thumb) = info.thumbnail_url {
        println!("   Thumbnail: {thumb}");
    }
    if info.is_audio_only() && !info.formats.is_empty() {
        println!("   🎧 Audio only");
    }
    println!();
    print_formats(&info.formats);
}

fn print_formats(formats: &[StreamFormat]) {
    if formats.is_empty() {
        println!("No formats available");
        return;
    }

    println!(
        "{:<28} {:<5} {:<12} {:>8}  {:<20} URL",
        "ID", "EXT", "RESOLUTION", "TBR", "CODECS"
    );
    for f in formats {
        let tbr = f.tbr.map(|t| format!("{t:.0}k")).unwrap_or_default();
        let codecs = match (f.vcodec.as_deref(), f.acodec.as_deref()) {
            (Some("none"), Some(a)) => a.to_string(),
            (Some("none"), None) => "audio".to_string(),
            (Some(v), Some("none") | None) => v.to_string(),
            (Some(v), Some(a)) => format!("{v},{a}"),
            (None, Some(a)) => a.to_string(),
            (None, None) => String::new(),
        };
        println!(
            "{:<28} {:<5} {:<12} {:>8}  {:<20} {}",
            f.format_id,
            f.ext,
            f.resolution(),
            tbr,
            codecs,
            f.url
        );
    }
}
