mod app;
mod card;
mod surface;
mod theme;
mod widgets;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use country_proto::{DumpRenderer, Renderer};

/// Look up countries as you type.
#[derive(Parser, Debug)]
#[command(name = "countries", version)]
struct Args {
    /// Country API endpoint the query is appended to
    #[arg(long)]
    base_url: Option<String>,

    /// Most matches shown as a list before asking for a narrower name
    #[arg(long)]
    limit: Option<usize>,

    /// Debounce window for keystrokes, in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Show raw JSON instead of country cards
    #[arg(long)]
    dump: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let data_dir = country_proto::platform::data_dir();
    std::fs::create_dir_all(&data_dir)?;
    let log_path = data_dir.join("tui.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // RUST_LOG wins; otherwise debug for our crates, quiet HTTP internals.
    let log_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "debug,hyper_util=warn,reqwest=warn,hyper=warn".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    eprintln!("countries log: {}", log_path.display());
    tracing::info!("countries starting…");

    // ── Load config ──────────────────────────────────────────────────────────
    let config = country_proto::Config::load().unwrap_or_else(|e| {
        tracing::warn!("config unreadable, using defaults: {}", e);
        country_proto::Config::default()
    });

    let base_url = args.base_url.unwrap_or_else(|| config.api.base_url.clone());
    let mut options = config.search_options();
    if let Some(limit) = args.limit {
        options = options.list_limit(limit);
    }
    if let Some(ms) = args.delay_ms {
        options = options.debounce_delay(Duration::from_millis(ms));
    }
    let renderer: Arc<dyn Renderer> = if args.dump {
        Arc::new(DumpRenderer)
    } else {
        Arc::new(card::CardRenderer)
    };
    options = options.renderer(renderer);

    // ── Run TUI ──────────────────────────────────────────────────────────────
    let app = app::App::new(&base_url, options)?;
    app.run().await?;

    Ok(())
}
