mod action;
mod app;
mod app_state;
mod component;
mod components;
mod focus;
mod theme;
mod view;
mod widgets;

use anyhow::Context;
use clap::Parser;

use trackers_proto::api::WebUiClient;
use trackers_proto::config::Config;

/// Tracker list of a qBittorrent WebUI, in the terminal.
#[derive(Parser, Debug)]
#[command(name = "trackers", version, about)]
struct Args {
    /// WebUI base url; overrides `[webui] base_url`.
    #[arg(long)]
    url: Option<String>,

    /// Tracker refresh interval in seconds; overrides `[polling] interval_secs`.
    #[arg(long)]
    interval: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let data_dir = trackers_proto::platform::data_dir();
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("creating {}", data_dir.display()))?;
    let log_path = data_dir.join("trackers.log");

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("opening {}", log_path.display()))?;

    // RUST_LOG wins; otherwise debug for our crates with HTTP client internals quiet.
    let log_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "debug,hyper_util=warn,reqwest=warn,hyper=warn".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    // The terminal belongs to the UI from here on.
    eprintln!("trackers log: {}", log_path.display());
    tracing::info!("trackers starting…");

    let mut config = Config::load().unwrap_or_else(|e| {
        tracing::warn!("config: {:#}, using defaults", e);
        Config::default()
    });
    if let Some(url) = args.url {
        config.webui.base_url = url;
    }
    if let Some(secs) = args.interval {
        config.polling.interval_secs = secs;
    }

    let api = WebUiClient::new(&config.webui.base_url, config.webui.request_timeout())
        .context("building WebUI client")?;
    tracing::info!(
        "webui {} (tracker refresh every {:?})",
        api.base_url(),
        config.polling.interval()
    );

    app::App::new(api, &config).run().await
}
