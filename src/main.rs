//! Wiring & DI. Entry point: load config (and `.env`), bootstrap adapters, start the pipeline, run front ends.
//! No business logic here.

use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use zoom_chat_publisher::adapters::http::{DryRunSink, HttpChatSink};
use zoom_chat_publisher::adapters::snapshot::JsonFileSnapshotProvider;
use zoom_chat_publisher::adapters::ui::{ConsoleView, JournalView};
use zoom_chat_publisher::ports::{ChatSink, EventView, SnapshotProvider};
use zoom_chat_publisher::shared::config::AppConfig;
use zoom_chat_publisher::usecases::Pipeline;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // The console view owns stdout; logs go to stderr.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cfg = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "invalid configuration; using defaults");
        AppConfig::default()
    });

    // --- Snapshot source ---
    let snapshot_path = cfg.snapshot_path_or_default();
    info!(path = %snapshot_path, "reading Zoom UI snapshots");
    let provider: Arc<dyn SnapshotProvider> =
        Arc::new(JsonFileSnapshotProvider::new(&snapshot_path));

    // --- Destination ---
    let sink: Arc<dyn ChatSink> = match cfg.destination_url() {
        Some(url) => {
            info!(url = %url, "publishing chat messages");
            Arc::new(HttpChatSink::new(url))
        }
        None => {
            warn!("ZCP_DESTINATION_URL not set, using dry-run sink");
            Arc::new(DryRunSink::new())
        }
    };

    let cadence = cfg.poll_cadence();
    let retry = cfg.retry_policy();
    info!(
        max_retries = retry.max_retries,
        retry_delay_ms = retry.delay.as_millis() as u64,
        "publish retry policy"
    );
    let pipeline = Pipeline::new(provider, sink, cadence, retry, cfg.layout_heuristics());

    // --- Front ends: each gets its own copy of the stream before anything is emitted ---
    let views: Vec<(&'static str, Arc<dyn EventView>)> = vec![
        ("console", Arc::new(ConsoleView::new()) as Arc<dyn EventView>),
        ("journal", Arc::new(JournalView::new()) as Arc<dyn EventView>),
    ];
    for (name, view) in views {
        let events = pipeline.subscribe();
        tokio::spawn(async move {
            if let Err(e) = view.render(events).await {
                error!(view = name, error = %e, "front end failed");
            }
        });
    }

    let mut handle = pipeline.start();
    tokio::select! {
        res = tokio::signal::ctrl_c() => {
            if let Err(e) = res {
                error!(error = %e, "failed to listen for shutdown signal");
            }
            info!("shutting down");
        }
        _ = handle.stopped() => {}
    }
    handle.abort();

    Ok(())
}
