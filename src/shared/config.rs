//! Application configuration. Destination, snapshot source, timings, layout heuristics.

use crate::usecases::classifier::{
    ANNOUNCEMENT_LINE_HEIGHT, LayoutHeuristics, ROUTE_HEIGHT, ROUTE_TEXT_MIN_PAD_WIDTH,
};
use crate::usecases::publish_service::RetryPolicy;
use crate::usecases::scan_service::PollCadence;
use serde::Deserialize;
use std::time::Duration;

/// Default JSON snapshot document written by the accessibility helper.
pub const DEFAULT_SNAPSHOT_PATH: &str = "./snapshot.json";

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// URL chat messages are POSTed to. Read from ZCP_DESTINATION_URL.
    /// When unset, messages go to the dry-run sink.
    #[serde(default)]
    pub destination_url: Option<String>,

    /// Path of the JSON snapshot document. Read from ZCP_SNAPSHOT_PATH.
    #[serde(default)]
    pub snapshot_path: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Polling cadence
    // ─────────────────────────────────────────────────────────────────────────
    /// Host application poll interval while idle (default 1000). Read from ZCP_POLL_INTERVAL_MS.
    #[serde(default)]
    pub poll_interval_ms: Option<u64>,

    /// Scan interval while a meeting is present (default 500). Read from ZCP_SCAN_INTERVAL_MS.
    #[serde(default)]
    pub scan_interval_ms: Option<u64>,

    /// Sampling interval while waiting for the chat table to settle (default 2).
    /// Read from ZCP_STABILIZE_INTERVAL_MS.
    #[serde(default)]
    pub stabilize_interval_ms: Option<u64>,

    // ─────────────────────────────────────────────────────────────────────────
    // Publishing
    // ─────────────────────────────────────────────────────────────────────────
    /// Retries after the first failed attempt (default 3). Read from ZCP_PUBLISH_MAX_RETRIES.
    #[serde(default)]
    pub publish_max_retries: Option<u32>,

    /// Delay between attempts (default 2000). Read from ZCP_PUBLISH_RETRY_DELAY_MS.
    #[serde(default)]
    pub publish_retry_delay_ms: Option<u64>,

    // ─────────────────────────────────────────────────────────────────────────
    // Layout heuristics (tied to Zoom's current rendering)
    // ─────────────────────────────────────────────────────────────────────────
    #[serde(default)]
    pub route_height: Option<f64>,

    #[serde(default)]
    pub announcement_line_height: Option<f64>,

    #[serde(default)]
    pub route_text_min_pad_width: Option<f64>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("ZCP").try_parsing(true));
        if let Ok(path) = std::env::var("ZCP_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    /// Returns the destination URL if configured (blank counts as unset).
    pub fn destination_url(&self) -> Option<String> {
        self.destination_url
            .clone()
            .filter(|url| !url.trim().is_empty())
    }

    pub fn snapshot_path_or_default(&self) -> String {
        self.snapshot_path
            .clone()
            .unwrap_or_else(|| DEFAULT_SNAPSHOT_PATH.to_string())
    }

    /// Polling cadence. Zero intervals fall back to the defaults.
    pub fn poll_cadence(&self) -> PollCadence {
        let defaults = PollCadence::default();
        PollCadence {
            poll_interval: millis_or(self.poll_interval_ms, defaults.poll_interval),
            scan_interval: millis_or(self.scan_interval_ms, defaults.scan_interval),
            stabilize_interval: millis_or(self.stabilize_interval_ms, defaults.stabilize_interval),
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        let defaults = RetryPolicy::default();
        RetryPolicy {
            max_retries: self.publish_max_retries.unwrap_or(defaults.max_retries),
            delay: self
                .publish_retry_delay_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.delay),
        }
    }

    pub fn layout_heuristics(&self) -> LayoutHeuristics {
        LayoutHeuristics {
            route_height: self.route_height.unwrap_or(ROUTE_HEIGHT),
            announcement_line_height: self
                .announcement_line_height
                .filter(|h| *h > 0.0)
                .unwrap_or(ANNOUNCEMENT_LINE_HEIGHT),
            route_text_min_pad_width: self
                .route_text_min_pad_width
                .unwrap_or(ROUTE_TEXT_MIN_PAD_WIDTH),
        }
    }
}

fn millis_or(value: Option<u64>, fallback: Duration) -> Duration {
    value
        .filter(|ms| *ms > 0)
        .map(Duration::from_millis)
        .unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.destination_url(), None);
        assert_eq!(cfg.snapshot_path_or_default(), DEFAULT_SNAPSHOT_PATH);

        let cadence = cfg.poll_cadence();
        assert_eq!(cadence.poll_interval, Duration::from_secs(1));
        assert_eq!(cadence.scan_interval, Duration::from_millis(500));
        assert_eq!(cadence.stabilize_interval, Duration::from_millis(2));

        let retry = cfg.retry_policy();
        assert_eq!(retry.max_retries, 3);
        assert_eq!(retry.delay, Duration::from_secs(2));

        assert_eq!(cfg.layout_heuristics(), LayoutHeuristics::default());
    }

    #[test]
    fn test_overrides() {
        let cfg = AppConfig {
            destination_url: Some("  ".into()),
            poll_interval_ms: Some(0),
            scan_interval_ms: Some(250),
            publish_max_retries: Some(0),
            announcement_line_height: Some(0.0),
            route_height: Some(17.0),
            ..AppConfig::default()
        };
        assert_eq!(cfg.destination_url(), None);
        assert_eq!(cfg.poll_cadence().poll_interval, Duration::from_secs(1));
        assert_eq!(cfg.poll_cadence().scan_interval, Duration::from_millis(250));
        assert_eq!(cfg.retry_policy().max_retries, 0);
        let layout = cfg.layout_heuristics();
        assert_eq!(layout.route_height, 17.0);
        assert_eq!(layout.announcement_line_height, ANNOUNCEMENT_LINE_HEIGHT);
    }

    #[test]
    fn test_load_reads_config_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        std::io::Write::write_all(&mut file, b"scan_interval_ms = 250\npublish_max_retries = 5\n")
            .unwrap();
        // Only this test touches ZCP_ variables.
        unsafe { std::env::set_var("ZCP_CONFIG", file.path()) };
        let cfg = AppConfig::load();
        unsafe { std::env::remove_var("ZCP_CONFIG") };

        let cfg = cfg.unwrap();
        assert_eq!(cfg.poll_cadence().scan_interval, Duration::from_millis(250));
        assert_eq!(cfg.retry_policy().max_retries, 5);
    }
}
