//! Logging and metrics for the responder coverage tools
//!
//! - Structured logging with tracing
//! - Per-process counters and timing histograms
//! - A session id that correlates every log line of one run

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};
use std::time::{Duration, Instant};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uuid::Uuid;

/// Global metrics registry
static METRICS: Lazy<MetricsRegistry> = Lazy::new(MetricsRegistry::new);

/// Global session ID for correlating logs
static SESSION_ID: Lazy<String> = Lazy::new(|| Uuid::new_v4().to_string());

/// Initialize logging with the default configuration
pub fn init() -> anyhow::Result<()> {
    init_with_config(TelemetryConfig::default())
}

/// Initialize with custom configuration
///
/// `RUST_LOG` takes precedence over `config.log_level`. Logs go to stderr so
/// command output on stdout stays machine-readable.
pub fn init_with_config(config: TelemetryConfig) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let subscriber = tracing_subscriber::registry().with(filter).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(config.show_target)
            .with_file(config.show_file)
            .with_line_number(config.show_line_number)
            .compact(),
    );

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))?;

    tracing::debug!(
        session_id = %session_id(),
        version = env!("CARGO_PKG_VERSION"),
        "Telemetry initialized"
    );

    Ok(())
}

/// Get the current session ID
pub fn session_id() -> &'static str {
    &SESSION_ID
}

/// Telemetry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub log_level: String,
    /// Include the module path in each line
    pub show_target: bool,
    /// Include the source file in each line
    pub show_file: bool,
    /// Include the source line in each line
    pub show_line_number: bool,
}

impl TelemetryConfig {
    /// Configuration at the given level, everything else default
    pub fn with_level(level: impl Into<String>) -> Self {
        Self {
            log_level: level.into(),
            ..Self::default()
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            show_target: false,
            show_file: false,
            show_line_number: false,
        }
    }
}

/// Metrics registry for counters and timing histograms
pub struct MetricsRegistry {
    counters: RwLock<BTreeMap<String, u64>>,
    histograms: RwLock<BTreeMap<String, Vec<f64>>>,
    start_time: Instant,
}

impl MetricsRegistry {
    fn new() -> Self {
        Self {
            counters: RwLock::new(BTreeMap::new()),
            histograms: RwLock::new(BTreeMap::new()),
            start_time: Instant::now(),
        }
    }

    /// Increment a counter
    pub fn increment(&self, name: &str) {
        self.increment_by(name, 1);
    }

    /// Increment a counter by a specific amount
    pub fn increment_by(&self, name: &str, value: u64) {
        let mut counters = self.counters.write().unwrap_or_else(PoisonError::into_inner);
        *counters.entry(name.to_string()).or_insert(0) += value;
    }

    /// Current value of a counter
    pub fn counter(&self, name: &str) -> u64 {
        let counters = self.counters.read().unwrap_or_else(PoisonError::into_inner);
        counters.get(name).copied().unwrap_or(0)
    }

    /// Record a histogram value
    pub fn histogram(&self, name: &str, value: f64) {
        let mut histograms = self.histograms.write().unwrap_or_else(PoisonError::into_inner);
        histograms.entry(name.to_string()).or_default().push(value);
    }

    /// Get uptime in seconds
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Export metrics as JSON
    pub fn export_json(&self) -> serde_json::Value {
        let counters = self.counters.read().unwrap_or_else(PoisonError::into_inner);
        let histograms = self.histograms.read().unwrap_or_else(PoisonError::into_inner);

        let histogram_stats: BTreeMap<&str, HistogramStats> = histograms
            .iter()
            .map(|(k, v)| (k.as_str(), HistogramStats::from_values(v)))
            .collect();

        serde_json::json!({
            "session_id": session_id(),
            "uptime_secs": self.uptime_secs(),
            "counters": &*counters,
            "histograms": histogram_stats,
        })
    }
}

/// Histogram statistics
#[derive(Debug, Serialize)]
#[allow(missing_docs)]
pub struct HistogramStats {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub p50: f64,
    pub p95: f64,
}

impl HistogramStats {
    fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self {
                count: 0,
                min: 0.0,
                max: 0.0,
                mean: 0.0,
                p50: 0.0,
                p95: 0.0,
            };
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let count = sorted.len();
        let sum: f64 = sorted.iter().sum();

        Self {
            count,
            min: sorted[0],
            max: sorted[count - 1],
            mean: sum / count as f64,
            p50: percentile(&sorted, 50.0),
            p95: percentile(&sorted, 95.0),
        }
    }
}

fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let idx = ((p / 100.0) * (sorted.len() - 1) as f64).round() as usize;
    sorted[idx.min(sorted.len() - 1)]
}

/// Get the global metrics registry
pub fn metrics() -> &'static MetricsRegistry {
    &METRICS
}

/// Timer for measuring operation duration
///
/// Records into the histogram named after the timer when stopped or dropped.
pub struct Timer {
    name: &'static str,
    start: Instant,
    recorded: bool,
}

impl Timer {
    /// Start a new timer
    pub fn start(name: &'static str) -> Self {
        Self {
            name,
            start: Instant::now(),
            recorded: false,
        }
    }

    /// Stop the timer and record the duration
    pub fn stop(mut self) -> Duration {
        self.record()
    }

    fn record(&mut self) -> Duration {
        let duration = self.start.elapsed();
        if !self.recorded {
            self.recorded = true;
            metrics().histogram(self.name, duration.as_secs_f64() * 1000.0);
            tracing::trace!(
                metric = self.name,
                duration_ms = duration.as_millis(),
                "Timer completed"
            );
        }
        duration
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        self.record();
    }
}
