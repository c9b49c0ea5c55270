//! Metrics collection using Prometheus
//!
//! Counters and histograms describing what the tracker has ingested.

use crate::types::EntryKind;
use anyhow::Result;
use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Metrics collector for rating ingestion
#[derive(Clone)]
pub struct MetricsCollector {
    /// Prometheus registry
    registry: Arc<Registry>,

    ingest_metrics: IngestMetrics,
}

/// Ingestion metrics
#[derive(Clone)]
pub struct IngestMetrics {
    /// Total games applied to the histories
    pub games_ingested_total: IntCounter,

    /// Entries appended, by entry kind
    pub entries_appended_total: IntCounterVec,

    /// Season rollovers that regressed a team's rating
    pub season_rollovers_total: IntCounter,

    /// Rejected games, by error reason
    pub ingest_errors_total: IntCounterVec,

    /// Teams on the roster
    pub teams_tracked: IntGauge,

    /// Time spent per `add_history` call
    pub ingest_duration_seconds: Histogram,
}

impl MetricsCollector {
    /// Create a new metrics collector with default registry
    pub fn new() -> Result<Self> {
        let registry = Arc::new(Registry::new());
        Self::with_registry(registry)
    }

    /// Create a new metrics collector with custom registry
    pub fn with_registry(registry: Arc<Registry>) -> Result<Self> {
        let ingest_metrics = IngestMetrics::new(&registry)?;

        Ok(Self {
            registry,
            ingest_metrics,
        })
    }

    /// Get the Prometheus registry
    pub fn registry(&self) -> Arc<Registry> {
        self.registry.clone()
    }

    /// Get ingestion metrics
    pub fn ingest(&self) -> &IngestMetrics {
        &self.ingest_metrics
    }

    pub fn record_game(&self) {
        self.ingest_metrics.games_ingested_total.inc();
    }

    pub fn record_entry(&self, kind: EntryKind) {
        let kind = kind.to_string();
        self.ingest_metrics
            .entries_appended_total
            .with_label_values(&[kind.as_str()])
            .inc();
    }

    pub fn record_rollover(&self) {
        self.ingest_metrics.season_rollovers_total.inc();
    }

    pub fn record_error(&self, reason: &str) {
        self.ingest_metrics
            .ingest_errors_total
            .with_label_values(&[reason])
            .inc();
    }

    pub fn set_teams_tracked(&self, count: usize) {
        self.ingest_metrics.teams_tracked.set(count as i64);
    }

    pub fn record_ingest_duration(&self, duration: Duration) {
        self.ingest_metrics
            .ingest_duration_seconds
            .observe(duration.as_secs_f64());
    }

    /// Render all registered metrics in the Prometheus text format
    pub fn export(&self) -> Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }

    /// Create a timer for measuring operation duration
    pub fn start_timer(&self) -> MetricsTimer {
        MetricsTimer::new()
    }
}

/// Timer for measuring operation durations
pub struct MetricsTimer {
    start: Instant,
}

impl MetricsTimer {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get the elapsed duration
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Stop the timer and return the duration
    pub fn stop(self) -> Duration {
        self.elapsed()
    }
}

impl IngestMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let games_ingested_total =
            IntCounter::new("elo_history_games_ingested_total", "Total games ingested")?;
        registry.register(Box::new(games_ingested_total.clone()))?;

        let entries_appended_total = IntCounterVec::new(
            Opts::new(
                "elo_history_entries_appended_total",
                "Rating entries appended",
            ),
            &["kind"],
        )?;
        registry.register(Box::new(entries_appended_total.clone()))?;

        let season_rollovers_total = IntCounter::new(
            "elo_history_season_rollovers_total",
            "Season rollovers applied",
        )?;
        registry.register(Box::new(season_rollovers_total.clone()))?;

        let ingest_errors_total = IntCounterVec::new(
            Opts::new("elo_history_ingest_errors_total", "Rejected games"),
            &["reason"],
        )?;
        registry.register(Box::new(ingest_errors_total.clone()))?;

        let teams_tracked = IntGauge::new("elo_history_teams_tracked", "Teams on the roster")?;
        registry.register(Box::new(teams_tracked.clone()))?;

        let ingest_duration_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "elo_history_ingest_duration_seconds",
                "Batch ingestion time",
            )
            .buckets(vec![0.0001, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0]),
        )?;
        registry.register(Box::new(ingest_duration_seconds.clone()))?;

        Ok(Self {
            games_ingested_total,
            entries_appended_total,
            season_rollovers_total,
            ingest_errors_total,
            teams_tracked,
            ingest_duration_seconds,
        })
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new().expect("Failed to create default metrics collector")
    }
}
