//! Metrics for the rating tracker
//!
//! Prometheus counters describing ingestion, exportable in the text
//! exposition format.

pub mod collector;

pub use collector::{IngestMetrics, MetricsCollector, MetricsTimer};
