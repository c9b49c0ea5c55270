//! Reporting support for rating histories
//!
//! Data needed by charting consumers: a team's rating over time and the
//! distribution of current ratings across teams. Nothing here renders.

pub mod distribution;
pub mod timeline;

pub use distribution::{HistogramBin, RatingDistribution, DEFAULT_HISTOGRAM_BINS};
pub use timeline::{rating_timeline, TimelinePoint};
