//! Cross-sectional statistics of current ratings
//!
//! Summarises the latest rating of many teams: mean, population standard
//! deviation, extremes, and an equal-width histogram for charting.

use serde::{Deserialize, Serialize};

/// Number of histogram bins used when the caller does not pick one
pub const DEFAULT_HISTOGRAM_BINS: usize = 10;

/// Summary statistics over a set of ratings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingDistribution {
    pub count: usize,
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    ratings: Vec<f64>,
}

/// One bar of a rating histogram, covering `[lower, upper)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

impl RatingDistribution {
    /// Summarise `ratings`; `None` when there is nothing to summarise
    pub fn from_ratings(ratings: &[f64]) -> Option<Self> {
        if ratings.is_empty() {
            return None;
        }

        let count = ratings.len();
        let mean = ratings.iter().sum::<f64>() / count as f64;
        let variance = ratings
            .iter()
            .map(|r| (r - mean).powi(2))
            .sum::<f64>()
            / count as f64;

        let min = ratings.iter().copied().fold(f64::INFINITY, f64::min);
        let max = ratings.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Some(Self {
            count,
            mean,
            std_dev: variance.sqrt(),
            min,
            max,
            ratings: ratings.to_vec(),
        })
    }

    pub fn ratings(&self) -> &[f64] {
        &self.ratings
    }

    /// Equal-width bins spanning `[min, max]`; the maximum falls in the last bin
    pub fn histogram(&self, bins: usize) -> Vec<HistogramBin> {
        let bins = bins.max(1);
        let span = self.max - self.min;

        // Identical ratings: a single unit-wide bin centred on the value
        if span == 0.0 {
            return vec![HistogramBin {
                lower: self.min - 0.5,
                upper: self.max + 0.5,
                count: self.count,
            }];
        }

        let width = span / bins as f64;
        let mut histogram: Vec<HistogramBin> = (0..bins)
            .map(|i| HistogramBin {
                lower: self.min + width * i as f64,
                upper: self.min + width * (i + 1) as f64,
                count: 0,
            })
            .collect();

        for rating in &self.ratings {
            let index = (((rating - self.min) / width) as usize).min(bins - 1);
            histogram[index].count += 1;
        }

        histogram
    }
}
