//! Synthetic 30-day cumulative view curve.
//!
//! The curve is an illustration built from a single views-per-day estimate,
//! not a forecast: daily views are the estimate scaled by shuffled random
//! multipliers, with a handful of large multipliers standing in for the
//! burst of attention a video gets early on.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use super::guard::safe_div;
use crate::analysis::VideoStatistics;

pub const GROWTH_DAYS: usize = 30;

/// A group of multipliers drawn uniformly from `[low, high]`.
#[derive(Debug, Clone, Copy)]
pub struct MultiplierBand {
    pub count: usize,
    pub low: f64,
    pub high: f64,
}

pub const MULTIPLIER_BANDS: [MultiplierBand; 3] = [
    MultiplierBand {
        count: 5,
        low: 0.1,
        high: 10.0,
    },
    MultiplierBand {
        count: 15,
        low: 0.1,
        high: 1.2,
    },
    MultiplierBand {
        count: 10,
        low: 0.1,
        high: 1.0,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GrowthPoint {
    pub day: u32,
    pub cumulative_views: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewGrowthSeries {
    pub views_per_day: f64,
    pub points: Vec<GrowthPoint>,
}

/// Daily views the curve is built around, never below 1.
///
/// Falls back to lifetime views over age when the service reports no
/// views-per-day figure.
pub fn estimate_views_per_day(stats: &VideoStatistics) -> f64 {
    let estimate = match stats.views_per_day {
        Some(vpd) if vpd != 0.0 => vpd,
        _ => safe_div(stats.views as f64, stats.video_age_days as f64),
    };
    estimate.max(1.0)
}

/// Draws the multipliers of every band and shuffles them into day order.
pub fn draw_multipliers<R: Rng + ?Sized>(rng: &mut R) -> Vec<f64> {
    let mut multipliers = Vec::with_capacity(GROWTH_DAYS);
    for band in MULTIPLIER_BANDS.iter() {
        for _ in 0..band.count {
            multipliers.push(rng.random_range(band.low..=band.high));
        }
    }
    multipliers.shuffle(rng);
    multipliers
}

impl ViewGrowthSeries {
    pub fn simulate<R: Rng + ?Sized>(stats: &VideoStatistics, rng: &mut R) -> Self {
        let views_per_day = estimate_views_per_day(stats);
        let multipliers = draw_multipliers(rng);
        Self::from_multipliers(views_per_day, &multipliers)
    }

    /// Accumulates `estimate * multiplier` (floored at 1) day by day.
    pub fn from_multipliers(views_per_day: f64, multipliers: &[f64]) -> Self {
        let mut total = 0.0;
        let points = multipliers
            .iter()
            .zip(1u32..)
            .map(|(multiplier, day)| {
                total += (views_per_day * multiplier).max(1.0);
                GrowthPoint {
                    day,
                    cumulative_views: total,
                }
            })
            .collect();
        Self {
            views_per_day,
            points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn estimate_prefers_reported_views_per_day() {
        let stats = VideoStatistics {
            views: 1_000,
            video_age_days: 10,
            views_per_day: Some(250.0),
            ..Default::default()
        };
        assert_eq!(estimate_views_per_day(&stats), 250.0);
    }

    #[test]
    fn estimate_falls_back_to_age() {
        let stats = VideoStatistics {
            views: 1_000,
            video_age_days: 10,
            views_per_day: Some(0.0),
            ..Default::default()
        };
        assert_eq!(estimate_views_per_day(&stats), 100.0);

        let stats = VideoStatistics {
            views: 1_000,
            video_age_days: 0,
            views_per_day: None,
            ..Default::default()
        };
        assert_eq!(estimate_views_per_day(&stats), 1_000.0);
    }

    #[test]
    fn estimate_is_at_least_one() {
        assert_eq!(estimate_views_per_day(&VideoStatistics::default()), 1.0);
        let stats = VideoStatistics {
            views_per_day: Some(0.2),
            ..Default::default()
        };
        assert_eq!(estimate_views_per_day(&stats), 1.0);
    }

    #[test]
    fn multipliers_respect_band_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut multipliers = draw_multipliers(&mut rng);
        assert_eq!(multipliers.len(), GROWTH_DAYS);

        multipliers.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert!(multipliers.iter().all(|m| (0.1..=10.0).contains(m)));
        // Only the five burst draws may exceed 1.2.
        assert!(multipliers.iter().filter(|m| **m > 1.2).count() <= 5);
    }

    #[test]
    fn series_has_thirty_non_decreasing_points() {
        let stats = VideoStatistics {
            views: 42_000,
            video_age_days: 12,
            ..Default::default()
        };
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let series = ViewGrowthSeries::simulate(&stats, &mut rng);

            assert_eq!(series.points.len(), GROWTH_DAYS);
            assert_eq!(series.points[0].day, 1);
            assert_eq!(series.points[GROWTH_DAYS - 1].day, 30);
            assert!(series.points[0].cumulative_views >= 1.0);
            for pair in series.points.windows(2) {
                assert!(pair[1].cumulative_views >= pair[0].cumulative_views);
            }
        }
    }

    #[test]
    fn same_seed_same_curve() {
        let stats = VideoStatistics {
            views: 5_000,
            views_per_day: Some(300.0),
            ..Default::default()
        };
        let a = ViewGrowthSeries::simulate(&stats, &mut StdRng::seed_from_u64(99));
        let b = ViewGrowthSeries::simulate(&stats, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn accumulates_fixed_multipliers_exactly() {
        let series = ViewGrowthSeries::from_multipliers(10.0, &[2.0, 0.5, 0.01]);
        let cumulative: Vec<f64> = series.points.iter().map(|p| p.cumulative_views).collect();
        // 0.01 * 10 = 0.1 is floored to one view
        assert_eq!(cumulative, vec![20.0, 25.0, 26.0]);
    }
}
