//! Classification, percentages, NPS score, and summary statistics.
//!
//! Everything here is a pure function of the multiset of ratings: order never
//! changes the result.

use serde::Serialize;

use crate::domain::{Bucket, NumberForm, RatingSeries};

/// Count and share of one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BucketShare {
    pub bucket: Bucket,
    pub count: usize,
    /// `count / total * 100`.
    pub percent: f64,
}

/// Descriptive statistics over the rating series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryStats {
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation (`n - 1`); `None` for a single rating.
    pub std_dev: Option<f64>,
    pub min: f64,
    pub max: f64,
    /// How `min` and `max` are written out.
    pub form: NumberForm,
}

/// Full NPS summary for one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NpsSummary {
    pub total: usize,
    pub promoters: BucketShare,
    pub passives: BucketShare,
    pub detractors: BucketShare,
    /// Percent promoters minus percent detractors, in `[-100, 100]`.
    pub nps: f64,
    pub stats: SummaryStats,
}

impl NpsSummary {
    pub fn share(&self, bucket: Bucket) -> &BucketShare {
        match bucket {
            Bucket::Promoter => &self.promoters,
            Bucket::Passive => &self.passives,
            Bucket::Detractor => &self.detractors,
        }
    }
}

/// Classify and aggregate a rating series.
pub fn summarize(series: &RatingSeries) -> NpsSummary {
    let values = series.values();
    let total = values.len();

    let mut counts = [0usize; 3];
    for &v in values {
        let slot = match Bucket::classify(v) {
            Bucket::Promoter => 0,
            Bucket::Passive => 1,
            Bucket::Detractor => 2,
        };
        counts[slot] += 1;
    }

    let share = |bucket, count: usize| BucketShare {
        bucket,
        count,
        percent: count as f64 / total as f64 * 100.0,
    };
    let promoters = share(Bucket::Promoter, counts[0]);
    let passives = share(Bucket::Passive, counts[1]);
    let detractors = share(Bucket::Detractor, counts[2]);

    NpsSummary {
        total,
        nps: promoters.percent - detractors.percent,
        promoters,
        passives,
        detractors,
        stats: summary_stats(values, series.form()),
    }
}

/// Mean, median, sample standard deviation, min, and max.
///
/// `values` must be non-empty and contain no NaN.
pub fn summary_stats(values: &[f64], form: NumberForm) -> SummaryStats {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;

    let std_dev = if values.len() > 1 {
        let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        Some((ss / (n - 1.0)).sqrt())
    } else {
        None
    };

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    let median = if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    };

    SummaryStats {
        mean,
        median,
        std_dev,
        min: sorted[0],
        max: sorted[sorted.len() - 1],
        form,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(values: &[f64]) -> RatingSeries {
        RatingSeries::from_validated(values.to_vec()).unwrap()
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn balanced_sample_scores_zero() {
        let s = summarize(&series(&[10.0, 10.0, 9.0, 8.0, 7.0, 6.0, 5.0, 0.0]));
        assert_eq!(s.total, 8);
        assert_eq!(s.promoters.count, 3);
        assert_eq!(s.passives.count, 2);
        assert_eq!(s.detractors.count, 3);
        assert_close(s.promoters.percent, 37.5);
        assert_close(s.passives.percent, 25.0);
        assert_close(s.detractors.percent, 37.5);
        assert_close(s.nps, 0.0);
    }

    #[test]
    fn fractional_passive_counts() {
        let s = summarize(&series(&[9.0, 7.5]));
        assert_eq!(s.stats.form, NumberForm::Float);
        assert_eq!(
            (s.promoters.count, s.passives.count, s.detractors.count),
            (1, 1, 0)
        );
        assert_close(s.nps, 50.0);
    }

    #[test]
    fn extremes_hit_the_bounds() {
        let all_promoters = summarize(&series(&[9.0, 10.0, 9.5]));
        assert_close(all_promoters.nps, 100.0);

        let all_detractors = summarize(&series(&[0.0, 6.0, 3.0]));
        assert_close(all_detractors.nps, -100.0);

        let all_passives = summarize(&series(&[7.0, 8.0]));
        assert_close(all_passives.nps, 0.0);
    }

    #[test]
    fn buckets_partition_and_percentages_sum_to_100() {
        // Every tenth of a point between 0 and 10.
        let values: Vec<f64> = (0..=100).map(|i| i as f64 / 10.0).collect();
        let s = summarize(&series(&values));
        let counted: usize = Bucket::ALL.iter().map(|b| s.share(*b).count).sum();
        assert_eq!(counted, values.len());
        let pct: f64 = Bucket::ALL.iter().map(|b| s.share(*b).percent).sum();
        assert_close(pct, 100.0);
        assert!((-100.0..=100.0).contains(&s.nps));
    }

    #[test]
    fn order_does_not_matter() {
        let a = summarize(&series(&[1.0, 9.0, 7.0, 10.0, 4.0]));
        let b = summarize(&series(&[10.0, 4.0, 1.0, 7.0, 9.0]));
        assert_eq!(a, b);
    }

    #[test]
    fn stats_even_and_odd() {
        let st = summary_stats(&[10.0, 10.0, 9.0, 8.0, 7.0, 6.0, 5.0, 0.0], NumberForm::Integer);
        assert_close(st.mean, 6.875);
        assert_close(st.median, 7.5);
        assert_close(st.std_dev.unwrap(), (76.875_f64 / 7.0).sqrt());
        assert_eq!(st.min, 0.0);
        assert_eq!(st.max, 10.0);

        let st = summary_stats(&[3.0, 1.0, 2.0], NumberForm::Integer);
        assert_close(st.median, 2.0);
        assert_close(st.std_dev.unwrap(), 1.0);
    }

    #[test]
    fn single_rating_has_no_sample_std_dev() {
        let st = summary_stats(&[8.0], NumberForm::Integer);
        assert_eq!(st.std_dev, None);
        assert_eq!(st.median, 8.0);
    }
}
