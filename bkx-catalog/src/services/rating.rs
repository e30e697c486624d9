//! Rating computation
//!
//! A non-empty histogram always wins over a provider summary; the two are
//! never mixed in one computation.

use crate::models::{round_one_decimal, Rating};
use crate::providers::RatingsRecord;
use std::collections::BTreeMap;

/// Vote counts for star values 1..=5
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct RatingHistogram {
    counts: [u64; 5],
}

impl RatingHistogram {
    /// Keys outside `"1"`..`"5"` are ignored
    fn from_counts(raw: &BTreeMap<String, u64>) -> Self {
        let mut counts = [0u64; 5];

        for (key, votes) in raw {
            match key.trim().parse::<usize>() {
                Ok(star @ 1..=5) => counts[star - 1] = counts[star - 1].saturating_add(*votes),
                _ => tracing::debug!(key = %key, "Ignoring non-star histogram key"),
            }
        }

        Self { counts }
    }

    // Widened so upstream counts near u64::MAX cannot overflow
    fn total(&self) -> u128 {
        self.counts.iter().map(|votes| u128::from(*votes)).sum()
    }

    fn weighted_sum(&self) -> u128 {
        self.counts
            .iter()
            .enumerate()
            .map(|(i, votes)| (i as u128 + 1) * u128::from(*votes))
            .sum()
    }
}

/// Compute the displayed rating from a ratings record.
///
/// 1. Histogram total > 0: weighted mean rounded to one decimal, count = total
/// 2. Otherwise a summary, if present: its average/count (0 when absent)
/// 3. Otherwise zero
pub fn compute_rating(record: &RatingsRecord) -> Rating {
    let histogram = record
        .counts
        .as_ref()
        .map(RatingHistogram::from_counts)
        .unwrap_or_default();

    let total = histogram.total();
    if total > 0 {
        return Rating {
            average: round_one_decimal(histogram.weighted_sum() as f64 / total as f64),
            count: u64::try_from(total).unwrap_or(u64::MAX),
        };
    }

    match &record.summary {
        Some(summary) => Rating {
            average: summary
                .average
                .filter(|avg| avg.is_finite() && *avg >= 0.0)
                .unwrap_or(0.0),
            count: summary.count.unwrap_or(0),
        },
        None => Rating::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::RatingsSummary;

    fn counts(pairs: &[(&str, u64)]) -> Option<BTreeMap<String, u64>> {
        Some(pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect())
    }

    #[test]
    fn test_histogram_wins_over_summary() {
        let record = RatingsRecord {
            counts: counts(&[("1", 0), ("2", 0), ("3", 0), ("4", 2), ("5", 2)]),
            summary: Some(RatingsSummary {
                average: Some(3.0),
                count: Some(10),
            }),
        };

        assert_eq!(compute_rating(&record), Rating { average: 4.5, count: 4 });
    }

    #[test]
    fn test_summary_used_when_histogram_empty() {
        let record = RatingsRecord {
            counts: counts(&[("1", 0), ("2", 0), ("3", 0), ("4", 0), ("5", 0)]),
            summary: Some(RatingsSummary {
                average: Some(4.2),
                count: Some(50),
            }),
        };

        assert_eq!(compute_rating(&record), Rating { average: 4.2, count: 50 });
    }

    #[test]
    fn test_zero_when_nothing_available() {
        let record = RatingsRecord {
            counts: counts(&[]),
            summary: None,
        };

        assert_eq!(compute_rating(&record), Rating { average: 0.0, count: 0 });
        assert_eq!(compute_rating(&RatingsRecord::default()), Rating::default());
    }

    #[test]
    fn test_summary_missing_fields_default_to_zero() {
        let record = RatingsRecord {
            counts: None,
            summary: Some(RatingsSummary {
                average: None,
                count: None,
            }),
        };

        assert_eq!(compute_rating(&record), Rating::default());
    }

    #[test]
    fn test_weighted_mean_rounds_to_one_decimal() {
        // (1*1 + 5*2) / 3 = 3.666…
        let record = RatingsRecord {
            counts: counts(&[("1", 1), ("5", 2)]),
            summary: None,
        };

        assert_eq!(compute_rating(&record), Rating { average: 3.7, count: 3 });
    }

    #[test]
    fn test_huge_counts_do_not_overflow() {
        let record = RatingsRecord {
            counts: counts(&[("4", 5_000_000_000_000_000_000), ("5", 5_000_000_000_000_000_000)]),
            summary: None,
        };

        assert_eq!(
            compute_rating(&record),
            Rating {
                average: 4.5,
                count: 10_000_000_000_000_000_000
            }
        );
    }

    #[test]
    fn test_total_beyond_u64_saturates_count() {
        let record = RatingsRecord {
            counts: counts(&[("1", u64::MAX), ("5", u64::MAX)]),
            summary: None,
        };

        assert_eq!(
            compute_rating(&record),
            Rating {
                average: 3.0,
                count: u64::MAX
            }
        );
    }

    #[test]
    fn test_non_star_keys_ignored() {
        let record = RatingsRecord {
            counts: counts(&[("0", 7), ("6", 3), ("total", 9), ("3", 2)]),
            summary: None,
        };

        assert_eq!(compute_rating(&record), Rating { average: 3.0, count: 2 });
    }
}
