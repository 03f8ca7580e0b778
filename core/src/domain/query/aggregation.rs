use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Share of matched reviews, in percent, per floored rating.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct RatingDistribution {
    pub one: f64,
    pub two: f64,
    pub three: f64,
    pub four: f64,
    pub five: f64,
}

impl RatingDistribution {
    /// Ratings outside 1..=5 count toward the total but fall in no bucket.
    /// An empty set yields all zeros.
    pub fn from_ratings<I>(ratings: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut buckets = [0u64; 5];
        let mut total = 0u64;

        for rating in ratings {
            total += 1;
            let floored = rating.floor();
            if (1.0..=5.0).contains(&floored) {
                buckets[floored as usize - 1] += 1;
            }
        }

        if total == 0 {
            return Self::default();
        }

        let percent = |count: u64| (count as f64 / total as f64) * 100.0;
        Self {
            one: percent(buckets[0]),
            two: percent(buckets[1]),
            three: percent(buckets[2]),
            four: percent(buckets[3]),
            five: percent(buckets[4]),
        }
    }

    pub fn sum(&self) -> f64 {
        self.one + self.two + self.three + self.four + self.five
    }
}
