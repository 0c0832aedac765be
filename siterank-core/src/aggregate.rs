//! Star-rating aggregation over a site's reviews.
//!
//! Every view of a site (the list cards, the detail page, each review in the
//! review list) derives its numbers from the functions here, so they always agree.

use serde::{Deserialize, Serialize};

use crate::schemas::review::{Review, ReviewCriterion};

/// Number of stars on the display scale.
pub const MAX_STARS: u8 = 5;

/// How a numeric average is drawn on the 5-star scale.
///
/// `partial` is the filled fraction of the one star drawn between the full and
/// the empty ones; `0.0` means no partial star is drawn.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct StarDisplay {
    pub full: u8,
    pub partial: f64,
    pub empty: u8,
}

impl StarDisplay {
    pub fn has_partial(&self) -> bool {
        self.partial > 0.0
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct HistogramBucket {
    pub star: u8,
    pub count: u32,
    pub percentage: u32,
}

/// Everything a page needs to draw a site's rating summary.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AggregateResult {
    pub review_count: usize,
    pub average: f64,
    pub stars: StarDisplay,
    pub histogram: [HistogramBucket; MAX_STARS as usize],
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CriterionAverage {
    pub criterion_id: u64,
    pub name: String,
    pub average: f64,
    pub count: usize,
}

/// Unrounded mean of one review's ratings, or `0.0` if it has none.
pub fn review_average(review: &Review) -> f64 {
    if review.ratings.is_empty() {
        return 0.0;
    }
    let total: f64 = review.ratings.iter().map(|r| r.rating).sum();
    total / review.ratings.len() as f64
}

/// Unrounded mean of the per-review averages, or `0.0` with no reviews.
///
/// Each review weighs the same no matter how many criteria it rated, and a
/// review without ratings pulls the mean down as a `0.0`.
pub fn overall_mean(reviews: &[Review]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }
    let total: f64 = reviews.iter().map(review_average).sum();
    total / reviews.len() as f64
}

/// [`overall_mean`] rounded with [`round_to_tenth`], as the number is displayed.
pub fn overall_average(reviews: &[Review]) -> f64 {
    round_to_tenth(overall_mean(reviews))
}

/// Round to one decimal place the way a decimal string is rounded.
///
/// The decision is taken on the exact binary value: `2.15` is stored slightly
/// below `2.15` and becomes `2.1`, `4.95` is stored slightly above and becomes
/// `5.0`. Exact ties (`4.25`) go away from zero.
pub fn round_to_tenth(value: f64) -> f64 {
    /* past this, an f64 carries no tenths worth rounding */
    if !value.is_finite() || value.abs() >= 1e15 {
        return value;
    }

    let exact = format!("{:.40}", value.abs());
    let mut parts = exact.splitn(2, '.');
    let whole = parts
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0);
    let mut fraction = parts.next().unwrap_or("").chars().filter_map(|c| c.to_digit(10));
    let tenths = u64::from(fraction.next().unwrap_or(0));
    let round_up = fraction.next().map_or(false, |d| d >= 5);

    let scaled = whole * 10 + tenths + u64::from(round_up);
    (scaled as f64 / 10.0).copysign(value)
}

/// Split an average into full, partial and empty stars.
///
/// The average is clamped into `0..=5` first (NaN counts as `0`), so
/// `full + has_partial + empty` is always exactly [`MAX_STARS`].
pub fn quantize_stars(average: f64) -> StarDisplay {
    let average = if average.is_nan() {
        0.0
    } else {
        average.clamp(0.0, f64::from(MAX_STARS))
    };

    let full = average.floor() as u8;
    let partial = average % 1.0;
    let empty = MAX_STARS - full - if partial > 0.0 { 1 } else { 0 };

    StarDisplay {
        full,
        partial,
        empty,
    }
}

/// Stars drawn next to a single review in the review list.
pub fn review_stars(review: &Review) -> StarDisplay {
    quantize_stars(round_to_tenth(review_average(review)))
}

/// Count ratings per star value, 5 stars first.
///
/// Ratings are rounded to the nearest whole star; anything that does not land
/// on 1..=5 is left out of the histogram (it still counts in [`review_average`]).
pub fn build_histogram(reviews: &[Review]) -> [HistogramBucket; MAX_STARS as usize] {
    let mut counts = [0u32; MAX_STARS as usize];
    for rating in reviews.iter().flat_map(|review| review.ratings.iter()) {
        let star = rating.rating.round();
        if (1.0..=f64::from(MAX_STARS)).contains(&star) {
            counts[star as usize - 1] += 1;
        }
    }

    let total: u32 = counts.iter().sum();
    let mut buckets = [HistogramBucket::default(); MAX_STARS as usize];
    for (bucket, star) in buckets.iter_mut().zip((1..=MAX_STARS).rev()) {
        let count = counts[usize::from(star) - 1];
        let percentage = if total > 0 {
            (f64::from(count) / f64::from(total) * 100.0).round() as u32
        } else {
            0
        };
        *bucket = HistogramBucket {
            star,
            count,
            percentage,
        };
    }
    buckets
}

/// The rating summary of a site. Only the displayed `average` is rounded;
/// the stars are drawn from the unrounded mean.
pub fn summarize(reviews: &[Review]) -> AggregateResult {
    let mean = overall_mean(reviews);
    AggregateResult {
        review_count: reviews.len(),
        average: round_to_tenth(mean),
        stars: quantize_stars(mean),
        histogram: build_histogram(reviews),
    }
}

/// Mean rating per criterion, in the order `criteria` is given.
///
/// Ratings without a criterion, or for a criterion not in `criteria`, are skipped.
pub fn criterion_averages(
    reviews: &[Review],
    criteria: &[ReviewCriterion],
) -> Vec<CriterionAverage> {
    criteria
        .iter()
        .map(|criterion| {
            let (total, count) = reviews
                .iter()
                .flat_map(|review| review.ratings.iter())
                .filter(|rating| rating.criterion_id == Some(criterion.id))
                .fold((0.0, 0usize), |(total, count), rating| {
                    (total + rating.rating, count + 1)
                });
            let average = if count > 0 {
                round_to_tenth(total / count as f64)
            } else {
                0.0
            };
            CriterionAverage {
                criterion_id: criterion.id,
                name: criterion.name.clone(),
                average,
                count,
            }
        })
        .collect()
}
