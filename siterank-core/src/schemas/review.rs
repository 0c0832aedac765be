use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single per-criterion score a user gave inside a [`Review`].
///
/// Scores are meant to be whole stars from 1 to 5, but the value is kept as
/// it came from the backend. Out-of-range values are handled by the aggregator.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ReviewRating {
    pub criterion_id: Option<u64>,
    pub rating: f64,
}

impl ReviewRating {
    pub fn new(rating: f64) -> Self {
        Self {
            criterion_id: None,
            rating,
        }
    }

    pub fn for_criterion(criterion_id: u64, rating: f64) -> Self {
        Self {
            criterion_id: Some(criterion_id),
            rating,
        }
    }
}

/// A user-submitted review of a site: free text plus zero or more ratings.
///
/// `id` is `None` for rows the backend sent without one; they still count.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Review {
    pub id: Option<u64>,
    pub nickname: String,
    pub comment: String,
    pub created_at: Option<DateTime<Utc>>,
    pub ratings: Vec<ReviewRating>,
}

impl Review {
    /// A review carrying only rating values, with no criteria attached.
    pub fn with_ratings<I: IntoIterator<Item = f64>>(id: u64, ratings: I) -> Self {
        Self {
            id: Some(id),
            nickname: String::new(),
            comment: String::new(),
            created_at: None,
            ratings: ratings.into_iter().map(ReviewRating::new).collect(),
        }
    }
}

/// A named axis reviews are rated on, e.g. "support" or "payout speed".
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ReviewCriterion {
    pub id: u64,
    pub name: String,
}
