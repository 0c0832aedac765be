use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::schemas::review::Review;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Game {
    pub id: u64,
    pub name: String,
    pub icon: Option<String>,
}

/// A listed site, with its promotional details and every review left on it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Site {
    pub id: u64,
    pub name: String,
    pub logo: Option<String>,
    pub banner: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub affiliate_code: Option<String>,
    pub support: Option<String>,
    pub first_deposit_bonus: Option<String>,
    pub slot_comp: Option<String>,
    pub lost_amount_bonus: Option<String>,
    pub recommend: u32,
    pub disapproval: u32,
    pub created_at: Option<DateTime<Utc>>,
    pub games: Vec<Game>,
    pub reviews: Vec<Review>,
}

impl Site {
    pub fn slug(&self) -> String {
        crate::slug::site_slug(&self.name, self.id)
    }
}
