//! Rows as the backend sends them, and their conversion into the typed schemas.
//!
//! The backend is schemaless as far as the compiler knows: numbers sometimes
//! arrive as strings, nested collections can be `null`, and an embedded
//! relation may be a single object or a list. Everything is loosened here and
//! checked once in the `TryFrom` impls, so the aggregator only sees clean data.

use anyhow::{anyhow, Context};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use serde_with::{serde_as, DefaultOnError, DisplayFromStr, PickFirst};
use siterank_core::schemas::{
    board::{Article, Category},
    review::{Review, ReviewCriterion, ReviewRating},
    site::{Game, Site},
};
use std::convert::{TryFrom, TryInto};

/// Ids of board rows may be integers or uuids; both end up as strings.
fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Convert every row, dropping (and logging) the ones that fail.
pub(crate) fn convert_lossy<R, T>(rows: Vec<R>, what: &'static str) -> Vec<T>
where
    R: TryInto<T, Error = anyhow::Error>,
{
    rows.into_iter()
        .filter_map(|row| match row.try_into() {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!(error = %e, "dropping {} row", what);
                None
            }
        })
        .collect()
}

#[serde_as]
#[derive(Deserialize)]
pub struct RawRating {
    #[serde(default)]
    #[serde_as(as = "DefaultOnError<PickFirst<(_, Option<DisplayFromStr>)>>")]
    pub criteria_id: Option<u64>,
    #[serde(default)]
    #[serde_as(as = "DefaultOnError<PickFirst<(_, Option<DisplayFromStr>)>>")]
    pub rating: Option<f64>,
}

impl TryFrom<RawRating> for ReviewRating {
    type Error = anyhow::Error;
    fn try_from(raw: RawRating) -> anyhow::Result<Self> {
        let rating = raw
            .rating
            .filter(|r| r.is_finite())
            .ok_or_else(|| anyhow!("rating is missing or not a number"))?;
        Ok(Self {
            criterion_id: raw.criteria_id,
            rating,
        })
    }
}

#[serde_as]
#[derive(Deserialize)]
pub struct RawReview {
    #[serde(default)]
    #[serde_as(as = "DefaultOnError<PickFirst<(_, Option<DisplayFromStr>)>>")]
    pub id: Option<u64>,
    #[serde(default)]
    pub site_nickname: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    #[serde_as(as = "DefaultOnError<_>")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub review_ratings: Option<Vec<RawRating>>,
}

impl TryFrom<RawReview> for Review {
    type Error = anyhow::Error;
    fn try_from(raw: RawReview) -> anyhow::Result<Self> {
        Ok(Self {
            id: raw.id,
            nickname: raw.site_nickname.unwrap_or_default(),
            comment: raw.comment.unwrap_or_default(),
            created_at: raw.created_at,
            ratings: convert_lossy(raw.review_ratings.unwrap_or_default(), "review rating"),
        })
    }
}

/// Reviews from a list of rows. Every row counts, with or without an id.
pub fn reviews_from_rows(rows: Vec<RawReview>) -> Vec<Review> {
    convert_lossy(rows, "review")
}

#[serde_as]
#[derive(Deserialize)]
pub struct RawGame {
    #[serde(default)]
    #[serde_as(as = "DefaultOnError<PickFirst<(_, Option<DisplayFromStr>)>>")]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

impl TryFrom<RawGame> for Game {
    type Error = anyhow::Error;
    fn try_from(raw: RawGame) -> anyhow::Result<Self> {
        Ok(Self {
            id: raw.id.context("game has no id")?,
            name: raw.name.unwrap_or_default(),
            icon: raw.icon,
        })
    }
}

/// An embedded `games` relation: one object, or a list of them.
///
/// The list is tried first, since a struct also deserializes from a sequence.
#[derive(Deserialize)]
#[serde(untagged)]
pub enum RawGames {
    Many(Vec<RawGame>),
    One(RawGame),
}

impl From<RawGames> for Vec<RawGame> {
    fn from(games: RawGames) -> Self {
        match games {
            RawGames::Many(games) => games,
            RawGames::One(game) => vec![game],
        }
    }
}

#[derive(Deserialize)]
pub struct RawSiteGame {
    #[serde(default)]
    pub games: Option<RawGames>,
}

#[serde_as]
#[derive(Deserialize)]
pub struct RawSite {
    #[serde(default)]
    #[serde_as(as = "DefaultOnError<PickFirst<(_, Option<DisplayFromStr>)>>")]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub banner: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub affiliate_code: Option<String>,
    #[serde(default)]
    pub support: Option<String>,
    #[serde(default)]
    pub first_deposit_bonus: Option<String>,
    #[serde(default)]
    pub slot_comp: Option<String>,
    #[serde(default)]
    pub lost_amount_bonus: Option<String>,
    #[serde(default)]
    #[serde_as(as = "DefaultOnError<PickFirst<(_, Option<DisplayFromStr>)>>")]
    pub recommend: Option<u32>,
    #[serde(default)]
    #[serde_as(as = "DefaultOnError<PickFirst<(_, Option<DisplayFromStr>)>>")]
    pub disapproval: Option<u32>,
    #[serde(default)]
    #[serde_as(as = "DefaultOnError<_>")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub site_games: Option<Vec<RawSiteGame>>,
    #[serde(default)]
    pub reviews: Option<Vec<RawReview>>,
}

impl TryFrom<RawSite> for Site {
    type Error = anyhow::Error;
    fn try_from(raw: RawSite) -> anyhow::Result<Self> {
        let id = raw.id.context("site has no id")?;
        let games = raw
            .site_games
            .unwrap_or_default()
            .into_iter()
            .flat_map(|site_game| site_game.games.map(Vec::from).unwrap_or_default())
            .collect::<Vec<_>>();

        Ok(Self {
            id,
            name: raw.name.unwrap_or_default(),
            logo: raw.logo,
            banner: raw.banner,
            url: raw.url,
            description: raw.description,
            affiliate_code: raw.affiliate_code,
            support: raw.support,
            first_deposit_bonus: raw.first_deposit_bonus,
            slot_comp: raw.slot_comp,
            lost_amount_bonus: raw.lost_amount_bonus,
            recommend: raw.recommend.unwrap_or(0),
            disapproval: raw.disapproval.unwrap_or(0),
            created_at: raw.created_at,
            games: convert_lossy(games, "game"),
            reviews: reviews_from_rows(raw.reviews.unwrap_or_default()),
        })
    }
}

#[serde_as]
#[derive(Deserialize)]
pub struct RawCriterion {
    #[serde(default)]
    #[serde_as(as = "DefaultOnError<PickFirst<(_, Option<DisplayFromStr>)>>")]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
}

impl TryFrom<RawCriterion> for ReviewCriterion {
    type Error = anyhow::Error;
    fn try_from(raw: RawCriterion) -> anyhow::Result<Self> {
        Ok(Self {
            id: raw.id.context("review criterion has no id")?,
            name: raw.name.unwrap_or_default(),
        })
    }
}

#[derive(Deserialize)]
pub struct RawCategory {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub name: Option<String>,
}

impl TryFrom<RawCategory> for Category {
    type Error = anyhow::Error;
    fn try_from(raw: RawCategory) -> anyhow::Result<Self> {
        Ok(Self {
            id: id_string(&raw.id).context("category has no id")?,
            name: raw.name.unwrap_or_default(),
        })
    }
}

#[serde_as]
#[derive(Deserialize)]
pub struct RawArticle {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub category_id: Value,
    #[serde(default)]
    #[serde_as(as = "DefaultOnError<_>")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    #[serde_as(as = "DefaultOnError<_>")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub category: Option<RawCategory>,
}

impl TryFrom<RawArticle> for Article {
    type Error = anyhow::Error;
    fn try_from(raw: RawArticle) -> anyhow::Result<Self> {
        Ok(Self {
            id: id_string(&raw.id).context("article has no id")?,
            title: raw.title.unwrap_or_default(),
            content: raw.content.unwrap_or_default(),
            category_id: id_string(&raw.category_id),
            created_at: raw.created_at,
            updated_at: raw.updated_at,
            /* a dangling category is the same as none */
            category: raw.category.and_then(|c| c.try_into().ok()),
        })
    }
}
