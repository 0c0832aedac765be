use serde::Serialize;
use siterank_core::{
    aggregate::{self, AggregateResult, CriterionAverage, StarDisplay},
    schemas::site::Site,
};
use std::convert::TryFrom;

use crate::{
    common::Backend,
    modules::criteria::fetch_criteria,
    rows::{convert_lossy, RawSite},
};

const SITE_COLUMNS: &str = "
    id, name, logo, banner, url, description, affiliate_code, support,
    first_deposit_bonus, slot_comp, lost_amount_bonus, recommend, disapproval, created_at,
    site_games ( game_id, games ( id, name, icon ) ),
    reviews ( id, site_nickname, comment, created_at, review_ratings ( criteria_id, rating ) )
";

pub(crate) const SITE_REVIEW_COLUMNS: &str = "
    id,
    reviews ( id, site_nickname, comment, created_at, review_ratings ( criteria_id, rating ) )
";

pub async fn fetch_sites(backend: &Backend) -> anyhow::Result<Vec<Site>> {
    let rows: Vec<RawSite> = backend.select("sites", SITE_COLUMNS, None).await?;
    Ok(convert_lossy(rows, "site"))
}

/// Fetch one site with its games and reviews. `Ok(None)` if there is no such site.
pub async fn fetch_site(backend: &Backend, id: u64) -> anyhow::Result<Option<Site>> {
    let row: Option<RawSite> = backend.select_one("sites", SITE_COLUMNS, id).await?;
    row.map(Site::try_from).transpose()
}

/// One entry of the site listing.
#[derive(Serialize)]
pub struct SiteCard {
    pub id: u64,
    pub slug: String,
    pub name: String,
    pub logo: Option<String>,
    pub url: Option<String>,
    pub recommend: u32,
    pub disapproval: u32,
    pub summary: AggregateResult,
}

impl From<&Site> for SiteCard {
    fn from(site: &Site) -> Self {
        Self {
            id: site.id,
            slug: site.slug(),
            name: site.name.clone(),
            logo: site.logo.clone(),
            url: site.url.clone(),
            recommend: site.recommend,
            disapproval: site.disapproval,
            summary: aggregate::summarize(&site.reviews),
        }
    }
}

impl SiteCard {
    /// Every listed site, in the order the backend returns them.
    pub async fn list(backend: &Backend) -> anyhow::Result<Vec<Self>> {
        Ok(fetch_sites(backend).await?.iter().map(Self::from).collect())
    }
}

#[derive(Serialize)]
pub struct ReviewStars {
    pub review_id: Option<u64>,
    pub stars: StarDisplay,
}

/// A site's detail page: the site, its rating summary, per-criterion
/// averages and the stars shown next to each review.
#[derive(Serialize)]
pub struct SiteReport {
    pub slug: String,
    pub site: Site,
    pub summary: AggregateResult,
    pub criteria: Vec<CriterionAverage>,
    pub review_stars: Vec<ReviewStars>,
}

impl SiteReport {
    /// # Errors
    /// Errors if either the criteria or the site could not be loaded.
    pub async fn by_id(backend: &Backend, id: u64) -> anyhow::Result<Option<Self>> {
        let (criteria, site) = futures::try_join!(fetch_criteria(backend), fetch_site(backend, id))?;
        let site = match site {
            Some(site) => site,
            None => return Ok(None),
        };

        let review_stars = site
            .reviews
            .iter()
            .map(|review| ReviewStars {
                review_id: review.id,
                stars: aggregate::review_stars(review),
            })
            .collect();

        Ok(Some(Self {
            slug: site.slug(),
            summary: aggregate::summarize(&site.reviews),
            criteria: aggregate::criterion_averages(&site.reviews, &criteria),
            review_stars,
            site,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::{SiteCard, SiteReport};
    use crate::common::tests::backend;
    use wiremock::{
        matchers::{method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    async fn mount_criteria(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/rest/v1/review_criteria"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "id": 1, "name": "support" },
                { "id": 2, "name": "payout speed" }
            ])))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_site_cards() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/sites"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {
                    "id": 1,
                    "name": "Lucky Casino",
                    "recommend": 10,
                    "reviews": [
                        { "id": 1, "review_ratings": [{ "rating": 5 }, { "rating": 5 }] },
                        { "id": 2, "review_ratings": [{ "rating": 1 }] }
                    ]
                },
                { "id": 2, "name": "Quiet Bet", "reviews": [] },
                { "name": "broken" }
            ])))
            .mount(&server)
            .await;

        let cards = SiteCard::list(&backend(&server).await).await.unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].slug, "Lucky-Casino-1");
        assert_eq!(cards[0].summary.average, 3.0);
        assert_eq!(cards[0].summary.review_count, 2);
        assert_eq!(cards[0].recommend, 10);
        assert_eq!(cards[1].summary.average, 0.0);
        assert_eq!(cards[1].summary.stars.empty, 5);
    }

    #[tokio::test]
    async fn test_site_report() {
        let server = MockServer::start().await;
        mount_criteria(&server).await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/sites"))
            .and(query_param("id", "eq.5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
                "id": 5,
                "name": "Lucky Casino",
                "reviews": [
                    {
                        "id": 1,
                        "site_nickname": "a",
                        "review_ratings": [
                            { "criteria_id": 1, "rating": 5 },
                            { "criteria_id": 2, "rating": 4 }
                        ]
                    },
                    {
                        "id": 2,
                        "site_nickname": "b",
                        "review_ratings": [
                            { "criteria_id": 1, "rating": 3 },
                            { "criteria_id": 2, "rating": 3 }
                        ]
                    }
                ]
            }])))
            .mount(&server)
            .await;

        let report = SiteReport::by_id(&backend(&server).await, 5)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(report.slug, "Lucky-Casino-5");
        /* (4.5 + 3) / 2 */
        assert_eq!(report.summary.average, 3.8);
        assert_eq!(report.summary.stars.full, 3);
        assert_eq!(report.summary.stars.empty, 1);
        let histogram: Vec<_> = report.summary.histogram.iter().map(|b| b.count).collect();
        assert_eq!(histogram, vec![1, 1, 2, 0, 0]);
        assert_eq!(
            report
                .criteria
                .iter()
                .map(|c| (c.name.as_str(), c.average))
                .collect::<Vec<_>>(),
            vec![("support", 4.0), ("payout speed", 3.5)]
        );
        assert_eq!(report.review_stars.len(), 2);
        assert_eq!(report.review_stars[0].stars.full, 4);
        assert_eq!(report.review_stars[1].stars.full, 3);
        assert!(!report.review_stars[1].stars.has_partial());
    }

    #[tokio::test]
    async fn test_site_report_missing() {
        let server = MockServer::start().await;
        mount_criteria(&server).await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/sites"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let report = SiteReport::by_id(&backend(&server).await, 99).await.unwrap();
        assert!(report.is_none());
    }
}
