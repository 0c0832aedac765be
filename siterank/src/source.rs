use anyhow::{anyhow, Context};
use async_trait::async_trait;
use siterank_core::schemas::review::Review;
use std::path::PathBuf;
use tokio::io::AsyncReadExt;

use crate::{
    common::Backend,
    modules::sites::SITE_REVIEW_COLUMNS,
    rows::{reviews_from_rows, RawReview, RawSite},
};

/// Somewhere a list of reviews can be loaded from, ready for aggregation.
#[async_trait]
pub trait ReviewSource {
    async fn reviews(&self) -> anyhow::Result<Vec<Review>>;
}

/// The reviews left on one site, read from the backend.
pub struct SiteReviews<'a> {
    pub backend: &'a Backend,
    pub site_id: u64,
}

#[async_trait]
impl<'a> ReviewSource for SiteReviews<'a> {
    async fn reviews(&self) -> anyhow::Result<Vec<Review>> {
        let row: RawSite = self
            .backend
            .select_one("sites", SITE_REVIEW_COLUMNS, self.site_id)
            .await?
            .ok_or_else(|| anyhow!("no site with id {}", self.site_id))?;
        Ok(reviews_from_rows(row.reviews.unwrap_or_default()))
    }
}

/// A JSON array of review rows, shaped like the backend's embedded `reviews`.
/// A path of `-` reads standard input.
pub struct JsonFile {
    pub path: PathBuf,
}

impl JsonFile {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    fn is_stdin(&self) -> bool {
        self.path.as_os_str() == "-"
    }
}

#[async_trait]
impl ReviewSource for JsonFile {
    async fn reviews(&self) -> anyhow::Result<Vec<Review>> {
        let bytes = if self.is_stdin() {
            let mut buf = Vec::new();
            tokio::io::stdin()
                .read_to_end(&mut buf)
                .await
                .context("could not read reviews from stdin")?;
            buf
        } else {
            tokio::fs::read(&self.path)
                .await
                .with_context(|| format!("could not read {}", self.path.display()))?
        };

        let rows: Vec<RawReview> = serde_json::from_slice(&bytes)
            .with_context(|| format!("{} is not a JSON array of reviews", self.path.display()))?;
        tracing::debug!(rows = rows.len(), path = %self.path.display(), "read review rows");
        Ok(reviews_from_rows(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::{JsonFile, ReviewSource, SiteReviews};
    use crate::common::tests::backend;
    use std::path::PathBuf;
    use wiremock::{
        matchers::{method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "siterank-{}-{}.json",
            name,
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[tokio::test]
    async fn test_json_file() {
        let path = temp_file(
            "reviews",
            r#"[
                { "id": 1, "review_ratings": [{ "rating": 5 }, { "rating": 5 }] },
                { "id": 2, "review_ratings": [{ "rating": "1" }] },
                { "comment": "no id" }
            ]"#,
        );
        let reviews = JsonFile::new(&path).reviews().await.unwrap();
        std::fs::remove_file(&path).unwrap();

        /* the id-less review has no ratings and counts as a zero */
        assert_eq!(reviews.len(), 3);
        assert_eq!(siterank_core::aggregate::overall_average(&reviews), 2.0);
    }

    #[tokio::test]
    async fn test_json_file_errors() {
        assert!(JsonFile::new("/nonexistent/siterank/reviews.json")
            .reviews()
            .await
            .is_err());

        let path = temp_file("not-an-array", r#"{ "id": 1 }"#);
        let result = JsonFile::new(&path).reviews().await;
        std::fs::remove_file(&path).unwrap();
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_site_reviews() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/sites"))
            .and(query_param("id", "eq.3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
                "id": 3,
                "reviews": [
                    { "id": 1, "review_ratings": [{ "criteria_id": 1, "rating": 4 }] },
                    { "id": 2, "review_ratings": null }
                ]
            }])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/sites"))
            .and(query_param("id", "eq.4"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let backend = backend(&server).await;
        let reviews = SiteReviews {
            backend: &backend,
            site_id: 3,
        }
        .reviews()
        .await
        .unwrap();
        assert_eq!(reviews.len(), 2);
        assert!(reviews[1].ratings.is_empty());

        let missing = SiteReviews {
            backend: &backend,
            site_id: 4,
        }
        .reviews()
        .await;
        assert!(missing.unwrap_err().to_string().contains("no site with id 4"));
    }
}
