use anyhow::{bail, Context};
use maplit::btreemap;
use serde::de::DeserializeOwned;

/// Squash a multi-line column list into the single-line form the backend expects.
pub(crate) fn columns(select: &str) -> String {
    select.split_whitespace().collect()
}

/// A read-only handle on the hosted backend's REST interface.
///
/// Every request carries the project key twice, as `apikey` and as a bearer
/// token, which is what the anonymous role of the backend expects.
#[derive(Clone)]
pub struct Backend {
    client: reqwest::Client,
    base_url: String,
    key: String,
}

impl Backend {
    pub fn new<U: Into<String>, K: Into<String>>(base_url: U, key: K) -> anyhow::Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            bail!("backend url is empty");
        }
        let client = reqwest::Client::builder()
            .build()
            .context("could not build http client")?;
        Ok(Self {
            client,
            base_url,
            key: key.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch rows of `table`, optionally narrowed to the row with the given `id`.
    ///
    /// # Errors
    /// Errors if the request fails, the backend answers with a non-success
    /// status, or the rows do not decode into `T`.
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        select: &str,
        id: Option<u64>,
    ) -> anyhow::Result<Vec<T>> {
        let mut query = btreemap! {
            "select" => columns(select),
        };
        if let Some(id) = id {
            query.insert("id", format!("eq.{}", id));
        }

        let url = format!("{}/rest/v1/{}", self.base_url, table);
        tracing::debug!(%url, ?id, "querying backend");

        let res = self
            .client
            .get(url.as_str())
            .header("apikey", self.key.as_str())
            .bearer_auth(&self.key)
            .query(&query)
            .send()
            .await
            .with_context(|| format!("request for {} failed", table))?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            bail!("backend answered {} for {}: {}", status, table, body.trim());
        }

        let rows: Vec<T> = res
            .json()
            .await
            .with_context(|| format!("could not decode {} rows", table))?;
        tracing::debug!(table, rows = rows.len(), "backend answered");
        Ok(rows)
    }

    /// Like [`Backend::select`], for a single row by id. No row is `Ok(None)`.
    pub async fn select_one<T: DeserializeOwned>(
        &self,
        table: &str,
        select: &str,
        id: u64,
    ) -> anyhow::Result<Option<T>> {
        Ok(self.select(table, select, Some(id)).await?.into_iter().next())
    }
}
