use siterank_core::schemas::review::ReviewCriterion;

use crate::{
    common::Backend,
    rows::{convert_lossy, RawCriterion},
};

const CRITERIA_COLUMNS: &str = "id, name";

/// Every axis a review can be rated on.
pub async fn fetch_criteria(backend: &Backend) -> anyhow::Result<Vec<ReviewCriterion>> {
    let rows: Vec<RawCriterion> = backend
        .select("review_criteria", CRITERIA_COLUMNS, None)
        .await?;
    Ok(convert_lossy(rows, "review criterion"))
}
