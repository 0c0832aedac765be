use anyhow::bail;
use siterank::{
    aggregate,
    source::{JsonFile, ReviewSource, SiteReviews},
};
use std::path::PathBuf;
use structopt::StructOpt;

use crate::{common::site_id, run_impl_enum};

#[derive(StructOpt)]
pub struct Aggregate {
    /// JSON array of review rows to summarize, `-` for stdin
    #[structopt(parse(from_os_str), required_unless = "site", conflicts_with = "site")]
    file: Option<PathBuf>,
    /// Summarize this site's reviews (id or slug) from the backend instead
    #[structopt(long)]
    site: Option<String>,
}

run_impl_enum!(Aggregate, self, opts, ser, {
    let reviews = match (&self.file, &self.site) {
        (_, Some(site)) => {
            let backend = opts.backend()?;
            SiteReviews {
                backend: &backend,
                site_id: site_id(site)?,
            }
            .reviews()
            .await?
        }
        (Some(path), None) => JsonFile::new(path.clone()).reviews().await?,
        (None, None) => bail!("nothing to summarize: give a file of reviews or --site"),
    };

    erased_serde::serialize(&aggregate::summarize(&reviews), ser)?;
});

#[cfg(test)]
mod tests {
    use super::Aggregate;
    use crate::common::{BackendOptions, Run};
    use erased_serde::Serializer;
    use structopt::StructOpt;

    async fn run(args: &[&str]) -> anyhow::Result<serde_json::Value> {
        let cmd = Aggregate::from_iter_safe(args)?;
        let opts = BackendOptions {
            url: None,
            key: None,
        };
        let mut out = Vec::new();
        cmd.run(
            &opts,
            &mut <dyn Serializer>::erase(&mut serde_json::Serializer::new(&mut out)),
        )
        .await?;
        Ok(serde_json::from_slice(&out)?)
    }

    #[tokio::test]
    async fn test_aggregate_file() {
        let path = std::env::temp_dir().join(format!("siterank-cli-{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"[
                { "id": 1, "review_ratings": [{ "rating": 5 }, { "rating": 5 }, { "rating": 4 }] },
                { "id": 2, "review_ratings": [{ "rating": 3 }, { "rating": 5 }] }
            ]"#,
        )
        .unwrap();
        let summary = run(&["aggregate", path.to_str().unwrap()]).await;
        std::fs::remove_file(&path).unwrap();
        let summary = summary.unwrap();

        /* (14/3 + 4) / 2 = 4.333.. */
        assert_eq!(summary["review_count"], 2);
        assert_eq!(summary["average"], 4.3);
        assert_eq!(summary["stars"]["full"], 4);
        assert_eq!(summary["stars"]["empty"], 0);
        assert_eq!(summary["histogram"][0]["star"], 5);
        assert_eq!(summary["histogram"][0]["count"], 3);
        assert_eq!(summary["histogram"][0]["percentage"], 60);
    }

    #[tokio::test]
    async fn test_aggregate_site_needs_backend() {
        let err = run(&["aggregate", "--site", "lucky-casino-5"])
            .await
            .unwrap_err()
            .to_string();
        assert!(err.contains("SITERANK_URL"));
    }
}
