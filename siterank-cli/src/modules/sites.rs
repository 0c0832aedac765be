use anyhow::Context;
use structopt::StructOpt;

use crate::{run_impl_enum, run_impl_struct};

#[derive(StructOpt)]
pub struct Sites {
    #[structopt(subcommand)]
    query: Query,
}

run_impl_struct!(Sites, query);

#[derive(StructOpt)]
enum Query {
    /// Every site with its rating summary
    List,
    /// One site's page, by id or slug (e.g. `lucky-casino-5`)
    Show { site: String },
}

run_impl_enum!(Query, self, opts, ser, {
    match self {
        Self::List => {
            let backend = opts.backend()?;
            erased_serde::serialize(
                &siterank::modules::sites::SiteCard::list(&backend).await?,
                ser,
            )?;
        }
        Self::Show { site } => {
            let id = crate::common::site_id(site)?;
            let backend = opts.backend()?;
            let report = siterank::modules::sites::SiteReport::by_id(&backend, id)
                .await?
                .with_context(|| format!("no site with id {}", id))?;
            erased_serde::serialize(&report, ser)?;
        }
    }
});
