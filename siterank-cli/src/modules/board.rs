use structopt::StructOpt;

use crate::{run_impl_enum, run_impl_struct};

#[derive(StructOpt)]
pub struct Board {
    #[structopt(subcommand)]
    query: Query,
}

run_impl_struct!(Board, query);

#[derive(StructOpt)]
enum Query {
    /// Categories and articles, optionally only one category's articles
    List {
        #[structopt(long)]
        category: Option<String>,
    },
}

run_impl_enum!(Query, self, opts, ser, {
    match self {
        Self::List { category } => {
            let backend = opts.backend()?;
            erased_serde::serialize(
                &siterank::modules::board::fetch_board(&backend, category.as_deref()).await?,
                ser,
            )?;
        }
    }
});
