use crate::{
    common::{BackendOptions, Run},
    modules::{aggregate::Aggregate, board::Board, sites::Sites},
    run_impl_enum,
};
use clap::AppSettings;
use structopt::StructOpt;

#[derive(StructOpt)]
#[structopt(
    name = "siterank-cli",
    global_settings = &[AppSettings::ColoredHelp, AppSettings::VersionlessSubcommands]
)]
pub struct Options {
    #[structopt(flatten)]
    pub backend: BackendOptions,
    /// Print JSON on a single line instead of pretty-printing it
    #[structopt(long)]
    pub compact: bool,
    #[structopt(subcommand)]
    pub command: Command,
}

#[derive(StructOpt)]
pub enum Command {
    /// Listed sites and their review summaries
    Sites(Sites),
    /// The community board
    Board(Board),
    /// Summarize a list of reviews
    Aggregate(Aggregate),
}

run_impl_enum!(Command, self, opts, ser, {
    match self {
        Self::Sites(s) => s.run(opts, ser).await?,
        Self::Board(b) => b.run(opts, ser).await?,
        Self::Aggregate(a) => a.run(opts, ser).await?,
    }
});
