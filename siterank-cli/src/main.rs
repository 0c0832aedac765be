pub(crate) mod common;
mod modules;
mod options;

use std::io::stdout;

use erased_serde::Serializer;
use structopt::StructOpt;
use tracing_subscriber::EnvFilter;

use crate::{common::Run, options::Options};

async fn run(opt: &Options) -> anyhow::Result<()> {
    if opt.compact {
        opt.command
            .run(
                &opt.backend,
                &mut <dyn Serializer>::erase(&mut serde_json::Serializer::new(stdout())),
            )
            .await?;
    } else {
        opt.command
            .run(
                &opt.backend,
                &mut <dyn Serializer>::erase(&mut serde_json::Serializer::pretty(stdout())),
            )
            .await?;
    }

    println!();
    Ok(())
}

#[tokio::main]
async fn main() {
    /* logs go to stderr, stdout carries only the JSON */
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let opt = Options::from_args();

    if let Err(e) = run(&opt).await {
        tracing::error!("{:#}", e);
        std::process::exit(1);
    }
}
