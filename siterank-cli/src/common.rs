use anyhow::Context as _;
use async_trait::async_trait;
use erased_serde::Serializer;
use siterank::{common::Backend, slug::parse_site_id};
use structopt::StructOpt;

/// Where the hosted backend lives. Only commands that talk to it require these.
#[derive(StructOpt)]
pub struct BackendOptions {
    /// Base URL of the backend, e.g. https://xyz.supabase.co
    #[structopt(long, env = "SITERANK_URL")]
    pub url: Option<String>,
    /// Anonymous project key sent with every request
    #[structopt(long, env = "SITERANK_KEY", hide_env_values = true)]
    pub key: Option<String>,
}

impl BackendOptions {
    pub fn backend(&self) -> anyhow::Result<Backend> {
        let url = self
            .url
            .as_deref()
            .context("no backend url: pass --url or set SITERANK_URL")?;
        let key = self
            .key
            .as_deref()
            .context("no backend key: pass --key or set SITERANK_KEY")?;
        Backend::new(url, key)
    }
}

/// Accept either a bare site id (`5`) or a page slug (`lucky-casino-5`).
pub fn site_id(site: &str) -> anyhow::Result<u64> {
    site.trim()
        .parse::<u64>()
        .ok()
        .or_else(|| parse_site_id(site))
        .with_context(|| format!("{:?} is neither a site id nor a site slug", site))
}

#[async_trait]
pub trait Run {
    async fn run(
        &self,
        options: &BackendOptions,
        serializer: &mut (dyn Serializer + Send),
    ) -> anyhow::Result<()>;
}

#[macro_export]
macro_rules! run_impl_enum {
    ($i:ident, $self:ident, $opts:ident, $ser:ident, $b:block) => {
        #[async_trait::async_trait]
        impl $crate::common::Run for $i {
            async fn run(
                &$self,
                $opts: &$crate::common::BackendOptions,
                $ser: &mut (dyn erased_serde::Serializer + Send),
            ) -> anyhow::Result<()> {
                $b;

                Ok(())
            }
        }
    }
}

#[macro_export]
macro_rules! run_impl_struct {
    ($i:ident, $b:ident) => {
        #[async_trait::async_trait]
        impl $crate::common::Run for $i {
            async fn run(
                &self,
                options: &$crate::common::BackendOptions,
                serializer: &mut (dyn erased_serde::Serializer + Send),
            ) -> anyhow::Result<()> {
                $crate::common::Run::run(&self.$b, options, serializer).await
            }
        }
    };
}
