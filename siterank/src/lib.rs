pub mod common;
pub mod modules;
pub mod rows;
pub mod source;

pub use siterank_core::{aggregate, chrono, schemas, slug};
