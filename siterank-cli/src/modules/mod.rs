pub mod aggregate;
pub mod board;
pub mod sites;
