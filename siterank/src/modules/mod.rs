pub mod board;
pub mod criteria;
pub mod sites;
