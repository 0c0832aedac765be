pub mod board;
pub mod review;
pub mod site;
