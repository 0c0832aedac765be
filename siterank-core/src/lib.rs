pub mod aggregate;
pub mod schemas;
pub mod slug;

pub use chrono;
