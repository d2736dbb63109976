pub mod cache;
pub mod client;
pub mod records;
pub mod worker;
