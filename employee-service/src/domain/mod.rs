pub mod aggregation;
pub mod client;
pub mod service;
