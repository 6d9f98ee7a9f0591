pub mod config;
pub mod recommender;
