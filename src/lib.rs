// Review Sentiment - random review classification demo and event log receiver
// Library exports

pub mod app;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod logging;
pub mod receiver;
pub mod reviews;
