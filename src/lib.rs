pub mod aggregator;
pub mod config;
pub mod explorer;
pub mod fetcher;
pub mod portfolio;
pub mod report;
pub mod retry;
pub mod summary;
pub mod token;
pub mod utils;
pub mod wallets;
