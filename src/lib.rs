pub mod cli;
pub mod config;
pub mod logging;
pub mod mvi;
pub mod notify;
pub mod storage;
pub mod watchlist;
