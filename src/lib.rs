pub mod client;
pub mod config;
pub mod domain;
pub mod execution;
pub mod logging;
pub mod wallet;
pub mod worker;
