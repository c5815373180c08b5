// Exhibition Guide Bot - Core
//
// Answers LINE text messages with matching exhibitions from the crawled
// dataset. The dataset is loaded once at startup and searched in memory.

pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
