pub mod config;
pub mod logging;

pub mod archive;
pub mod catalog;
pub mod fetch;
pub mod progress;
pub mod relay;
pub mod resolver;
pub mod transfer;
