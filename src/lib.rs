pub mod args;
pub mod config;
pub mod error;
pub mod format;
pub mod locator;
pub mod metadata;
pub mod probe;
pub mod processor;
pub mod progress;
pub mod report;
