pub mod config;
pub mod error;
pub mod package;
pub mod publisher;

pub mod kafka;

pub use config::Config;
pub use error::{Error, Result};
pub use package::{Package, StatusCode};
pub use publisher::{run, Publisher, RunSummary};
