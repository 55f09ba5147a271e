pub mod classifier;
pub mod config;
pub mod detect;
pub mod domain;
pub mod error;
pub mod forge;
pub mod formatter;
pub mod preview;
pub mod ui;
pub mod warning;

pub use error::{ChangelogError, Result};
