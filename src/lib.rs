pub mod cli;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod git;
pub mod output;
pub mod ui;

pub use error::{DecisionError, ReleaseError, Result};
