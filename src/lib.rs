pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::{run_check, CiReporter, DesktopReporter};
pub use core::engine::FineCheckEngine;
pub use domain::ports::RunStatus;
pub use utils::error::{FineCheckError, Result};
