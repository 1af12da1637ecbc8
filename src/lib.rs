pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliArgs, Command};

pub use app::views::{department::DepartmentView, overview::OverviewView};
pub use config::cli::LocalStorage;
pub use config::toml_config::WarroomConfig;
pub use core::engine::ViewEngine;
pub use domain::model::KeywordRecord;
pub use utils::error::{Result, WarroomError};
