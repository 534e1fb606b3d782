//! # ContourCAM Core
//!
//! Configuration tree, per-path settings and error types shared by the
//! geometry and toolpath crates.

pub mod config;
pub mod config_dump;
pub mod error;
pub mod settings;

pub use config::{
    Config, DxfImportSettings, GcodeProfile, ImportSettings, Profile, Tool, ToolGeneral,
    DEFAULT_ENTRY,
};
pub use error::{ConfigError, ConfigResult};
pub use settings::PathSettings;
