//! Configuration tree for ContourCAM.
//!
//! Provides the tool, profile and import settings consumed by the toolpath
//! pipeline, with JSON and TOML file handling.
//!
//! The tree is organized as:
//! - `tools`: named cutting tools (radius, depth per cut, retract height)
//! - `profiles`: named machine profiles (G-code templates, default path settings)
//! - `import`: geometry cleanup tolerances applied to imported contours
//!
//! Nothing in the pipeline reads configuration from ambient state; callers
//! pick a tool and a profile and hand them to the exporter explicitly.

use crate::error::{ConfigError, ConfigResult};
use crate::settings::PathSettings;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Name of the entry created when a list is missing from the file.
pub const DEFAULT_ENTRY: &str = "default";

/// General cutting parameters of a tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolGeneral {
    /// Tool radius (mm), used by cutter compensation
    pub radius: f64,
    /// Maximum material depth removed in one pass (mm)
    pub depth_per_cut: f64,
    /// Height the tool retracts to between cuts (mm)
    pub retract_depth: f64,
}

impl Default for ToolGeneral {
    fn default() -> Self {
        Self {
            radius: 1.5,
            depth_per_cut: 1.0,
            retract_depth: 5.0,
        }
    }
}

/// A cutting tool.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tool {
    pub general: ToolGeneral,
}

/// The fixed G-code profile: program framing and cut actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GcodeProfile {
    /// Lines written before the first motion
    pub header: Vec<String>,
    /// Lines written after the last motion
    pub footer: Vec<String>,
    /// Command issued before cutting a polyline; `{intensity}` is substituted
    pub pre_cut: String,
    /// Command issued after cutting a polyline
    pub post_cut: String,
    /// Number of decimals for coordinates
    pub precision: usize,
}

impl Default for GcodeProfile {
    fn default() -> Self {
        Self {
            header: vec!["G90".to_string(), "G21".to_string(), "G17".to_string()],
            footer: vec!["M30".to_string()],
            pre_cut: "M3 S{intensity}".to_string(),
            post_cut: "M5".to_string(),
            precision: 3,
        }
    }
}

/// A machine profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub gcode: GcodeProfile,
    /// Settings given to newly created paths
    pub default_path: PathSettings,
}

/// Cleanup tolerances applied to imported DXF geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DxfImportSettings {
    /// Maximum gap between end points merged into one contour (mm)
    pub assemble_tolerance: f64,
    /// Polylines shorter than this are dropped (mm)
    pub minimum_polyline_length: f64,
    /// Arcs shorter than this are replaced by lines (mm)
    pub minimum_arc_length: f64,
}

impl Default for DxfImportSettings {
    fn default() -> Self {
        Self {
            assemble_tolerance: 0.001,
            minimum_polyline_length: 0.0,
            minimum_arc_length: 0.0,
        }
    }
}

/// Import settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportSettings {
    pub dxf: DxfImportSettings,
}

/// Root of the configuration tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tools: BTreeMap<String, Tool>,
    pub profiles: BTreeMap<String, Profile>,
    pub import: ImportSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tools: BTreeMap::from([(DEFAULT_ENTRY.to_string(), Tool::default())]),
            profiles: BTreeMap::from([(DEFAULT_ENTRY.to_string(), Profile::default())]),
            import: ImportSettings::default(),
        }
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let mut config: Self = match Self::format_of(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.ensure_default_entries();
        config.validate()?;
        tracing::debug!(
            path = %path.display(),
            tools = config.tools.len(),
            profiles = config.profiles.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> ConfigResult<()> {
        self.validate()?;

        let content = match Self::format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content)
            .map_err(|e| ConfigError::SaveError(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }

    fn format_of(path: &Path) -> ConfigResult<Format> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }

    /// Lists left empty by a file get one default entry each.
    fn ensure_default_entries(&mut self) {
        if self.tools.is_empty() {
            self.tools.insert(DEFAULT_ENTRY.to_string(), Tool::default());
        }
        if self.profiles.is_empty() {
            self.profiles
                .insert(DEFAULT_ENTRY.to_string(), Profile::default());
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        for (name, tool) in &self.tools {
            let general = &tool.general;
            if !(general.depth_per_cut.is_finite() && general.depth_per_cut > 0.0) {
                return Err(ConfigError::invalid(
                    format!("tools.{name}.general.depth_per_cut"),
                    "must be > 0",
                ));
            }
            if !(general.radius.is_finite() && general.radius >= 0.0) {
                return Err(ConfigError::invalid(
                    format!("tools.{name}.general.radius"),
                    "must be >= 0",
                ));
            }
            if !general.retract_depth.is_finite() {
                return Err(ConfigError::invalid(
                    format!("tools.{name}.general.retract_depth"),
                    "must be finite",
                ));
            }
        }

        for (name, profile) in &self.profiles {
            profile
                .default_path
                .validate()
                .map_err(|reason| {
                    ConfigError::invalid(format!("profiles.{name}.default_path"), reason)
                })?;
            if profile.gcode.precision > 9 {
                return Err(ConfigError::invalid(
                    format!("profiles.{name}.gcode.precision"),
                    "must be <= 9",
                ));
            }
        }

        let dxf = &self.import.dxf;
        if dxf.assemble_tolerance < 0.0
            || dxf.minimum_polyline_length < 0.0
            || dxf.minimum_arc_length < 0.0
        {
            return Err(ConfigError::invalid(
                "import.dxf",
                "tolerances must be >= 0",
            ));
        }

        Ok(())
    }

    /// Look up a tool by name.
    pub fn tool(&self, name: &str) -> ConfigResult<&Tool> {
        self.tools.get(name).ok_or_else(|| ConfigError::UnknownEntry {
            kind: "tool",
            name: name.to_string(),
        })
    }

    /// Look up a profile by name.
    pub fn profile(&self, name: &str) -> ConfigResult<&Profile> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::UnknownEntry {
                kind: "profile",
                name: name.to_string(),
            })
    }

    /// First tool in name order.
    pub fn first_tool(&self) -> Option<(&str, &Tool)> {
        self.tools
            .iter()
            .next()
            .map(|(name, tool)| (name.as_str(), tool))
    }

    /// First profile in name order.
    pub fn first_profile(&self) -> Option<(&str, &Profile)> {
        self.profiles
            .iter()
            .next()
            .map(|(name, profile)| (name.as_str(), profile))
    }
}

enum Format {
    Json,
    Toml,
}
