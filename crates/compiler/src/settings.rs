//! Compiler settings

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GeneError, GeneResult};

/// Tessellation and randomness of the geometry generators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometrySettings {
    /// Latitude/longitude subdivisions of spheres, eggs and droplets
    pub sphere_segments: u32,
    /// Ring subdivisions of cylinders and cones
    pub cylinder_segments: u32,
    /// Subdivisions of the sphere a blob starts from
    pub blob_segments: u32,
    /// Maximum blob offset per axis as a fraction of the blob size
    pub blob_jitter: f64,
    /// Base seed mixed into every per-statement blob seed
    pub seed: u64,
}

impl Default for GeometrySettings {
    fn default() -> Self {
        Self {
            sphere_segments: 32,
            cylinder_segments: 32,
            blob_segments: 16,
            blob_jitter: 0.2,
            seed: 0,
        }
    }
}

/// Scene export settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Generate statement geometries on the rayon thread pool
    pub parallel: bool,
    /// Pretty-print JSON output
    pub pretty: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            parallel: true,
            pretty: true,
        }
    }
}

/// All compiler settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CompilerSettings {
    pub geometry: GeometrySettings,
    pub export: ExportSettings,
}

impl CompilerSettings {
    /// Default location: `<config dir>/settings.json`
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "gene", "genec")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings from the default location, or return defaults
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Ignoring settings: {e}");
                Self::default()
            }
        }
    }

    /// Load settings from an explicit file
    pub fn load_from(path: &Path) -> GeneResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| GeneError::io(path, e))?;
        serde_json::from_str(&json).map_err(|source| GeneError::Settings {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save settings to an explicit file
    pub fn save_to(&self, path: &Path) -> GeneResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| GeneError::io(parent, e))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|e| GeneError::io(path, e))
    }

    /// Save settings to the default location
    pub fn save(&self) -> GeneResult<()> {
        match Self::default_path() {
            Some(path) => self.save_to(&path),
            None => Ok(()),
        }
    }
}
