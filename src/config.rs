// File: src/config.rs
//! Runtime configuration from the environment (and a `.env` file, if any).

use crate::persistence::{
    ArtifactPaths, DEFAULT_LOCALITY_FILE, DEFAULT_MODEL_FILE, DEFAULT_PIPELINE_FILE,
};
use crate::report::DEFAULT_REPORT_FILE;
use std::path::PathBuf;

pub const DEFAULT_LOG_FILTER: &str = "rent_core=info,rent_app=info,rent_bundle=info";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub artifact_dir: PathBuf,
    pub model_file: String,
    pub pipeline_file: String,
    pub locality_file: String,
    pub report_file: String,
    pub log_filter: String,
}

impl AppConfig {
    /// Loads `.env` (if present) and reads the process environment.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset or blank keys fall back
    /// to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            artifact_dir: PathBuf::from(get("RENT_ARTIFACT_DIR", ".")),
            model_file: get("RENT_MODEL_FILE", DEFAULT_MODEL_FILE),
            pipeline_file: get("RENT_PIPELINE_FILE", DEFAULT_PIPELINE_FILE),
            locality_file: get("RENT_LOCALITY_FILE", DEFAULT_LOCALITY_FILE),
            report_file: get("RENT_REPORT_FILE", DEFAULT_REPORT_FILE),
            log_filter: get("RUST_LOG", DEFAULT_LOG_FILTER),
        }
    }

    pub fn artifact_paths(&self) -> ArtifactPaths {
        ArtifactPaths {
            model: self.artifact_dir.join(&self.model_file),
            pipeline: self.artifact_dir.join(&self.pipeline_file),
            localities: self.artifact_dir.join(&self.locality_file),
        }
    }

    pub fn report_path(&self) -> PathBuf {
        self.artifact_dir.join(&self.report_file)
    }
}
