//! Optional TOML configuration
//!
//! ```toml
//! output_dir = "airdrop/out"
//! log_profile = "production"
//! parallel = true
//! ```
//!
//! Command-line flags override file values.

use ledgerroot_core::logging_facility::Profile;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "ledgerroot.toml";
pub const DEFAULT_OUTPUT_DIR: &str = "ledgerroot-out";

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    output_dir: Option<PathBuf>,
    log_profile: Option<String>,
    parallel: Option<bool>,
}

/// Effective settings after merging file and flags
#[derive(Debug, Clone)]
pub struct Settings {
    pub output_dir: PathBuf,
    pub log_profile: Profile,
    pub parallel: bool,
}

impl Settings {
    /// Read `explicit` (must exist) or `./ledgerroot.toml` (if present)
    pub fn load(
        explicit: Option<&Path>,
        log_override: Option<&str>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let file = match explicit {
            Some(path) => Some(read_config(path)?),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Some(read_config(default)?)
                } else {
                    None
                }
            }
        }
        .unwrap_or_default();

        Self::from_file(file, log_override)
    }

    fn from_file(
        file: ConfigFile,
        log_override: Option<&str>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let log_profile = match log_override.or(file.log_profile.as_deref()) {
            Some(name) => name.parse::<Profile>()?,
            None => Profile::Production,
        };
        Ok(Self {
            output_dir: file
                .output_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            log_profile,
            parallel: file.parallel.unwrap_or(true),
        })
    }

    /// `--out` if given, otherwise the configured directory
    pub fn output_dir_or(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.unwrap_or_else(|| self.output_dir.clone())
    }
}

fn read_config(path: &Path) -> Result<ConfigFile, Box<dyn std::error::Error>> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {}", path.display(), e))?;
    let file: ConfigFile = toml::from_str(&text)
        .map_err(|e| format!("Invalid config {}: {}", path.display(), e))?;
    Ok(file)
}
