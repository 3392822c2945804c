//! Resolver options
//!
//! The fixed constants the resolver works with (section names, the
//! script folder, length bounds). Embedders can override them from TOML;
//! every field falls back to its default when omitted.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use revive_utils::{Result, ReviveError};

/// Default options as TOML (for reference/documentation)
pub const DEFAULT_OPTIONS_TOML: &str = r##"
# revive-settings options

# Section consulted when a key is missing from the application section
global_section = "revive"

# Application sections start with this prefix; the rest is the app key
app_section_prefix = "revive.app."

# Input scripts live here, relative to the user's documents folder
script_subdir = "Revive/Input"

# Longest application key accepted as a section name (bytes). The host
# buffer holds 128 bytes including the terminating NUL.
max_section_len = 127

# Longest string setting value returned by a lookup (bytes). The host
# buffer is MAX_PATH (260) including the terminating NUL.
max_string_len = 259
"##;

/// Options controlling section resolution and path construction
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsOptions {
    /// Fallback section shared by every application
    pub global_section: String,
    /// Prefix marking an application-scoped section
    pub app_section_prefix: String,
    /// Script folder relative to the documents root
    pub script_subdir: PathBuf,
    /// Upper bound on the application key length
    pub max_section_len: usize,
    /// Upper bound on string values; longer values are truncated
    pub max_string_len: usize,
}

impl Default for SettingsOptions {
    fn default() -> Self {
        Self {
            global_section: "revive".into(),
            app_section_prefix: "revive.app.".into(),
            script_subdir: PathBuf::from("Revive").join("Input"),
            max_section_len: 127,
            max_string_len: 259,
        }
    }
}

impl SettingsOptions {
    /// Parse options from a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let options: Self = toml::from_str(content)
            .map_err(|e| ReviveError::config(format!("Failed to parse options: {}", e)))?;
        options.validate().map_err(ReviveError::Config)?;
        Ok(options)
    }

    /// Load options from a file, using defaults when it does not exist
    pub fn load(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No options file at {:?}, using defaults", path);
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(ReviveError::FileRead {
                    path: path.to_path_buf(),
                    source: e,
                })
            }
        };

        let options: Self = toml::from_str(&content).map_err(|e| ReviveError::ConfigInvalid {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        options
            .validate()
            .map_err(|message| ReviveError::ConfigInvalid {
                path: path.to_path_buf(),
                message,
            })?;
        Ok(options)
    }

    fn validate(&self) -> std::result::Result<(), String> {
        if self.global_section.is_empty() {
            return Err("global_section must not be empty".into());
        }
        if self.global_section.len() > self.max_section_len {
            return Err(format!(
                "global_section is longer than max_section_len ({})",
                self.max_section_len
            ));
        }
        if self.app_section_prefix.is_empty() {
            return Err("app_section_prefix must not be empty".into());
        }
        if self.max_string_len == 0 {
            return Err("max_string_len must be positive".into());
        }
        Ok(())
    }
}
