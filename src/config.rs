use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::policy::{ApplyMode, PolicyError, Result, Section};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "lgpoedit.toml";

/// Tool configuration, loaded from TOML.
///
/// Every field is optional in the file; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
	/// Group policy root holding `Machine/` and `User/` directories.
	pub gpo_root: PathBuf,
	/// Section used when neither `--machine` nor `--user` is given.
	pub default_section: Section,
	/// How batches materialize values relative to store writes.
	pub apply_mode: ApplyMode,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			gpo_root: default_gpo_root(),
			default_section: Section::default(),
			apply_mode: ApplyMode::default(),
		}
	}
}

impl Config {
	/// Load and parse a TOML config file.
	pub fn load(path: &Path) -> Result<Self> {
		let contents = fs::read_to_string(path).map_err(|err| config_error(path, err.to_string()))?;
		Self::from_toml(&contents).map_err(|message| config_error(path, message))
	}

	/// Parse config text.
	pub fn from_toml(contents: &str) -> std::result::Result<Self, String> {
		toml::from_str(contents).map_err(|err| err.to_string())
	}

	/// Resolve the effective config.
	///
	/// An explicit path must exist. Otherwise `lgpoedit.toml` in the working
	/// directory is used when present, and defaults apply when it is not.
	pub fn discover(explicit: Option<&Path>) -> Result<Self> {
		if let Some(path) = explicit {
			return Self::load(path);
		}

		let local = Path::new(DEFAULT_CONFIG_FILE);
		if local.is_file() {
			return Self::load(local);
		}

		debug!("no config file, using defaults");
		Ok(Self::default())
	}
}

/// Platform default group policy root.
pub fn default_gpo_root() -> PathBuf {
	if cfg!(windows) {
		PathBuf::from(r"C:\Windows\System32\GroupPolicy")
	} else {
		PathBuf::from("GroupPolicy")
	}
}

fn config_error(path: &Path, message: String) -> PolicyError {
	PolicyError::Config {
		path: path.display().to_string(),
		message,
	}
}

#[cfg(test)]
mod tests;
