//! Configuration overrides of system settings
//!
//! A value present in the configuration wins over the stored one and makes the
//! setting read-only in the UI. The file format is YAML, one section per plugin:
//!
//! ```yaml
//! ExampleSettings:
//!   metric: nb_actions
//!   browsers: [firefox, chrome]
//! ```

use serde::Deserialize;
use std::collections::HashMap;
use std::fmt::Debug;
use std::path::Path;

use crate::prelude::*;

/// Source of configuration values of system settings
pub trait ConfigSource: Debug + Send + Sync {
	fn plugin_value(&self, plugin: &str, name: &str) -> Option<SettingValue>;
}

/// Configuration without any override
#[derive(Debug, Default)]
pub struct NoConfig;

impl ConfigSource for NoConfig {
	fn plugin_value(&self, _plugin: &str, _name: &str) -> Option<SettingValue> {
		None
	}
}

#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct SettingsConfig {
	sections: HashMap<String, HashMap<String, SettingValue>>,
}

impl SettingsConfig {
	pub fn from_yaml_str(yaml: &str) -> ClResult<Self> {
		if yaml.trim().is_empty() {
			return Ok(Self::default());
		}
		Ok(serde_yaml::from_str(yaml)?)
	}

	pub fn from_file(path: impl AsRef<Path>) -> ClResult<Self> {
		let yaml = std::fs::read_to_string(path.as_ref())?;
		info!("loaded settings config from {}", path.as_ref().display());
		Self::from_yaml_str(&yaml)
	}

	pub fn with_value(mut self, plugin: &str, name: &str, value: impl Into<SettingValue>) -> Self {
		self.sections.entry(plugin.into()).or_default().insert(name.into(), value.into());
		self
	}
}

impl ConfigSource for SettingsConfig {
	fn plugin_value(&self, plugin: &str, name: &str) -> Option<SettingValue> {
		self.sections.get(plugin).and_then(|section| section.get(name)).cloned()
	}
}


// vim: ts=4
