//! Backend storing the whole value map as one JSON document in an option row

use async_trait::async_trait;
use std::sync::Arc;

use knobs_types::store_adapter::SettingsStoreAdapter;

use super::backend::{SettingsBackend, ValueMap};
use crate::prelude::*;

#[derive(Debug)]
pub struct OptionTableBackend {
	storage_id: Box<str>,
	adapter: Arc<dyn SettingsStoreAdapter>,
}

impl OptionTableBackend {
	pub fn new(adapter: Arc<dyn SettingsStoreAdapter>, option_name: impl Into<Box<str>>) -> ClResult<Self> {
		let storage_id = option_name.into();
		if storage_id.is_empty() {
			return Err(Error::InvalidValue("No option name given".into()));
		}
		Ok(Self { storage_id, adapter })
	}

	/// Option row of a plugin's settings
	pub fn option_name(plugin: &str) -> String {
		format!(
			"{}{}{}",
			knobs_types::store_adapter::LEGACY_PLUGIN_OPTION_PREFIX,
			plugin,
			knobs_types::store_adapter::LEGACY_PLUGIN_OPTION_SUFFIX
		)
	}
}

#[async_trait]
impl SettingsBackend for OptionTableBackend {
	fn storage_id(&self) -> &str {
		&self.storage_id
	}

	fn backend_name(&self) -> &'static str {
		"option_table"
	}

	async fn load(&self) -> ClResult<ValueMap> {
		match self.adapter.read_option(&self.storage_id).await? {
			Some(json) if !json.trim().is_empty() => Ok(serde_json::from_str(&json)?),
			_ => Ok(ValueMap::new()),
		}
	}

	async fn save(&self, values: &ValueMap) -> ClResult<()> {
		let json = serde_json::to_string(values)?;
		self.adapter.update_option(&self.storage_id, &json).await
	}

	async fn delete(&self) -> ClResult<()> {
		self.adapter.delete_option(&self.storage_id).await
	}
}

// vim: ts=4
