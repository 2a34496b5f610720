//! Backend storing per measurable plugin settings, one JSON row per setting

use async_trait::async_trait;
use std::sync::Arc;

use knobs_types::store_adapter::SettingsStoreAdapter;

use super::backend::{SettingsBackend, ValueMap};
use crate::prelude::*;

#[derive(Debug)]
pub struct MeasurableSettingsTableBackend {
	storage_id: Box<str>,
	site_id: SiteId,
	plugin: PluginName,
	adapter: Arc<dyn SettingsStoreAdapter>,
}

impl MeasurableSettingsTableBackend {
	pub fn new(adapter: Arc<dyn SettingsStoreAdapter>, site_id: SiteId, plugin: &str) -> ClResult<Self> {
		if plugin.is_empty() {
			return Err(Error::InvalidValue("No plugin name given".into()));
		}
		if site_id.0 == 0 {
			return Err(Error::InvalidValue("No site ID given".into()));
		}
		Ok(Self {
			storage_id: format!("MeasurableSettings_{}_{}", site_id, plugin).into(),
			site_id,
			plugin: plugin.into(),
			adapter,
		})
	}
}

#[async_trait]
impl SettingsBackend for MeasurableSettingsTableBackend {
	fn storage_id(&self) -> &str {
		&self.storage_id
	}

	fn backend_name(&self) -> &'static str {
		"measurable_settings_table"
	}

	async fn load(&self) -> ClResult<ValueMap> {
		let rows = self.adapter.list_site_settings(self.site_id, &self.plugin).await?;
		let mut values = ValueMap::new();
		for row in rows {
			let value = serde_json::from_str::<SettingValue>(&row.setting_value)
				.unwrap_or_else(|_| SettingValue::String(row.setting_value.to_string()));
			values.insert(row.setting_name, value);
		}
		Ok(values)
	}

	async fn save(&self, values: &ValueMap) -> ClResult<()> {
		let existing = self.load().await?;
		let deleted: Vec<Box<str>> =
			existing.into_keys().filter(|name| !values.contains_key(name)).collect();

		let mut rows = Vec::with_capacity(values.len());
		for (name, value) in values {
			rows.push((name.clone(), serde_json::to_string(value)?.into_boxed_str()));
		}

		self.adapter.replace_site_settings(self.site_id, &self.plugin, &deleted, &rows).await
	}

	async fn delete(&self) -> ClResult<()> {
		self.adapter.delete_site_settings(self.site_id, &self.plugin).await
	}
}

// vim: ts=4
