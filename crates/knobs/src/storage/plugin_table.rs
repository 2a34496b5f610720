//! Backend storing one row per value in the plugin settings table
//!
//! Scalars are a single row with value index 0. A list is one row per element
//! with value indexes starting at 1, an empty list is a single `[]` row at
//! index 0. Every cell holds JSON so the value type survives the round trip.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;

use knobs_types::store_adapter::{PluginSettingRow, SettingsStoreAdapter};

use super::backend::{SettingsBackend, ValueMap};
use crate::prelude::*;

#[derive(Debug)]
pub struct PluginSettingsTableBackend {
	storage_id: Box<str>,
	plugin: PluginName,
	login: UserLogin,
	adapter: Arc<dyn SettingsStoreAdapter>,
}

impl PluginSettingsTableBackend {
	/// `login` is empty for system settings
	pub fn new(adapter: Arc<dyn SettingsStoreAdapter>, plugin: &str, login: &str) -> ClResult<Self> {
		if plugin.is_empty() {
			return Err(Error::InvalidValue("No plugin name given".into()));
		}
		Ok(Self {
			storage_id: format!("PluginSettings_{}_User_{}", plugin, login).into(),
			plugin: plugin.into(),
			login: login.into(),
			adapter,
		})
	}
}

fn decode_cell(raw: &str) -> SettingValue {
	serde_json::from_str::<SettingValue>(raw).unwrap_or_else(|_| SettingValue::String(raw.to_string()))
}

/// Encodes one value into its rows
pub(crate) fn encode_rows(name: &str, value: &SettingValue) -> ClResult<Vec<PluginSettingRow>> {
	let row = |value_index, setting_value: String| PluginSettingRow {
		setting_name: name.into(),
		value_index,
		setting_value: setting_value.into(),
	};

	match value {
		SettingValue::StringList(list) if list.is_empty() => Ok(vec![row(0, "[]".into())]),
		SettingValue::StringList(list) => {
			let mut rows = Vec::with_capacity(list.len());
			for (idx, item) in (1u32..).zip(list) {
				rows.push(row(idx, serde_json::to_string(item)?));
			}
			Ok(rows)
		}
		value => Ok(vec![row(0, serde_json::to_string(value)?)]),
	}
}

/// Decodes rows ordered by name and value index
pub(crate) fn decode_rows(rows: Vec<PluginSettingRow>) -> ValueMap {
	let mut values = ValueMap::new();
	let mut lists: BTreeMap<Box<str>, Vec<String>> = BTreeMap::new();

	for row in rows {
		let value = decode_cell(&row.setting_value);
		if row.value_index == 0 {
			values.insert(row.setting_name, value);
			continue;
		}

		let item = match value {
			SettingValue::StringList(nested) => nested,
			value => value.to_scalar_string().into_iter().collect(),
		};
		lists.entry(row.setting_name).or_default().extend(item);
	}

	// list rows win over a stale index 0 row of the same name
	values.extend(lists.into_iter().map(|(name, list)| (name, SettingValue::StringList(list))));
	values
}

#[async_trait]
impl SettingsBackend for PluginSettingsTableBackend {
	fn storage_id(&self) -> &str {
		&self.storage_id
	}

	fn backend_name(&self) -> &'static str {
		"plugin_settings_table"
	}

	async fn load(&self) -> ClResult<ValueMap> {
		let rows = self.adapter.list_plugin_settings(&self.plugin, &self.login).await?;
		Ok(decode_rows(rows))
	}

	async fn save(&self, values: &ValueMap) -> ClResult<()> {
		let existing = self.load().await?;
		let deleted: Vec<Box<str>> =
			existing.into_keys().filter(|name| !values.contains_key(name)).collect();

		let mut rows = Vec::new();
		for (name, value) in values {
			rows.extend(encode_rows(name, value)?);
		}

		debug!("saving {} rows of {} ({} deleted)", rows.len(), self.storage_id, deleted.len());
		self.adapter.replace_plugin_settings(&self.plugin, &self.login, &deleted, &rows).await
	}

	async fn delete(&self) -> ClResult<()> {
		self.adapter.delete_plugin_settings(&self.plugin, &self.login).await
	}
}


// vim: ts=4
