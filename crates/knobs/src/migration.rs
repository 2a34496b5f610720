//! Migration of legacy option-based plugin settings
//!
//! Older installations stored all settings of a plugin as one JSON map in the
//! option row `Plugin_<name>_Settings`. User values were keyed `<name>#<login>#`.
//! The migration moves them into the plugin settings table and removes the
//! option rows.

use std::collections::BTreeMap;

use knobs_types::store_adapter::{
	LEGACY_PLUGIN_OPTION_PREFIX, LEGACY_PLUGIN_OPTION_SUFFIX, SettingsStoreAdapter,
};

use crate::prelude::*;
use crate::storage::plugin_table::encode_rows;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MigrationReport {
	pub plugins: usize,
	pub values: usize,
	/// Option rows left in place because they could not be parsed
	pub skipped: Vec<Box<str>>,
}

/// Splits a legacy key into setting name and login, empty login for system values
fn split_legacy_key(key: &str) -> (&str, &str) {
	if let Some(rest) = key.strip_suffix('#')
		&& let Some((name, login)) = rest.split_once('#')
	{
		return (name, login);
	}
	(key, "")
}

pub async fn migrate_option_settings(adapter: &dyn SettingsStoreAdapter) -> ClResult<MigrationReport> {
	let mut report = MigrationReport::default();

	let options = adapter.list_options(LEGACY_PLUGIN_OPTION_PREFIX, LEGACY_PLUGIN_OPTION_SUFFIX).await?;
	for (option_name, json) in options {
		let Some(plugin) = option_name
			.strip_prefix(LEGACY_PLUGIN_OPTION_PREFIX)
			.and_then(|s| s.strip_suffix(LEGACY_PLUGIN_OPTION_SUFFIX))
			.filter(|s| !s.is_empty())
		else {
			continue;
		};

		let values: BTreeMap<String, SettingValue> = match serde_json::from_str(&json) {
			Ok(values) => values,
			Err(err) => {
				warn!("skipping option {}: {}", option_name, err);
				report.skipped.push(option_name);
				continue;
			}
		};

		let mut by_login: BTreeMap<&str, Vec<_>> = BTreeMap::new();
		for (key, value) in &values {
			let (name, login) = split_legacy_key(key);
			by_login.entry(login).or_default().extend(encode_rows(name, value)?);
		}

		for (login, rows) in by_login {
			adapter.replace_plugin_settings(plugin, login, &[], &rows).await?;
		}
		adapter.delete_option(&option_name).await?;

		info!("migrated {} settings of plugin {}", values.len(), plugin);
		report.plugins += 1;
		report.values += values.len();
	}

	Ok(report)
}


// vim: ts=4
