//! Writable settings of the current actor across all plugins

use std::sync::Arc;

use crate::collection::PluginCollections;
use crate::prelude::*;
use crate::provider::SettingsProvider;
use crate::setting::Setting;

#[derive(Clone)]
pub struct PluginsSettings {
	provider: SettingsProvider,
}

/// Writable settings grouped by plugin, plugins without any are left out
pub(crate) fn writable_settings(collections: &PluginCollections) -> Vec<(PluginName, Vec<Setting>)> {
	collections
		.iter()
		.filter_map(|(plugin_name, collection)| {
			let settings: Vec<Setting> =
				collection.get_settings_writable_by_current_user().into_iter().cloned().collect();
			(!settings.is_empty()).then(|| (plugin_name.clone(), settings))
		})
		.collect()
}

impl PluginsSettings {
	pub fn new(provider: SettingsProvider) -> Self {
		Self { provider }
	}

	pub fn provider(&self) -> &SettingsProvider {
		&self.provider
	}

	pub async fn system_collections(&self, ctx: &SettingsContext) -> ClResult<Arc<PluginCollections>> {
		self.provider.all_system_settings(ctx).await
	}

	pub async fn user_collections(&self, ctx: &SettingsContext) -> ClResult<Arc<PluginCollections>> {
		self.provider.all_user_settings(ctx).await
	}

	/// System settings the current actor may change, grouped by plugin
	pub async fn all_writable_system_settings(
		&self,
		ctx: &SettingsContext,
	) -> ClResult<Vec<(PluginName, Vec<Setting>)>> {
		Ok(writable_settings(&*self.system_collections(ctx).await?))
	}

	/// Settings of the current user the actor may change, grouped by plugin
	pub async fn all_writable_user_settings(
		&self,
		ctx: &SettingsContext,
	) -> ClResult<Vec<(PluginName, Vec<Setting>)>> {
		Ok(writable_settings(&*self.user_collections(ctx).await?))
	}

	/// Names of activated plugins declaring system settings
	pub async fn plugin_names_having_system_settings(&self, ctx: &SettingsContext) -> ClResult<Vec<PluginName>> {
		Ok(self.system_collections(ctx).await?.keys().cloned().collect())
	}

	pub async fn has_system_plugin_settings_for_current_user(
		&self,
		ctx: &SettingsContext,
		plugin: &str,
	) -> ClResult<bool> {
		let collections = self.system_collections(ctx).await?;
		Ok(collections
			.get(plugin)
			.is_some_and(|c| !c.get_settings_writable_by_current_user().is_empty()))
	}

	pub async fn has_user_plugin_settings_for_current_user(
		&self,
		ctx: &SettingsContext,
		plugin: &str,
	) -> ClResult<bool> {
		let collections = self.user_collections(ctx).await?;
		Ok(collections
			.get(plugin)
			.is_some_and(|c| !c.get_settings_writable_by_current_user().is_empty()))
	}
}

// vim: ts=4
