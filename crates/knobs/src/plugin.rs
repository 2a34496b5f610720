//! Plugins declaring settings and the registry of loaded plugins

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;

use crate::collection::SettingsCollection;
use crate::prelude::*;

/// A plugin declaring settings
///
/// Each declaration hook fills an empty collection. A plugin without settings
/// of a kind leaves the collection empty and is skipped for that kind.
/// Declaration errors (invalid or duplicate names) are programming errors and
/// abort the discovery.
#[async_trait]
pub trait SettingsPlugin: Send + Sync {
	fn name(&self) -> &str;

	async fn declare_system_settings(
		&self,
		_ctx: &SettingsContext,
		_collection: &mut SettingsCollection,
	) -> ClResult<()> {
		Ok(())
	}

	async fn declare_user_settings(
		&self,
		_ctx: &SettingsContext,
		_collection: &mut SettingsCollection,
	) -> ClResult<()> {
		Ok(())
	}

	async fn declare_measurable_settings(
		&self,
		_ctx: &SettingsContext,
		_collection: &mut SettingsCollection,
	) -> ClResult<()> {
		Ok(())
	}
}

/// Registry of loaded plugins and their activation state
pub trait PluginManager: Send + Sync {
	fn loaded_plugins(&self) -> Vec<Arc<dyn SettingsPlugin>>;

	/// Fails when the activation state cannot be determined
	fn is_plugin_activated(&self, name: &str) -> ClResult<bool>;
}

/// Plugin manager with a fixed set of plugins
#[derive(Default)]
pub struct StaticPluginManager {
	plugins: Vec<Arc<dyn SettingsPlugin>>,
	activated: HashSet<Box<str>>,
}

impl StaticPluginManager {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a loaded plugin
	pub fn register(mut self, plugin: Arc<dyn SettingsPlugin>, activated: bool) -> Self {
		if activated {
			self.activated.insert(plugin.name().into());
		}
		self.plugins.push(plugin);
		self
	}

	pub fn activate(&mut self, name: &str) {
		self.activated.insert(name.into());
	}

	pub fn deactivate(&mut self, name: &str) {
		self.activated.remove(name);
	}
}

impl PluginManager for StaticPluginManager {
	fn loaded_plugins(&self) -> Vec<Arc<dyn SettingsPlugin>> {
		self.plugins.clone()
	}

	fn is_plugin_activated(&self, name: &str) -> ClResult<bool> {
		Ok(self.activated.contains(name))
	}
}

// vim: ts=4
