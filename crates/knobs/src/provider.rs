//! Discovery of the settings collections of all activated plugins
//!
//! Collections are built on first request and memoized in the request context,
//! keyed by the collection scope. A plugin is included when it is loaded,
//! activated and declares at least one setting of the requested kind.

use std::sync::Arc;

use crate::collection::{CollectionScope, PluginCollections, SettingsCollection};
use crate::plugin::{PluginManager, SettingsPlugin};
use crate::prelude::*;

#[derive(Clone)]
pub struct SettingsProvider {
	plugins: Arc<dyn PluginManager>,
}

impl SettingsProvider {
	pub fn new(plugins: Arc<dyn PluginManager>) -> Self {
		Self { plugins }
	}

	/// Activated plugins; plugins whose activation state cannot be read are skipped
	fn activated_plugins(&self) -> Vec<Arc<dyn SettingsPlugin>> {
		self.plugins
			.loaded_plugins()
			.into_iter()
			.filter(|plugin| match self.plugins.is_plugin_activated(plugin.name()) {
				Ok(activated) => activated,
				Err(err) => {
					warn!("skipping plugin {}: {}", plugin.name(), err);
					false
				}
			})
			.collect()
	}

	async fn declare(
		ctx: &SettingsContext,
		plugin: &dyn SettingsPlugin,
		scope: &CollectionScope,
	) -> ClResult<SettingsCollection> {
		let name = plugin.name();
		match scope {
			CollectionScope::System => {
				let mut collection = SettingsCollection::system(ctx, name)?;
				plugin.declare_system_settings(ctx, &mut collection).await?;
				Ok(collection)
			}
			CollectionScope::User { login } => {
				let mut collection = SettingsCollection::user(ctx, name, login)?;
				plugin.declare_user_settings(ctx, &mut collection).await?;
				Ok(collection)
			}
			CollectionScope::Measurable { site, typ } => {
				let mut collection = SettingsCollection::measurable(ctx, name, *site, typ.as_deref()).await?;
				plugin.declare_measurable_settings(ctx, &mut collection).await?;
				Ok(collection)
			}
		}
	}

	/// Collections of every activated plugin for one dimension
	pub async fn collections_of_kind(
		&self,
		ctx: &SettingsContext,
		scope: &CollectionScope,
	) -> ClResult<Arc<PluginCollections>> {
		if let Some(collections) = ctx.memoized_collections(scope) {
			return Ok(collections);
		}

		let mut collections = PluginCollections::new();
		for plugin in self.activated_plugins() {
			let collection = Self::declare(ctx, plugin.as_ref(), scope).await?;
			if !collection.is_empty() {
				collections.insert(plugin.name().into(), collection);
			}
		}
		debug!("discovered {} settings collections for {:?}", collections.len(), scope);

		Ok(ctx.memoize_collections(scope.clone(), Arc::new(collections)))
	}

	/// System settings of all activated plugins
	pub async fn all_system_settings(&self, ctx: &SettingsContext) -> ClResult<Arc<PluginCollections>> {
		self.collections_of_kind(ctx, &CollectionScope::System).await
	}

	/// Settings of the current user in all activated plugins, empty for anonymous requests
	pub async fn all_user_settings(&self, ctx: &SettingsContext) -> ClResult<Arc<PluginCollections>> {
		match ctx.actor().login() {
			Some(login) => {
				let scope = CollectionScope::User { login: login.into() };
				self.collections_of_kind(ctx, &scope).await
			}
			None => Ok(Arc::new(PluginCollections::new())),
		}
	}

	/// Settings of one measurable in all activated plugins
	pub async fn all_measurable_settings(
		&self,
		ctx: &SettingsContext,
		site_id: Option<SiteId>,
		typ: Option<&str>,
	) -> ClResult<Arc<PluginCollections>> {
		let scope = CollectionScope::Measurable { site: site_id, typ: typ.map(Into::into) };
		self.collections_of_kind(ctx, &scope).await
	}

	fn find_plugin(&self, name: &str) -> Option<Arc<dyn SettingsPlugin>> {
		self.activated_plugins().into_iter().find(|plugin| plugin.name() == name)
	}

	/// System settings of one plugin, `None` if it is not activated or has none
	pub async fn plugin_system_settings(
		&self,
		ctx: &SettingsContext,
		plugin: &str,
	) -> ClResult<Option<SettingsCollection>> {
		self.plugin_settings(ctx, plugin, &CollectionScope::System).await
	}

	/// Settings of the current user in one plugin
	pub async fn plugin_user_settings(
		&self,
		ctx: &SettingsContext,
		plugin: &str,
	) -> ClResult<Option<SettingsCollection>> {
		let Some(login) = ctx.actor().login() else {
			return Ok(None);
		};
		self.plugin_settings(ctx, plugin, &CollectionScope::User { login: login.into() }).await
	}

	/// Settings of one measurable in one plugin
	pub async fn measurable_settings(
		&self,
		ctx: &SettingsContext,
		plugin: &str,
		site_id: Option<SiteId>,
		typ: Option<&str>,
	) -> ClResult<Option<SettingsCollection>> {
		let scope = CollectionScope::Measurable { site: site_id, typ: typ.map(Into::into) };
		self.plugin_settings(ctx, plugin, &scope).await
	}

	async fn plugin_settings(
		&self,
		ctx: &SettingsContext,
		plugin: &str,
		scope: &CollectionScope,
	) -> ClResult<Option<SettingsCollection>> {
		let Some(plugin) = self.find_plugin(plugin) else {
			return Ok(None);
		};
		let collection = Self::declare(ctx, plugin.as_ref(), scope).await?;
		Ok(if collection.is_empty() { None } else { Some(collection) })
	}
}

// vim: ts=4
