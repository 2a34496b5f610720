//! Settings collections
//!
//! A collection groups the settings one plugin declares for one dimension:
//! its system settings, the settings of one user, or the settings of one
//! measurable. Names are unique inside a collection and every setting must
//! belong to the collection's scope.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::definition::SettingDefinition;
use crate::events::SettingsUpdated;
use crate::key::ScopeId;
use crate::prelude::*;
use crate::setting::{Setting, SettingKind};
use crate::storage::StorageHandle;
use crate::storage::backend::BackendKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CollectionKind {
	System,
	User,
	Measurable,
}

impl CollectionKind {
	/// Display order of the collection kind, smaller first
	pub fn display_order(&self) -> i32 {
		match self {
			CollectionKind::System => 10,
			CollectionKind::User => 20,
			CollectionKind::Measurable => 30,
		}
	}

	pub fn accepts(&self, kind: SettingKind) -> bool {
		matches!(
			(self, kind),
			(CollectionKind::System, SettingKind::System)
				| (CollectionKind::User, SettingKind::User)
				| (CollectionKind::Measurable, SettingKind::Measurable | SettingKind::MeasurableProperty)
		)
	}
}

/// Selects the collections of every plugin for one dimension
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CollectionScope {
	System,
	User { login: UserLogin },
	Measurable { site: Option<SiteId>, typ: Option<Box<str>> },
}

/// Collections keyed by plugin name
pub type PluginCollections = BTreeMap<PluginName, SettingsCollection>;

#[derive(Debug)]
pub struct SettingsCollection {
	kind: CollectionKind,
	plugin_name: PluginName,
	scope: ScopeId,
	storage: StorageHandle,
	settings: Vec<Setting>,
	user_login: Option<UserLogin>,
	site_id: Option<SiteId>,
	measurable_type: Option<Box<str>>,
}

impl SettingsCollection {
	fn new(ctx: &SettingsContext, kind: CollectionKind, plugin: &str, backend: &BackendKind) -> ClResult<Self> {
		Ok(Self {
			kind,
			plugin_name: plugin.into(),
			scope: backend.scope(),
			storage: ctx.storage().make(backend)?,
			settings: Vec::new(),
			user_login: None,
			site_id: None,
			measurable_type: None,
		})
	}

	/// System settings of a plugin
	pub fn system(ctx: &SettingsContext, plugin: &str) -> ClResult<Self> {
		Self::new(ctx, CollectionKind::System, plugin, &BackendKind::system(plugin))
	}

	/// Settings of one user, only the user itself and super users may access them
	pub fn user(ctx: &SettingsContext, plugin: &str, login: &str) -> ClResult<Self> {
		if login.is_empty() {
			return Err(Error::InvalidValue("No user login given".into()));
		}
		if !ctx.actor().is_super_user_or_the_user(login) {
			return Err(Error::PermissionDenied(
				"You do not have the permission to read the settings of a different user".into(),
			));
		}

		let mut collection = Self::new(ctx, CollectionKind::User, plugin, &BackendKind::user(plugin, login))?;
		collection.user_login = Some(login.into());
		Ok(collection)
	}

	/// Settings of one measurable
	///
	/// Without a site the settings live in memory until the measurable is created.
	/// The measurable type is read from the site when not given.
	pub async fn measurable(
		ctx: &SettingsContext,
		plugin: &str,
		site_id: Option<SiteId>,
		typ: Option<&str>,
	) -> ClResult<Self> {
		let typ: Box<str> = match (typ, site_id) {
			(Some(typ), _) => typ.into(),
			(None, Some(site_id)) => ctx
				.adapter()
				.read_site_type(site_id)
				.await?
				.ok_or(Error::NoSuchMeasurableType(Some(site_id)))?,
			(None, None) => return Err(Error::NoSuchMeasurableType(None)),
		};

		let backend = BackendKind::measurable_settings(plugin, site_id);
		let mut collection = Self::new(ctx, CollectionKind::Measurable, plugin, &backend)?;
		collection.site_id = site_id;
		collection.measurable_type = Some(typ);
		Ok(collection)
	}

	pub fn kind(&self) -> CollectionKind {
		self.kind
	}

	pub fn plugin_name(&self) -> &str {
		&self.plugin_name
	}

	pub fn scope(&self) -> &ScopeId {
		&self.scope
	}

	pub fn order(&self) -> i32 {
		self.kind.display_order()
	}

	pub fn user_login(&self) -> Option<&str> {
		self.user_login.as_deref()
	}

	pub fn site_id(&self) -> Option<SiteId> {
		self.site_id
	}

	pub fn measurable_type(&self) -> Option<&str> {
		self.measurable_type.as_deref()
	}

	pub fn has_measurable_type(&self, typ: &str) -> bool {
		self.measurable_type() == Some(typ)
	}

	/// Creates a setting of the collection's kind and adds it
	pub fn make_setting(&mut self, ctx: &SettingsContext, definition: SettingDefinition) -> ClResult<&mut Setting> {
		let setting = match self.kind {
			CollectionKind::System => Setting::system(ctx, &self.plugin_name, definition)?,
			CollectionKind::User => {
				let login = self.user_login.as_deref().unwrap_or_default();
				Setting::user(ctx, &self.plugin_name, login, definition)?
			}
			CollectionKind::Measurable => {
				Setting::measurable(ctx, &self.plugin_name, self.site_id, definition)?
			}
		};
		self.add_setting(setting)
	}

	/// Creates a built-in measurable property and adds it, measurable collections only
	pub fn make_property(&mut self, ctx: &SettingsContext, definition: SettingDefinition) -> ClResult<&mut Setting> {
		if self.kind != CollectionKind::Measurable {
			return Err(Error::InvalidScope(format!(
				"measurable properties cannot be added to {:?} settings of plugin {}",
				self.kind, self.plugin_name
			)));
		}
		let setting = Setting::measurable_property(ctx, &self.plugin_name, self.site_id, definition)?;
		self.add_setting(setting)
	}

	/// Adds a setting, rejecting foreign scopes and duplicate names
	pub fn add_setting(&mut self, setting: Setting) -> ClResult<&mut Setting> {
		if !self.kind.accepts(setting.kind()) {
			return Err(Error::InvalidScope(format!(
				"a {:?} setting cannot be added to {:?} settings of plugin {}",
				setting.kind(),
				self.kind,
				self.plugin_name
			)));
		}

		let same_scope = match setting.kind() {
			SettingKind::MeasurableProperty => setting.site_id() == self.site_id,
			_ => setting.key().scope == self.scope,
		};
		if !same_scope {
			return Err(Error::InvalidScope(format!(
				"setting {} does not belong to {}",
				setting.key(),
				self.scope
			)));
		}

		if self.get_setting(setting.name()).is_some() {
			return Err(Error::DuplicateName {
				scope: self.plugin_name.clone(),
				name: setting.name().into(),
			});
		}

		let idx = self.settings.len();
		self.settings.push(setting);
		Ok(&mut self.settings[idx])
	}

	pub fn get_setting(&self, name: &str) -> Option<&Setting> {
		self.settings.iter().find(|s| s.name() == name)
	}

	pub fn get_setting_mut(&mut self, name: &str) -> Option<&mut Setting> {
		self.settings.iter_mut().find(|s| s.name() == name)
	}

	pub fn settings(&self) -> &[Setting] {
		&self.settings
	}

	pub fn is_empty(&self) -> bool {
		self.settings.is_empty()
	}

	/// Settings the current actor may change, ordered by their display order
	pub fn get_settings_writable_by_current_user(&self) -> Vec<&Setting> {
		let mut settings: Vec<&Setting> =
			self.settings.iter().filter(|s| s.is_writable_by_current_user()).collect();
		settings.sort_by_key(|s| s.order());
		settings
	}

	/// Persists every changed storage of the collection and announces the update
	pub async fn save(&self, ctx: &SettingsContext) -> ClResult<()> {
		self.storage.lock().await.save().await?;
		for setting in &self.settings {
			setting.save().await?;
		}

		ctx.events().publish(SettingsUpdated {
			kind: self.kind,
			plugin: self.plugin_name.clone(),
			scope: self.scope.clone(),
		});
		Ok(())
	}

	/// Drops unsaved changes of every storage of the collection
	pub async fn discard_changes(&self) {
		self.storage.lock().await.discard_changes();
		for setting in &self.settings {
			setting.storage().lock().await.discard_changes();
		}
	}

	/// Deletes all persisted values of the collection's own storage
	pub async fn delete_all_values(&self) -> ClResult<()> {
		self.storage.lock().await.delete_all_values().await
	}
}


// vim: ts=4
