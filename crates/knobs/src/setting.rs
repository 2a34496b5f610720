//! A single setting bound to its storage
//!
//! Reads go through the shared [`Storage`](crate::storage::Storage) of the
//! setting and are normalized to the declared type. Writes check permission,
//! validate, transform (or coerce) and only then reach the storage; nothing is
//! persisted until the setting (or its collection) is saved.

use serde::Serialize;
use std::sync::Arc;

use crate::config::ConfigSource;
use crate::definition::SettingDefinition;
use crate::key::SettingKey;
use crate::prelude::*;
use crate::storage::StorageHandle;
use crate::storage::backend::BackendKind;

/// Which dimension a setting is stored by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SettingKind {
	/// System wide, writable by super users, overridable from the configuration
	System,
	/// Per user, readable for other users by super users only
	User,
	/// Per measurable, stored in the measurable settings table
	Measurable,
	/// Built-in property of a measurable, stored in the site row
	MeasurableProperty,
}

/// One declared setting of a plugin
///
/// Writability is decided for the actor of the [`SettingsContext`] the setting
/// is built in. The [`AccessContext`] given to [`Setting::set_value`] and
/// [`Setting::remove_value`] only selects the tracker bypass; a setting is
/// never re-checked against a different actor.
#[derive(Debug, Clone)]
pub struct Setting {
	definition: SettingDefinition,
	kind: SettingKind,
	plugin_name: PluginName,
	key: SettingKey,
	site_id: Option<SiteId>,
	user_login: Option<UserLogin>,
	storage: StorageHandle,
	writable: bool,
	config: Option<Arc<dyn ConfigSource>>,
}

impl Setting {
	fn build(
		ctx: &SettingsContext,
		kind: SettingKind,
		plugin: &str,
		backend: &BackendKind,
		definition: SettingDefinition,
		writable: bool,
	) -> ClResult<Self> {
		let storage = ctx.storage().make(backend)?;
		Ok(Self {
			key: SettingKey::new(backend.scope(), definition.name.clone()),
			definition,
			kind,
			plugin_name: plugin.into(),
			site_id: None,
			user_login: None,
			storage,
			writable,
			config: None,
		})
	}

	/// System wide setting, writable by super users unless configured
	pub fn system(ctx: &SettingsContext, plugin: &str, definition: SettingDefinition) -> ClResult<Self> {
		let writable = ctx.actor().has_super_user_access();
		let mut setting =
			Self::build(ctx, SettingKind::System, plugin, &BackendKind::system(plugin), definition, writable)?;
		setting.config = Some(ctx.config().clone());
		Ok(setting)
	}

	/// Setting of `login`, only the user itself and super users may access it
	pub fn user(
		ctx: &SettingsContext,
		plugin: &str,
		login: &str,
		definition: SettingDefinition,
	) -> ClResult<Self> {
		if login.is_empty() {
			return Err(Error::InvalidValue("No user login given".into()));
		}
		if !ctx.actor().is_super_user_or_the_user(login) {
			return Err(Error::PermissionDenied(
				"You do not have the permission to read the settings of a different user".into(),
			));
		}

		let writable = ctx.actor().has_some_view_access();
		let mut setting =
			Self::build(ctx, SettingKind::User, plugin, &BackendKind::user(plugin, login), definition, writable)?;
		setting.user_login = Some(login.into());
		Ok(setting)
	}

	/// Per measurable setting, in-memory until the measurable exists
	pub fn measurable(
		ctx: &SettingsContext,
		plugin: &str,
		site_id: Option<SiteId>,
		definition: SettingDefinition,
	) -> ClResult<Self> {
		let writable = measurable_writable(ctx.actor(), site_id);
		let backend = BackendKind::measurable_settings(plugin, site_id);
		let mut setting = Self::build(ctx, SettingKind::Measurable, plugin, &backend, definition, writable)?;
		setting.site_id = site_id;
		Ok(setting)
	}

	/// Built-in measurable property mapped onto the site row, in-memory until the measurable exists
	pub fn measurable_property(
		ctx: &SettingsContext,
		plugin: &str,
		site_id: Option<SiteId>,
		definition: SettingDefinition,
	) -> ClResult<Self> {
		let writable = measurable_writable(ctx.actor(), site_id);
		let backend = BackendKind::measurable_properties(site_id);
		let mut setting =
			Self::build(ctx, SettingKind::MeasurableProperty, plugin, &backend, definition, writable)?;
		setting.site_id = site_id;
		Ok(setting)
	}

	pub fn name(&self) -> &str {
		&self.definition.name
	}

	pub fn title(&self) -> &str {
		&self.definition.title
	}

	pub fn definition(&self) -> &SettingDefinition {
		&self.definition
	}

	pub fn kind(&self) -> SettingKind {
		self.kind
	}

	pub fn key(&self) -> &SettingKey {
		&self.key
	}

	pub fn plugin_name(&self) -> &str {
		&self.plugin_name
	}

	pub fn site_id(&self) -> Option<SiteId> {
		self.site_id
	}

	pub fn user_login(&self) -> Option<&str> {
		self.user_login.as_deref()
	}

	pub fn typ(&self) -> SettingType {
		self.definition.typ
	}

	pub fn order(&self) -> i32 {
		self.definition.order
	}

	pub fn storage(&self) -> &StorageHandle {
		&self.storage
	}

	pub fn default_value(&self) -> &SettingValue {
		&self.definition.default
	}

	/// Replaces the default value, used by plugins deriving defaults from other settings
	pub fn set_default_value(&mut self, value: impl Into<SettingValue>) {
		self.definition.default = self.definition.typ.normalize(value.into());
	}

	/// Value from the configuration, system settings only
	pub fn config_value(&self) -> Option<SettingValue> {
		let config = self.config.as_ref()?;
		config.plugin_value(&self.plugin_name, &self.definition.name)
	}

	pub fn is_writable_by_current_user(&self) -> bool {
		self.writable && self.config_value().is_none()
	}

	/// Overrides the writability computed at construction
	pub fn set_writable_by_current_user(&mut self, writable: bool) {
		self.writable = writable;
	}

	/// Current value: the configured one, else the stored one, else the default
	pub async fn get_value(&self) -> ClResult<SettingValue> {
		if let Some(value) = self.config_value() {
			return Ok(self.definition.typ.normalize(value));
		}

		let value = self.storage.lock().await.get_value(&self.key, &self.definition.default).await?;
		Ok(self.definition.typ.normalize(value))
	}

	/// Validates and stores a value in memory
	///
	/// Permission comes from the actor the setting was built for, `access`
	/// lets tracker requests write regardless of it.
	pub async fn set_value(&self, access: &AccessContext, value: SettingValue) -> ClResult<()> {
		self.check_write_permission(access)?;
		self.validate(&value)?;

		let value = match &self.definition.transform {
			Some(transform) => transform(value, &self.definition)?,
			None => self.definition.typ.coerce(value)?,
		};

		self.storage.lock().await.set_value(&self.key, value).await
	}

	/// Removes the stored value, reads fall back to the default
	pub async fn remove_value(&self, access: &AccessContext) -> ClResult<()> {
		self.check_write_permission(access)?;
		self.storage.lock().await.delete_value(&self.key).await
	}

	/// Persists the storage of this setting if it has changes
	pub async fn save(&self) -> ClResult<()> {
		self.storage.lock().await.save().await
	}

	fn check_write_permission(&self, access: &AccessContext) -> ClResult<()> {
		// ingestion requests may write settings regardless of UI permission
		if access.is_tracker_request() {
			return Ok(());
		}

		if self.is_writable_by_current_user() {
			Ok(())
		} else {
			Err(Error::PermissionDenied(format!(
				"You are not allowed to change the value of the setting \"{}\" in plugin \"{}\"",
				self.definition.name, self.plugin_name
			)))
		}
	}

	fn validate(&self, value: &SettingValue) -> ClResult<()> {
		let definition = &self.definition;
		if let Some(validator) = &definition.validator {
			return validator(value, definition);
		}
		if definition.available_values.is_none() {
			return Ok(());
		}

		let not_allowed = || {
			Error::InvalidValue(format!(
				"The value for the setting \"{}\" of plugin \"{}\" is not allowed",
				definition.title, self.plugin_name
			))
		};

		match value {
			SettingValue::StringList(list) if definition.typ == SettingType::Array => {
				if list.iter().all(|item| definition.is_available_value(item)) {
					Ok(())
				} else {
					Err(not_allowed())
				}
			}
			SettingValue::StringList(_) => Err(not_allowed()),
			value => match value.to_scalar_string() {
				Some(key) if definition.is_available_value(&key) => Ok(()),
				_ => Err(not_allowed()),
			},
		}
	}
}

fn measurable_writable(actor: &Actor, site_id: Option<SiteId>) -> bool {
	match site_id {
		Some(site_id) => actor.has_admin_access(site_id),
		None => actor.has_some_admin_access(),
	}
}


// vim: ts=4
