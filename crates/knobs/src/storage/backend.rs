//! Persistence backend trait
//!
//! A backend reads and writes the whole value map of one storage at once.
//! [`BackendKind`] names every backend the factory can build; each kind maps
//! to exactly one [`ScopeId`].

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::fmt::Debug;

use crate::key::ScopeId;
use crate::prelude::*;

/// Values of one storage, keyed by setting name
pub type ValueMap = BTreeMap<Box<str>, SettingValue>;

/// A settings persistence backend
#[async_trait]
pub trait SettingsBackend: Debug + Send + Sync {
	/// Unique ID of the stored data, for logs
	fn storage_id(&self) -> &str;

	/// Short name of the backend implementation, for logs
	fn backend_name(&self) -> &'static str;

	/// Loads all values. A missing record is an empty map.
	async fn load(&self) -> ClResult<ValueMap>;

	/// Replaces the persisted values with `values`
	async fn save(&self, values: &ValueMap) -> ClResult<()>;

	/// Deletes all persisted values
	async fn delete(&self) -> ClResult<()>;
}

/// Backend selector, also the memoisation key of the storage factory
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BackendKind {
	/// One JSON map stored in an option row
	PluginOption { plugin: PluginName },
	/// Row-per-value plugin settings table, empty login for system settings
	PluginSettings { plugin: PluginName, login: UserLogin },
	/// Per measurable plugin settings table
	MeasurableSettings { plugin: PluginName, site: SiteId },
	/// Columns of the site row and its alias URLs
	Measurable { site: SiteId },
	/// In-memory only
	NonPersistent { key: Box<str> },
}

impl BackendKind {
	pub fn system(plugin: &str) -> Self {
		BackendKind::PluginSettings { plugin: plugin.into(), login: "".into() }
	}

	pub fn user(plugin: &str, login: &str) -> Self {
		BackendKind::PluginSettings { plugin: plugin.into(), login: login.into() }
	}

	/// Per measurable plugin settings, in-memory while the measurable is not created yet
	pub fn measurable_settings(plugin: &str, site: Option<SiteId>) -> Self {
		match site {
			Some(site) => BackendKind::MeasurableSettings { plugin: plugin.into(), site },
			None => BackendKind::NonPersistent { key: format!("measurable_{}", plugin).into() },
		}
	}

	/// Built-in measurable properties, in-memory while the measurable is not created yet
	pub fn measurable_properties(site: Option<SiteId>) -> Self {
		match site {
			Some(site) => BackendKind::Measurable { site },
			None => BackendKind::NonPersistent { key: "site".into() },
		}
	}

	/// Scope of the keys a storage of this kind holds
	pub fn scope(&self) -> ScopeId {
		match self {
			BackendKind::PluginOption { plugin } => ScopeId::Plugin(plugin.clone()),
			BackendKind::PluginSettings { plugin, login } if login.is_empty() => {
				ScopeId::Plugin(plugin.clone())
			}
			BackendKind::PluginSettings { plugin, login } => {
				ScopeId::User { plugin: plugin.clone(), login: login.clone() }
			}
			BackendKind::MeasurableSettings { plugin, site } => {
				ScopeId::Measurable { plugin: plugin.clone(), site: *site }
			}
			BackendKind::Measurable { site } => ScopeId::Site(*site),
			BackendKind::NonPersistent { key } => ScopeId::Transient(key.clone()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_scope_of_kinds() {
		assert_eq!(BackendKind::system("Foo").scope(), ScopeId::Plugin("Foo".into()));
		assert_eq!(
			BackendKind::user("Foo", "alice").scope(),
			ScopeId::User { plugin: "Foo".into(), login: "alice".into() }
		);
		assert_eq!(BackendKind::measurable_properties(Some(SiteId(4))).scope(), ScopeId::Site(SiteId(4)));
		assert!(matches!(BackendKind::measurable_settings("Foo", None).scope(), ScopeId::Transient(_)));
	}
}

// vim: ts=4
