//! Structured persisted keys
//!
//! A key is the pair of the scope a value belongs to and the setting name.
//! Two scopes never compare equal unless every component does, so no name can
//! collide with another user's or plugin's setting.

use std::fmt;

use crate::prelude::*;

/// The dimension a stored value is keyed by
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScopeId {
	/// System wide value of a plugin
	Plugin(PluginName),
	/// Per user value of a plugin
	User { plugin: PluginName, login: UserLogin },
	/// Per measurable value of a plugin
	Measurable { plugin: PluginName, site: SiteId },
	/// Built-in property of a measurable, shared by all plugins
	Site(SiteId),
	/// In-memory values that are never persisted
	Transient(Box<str>),
}

impl fmt::Display for ScopeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ScopeId::Plugin(plugin) => write!(f, "plugin:{}", plugin),
			ScopeId::User { plugin, login } => write!(f, "user:{}:{}", plugin, login),
			ScopeId::Measurable { plugin, site } => write!(f, "measurable:{}:{}", plugin, site),
			ScopeId::Site(site) => write!(f, "site:{}", site),
			ScopeId::Transient(id) => write!(f, "transient:{}", id),
		}
	}
}

/// Persisted key of one setting
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SettingKey {
	pub scope: ScopeId,
	pub name: Box<str>,
}

impl SettingKey {
	pub fn new(scope: ScopeId, name: impl Into<Box<str>>) -> Self {
		Self { scope, name: name.into() }
	}
}

impl fmt::Display for SettingKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}/{}", self.scope, self.name)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_user_keys_do_not_collide_on_concatenation() {
		// "api" of user "_password" vs "api_password" of user ""
		let a = SettingKey::new(ScopeId::User { plugin: "Foo".into(), login: "_password".into() }, "api");
		let b = SettingKey::new(ScopeId::User { plugin: "Foo".into(), login: "".into() }, "api_password");
		assert_ne!(a, b);
	}

	#[test]
	fn test_display() {
		let key = SettingKey::new(ScopeId::Measurable { plugin: "Foo".into(), site: SiteId(3) }, "color");
		assert_eq!(key.to_string(), "measurable:Foo:3/color");
	}
}

// vim: ts=4
