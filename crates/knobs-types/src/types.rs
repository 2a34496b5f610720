//! Common identifier types.

use serde::{Deserialize, Serialize};

pub type PluginName = Box<str>;
pub type UserLogin = Box<str>;

// SiteId //
//********//
/// Identifier of a measurable (website, app, ...)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SiteId(pub u32);

impl std::fmt::Display for SiteId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl Serialize for SiteId {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_u32(self.0)
	}
}

impl<'de> Deserialize<'de> for SiteId {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		Ok(SiteId(u32::deserialize(deserializer)?))
	}
}

// vim: ts=4
