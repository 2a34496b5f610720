//! Acting principal and request origin
//!
//! Settings never look up the current user from ambient state. The caller
//! builds an [`AccessContext`] once per request and passes it explicitly.

use std::collections::HashSet;

use crate::prelude::*;

/// Where the current request comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestOrigin {
	/// Admin UI or API call, UI write permissions apply
	#[default]
	Ui,
	/// Ingestion (tracker) request, trusted to write settings regardless of UI permission
	Tracker,
}

/// The authenticated principal of a request
#[derive(Debug, Clone, Default)]
pub struct Actor {
	/// `None` for anonymous requests
	pub login: Option<UserLogin>,
	pub super_user: bool,
	pub admin_sites: HashSet<SiteId>,
	pub view_sites: HashSet<SiteId>,
}

impl Actor {
	pub fn anonymous() -> Self {
		Self::default()
	}

	pub fn user(login: impl Into<UserLogin>) -> Self {
		Self { login: Some(login.into()), ..Self::default() }
	}

	pub fn super_user(login: impl Into<UserLogin>) -> Self {
		Self { login: Some(login.into()), super_user: true, ..Self::default() }
	}

	pub fn with_view_access(mut self, site_id: SiteId) -> Self {
		self.view_sites.insert(site_id);
		self
	}

	pub fn with_admin_access(mut self, site_id: SiteId) -> Self {
		self.admin_sites.insert(site_id);
		self
	}

	pub fn login(&self) -> Option<&str> {
		self.login.as_deref()
	}

	pub fn is_anonymous(&self) -> bool {
		self.login.is_none()
	}

	pub fn has_super_user_access(&self) -> bool {
		self.super_user
	}

	pub fn has_admin_access(&self, site_id: SiteId) -> bool {
		self.super_user || self.admin_sites.contains(&site_id)
	}

	pub fn has_view_access(&self, site_id: SiteId) -> bool {
		self.has_admin_access(site_id) || self.view_sites.contains(&site_id)
	}

	pub fn has_some_admin_access(&self) -> bool {
		self.super_user || !self.admin_sites.is_empty()
	}

	pub fn has_some_view_access(&self) -> bool {
		self.super_user || !self.admin_sites.is_empty() || !self.view_sites.is_empty()
	}

	pub fn is_super_user_or_the_user(&self, login: &str) -> bool {
		self.super_user || self.login() == Some(login)
	}

	pub fn check_has_super_user_access(&self) -> ClResult<()> {
		if self.has_super_user_access() {
			Ok(())
		} else {
			Err(Error::PermissionDenied("This action requires super user access".into()))
		}
	}

	pub fn check_is_not_anonymous(&self) -> ClResult<()> {
		if self.is_anonymous() {
			Err(Error::PermissionDenied("This action requires a logged in user".into()))
		} else {
			Ok(())
		}
	}
}

/// Context struct for the principal of a request
#[derive(Debug, Clone)]
pub struct AccessContext {
	pub actor: Actor,
	pub origin: RequestOrigin,
	/// Locale of displayed strings, part of every memoisation key
	pub locale: Box<str>,
}

impl AccessContext {
	pub fn new(actor: Actor) -> Self {
		Self { actor, origin: RequestOrigin::Ui, locale: "en".into() }
	}

	pub fn tracker(actor: Actor) -> Self {
		Self { actor, origin: RequestOrigin::Tracker, locale: "en".into() }
	}

	pub fn with_locale(mut self, locale: impl Into<Box<str>>) -> Self {
		self.locale = locale.into();
		self
	}

	pub fn is_tracker_request(&self) -> bool {
		self.origin == RequestOrigin::Tracker
	}
}


// vim: ts=4
