//! Settings API operations
//!
//! Read and write entry points for system, user and measurable settings. The
//! caller maps them onto its transport; access checks happen here.

use crate::metadata::{IncomingValues, PluginSettingsMetadata, SettingsMetadata};
use crate::plugins_settings::{PluginsSettings, writable_settings};
use crate::prelude::*;
use crate::provider::SettingsProvider;
use crate::setting::SettingKind;

#[derive(Clone)]
pub struct SettingsApi {
	plugins_settings: PluginsSettings,
	metadata: SettingsMetadata,
}

impl SettingsApi {
	pub fn new(provider: SettingsProvider) -> Self {
		Self { plugins_settings: PluginsSettings::new(provider), metadata: SettingsMetadata }
	}

	pub fn plugins_settings(&self) -> &PluginsSettings {
		&self.plugins_settings
	}

	/// Writable system settings of all plugins, super users only
	pub async fn get_system_settings(&self, ctx: &SettingsContext) -> ClResult<Vec<PluginSettingsMetadata>> {
		ctx.actor().check_has_super_user_access()?;
		let writable = self.plugins_settings.all_writable_system_settings(ctx).await?;
		self.metadata.format_for_display(ctx, &writable).await
	}

	/// Writable settings of the current user
	pub async fn get_user_settings(&self, ctx: &SettingsContext) -> ClResult<Vec<PluginSettingsMetadata>> {
		ctx.actor().check_is_not_anonymous()?;
		let writable = self.plugins_settings.all_writable_user_settings(ctx).await?;
		self.metadata.format_for_display(ctx, &writable).await
	}

	/// Applies submitted system settings, super users only
	pub async fn set_system_settings(&self, ctx: &SettingsContext, values: &IncomingValues) -> ClResult<()> {
		ctx.actor().check_has_super_user_access()?;
		let collections = self.plugins_settings.system_collections(ctx).await?;
		self.metadata
			.apply_incoming_values(ctx, &collections, values, |s| s.kind() == SettingKind::System)
			.await
	}

	/// Applies submitted settings of the current user
	pub async fn set_user_settings(&self, ctx: &SettingsContext, values: &IncomingValues) -> ClResult<()> {
		ctx.actor().check_is_not_anonymous()?;
		let collections = self.plugins_settings.user_collections(ctx).await?;
		self.metadata
			.apply_incoming_values(ctx, &collections, values, |s| s.kind() == SettingKind::User)
			.await
	}

	/// Writable settings of a measurable, admins of the measurable only
	pub async fn get_measurable_settings(
		&self,
		ctx: &SettingsContext,
		site_id: SiteId,
	) -> ClResult<Vec<PluginSettingsMetadata>> {
		check_admin_access(ctx.actor(), site_id)?;
		let collections =
			self.plugins_settings.provider().all_measurable_settings(ctx, Some(site_id), None).await?;
		let writable = writable_settings(&collections);
		self.metadata.format_for_display(ctx, &writable).await
	}

	/// Applies submitted measurable settings and properties, admins of the measurable only
	pub async fn set_measurable_settings(
		&self,
		ctx: &SettingsContext,
		site_id: SiteId,
		values: &IncomingValues,
	) -> ClResult<()> {
		check_admin_access(ctx.actor(), site_id)?;
		let collections =
			self.plugins_settings.provider().all_measurable_settings(ctx, Some(site_id), None).await?;
		self.metadata.apply_incoming_values(ctx, &collections, values, |_| true).await
	}
}

fn check_admin_access(actor: &Actor, site_id: SiteId) -> ClResult<()> {
	if actor.has_admin_access(site_id) {
		Ok(())
	} else {
		Err(Error::PermissionDenied(format!("You need admin access to measurable {}", site_id)))
	}
}

// vim: ts=4
