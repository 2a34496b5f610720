//! Removal of all settings of a user

use crate::collection::CollectionScope;
use crate::prelude::*;
use crate::provider::SettingsProvider;

/// Removes every stored setting of `login` across all plugins
///
/// Collections of activated plugins are cleared first so the request's memoized
/// storages stay consistent, then the remaining rows (of deactivated or removed
/// plugins) are deleted in bulk. Returns the number of bulk deleted rows.
pub async fn remove_all_user_settings_for_user(
	ctx: &SettingsContext,
	provider: &SettingsProvider,
	login: &str,
) -> ClResult<u64> {
	if login.is_empty() {
		return Err(Error::InvalidValue("No userLogin specified".into()));
	}
	if !ctx.actor().is_super_user_or_the_user(login) {
		return Err(Error::PermissionDenied(
			"You do not have the permission to remove the settings of a different user".into(),
		));
	}

	let collections =
		provider.collections_of_kind(ctx, &CollectionScope::User { login: login.into() }).await?;
	for collection in collections.values() {
		collection.delete_all_values().await?;
	}

	let removed = ctx.adapter().delete_plugin_settings_for_user(login).await?;
	ctx.env().backend_cache.clear();
	ctx.invalidate();
	info!("removed all settings of user {} ({} remaining rows)", login, removed);
	Ok(removed)
}

// vim: ts=4
