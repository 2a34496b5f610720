//! Adapter that stores the raw rows behind every settings backend.
//!
//! Backends in the engine translate between setting values and these rows; the
//! adapter itself knows nothing about settings semantics.

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt::Debug;

use crate::prelude::*;

/// Name of the option table prefix used by legacy plugin settings
pub const LEGACY_PLUGIN_OPTION_PREFIX: &str = "Plugin_";
pub const LEGACY_PLUGIN_OPTION_SUFFIX: &str = "_Settings";

/// Site row columns a measurable property may map onto
pub const SITE_COLUMNS: &[&str] = &[
	"name",
	"main_url",
	"ecommerce",
	"sitesearch",
	"sitesearch_keyword_parameters",
	"sitesearch_category_parameters",
	"excluded_ips",
	"excluded_parameters",
	"excluded_user_agents",
	"exclude_unknown_urls",
	"keep_url_fragment",
	"timezone",
	"currency",
	"type",
	"group",
];

/// Site columns holding a comma separated list
pub const COMMA_SEPARATED_SITE_COLUMNS: &[&str] = &[
	"sitesearch_keyword_parameters",
	"sitesearch_category_parameters",
	"excluded_user_agents",
	"excluded_parameters",
	"excluded_ips",
];

/// One row of the plugin settings table
#[derive(Debug, Clone, PartialEq)]
pub struct PluginSettingRow {
	pub setting_name: Box<str>,
	/// 0 for a scalar (or an empty list), 1.. for the elements of a list
	pub value_index: u32,
	/// JSON encoded value
	pub setting_value: Box<str>,
}

/// One row of the measurable settings table
#[derive(Debug, Clone, PartialEq)]
pub struct SiteSettingRow {
	pub setting_name: Box<str>,
	/// JSON encoded value
	pub setting_value: Box<str>,
}

/// Column values of a site row, `None` for SQL NULL
pub type SiteFields = HashMap<Box<str>, Option<Box<str>>>;

/// Options for creating a site row
#[derive(Debug, Default)]
pub struct CreateSiteData<'a> {
	pub name: &'a str,
	pub main_url: &'a str,
	pub typ: &'a str,
}

/// A settings store adapter
///
/// Every store implementation is required to implement this trait. All writes
/// of one call are expected to be atomic.
#[async_trait]
pub trait SettingsStoreAdapter: Debug + Send + Sync {
	/// # Option table
	/// Reads a key-value option row
	async fn read_option(&self, name: &str) -> ClResult<Option<Box<str>>>;

	/// Creates or overwrites an option row
	async fn update_option(&self, name: &str, value: &str) -> ClResult<()>;

	/// Deletes an option row, a missing row is not an error
	async fn delete_option(&self, name: &str) -> ClResult<()>;

	/// Lists option rows whose name starts with `prefix` and ends with `suffix`
	async fn list_options(&self, prefix: &str, suffix: &str) -> ClResult<Vec<(Box<str>, Box<str>)>>;

	/// # Plugin settings table
	/// Lists all rows of a plugin and login, ordered by name and value index
	async fn list_plugin_settings(
		&self,
		plugin_name: &str,
		user_login: &str,
	) -> ClResult<Vec<PluginSettingRow>>;

	/// Deletes the rows of `deleted` names and replaces all rows of every name present in `rows`
	async fn replace_plugin_settings(
		&self,
		plugin_name: &str,
		user_login: &str,
		deleted: &[Box<str>],
		rows: &[PluginSettingRow],
	) -> ClResult<()>;

	/// Deletes all rows of a plugin and login
	async fn delete_plugin_settings(&self, plugin_name: &str, user_login: &str) -> ClResult<()>;

	/// Deletes all rows of a login across every plugin, returns the number of deleted rows
	async fn delete_plugin_settings_for_user(&self, user_login: &str) -> ClResult<u64>;

	/// # Measurable settings table
	/// Lists all rows of a site and plugin
	async fn list_site_settings(
		&self,
		site_id: SiteId,
		plugin_name: &str,
	) -> ClResult<Vec<SiteSettingRow>>;

	/// Deletes the rows of `deleted` names and upserts every row in `values`
	async fn replace_site_settings(
		&self,
		site_id: SiteId,
		plugin_name: &str,
		deleted: &[Box<str>],
		values: &[(Box<str>, Box<str>)],
	) -> ClResult<()>;

	/// Deletes all rows of a site and plugin
	async fn delete_site_settings(&self, site_id: SiteId, plugin_name: &str) -> ClResult<()>;

	/// # Sites
	/// Creates a site row and returns its ID
	async fn create_site(&self, data: &CreateSiteData<'_>) -> ClResult<SiteId>;

	/// Reads the columns of a site row, `None` if the site does not exist
	async fn read_site(&self, site_id: SiteId) -> ClResult<Option<SiteFields>>;

	/// Reads the measurable type of a site
	async fn read_site_type(&self, site_id: SiteId) -> ClResult<Option<Box<str>>>;

	/// Updates columns of a site row. Unknown columns are rejected.
	async fn update_site(&self, site_id: SiteId, fields: &[(Box<str>, Option<Box<str>>)]) -> ClResult<()>;

	/// Updates columns of a site row and, when `alias_urls` is given, replaces
	/// its alias URLs. Both writes commit together or not at all; a missing site
	/// is `NotFound` and leaves nothing behind.
	async fn update_site_with_urls(
		&self,
		site_id: SiteId,
		fields: &[(Box<str>, Option<Box<str>>)],
		alias_urls: Option<&[Box<str>]>,
	) -> ClResult<()>;

	/// Lists the alias URLs of a site
	async fn list_site_alias_urls(&self, site_id: SiteId) -> ClResult<Vec<Box<str>>>;

	/// Replaces all alias URLs of a site
	async fn replace_site_alias_urls(&self, site_id: SiteId, urls: &[Box<str>]) -> ClResult<()>;
}

// vim: ts=4
