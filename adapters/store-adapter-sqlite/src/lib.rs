//! SQLite implementation of the settings store adapter.

use async_trait::async_trait;
use sqlx::sqlite::{self, SqlitePool};
use std::path::{Path, PathBuf};

use knobs_types::{
	prelude::*,
	store_adapter::{
		CreateSiteData, PluginSettingRow, SettingsStoreAdapter, SiteFields, SiteSettingRow,
	},
};

mod option;
mod plugin_setting;
mod schema;
mod site;
mod site_setting;
mod utils;

use schema::init_db;

/// Environment variable holding the database file path
pub const DB_PATH_ENV: &str = "KNOBS_DB_PATH";
const DEFAULT_DB_PATH: &str = "./data/settings.db";

/// Store options
#[derive(Debug, Clone)]
pub struct StoreOpts {
	pub db_path: PathBuf,
	pub max_connections: u32,
}

impl Default for StoreOpts {
	fn default() -> Self {
		Self { db_path: PathBuf::from(DEFAULT_DB_PATH), max_connections: 5 }
	}
}

impl StoreOpts {
	/// Reads the options from the environment
	pub fn from_env() -> Self {
		let db_path = std::env::var(DB_PATH_ENV)
			.map_or_else(|_| PathBuf::from(DEFAULT_DB_PATH), PathBuf::from);
		Self { db_path, ..Self::default() }
	}
}

#[derive(Debug)]
pub struct SettingsStoreSqlite {
	db: SqlitePool,
}

impl SettingsStoreSqlite {
	pub async fn new(path: impl AsRef<Path>) -> ClResult<Self> {
		Self::with_opts(&StoreOpts { db_path: path.as_ref().to_path_buf(), ..StoreOpts::default() })
			.await
	}

	pub async fn with_opts(opts: &StoreOpts) -> ClResult<Self> {
		if let Some(dir) = opts.db_path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
			tokio::fs::create_dir_all(dir).await?;
		}

		let conn_opts = sqlite::SqliteConnectOptions::new()
			.filename(&opts.db_path)
			.create_if_missing(true)
			.journal_mode(sqlite::SqliteJournalMode::Wal);
		let db = sqlite::SqlitePoolOptions::new()
			.max_connections(opts.max_connections)
			.connect_with(conn_opts)
			.await
			.inspect_err(|err| warn!("DB: {:#?}", err))
			.or(Err(Error::DbError))?;

		init_db(&db)
			.await
			.inspect_err(|err| warn!("DB: {:#?}", err))
			.or(Err(Error::DbError))?;

		info!("settings store opened at {}", opts.db_path.display());
		Ok(Self { db })
	}
}

#[async_trait]
impl SettingsStoreAdapter for SettingsStoreSqlite {
	// Options
	//*********
	async fn read_option(&self, name: &str) -> ClResult<Option<Box<str>>> {
		option::read(&self.db, name).await
	}

	async fn update_option(&self, name: &str, value: &str) -> ClResult<()> {
		option::update(&self.db, name, value).await
	}

	async fn delete_option(&self, name: &str) -> ClResult<()> {
		option::delete(&self.db, name).await
	}

	async fn list_options(&self, prefix: &str, suffix: &str) -> ClResult<Vec<(Box<str>, Box<str>)>> {
		option::list(&self.db, prefix, suffix).await
	}

	// Plugin settings
	//*****************
	async fn list_plugin_settings(
		&self,
		plugin_name: &str,
		user_login: &str,
	) -> ClResult<Vec<PluginSettingRow>> {
		plugin_setting::list(&self.db, plugin_name, user_login).await
	}

	async fn replace_plugin_settings(
		&self,
		plugin_name: &str,
		user_login: &str,
		deleted: &[Box<str>],
		rows: &[PluginSettingRow],
	) -> ClResult<()> {
		plugin_setting::replace(&self.db, plugin_name, user_login, deleted, rows).await
	}

	async fn delete_plugin_settings(&self, plugin_name: &str, user_login: &str) -> ClResult<()> {
		plugin_setting::delete(&self.db, plugin_name, user_login).await
	}

	async fn delete_plugin_settings_for_user(&self, user_login: &str) -> ClResult<u64> {
		plugin_setting::delete_for_user(&self.db, user_login).await
	}

	// Measurable settings
	//*********************
	async fn list_site_settings(
		&self,
		site_id: SiteId,
		plugin_name: &str,
	) -> ClResult<Vec<SiteSettingRow>> {
		site_setting::list(&self.db, site_id, plugin_name).await
	}

	async fn replace_site_settings(
		&self,
		site_id: SiteId,
		plugin_name: &str,
		deleted: &[Box<str>],
		values: &[(Box<str>, Box<str>)],
	) -> ClResult<()> {
		site_setting::replace(&self.db, site_id, plugin_name, deleted, values).await
	}

	async fn delete_site_settings(&self, site_id: SiteId, plugin_name: &str) -> ClResult<()> {
		site_setting::delete(&self.db, site_id, plugin_name).await
	}

	// Sites
	//*******
	async fn create_site(&self, data: &CreateSiteData<'_>) -> ClResult<SiteId> {
		site::create(&self.db, data).await
	}

	async fn read_site(&self, site_id: SiteId) -> ClResult<Option<SiteFields>> {
		site::read(&self.db, site_id).await
	}

	async fn read_site_type(&self, site_id: SiteId) -> ClResult<Option<Box<str>>> {
		site::read_type(&self.db, site_id).await
	}

	async fn update_site(
		&self,
		site_id: SiteId,
		fields: &[(Box<str>, Option<Box<str>>)],
	) -> ClResult<()> {
		site::update(&self.db, site_id, fields).await
	}

	async fn update_site_with_urls(
		&self,
		site_id: SiteId,
		fields: &[(Box<str>, Option<Box<str>>)],
		alias_urls: Option<&[Box<str>]>,
	) -> ClResult<()> {
		site::update_with_urls(&self.db, site_id, fields, alias_urls).await
	}

	async fn list_site_alias_urls(&self, site_id: SiteId) -> ClResult<Vec<Box<str>>> {
		site::list_alias_urls(&self.db, site_id).await
	}

	async fn replace_site_alias_urls(&self, site_id: SiteId, urls: &[Box<str>]) -> ClResult<()> {
		site::replace_alias_urls(&self.db, site_id, urls).await
	}
}

// vim: ts=4
