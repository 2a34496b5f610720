//! Test environment builders and helpers
//!
//! Every test gets its own SQLite database in a temporary directory. The
//! TempDir is returned alongside the environment so the database lives until
//! the end of the test.

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Arc;
use tempfile::TempDir;

use knobs::config::ConfigSource;
use knobs::plugin::StaticPluginManager;
use knobs::plugins::builtin_plugins;
use knobs::prelude::*;
use knobs::provider::SettingsProvider;
use knobs::types::store_adapter::{
	CreateSiteData, PluginSettingRow, SettingsStoreAdapter, SiteFields, SiteSettingRow,
};
use knobs_store_adapter_sqlite::SettingsStoreSqlite;

pub const EXAMPLE: &str = "ExampleSettingsPlugin";
pub const WEBSITE: &str = "WebsiteMeasurable";

pub fn setup_test_logging() {
	let _ = tracing_subscriber::fmt()
		.with_test_writer()
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
		.try_init();
}

pub struct TestEnv {
	pub env: Arc<SettingsEnv>,
	pub adapter: Arc<SettingsStoreSqlite>,
	pub provider: SettingsProvider,
	_tmp_dir: TempDir,
}

impl TestEnv {
	pub fn ctx(&self, actor: Actor) -> SettingsContext {
		SettingsContext::new(self.env.clone(), AccessContext::new(actor))
	}

	pub fn tracker_ctx(&self, actor: Actor) -> SettingsContext {
		SettingsContext::new(self.env.clone(), AccessContext::tracker(actor))
	}

	pub async fn create_site(&self, name: &str, main_url: &str, typ: &str) -> SiteId {
		self.adapter.create_site(&CreateSiteData { name, main_url, typ }).await.unwrap()
	}
}

pub fn provider() -> SettingsProvider {
	let mut manager = StaticPluginManager::new();
	for plugin in builtin_plugins() {
		manager = manager.register(plugin, true);
	}
	SettingsProvider::new(Arc::new(manager))
}

/// Builds a test environment with the built-in plugins activated
pub async fn create_test_env() -> TestEnv {
	create_test_env_with(|env| env).await
}

pub async fn create_test_env_with(f: impl FnOnce(SettingsEnv) -> SettingsEnv) -> TestEnv {
	setup_test_logging();
	let tmp_dir = TempDir::new().unwrap();
	let adapter = Arc::new(SettingsStoreSqlite::new(tmp_dir.path().join("settings.db")).await.unwrap());
	let env = f(SettingsEnv::new(adapter.clone()));
	TestEnv { env: Arc::new(env), adapter, provider: provider(), _tmp_dir: tmp_dir }
}

pub fn with_config(config: Arc<dyn ConfigSource>) -> impl FnOnce(SettingsEnv) -> SettingsEnv {
	move |env| env.with_config(config)
}

/// Store that reads nothing and fails every write
#[derive(Debug, Default)]
pub struct FailingStore;

#[async_trait]
impl SettingsStoreAdapter for FailingStore {
	async fn read_option(&self, _name: &str) -> ClResult<Option<Box<str>>> {
		Ok(None)
	}

	async fn update_option(&self, _name: &str, _value: &str) -> ClResult<()> {
		Err(Error::DbError)
	}

	async fn delete_option(&self, _name: &str) -> ClResult<()> {
		Err(Error::DbError)
	}

	async fn list_options(&self, _prefix: &str, _suffix: &str) -> ClResult<Vec<(Box<str>, Box<str>)>> {
		Ok(Vec::new())
	}

	async fn list_plugin_settings(
		&self,
		_plugin_name: &str,
		_user_login: &str,
	) -> ClResult<Vec<PluginSettingRow>> {
		Ok(Vec::new())
	}

	async fn replace_plugin_settings(
		&self,
		_plugin_name: &str,
		_user_login: &str,
		_deleted: &[Box<str>],
		_rows: &[PluginSettingRow],
	) -> ClResult<()> {
		Err(Error::DbError)
	}

	async fn delete_plugin_settings(&self, _plugin_name: &str, _user_login: &str) -> ClResult<()> {
		Err(Error::DbError)
	}

	async fn delete_plugin_settings_for_user(&self, _user_login: &str) -> ClResult<u64> {
		Err(Error::DbError)
	}

	async fn list_site_settings(&self, _site_id: SiteId, _plugin_name: &str) -> ClResult<Vec<SiteSettingRow>> {
		Ok(Vec::new())
	}

	async fn replace_site_settings(
		&self,
		_site_id: SiteId,
		_plugin_name: &str,
		_deleted: &[Box<str>],
		_values: &[(Box<str>, Box<str>)],
	) -> ClResult<()> {
		Err(Error::DbError)
	}

	async fn delete_site_settings(&self, _site_id: SiteId, _plugin_name: &str) -> ClResult<()> {
		Err(Error::DbError)
	}

	async fn create_site(&self, _data: &CreateSiteData<'_>) -> ClResult<SiteId> {
		Err(Error::DbError)
	}

	async fn read_site(&self, _site_id: SiteId) -> ClResult<Option<SiteFields>> {
		Ok(None)
	}

	async fn read_site_type(&self, _site_id: SiteId) -> ClResult<Option<Box<str>>> {
		Ok(None)
	}

	async fn update_site(&self, _site_id: SiteId, _fields: &[(Box<str>, Option<Box<str>>)]) -> ClResult<()> {
		Err(Error::DbError)
	}

	async fn update_site_with_urls(
		&self,
		_site_id: SiteId,
		_fields: &[(Box<str>, Option<Box<str>>)],
		_alias_urls: Option<&[Box<str>]>,
	) -> ClResult<()> {
		Err(Error::DbError)
	}

	async fn list_site_alias_urls(&self, _site_id: SiteId) -> ClResult<Vec<Box<str>>> {
		Ok(Vec::new())
	}

	async fn replace_site_alias_urls(&self, _site_id: SiteId, _urls: &[Box<str>]) -> ClResult<()> {
		Err(Error::DbError)
	}
}

// vim: ts=4
