//! Database schema initialization
//!
//! Creates the option, plugin setting, measurable setting and site tables.

use sqlx::SqlitePool;

/// Initialize the database schema with all required tables and indexes
pub(crate) async fn init_db(db: &SqlitePool) -> Result<(), sqlx::Error> {
	let mut tx = db.begin().await?;

	// Options
	//*********
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS options (
		option_name text NOT NULL,
		option_value text NOT NULL,
		PRIMARY KEY(option_name)
	)",
	)
	.execute(&mut *tx)
	.await?;

	// Plugin settings
	//*****************
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS plugin_setting (
		plugin_name text NOT NULL,
		user_login text NOT NULL DEFAULT '',
		setting_name text NOT NULL,
		value_index integer NOT NULL DEFAULT 0,
		setting_value text NOT NULL,
		PRIMARY KEY(plugin_name, user_login, setting_name, value_index)
	)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query("CREATE INDEX IF NOT EXISTS idx_plugin_setting_login ON plugin_setting(user_login)")
		.execute(&mut *tx)
		.await?;

	// Measurable settings
	//*********************
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS site_setting (
		idsite integer NOT NULL,
		plugin_name text NOT NULL,
		setting_name text NOT NULL,
		setting_value text NOT NULL,
		PRIMARY KEY(idsite, plugin_name, setting_name)
	)",
	)
	.execute(&mut *tx)
	.await?;

	// Sites
	//*******
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS site (
		idsite integer PRIMARY KEY AUTOINCREMENT,
		name text NOT NULL,
		main_url text NOT NULL,
		ecommerce text DEFAULT '0',
		sitesearch text DEFAULT '1',
		sitesearch_keyword_parameters text DEFAULT '',
		sitesearch_category_parameters text DEFAULT '',
		excluded_ips text DEFAULT '',
		excluded_parameters text DEFAULT '',
		excluded_user_agents text DEFAULT '',
		exclude_unknown_urls text DEFAULT '0',
		keep_url_fragment text DEFAULT '0',
		timezone text DEFAULT 'UTC',
		currency text DEFAULT 'USD',
		type text NOT NULL DEFAULT 'website',
		\"group\" text DEFAULT '',
		ts_created datetime DEFAULT (unixepoch())
	)",
	)
	.execute(&mut *tx)
	.await?;

	sqlx::query(
		"CREATE TABLE IF NOT EXISTS site_url (
		idsite integer NOT NULL,
		url text NOT NULL,
		PRIMARY KEY(idsite, url)
	)",
	)
	.execute(&mut *tx)
	.await?;

	tx.commit().await?;

	Ok(())
}

// vim: ts=4
