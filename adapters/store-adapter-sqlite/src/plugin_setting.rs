//! Plugin settings rows, system wide (empty login) and per user

use sqlx::{Row, SqlitePool};
use std::collections::BTreeSet;

use crate::utils::db_res;
use knobs_types::{prelude::*, store_adapter::PluginSettingRow};

pub(crate) async fn list(
	db: &SqlitePool,
	plugin_name: &str,
	user_login: &str,
) -> ClResult<Vec<PluginSettingRow>> {
	let rows = db_res(
		sqlx::query(
			"SELECT setting_name, value_index, setting_value FROM plugin_setting
			WHERE plugin_name = ? AND user_login = ?
			ORDER BY setting_name, value_index",
		)
		.bind(plugin_name)
		.bind(user_login)
		.fetch_all(db)
		.await,
	)?;

	let mut res = Vec::with_capacity(rows.len());
	for row in rows {
		let setting_name: String = db_res(row.try_get("setting_name"))?;
		let value_index: i64 = db_res(row.try_get("value_index"))?;
		let setting_value: String = db_res(row.try_get("setting_value"))?;
		res.push(PluginSettingRow {
			setting_name: setting_name.into(),
			value_index: u32::try_from(value_index).map_err(|_| Error::DbError)?,
			setting_value: setting_value.into(),
		});
	}
	Ok(res)
}

pub(crate) async fn replace(
	db: &SqlitePool,
	plugin_name: &str,
	user_login: &str,
	deleted: &[Box<str>],
	rows: &[PluginSettingRow],
) -> ClResult<()> {
	let mut tx = db_res(db.begin().await)?;

	let names: BTreeSet<&str> = deleted
		.iter()
		.map(AsRef::as_ref)
		.chain(rows.iter().map(|row| row.setting_name.as_ref()))
		.collect();
	for name in names {
		db_res(
			sqlx::query(
				"DELETE FROM plugin_setting WHERE plugin_name = ? AND user_login = ? AND setting_name = ?",
			)
			.bind(plugin_name)
			.bind(user_login)
			.bind(name)
			.execute(&mut *tx)
			.await,
		)?;
	}

	for row in rows {
		db_res(
			sqlx::query(
				"INSERT OR REPLACE INTO plugin_setting
				(plugin_name, user_login, setting_name, value_index, setting_value)
				VALUES (?, ?, ?, ?, ?)",
			)
			.bind(plugin_name)
			.bind(user_login)
			.bind(row.setting_name.as_ref())
			.bind(i64::from(row.value_index))
			.bind(row.setting_value.as_ref())
			.execute(&mut *tx)
			.await,
		)?;
	}

	db_res(tx.commit().await)?;
	Ok(())
}

pub(crate) async fn delete(db: &SqlitePool, plugin_name: &str, user_login: &str) -> ClResult<()> {
	db_res(
		sqlx::query("DELETE FROM plugin_setting WHERE plugin_name = ? AND user_login = ?")
			.bind(plugin_name)
			.bind(user_login)
			.execute(db)
			.await,
	)?;
	Ok(())
}

pub(crate) async fn delete_for_user(db: &SqlitePool, user_login: &str) -> ClResult<u64> {
	let res = db_res(
		sqlx::query("DELETE FROM plugin_setting WHERE user_login = ?")
			.bind(user_login)
			.execute(db)
			.await,
	)?;
	Ok(res.rows_affected())
}

// vim: ts=4
