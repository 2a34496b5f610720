//! Measurable settings rows

use sqlx::{Row, SqlitePool};

use crate::utils::db_res;
use knobs_types::{prelude::*, store_adapter::SiteSettingRow};

pub(crate) async fn list(
	db: &SqlitePool,
	site_id: SiteId,
	plugin_name: &str,
) -> ClResult<Vec<SiteSettingRow>> {
	let rows = db_res(
		sqlx::query(
			"SELECT setting_name, setting_value FROM site_setting
			WHERE idsite = ? AND plugin_name = ? ORDER BY setting_name",
		)
		.bind(i64::from(site_id.0))
		.bind(plugin_name)
		.fetch_all(db)
		.await,
	)?;

	let mut res = Vec::with_capacity(rows.len());
	for row in rows {
		let setting_name: String = db_res(row.try_get("setting_name"))?;
		let setting_value: String = db_res(row.try_get("setting_value"))?;
		res.push(SiteSettingRow { setting_name: setting_name.into(), setting_value: setting_value.into() });
	}
	Ok(res)
}

pub(crate) async fn replace(
	db: &SqlitePool,
	site_id: SiteId,
	plugin_name: &str,
	deleted: &[Box<str>],
	values: &[(Box<str>, Box<str>)],
) -> ClResult<()> {
	let mut tx = db_res(db.begin().await)?;

	for name in deleted {
		db_res(
			sqlx::query("DELETE FROM site_setting WHERE idsite = ? AND plugin_name = ? AND setting_name = ?")
				.bind(i64::from(site_id.0))
				.bind(plugin_name)
				.bind(name.as_ref())
				.execute(&mut *tx)
				.await,
		)?;
	}

	for (name, value) in values {
		db_res(
			sqlx::query(
				"INSERT OR REPLACE INTO site_setting (idsite, plugin_name, setting_name, setting_value)
				VALUES (?, ?, ?, ?)",
			)
			.bind(i64::from(site_id.0))
			.bind(plugin_name)
			.bind(name.as_ref())
			.bind(value.as_ref())
			.execute(&mut *tx)
			.await,
		)?;
	}

	db_res(tx.commit().await)?;
	Ok(())
}

pub(crate) async fn delete(db: &SqlitePool, site_id: SiteId, plugin_name: &str) -> ClResult<()> {
	db_res(
		sqlx::query("DELETE FROM site_setting WHERE idsite = ? AND plugin_name = ?")
			.bind(i64::from(site_id.0))
			.bind(plugin_name)
			.execute(db)
			.await,
	)?;
	Ok(())
}

// vim: ts=4
