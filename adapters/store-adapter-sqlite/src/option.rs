//! Key-value option rows

use sqlx::{Row, SqlitePool};

use crate::utils::{db_res, escape_like};
use knobs_types::prelude::*;

pub(crate) async fn read(db: &SqlitePool, name: &str) -> ClResult<Option<Box<str>>> {
	let row = db_res(
		sqlx::query("SELECT option_value FROM options WHERE option_name = ?")
			.bind(name)
			.fetch_optional(db)
			.await,
	)?;

	match row {
		Some(row) => Ok(Some(db_res(row.try_get::<String, _>("option_value"))?.into())),
		None => Ok(None),
	}
}

pub(crate) async fn update(db: &SqlitePool, name: &str, value: &str) -> ClResult<()> {
	db_res(
		sqlx::query("INSERT OR REPLACE INTO options (option_name, option_value) VALUES (?, ?)")
			.bind(name)
			.bind(value)
			.execute(db)
			.await,
	)?;
	Ok(())
}

pub(crate) async fn delete(db: &SqlitePool, name: &str) -> ClResult<()> {
	db_res(sqlx::query("DELETE FROM options WHERE option_name = ?").bind(name).execute(db).await)?;
	Ok(())
}

pub(crate) async fn list(
	db: &SqlitePool,
	prefix: &str,
	suffix: &str,
) -> ClResult<Vec<(Box<str>, Box<str>)>> {
	let pattern = format!("{}%{}", escape_like(prefix), escape_like(suffix));
	let rows = db_res(
		sqlx::query(
			"SELECT option_name, option_value FROM options
			WHERE option_name LIKE ? ESCAPE '\\' ORDER BY option_name",
		)
		.bind(pattern)
		.fetch_all(db)
		.await,
	)?;

	let mut options = Vec::with_capacity(rows.len());
	for row in rows {
		let name: String = db_res(row.try_get("option_name"))?;
		let value: String = db_res(row.try_get("option_value"))?;
		options.push((name.into(), value.into()));
	}
	Ok(options)
}

// vim: ts=4
