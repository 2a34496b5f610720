//! Site rows and their alias URLs

use sqlx::{Row, SqliteConnection, SqlitePool};

use crate::utils::db_res;
use knobs_types::{
	prelude::*,
	store_adapter::{CreateSiteData, SITE_COLUMNS, SiteFields},
};

pub(crate) async fn create(db: &SqlitePool, data: &CreateSiteData<'_>) -> ClResult<SiteId> {
	let res = db_res(
		sqlx::query("INSERT INTO site (name, main_url, type) VALUES (?, ?, ?)")
			.bind(data.name)
			.bind(data.main_url)
			.bind(data.typ)
			.execute(db)
			.await,
	)?;
	let id = u32::try_from(res.last_insert_rowid()).map_err(|_| Error::DbError)?;
	Ok(SiteId(id))
}

pub(crate) async fn read(db: &SqlitePool, site_id: SiteId) -> ClResult<Option<SiteFields>> {
	let columns = SITE_COLUMNS.iter().map(|c| format!("\"{}\"", c)).collect::<Vec<_>>().join(", ");
	let query = format!("SELECT {} FROM site WHERE idsite = ?", columns);
	let row = db_res(sqlx::query(&query).bind(i64::from(site_id.0)).fetch_optional(db).await)?;

	let Some(row) = row else {
		return Ok(None);
	};

	let mut fields = SiteFields::new();
	for column in SITE_COLUMNS {
		let value: Option<String> = db_res(row.try_get(*column))?;
		fields.insert((*column).into(), value.map(Into::into));
	}
	Ok(Some(fields))
}

pub(crate) async fn read_type(db: &SqlitePool, site_id: SiteId) -> ClResult<Option<Box<str>>> {
	let row = db_res(
		sqlx::query("SELECT type FROM site WHERE idsite = ?")
			.bind(i64::from(site_id.0))
			.fetch_optional(db)
			.await,
	)?;

	match row {
		Some(row) => {
			let typ: Option<String> = db_res(row.try_get("type"))?;
			Ok(typ.filter(|t| !t.is_empty()).map(Into::into))
		}
		None => Ok(None),
	}
}

async fn update_in(
	conn: &mut SqliteConnection,
	site_id: SiteId,
	fields: &[(Box<str>, Option<Box<str>>)],
) -> ClResult<()> {
	if fields.is_empty() {
		return Ok(());
	}

	let mut query = sqlx::QueryBuilder::<sqlx::Sqlite>::new("UPDATE site SET ");
	for (i, (column, value)) in fields.iter().enumerate() {
		if !SITE_COLUMNS.contains(&column.as_ref()) {
			return Err(Error::InvalidValue(format!("Unknown site column \"{}\"", column)));
		}
		if i > 0 {
			query.push(", ");
		}
		query.push(format!("\"{}\" = ", column));
		query.push_bind(value.as_deref().map(str::to_owned));
	}
	query.push(" WHERE idsite = ").push_bind(i64::from(site_id.0));

	let res = db_res(query.build().execute(&mut *conn).await)?;
	if res.rows_affected() == 0 {
		return Err(Error::NotFound);
	}
	Ok(())
}

async fn replace_alias_urls_in(
	conn: &mut SqliteConnection,
	site_id: SiteId,
	urls: &[Box<str>],
) -> ClResult<()> {
	db_res(
		sqlx::query("DELETE FROM site_url WHERE idsite = ?")
			.bind(i64::from(site_id.0))
			.execute(&mut *conn)
			.await,
	)?;
	for url in urls {
		db_res(
			sqlx::query("INSERT OR IGNORE INTO site_url (idsite, url) VALUES (?, ?)")
				.bind(i64::from(site_id.0))
				.bind(url.as_ref())
				.execute(&mut *conn)
				.await,
		)?;
	}
	Ok(())
}

pub(crate) async fn update(
	db: &SqlitePool,
	site_id: SiteId,
	fields: &[(Box<str>, Option<Box<str>>)],
) -> ClResult<()> {
	let mut tx = db_res(db.begin().await)?;
	update_in(&mut *tx, site_id, fields).await?;
	db_res(tx.commit().await)?;
	Ok(())
}

/// Updates the site row and replaces its alias URLs in one transaction
pub(crate) async fn update_with_urls(
	db: &SqlitePool,
	site_id: SiteId,
	fields: &[(Box<str>, Option<Box<str>>)],
	alias_urls: Option<&[Box<str>]>,
) -> ClResult<()> {
	let mut tx = db_res(db.begin().await)?;

	let exists = db_res(
		sqlx::query("SELECT 1 FROM site WHERE idsite = ?")
			.bind(i64::from(site_id.0))
			.fetch_optional(&mut *tx)
			.await,
	)?;
	if exists.is_none() {
		return Err(Error::NotFound);
	}

	update_in(&mut *tx, site_id, fields).await?;
	if let Some(urls) = alias_urls {
		replace_alias_urls_in(&mut *tx, site_id, urls).await?;
	}

	db_res(tx.commit().await)?;
	Ok(())
}

pub(crate) async fn list_alias_urls(db: &SqlitePool, site_id: SiteId) -> ClResult<Vec<Box<str>>> {
	let rows = db_res(
		sqlx::query("SELECT url FROM site_url WHERE idsite = ? ORDER BY rowid")
			.bind(i64::from(site_id.0))
			.fetch_all(db)
			.await,
	)?;

	let mut urls = Vec::with_capacity(rows.len());
	for row in rows {
		let url: String = db_res(row.try_get("url"))?;
		urls.push(url.into());
	}
	Ok(urls)
}

pub(crate) async fn replace_alias_urls(
	db: &SqlitePool,
	site_id: SiteId,
	urls: &[Box<str>],
) -> ClResult<()> {
	let mut tx = db_res(db.begin().await)?;
	replace_alias_urls_in(&mut *tx, site_id, urls).await?;
	db_res(tx.commit().await)?;
	Ok(())
}

// vim: ts=4
