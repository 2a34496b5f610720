//! Utility functions for database operations

use knobs_types::prelude::*;

/// Log database errors
pub(crate) fn inspect(err: &sqlx::Error) {
	warn!("DB: {:#?}", err);
}

/// Map a sqlx result to a `ClResult`, logging the error
pub(crate) fn db_res<T>(res: Result<T, sqlx::Error>) -> ClResult<T> {
	match res {
		Ok(v) => Ok(v),
		Err(sqlx::Error::RowNotFound) => Err(Error::NotFound),
		Err(err) => {
			inspect(&err);
			Err(Error::DbError)
		}
	}
}

/// Escape `%`, `_` and the escape character itself for a `LIKE ... ESCAPE '\'` pattern
pub(crate) fn escape_like(s: &str) -> String {
	let mut res = String::with_capacity(s.len());
	for c in s.chars() {
		if matches!(c, '%' | '_' | '\\') {
			res.push('\\');
		}
		res.push(c);
	}
	res
}


// vim: ts=4
