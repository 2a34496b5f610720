//! Error taxonomy of the settings registry.
//!
//! Structural errors (`InvalidName`, `DuplicateName`, `InvalidScope`,
//! `NoSuchMeasurableType`) are raised while plugins declare their settings and
//! indicate a programming bug. Per-value errors (`PermissionDenied`,
//! `InvalidValue`) are raised lazily on writes. `DbError` covers every backend
//! I/O failure and is never retried here.

use std::fmt;

use crate::types::SiteId;

pub type ClResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	NotFound,
	/// Setting name contains characters outside `[A-Za-z0-9_]`
	InvalidName(Box<str>),
	/// Two settings of one collection share a name
	DuplicateName { scope: Box<str>, name: Box<str> },
	/// A setting (or key) does not belong to the collection (or storage) it was given to
	InvalidScope(String),
	PermissionDenied(String),
	InvalidValue(String),
	NoSuchMeasurableType(Option<SiteId>),
	/// Backend I/O failure (load, save or delete)
	DbError,
	/// Batch save failed, reported to the end user without details
	SaveFailed,
	ConfigError(String),

	// externals
	Io(std::io::Error),
}

impl Error {
	/// Prefixes the message of a per-value error, used to name the offending setting
	pub fn with_prefix(self, prefix: &str) -> Self {
		match self {
			Error::InvalidValue(msg) => Error::InvalidValue(format!("{}: {}", prefix, msg)),
			Error::PermissionDenied(msg) => Error::PermissionDenied(format!("{}: {}", prefix, msg)),
			err => err,
		}
	}
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Error::NotFound => write!(f, "not found"),
			Error::InvalidName(name) => write!(
				f,
				"The setting name \"{}\" is invalid. Only underscores, alpha and numerical characters are allowed",
				name
			),
			Error::DuplicateName { scope, name } => {
				write!(f, "A setting with name \"{}\" does already exist for \"{}\"", name, scope)
			}
			Error::InvalidScope(msg) => write!(f, "invalid scope: {}", msg),
			Error::PermissionDenied(msg) => write!(f, "{}", msg),
			Error::InvalidValue(msg) => write!(f, "{}", msg),
			Error::NoSuchMeasurableType(Some(site)) => {
				write!(f, "Cannot determine the measurable type of site {}", site)
			}
			Error::NoSuchMeasurableType(None) => {
				write!(f, "No measurable type given and no site to look it up from")
			}
			Error::DbError => write!(f, "database error"),
			Error::SaveFailed => write!(f, "An error occurred while saving the settings"),
			Error::ConfigError(msg) => write!(f, "config error: {}", msg),
			Error::Io(err) => write!(f, "io error: {}", err),
		}
	}
}

impl std::error::Error for Error {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Error::Io(err) => Some(err),
			_ => None,
		}
	}
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		tracing::warn!("JSON: {}", err);
		Self::DbError
	}
}

impl From<serde_yaml::Error> for Error {
	fn from(err: serde_yaml::Error) -> Self {
		Self::ConfigError(err.to_string())
	}
}


// vim: ts=4
