//! Reusable validators and transforms

use sha2::{Digest, Sha256};
use std::sync::Arc;

use crate::definition::{SettingTransform, SettingValidator};
use crate::prelude::*;

fn as_int(value: &SettingValue, title: &str) -> ClResult<i64> {
	match SettingType::Int.coerce(value.clone())? {
		SettingValue::Int(i) => Ok(i),
		_ => Err(Error::InvalidValue(format!("{} must be a number", title))),
	}
}

/// Accepts integers not smaller than `min`
pub fn min_int(min: i64) -> SettingValidator {
	Arc::new(move |value, definition| {
		if as_int(value, &definition.title)? < min {
			return Err(Error::InvalidValue(format!("The value has to be at least {}", min)));
		}
		Ok(())
	})
}

/// Accepts integers inside `min..=max`
pub fn int_range(min: i64, max: i64) -> SettingValidator {
	Arc::new(move |value, definition| {
		let i = as_int(value, &definition.title)?;
		if i < min || i > max {
			return Err(Error::InvalidValue(format!("The value has to be between {} and {}", min, max)));
		}
		Ok(())
	})
}

fn items(value: &SettingValue) -> Vec<String> {
	match value {
		SettingValue::StringList(list) => list.clone(),
		value => value.to_scalar_string().into_iter().collect(),
	}
}

/// Checks that a string looks like an absolute URL, a missing scheme is accepted
pub fn looks_like_url(s: &str) -> bool {
	let s = s.trim();
	if s.is_empty() || s.chars().any(char::is_whitespace) {
		return false;
	}
	let candidate = if s.contains("://") { s.to_string() } else { format!("http://{}", s) };
	url::Url::parse(&candidate).is_ok_and(|url| url.host_str().is_some_and(|host| !host.is_empty()))
}

/// Accepts a non-empty list of URLs
pub fn url_list() -> SettingValidator {
	Arc::new(|value, _definition| {
		let urls: Vec<String> = items(value).into_iter().filter(|u| !u.trim().is_empty()).collect();
		if urls.is_empty() {
			return Err(Error::InvalidValue("No URL given".into()));
		}
		if let Some(url) = urls.iter().find(|u| !looks_like_url(u)) {
			return Err(Error::InvalidValue(format!("The URL \"{}\" is not valid", url)));
		}
		Ok(())
	})
}

/// Adds a missing scheme, drops one trailing slash, removes empty entries and duplicates
pub fn normalize_urls() -> SettingTransform {
	Arc::new(|value, _definition| {
		let mut urls: Vec<String> = Vec::new();
		for url in items(&value) {
			let url = url.trim();
			if url.is_empty() {
				continue;
			}
			let mut url = if url.contains("://") { url.to_string() } else { format!("http://{}", url) };
			if url.ends_with('/') && url.len() > "http://".len() + 1 {
				url.pop();
			}
			if !urls.contains(&url) {
				urls.push(url);
			}
		}
		Ok(SettingValue::StringList(urls))
	})
}

/// Trims every entry of a list and drops empty ones
pub fn trim_list() -> SettingTransform {
	Arc::new(|value, _definition| {
		let list = items(&value)
			.into_iter()
			.map(|s| s.trim().to_string())
			.filter(|s| !s.is_empty())
			.collect();
		Ok(SettingValue::StringList(list))
	})
}

/// Stores the hex SHA-256 digest of `salt` followed by the value, empty values stay empty
pub fn salted_sha256(salt: impl Into<String>) -> SettingTransform {
	let salt = salt.into();
	Arc::new(move |value, _definition| {
		let plain = value.to_scalar_string().unwrap_or_default();
		if plain.is_empty() {
			return Ok(SettingValue::String(String::new()));
		}

		let mut hasher = Sha256::new();
		hasher.update(salt.as_bytes());
		hasher.update(plain.as_bytes());
		let digest = hasher.finalize();
		Ok(SettingValue::String(digest.iter().map(|b| format!("{:02x}", b)).collect()))
	})
}


// vim: ts=4
