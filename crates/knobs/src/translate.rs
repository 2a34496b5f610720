//! Translation of displayed strings

use std::collections::HashMap;
use std::fmt::Debug;

/// Translates a key (or literal text) for a locale
pub trait Translator: Debug + Send + Sync {
	/// Returns the input unchanged when no translation exists
	fn translate(&self, locale: &str, key: &str) -> String;
}

/// Translator returning every key as is
#[derive(Debug, Default)]
pub struct NoTranslation;

impl Translator for NoTranslation {
	fn translate(&self, _locale: &str, key: &str) -> String {
		key.to_string()
	}
}

/// In-memory translation table
#[derive(Debug, Default)]
pub struct MapTranslator {
	entries: HashMap<(Box<str>, Box<str>), Box<str>>,
}

impl MapTranslator {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with(mut self, locale: &str, key: &str, text: &str) -> Self {
		self.entries.insert((locale.into(), key.into()), text.into());
		self
	}
}

impl Translator for MapTranslator {
	fn translate(&self, locale: &str, key: &str) -> String {
		self.entries
			.get(&(Box::from(locale), Box::from(key)))
			.map_or_else(|| key.to_string(), ToString::to_string)
	}
}


// vim: ts=4
