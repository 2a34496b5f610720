//! Request-scoped setting storage
//!
//! A [`Storage`] holds the values of one backend. It loads them on first access,
//! keeps every change in memory and writes the whole map back on [`Storage::save`]
//! only when something changed. Storages are shared between settings through a
//! [`StorageHandle`]; the [`factory::StorageFactory`] hands out one handle per
//! backend kind and request.

use std::sync::Arc;

use crate::key::{ScopeId, SettingKey};
use crate::prelude::*;

pub mod backend;
pub mod cache;
pub mod factory;
pub mod measurable;
pub mod measurable_table;
pub mod null;
pub mod option_table;
pub mod plugin_table;

use backend::{SettingsBackend, ValueMap};
use cache::BackendCache;

pub type StorageHandle = Arc<tokio::sync::Mutex<Storage>>;

#[derive(Debug)]
pub struct Storage {
	scope: ScopeId,
	backend: Box<dyn SettingsBackend>,
	values: ValueMap,
	loaded: bool,
	dirty: bool,
	/// Cleared on every write so tracker requests never read stale values
	cache: Option<BackendCache>,
}

impl Storage {
	pub fn new(scope: ScopeId, backend: Box<dyn SettingsBackend>) -> Self {
		Self { scope, backend, values: ValueMap::new(), loaded: false, dirty: false, cache: None }
	}

	pub fn with_cache_invalidation(mut self, cache: BackendCache) -> Self {
		self.cache = Some(cache);
		self
	}

	pub fn into_handle(self) -> StorageHandle {
		Arc::new(tokio::sync::Mutex::new(self))
	}

	pub fn scope(&self) -> &ScopeId {
		&self.scope
	}

	pub fn backend(&self) -> &dyn SettingsBackend {
		self.backend.as_ref()
	}

	pub fn is_dirty(&self) -> bool {
		self.dirty
	}

	pub fn is_loaded(&self) -> bool {
		self.loaded
	}

	fn check_key(&self, key: &SettingKey) -> ClResult<()> {
		if key.scope == self.scope {
			Ok(())
		} else {
			Err(Error::InvalidScope(format!(
				"key {} does not belong to storage {} ({})",
				key,
				self.backend.storage_id(),
				self.scope
			)))
		}
	}

	async fn ensure_loaded(&mut self) -> ClResult<()> {
		if !self.loaded {
			self.values = self.backend.load().await?;
			self.loaded = true;
			debug!("loaded {} values from {}", self.values.len(), self.backend.storage_id());
		}
		Ok(())
	}

	/// Returns the stored value, or `default` if nothing is stored
	pub async fn get_value(&mut self, key: &SettingKey, default: &SettingValue) -> ClResult<SettingValue> {
		self.check_key(key)?;
		self.ensure_loaded().await?;
		Ok(self.values.get(&key.name).cloned().unwrap_or_else(|| default.clone()))
	}

	/// Stores a value in memory, it is persisted by [`Storage::save`]
	pub async fn set_value(&mut self, key: &SettingKey, value: SettingValue) -> ClResult<()> {
		self.check_key(key)?;
		self.ensure_loaded().await?;
		self.values.insert(key.name.clone(), value);
		self.dirty = true;
		Ok(())
	}

	/// Removes a value in memory, it is persisted by [`Storage::save`]
	pub async fn delete_value(&mut self, key: &SettingKey) -> ClResult<()> {
		self.check_key(key)?;
		self.ensure_loaded().await?;
		if self.values.remove(&key.name).is_some() {
			self.dirty = true;
		}
		Ok(())
	}

	/// Writes all values to the backend if anything changed
	///
	/// On failure the storage stays dirty so the caller can retry or discard.
	pub async fn save(&mut self) -> ClResult<()> {
		if !self.dirty {
			return Ok(());
		}

		self.backend.save(&self.values).await?;
		self.dirty = false;
		if let Some(cache) = &self.cache {
			cache.clear();
		}
		info!("saved {} values to {}", self.values.len(), self.backend.storage_id());
		Ok(())
	}

	/// Deletes every persisted value of the backend
	pub async fn delete_all_values(&mut self) -> ClResult<()> {
		self.backend.delete().await?;
		self.values.clear();
		self.loaded = true;
		self.dirty = false;
		if let Some(cache) = &self.cache {
			cache.clear();
		}
		info!("deleted all values of {}", self.backend.storage_id());
		Ok(())
	}

	/// Drops unsaved changes, the next access reloads from the backend
	pub fn discard_changes(&mut self) {
		self.values.clear();
		self.loaded = false;
		self.dirty = false;
	}
}


// vim: ts=4
