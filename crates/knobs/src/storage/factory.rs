//! Storage factory
//!
//! Builds one [`Storage`] per backend kind and request. Tracker requests get
//! their persistent backends wrapped in the shared read-through cache.

use std::collections::HashMap;
use std::sync::Arc;

use knobs_types::store_adapter::SettingsStoreAdapter;

use super::backend::{BackendKind, SettingsBackend};
use super::cache::{BackendCache, CacheBackend};
use super::measurable::MeasurableBackend;
use super::measurable_table::MeasurableSettingsTableBackend;
use super::null::NullBackend;
use super::option_table::OptionTableBackend;
use super::plugin_table::PluginSettingsTableBackend;
use super::{Storage, StorageHandle};
use crate::key::ScopeId;
use crate::prelude::*;

#[derive(Debug)]
pub struct StorageFactory {
	adapter: Arc<dyn SettingsStoreAdapter>,
	cache: BackendCache,
	origin: RequestOrigin,
	storages: parking_lot::Mutex<HashMap<BackendKind, StorageHandle>>,
}

impl StorageFactory {
	pub fn new(adapter: Arc<dyn SettingsStoreAdapter>, cache: BackendCache, origin: RequestOrigin) -> Self {
		Self { adapter, cache, origin, storages: parking_lot::Mutex::new(HashMap::new()) }
	}

	/// Returns the storage of a backend kind, creating it on first use
	pub fn make(&self, kind: &BackendKind) -> ClResult<StorageHandle> {
		if let Some(storage) = self.storages.lock().get(kind) {
			return Ok(storage.clone());
		}

		let backend = self.make_backend(kind)?;
		debug!("new storage {} ({})", backend.storage_id(), backend.backend_name());
		let storage = Storage::new(kind.scope(), backend)
			.with_cache_invalidation(self.cache.clone())
			.into_handle();

		// A concurrent caller may have created it in the meantime, keep the first one
		let mut storages = self.storages.lock();
		Ok(storages.entry(kind.clone()).or_insert(storage).clone())
	}

	/// Plugin settings storage, system wide for an empty login
	pub fn plugin_storage(&self, plugin: &str, login: &str) -> ClResult<StorageHandle> {
		self.make(&BackendKind::user(plugin, login))
	}

	/// JSON map in an option row
	pub fn option_storage(&self, plugin: &str) -> ClResult<StorageHandle> {
		self.make(&BackendKind::PluginOption { plugin: plugin.into() })
	}

	pub fn measurable_settings_storage(&self, site_id: SiteId, plugin: &str) -> ClResult<StorageHandle> {
		self.make(&BackendKind::MeasurableSettings { plugin: plugin.into(), site: site_id })
	}

	pub fn measurable_storage(&self, site_id: SiteId) -> ClResult<StorageHandle> {
		self.make(&BackendKind::Measurable { site: site_id })
	}

	pub fn non_persistent_storage(&self, key: &str) -> ClResult<StorageHandle> {
		self.make(&BackendKind::NonPersistent { key: key.into() })
	}

	/// Wraps a custom backend, the storage is not memoized
	pub fn make_storage(&self, scope: ScopeId, backend: Box<dyn SettingsBackend>) -> StorageHandle {
		Storage::new(scope, backend).with_cache_invalidation(self.cache.clone()).into_handle()
	}

	fn make_backend(&self, kind: &BackendKind) -> ClResult<Box<dyn SettingsBackend>> {
		let adapter = self.adapter.clone();
		let backend: Box<dyn SettingsBackend> = match kind {
			BackendKind::NonPersistent { key } => return Ok(Box::new(NullBackend::new(key.clone()))),
			BackendKind::PluginOption { plugin } => {
				Box::new(OptionTableBackend::new(adapter, OptionTableBackend::option_name(plugin))?)
			}
			BackendKind::PluginSettings { plugin, login } => {
				Box::new(PluginSettingsTableBackend::new(adapter, plugin, login)?)
			}
			BackendKind::MeasurableSettings { plugin, site } => {
				Box::new(MeasurableSettingsTableBackend::new(adapter, *site, plugin)?)
			}
			BackendKind::Measurable { site } => Box::new(MeasurableBackend::new(adapter, *site)?),
		};

		if self.origin == RequestOrigin::Tracker {
			Ok(Box::new(CacheBackend::new(kind.clone(), backend, self.cache.clone())))
		} else {
			Ok(backend)
		}
	}

	/// Forgets all memoized storages, unsaved changes are dropped
	pub fn clear(&self) {
		self.storages.lock().clear();
	}
}

// vim: ts=4
