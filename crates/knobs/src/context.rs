//! Process-wide environment and request-scoped context
//!
//! [`SettingsEnv`] holds what lives as long as the process: the store adapter,
//! configuration, translator, event channel and the tracker cache.
//! [`SettingsContext`] is built once per request from the environment and an
//! [`AccessContext`]; it owns the memoized storages and collections of that
//! request and is dropped with it.

use std::collections::HashMap;
use std::sync::Arc;

use knobs_types::store_adapter::SettingsStoreAdapter;

use crate::collection::{CollectionScope, PluginCollections};
use crate::config::{ConfigSource, NoConfig};
use crate::events::SettingsEvents;
use crate::prelude::*;
use crate::storage::cache::BackendCache;
use crate::storage::factory::StorageFactory;
use crate::translate::{NoTranslation, Translator};

#[derive(Debug)]
pub struct SettingsEnv {
	pub adapter: Arc<dyn SettingsStoreAdapter>,
	pub config: Arc<dyn ConfigSource>,
	pub translator: Arc<dyn Translator>,
	pub events: SettingsEvents,
	pub backend_cache: BackendCache,
}

impl SettingsEnv {
	pub fn new(adapter: Arc<dyn SettingsStoreAdapter>) -> Self {
		Self {
			adapter,
			config: Arc::new(NoConfig),
			translator: Arc::new(NoTranslation),
			events: SettingsEvents::default(),
			backend_cache: BackendCache::default(),
		}
	}

	pub fn with_config(mut self, config: Arc<dyn ConfigSource>) -> Self {
		self.config = config;
		self
	}

	pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
		self.translator = translator;
		self
	}

	pub fn with_events(mut self, events: SettingsEvents) -> Self {
		self.events = events;
		self
	}

	pub fn with_backend_cache(mut self, cache: BackendCache) -> Self {
		self.backend_cache = cache;
		self
	}
}

/// Request-scoped context, one per request and locale
#[derive(Debug)]
pub struct SettingsContext {
	env: Arc<SettingsEnv>,
	access: AccessContext,
	storage: StorageFactory,
	collections: parking_lot::Mutex<HashMap<CollectionScope, Arc<PluginCollections>>>,
}

impl SettingsContext {
	pub fn new(env: Arc<SettingsEnv>, access: AccessContext) -> Self {
		let storage = StorageFactory::new(env.adapter.clone(), env.backend_cache.clone(), access.origin);
		Self { env, access, storage, collections: parking_lot::Mutex::new(HashMap::new()) }
	}

	pub fn env(&self) -> &Arc<SettingsEnv> {
		&self.env
	}

	pub fn access(&self) -> &AccessContext {
		&self.access
	}

	pub fn actor(&self) -> &Actor {
		&self.access.actor
	}

	pub fn adapter(&self) -> &Arc<dyn SettingsStoreAdapter> {
		&self.env.adapter
	}

	pub fn storage(&self) -> &StorageFactory {
		&self.storage
	}

	pub fn config(&self) -> &Arc<dyn ConfigSource> {
		&self.env.config
	}

	pub fn events(&self) -> &SettingsEvents {
		&self.env.events
	}

	/// Translates a key for the locale of the request
	pub fn translate(&self, key: &str) -> String {
		self.env.translator.translate(&self.access.locale, key)
	}

	pub(crate) fn memoized_collections(&self, scope: &CollectionScope) -> Option<Arc<PluginCollections>> {
		self.collections.lock().get(scope).cloned()
	}

	pub(crate) fn memoize_collections(
		&self,
		scope: CollectionScope,
		collections: Arc<PluginCollections>,
	) -> Arc<PluginCollections> {
		self.collections.lock().entry(scope).or_insert(collections).clone()
	}

	/// Forgets memoized collections and storages, the next access rebuilds them
	pub fn invalidate(&self) {
		self.collections.lock().clear();
		self.storage.clear();
	}
}

// vim: ts=4
