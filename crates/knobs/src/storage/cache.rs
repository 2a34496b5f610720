//! Read-through cache for tracker requests
//!
//! [`BackendCache`] is shared by every request of the process and keyed by the
//! [`BackendKind`] of the cached storage. [`CacheBackend`] decorates a backend:
//! loads are served from the cache when present, saves and deletes go to the
//! wrapped backend and then clear the whole cache.

use async_trait::async_trait;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;

use super::backend::{BackendKind, SettingsBackend, ValueMap};
use crate::prelude::*;

#[derive(Debug, Clone)]
pub struct BackendCache {
	cache: Arc<parking_lot::RwLock<LruCache<BackendKind, ValueMap>>>,
}

impl BackendCache {
	pub fn new(capacity: usize) -> Self {
		let non_zero = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN.saturating_add(255));
		Self { cache: Arc::new(parking_lot::RwLock::new(LruCache::new(non_zero))) }
	}

	pub fn get(&self, kind: &BackendKind) -> Option<ValueMap> {
		let mut cache = self.cache.write();
		cache.get(kind).cloned()
	}

	pub fn put(&self, kind: &BackendKind, values: ValueMap) {
		let mut cache = self.cache.write();
		cache.put(kind.clone(), values);
	}

	pub fn contains(&self, kind: &BackendKind) -> bool {
		self.cache.read().contains(kind)
	}

	/// Invalidate all cached values
	pub fn clear(&self) {
		let mut cache = self.cache.write();
		cache.clear();
	}
}

impl Default for BackendCache {
	fn default() -> Self {
		Self::new(256)
	}
}

#[derive(Debug)]
pub struct CacheBackend {
	kind: BackendKind,
	inner: Box<dyn SettingsBackend>,
	cache: BackendCache,
}

impl CacheBackend {
	pub fn new(kind: BackendKind, inner: Box<dyn SettingsBackend>, cache: BackendCache) -> Self {
		Self { kind, inner, cache }
	}
}

#[async_trait]
impl SettingsBackend for CacheBackend {
	fn storage_id(&self) -> &str {
		self.inner.storage_id()
	}

	fn backend_name(&self) -> &'static str {
		"cache"
	}

	async fn load(&self) -> ClResult<ValueMap> {
		if let Some(values) = self.cache.get(&self.kind) {
			debug!("cache hit: {}", self.storage_id());
			return Ok(values);
		}

		let values = self.inner.load().await?;
		self.cache.put(&self.kind, values.clone());
		Ok(values)
	}

	async fn save(&self, values: &ValueMap) -> ClResult<()> {
		self.inner.save(values).await?;
		self.cache.clear();
		Ok(())
	}

	async fn delete(&self) -> ClResult<()> {
		self.inner.delete().await?;
		self.cache.clear();
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::atomic::{AtomicUsize, Ordering};

	#[derive(Debug, Default)]
	struct CountingBackend {
		loads: Arc<AtomicUsize>,
	}

	#[async_trait]
	impl SettingsBackend for CountingBackend {
		fn storage_id(&self) -> &str {
			"counting"
		}

		fn backend_name(&self) -> &'static str {
			"counting"
		}

		async fn load(&self) -> ClResult<ValueMap> {
			self.loads.fetch_add(1, Ordering::SeqCst);
			let mut values = ValueMap::new();
			values.insert("a".into(), SettingValue::Int(1));
			Ok(values)
		}

		async fn save(&self, _values: &ValueMap) -> ClResult<()> {
			Ok(())
		}

		async fn delete(&self) -> ClResult<()> {
			Ok(())
		}
	}

	#[tokio::test]
	async fn test_load_is_served_from_cache_until_save() {
		let loads = Arc::new(AtomicUsize::new(0));
		let cache = BackendCache::new(8);
		let inner = CountingBackend { loads: loads.clone() };
		let kind = BackendKind::system("Counting");
		let backend = CacheBackend::new(kind.clone(), Box::new(inner), cache.clone());

		backend.load().await.unwrap();
		backend.load().await.unwrap();
		assert_eq!(loads.load(Ordering::SeqCst), 1);
		assert!(cache.contains(&kind));

		backend.save(&ValueMap::new()).await.unwrap();
		assert!(!cache.contains(&kind));
		backend.load().await.unwrap();
		assert_eq!(loads.load(Ordering::SeqCst), 2);
	}

	#[test]
	fn test_zero_capacity_falls_back() {
		let cache = BackendCache::new(0);
		cache.put(&BackendKind::system("x"), ValueMap::new());
		assert!(cache.get(&BackendKind::system("x")).is_some());
	}

	#[test]
	fn test_plugin_and_login_pairs_do_not_collide() {
		let cache = BackendCache::new(8);
		let mut values = ValueMap::new();
		values.insert("a".into(), SettingValue::Int(1));
		cache.put(&BackendKind::user("Foo", "a_User_b"), values);

		assert!(cache.get(&BackendKind::user("Foo_User_a", "b")).is_none());
		assert!(cache.get(&BackendKind::user("Foo", "a_User_b")).is_some());
	}
}

// vim: ts=4
