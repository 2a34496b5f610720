//! In-memory backend, never persists anything

use async_trait::async_trait;

use super::backend::{SettingsBackend, ValueMap};
use crate::prelude::*;

#[derive(Debug)]
pub struct NullBackend {
	storage_id: Box<str>,
}

impl NullBackend {
	pub fn new(storage_id: impl Into<Box<str>>) -> Self {
		Self { storage_id: storage_id.into() }
	}
}

#[async_trait]
impl SettingsBackend for NullBackend {
	fn storage_id(&self) -> &str {
		&self.storage_id
	}

	fn backend_name(&self) -> &'static str {
		"null"
	}

	async fn load(&self) -> ClResult<ValueMap> {
		Ok(ValueMap::new())
	}

	async fn save(&self, _values: &ValueMap) -> ClResult<()> {
		Ok(())
	}

	async fn delete(&self) -> ClResult<()> {
		Ok(())
	}
}

// vim: ts=4
