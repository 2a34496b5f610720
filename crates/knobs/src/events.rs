//! Settings change notifications
//!
//! Every successful collection save publishes a [`SettingsUpdated`] event on a
//! broadcast channel. Sending without subscribers is not an error.

use tokio::sync::broadcast;

use crate::collection::CollectionKind;
use crate::key::ScopeId;
use crate::prelude::*;

const DEFAULT_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsUpdated {
	pub kind: CollectionKind,
	pub plugin: PluginName,
	pub scope: ScopeId,
}

#[derive(Debug, Clone)]
pub struct SettingsEvents {
	tx: broadcast::Sender<SettingsUpdated>,
}

impl SettingsEvents {
	pub fn new(capacity: usize) -> Self {
		let (tx, _rx) = broadcast::channel(capacity.max(1));
		Self { tx }
	}

	pub fn subscribe(&self) -> broadcast::Receiver<SettingsUpdated> {
		self.tx.subscribe()
	}

	pub fn publish(&self, event: SettingsUpdated) {
		match self.tx.send(event) {
			Ok(n) => debug!("settings update sent to {} subscribers", n),
			Err(broadcast::error::SendError(event)) => {
				debug!("no subscribers for settings update of {}", event.plugin);
			}
		}
	}
}

impl Default for SettingsEvents {
	fn default() -> Self {
		Self::new(DEFAULT_CAPACITY)
	}
}


// vim: ts=4
