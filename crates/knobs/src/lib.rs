//! Plugin settings registry.
//!
//! Plugins declare typed settings (system wide, per user, or per measurable).
//! Each [`setting::Setting`] reads and writes through a request-scoped
//! [`storage::Storage`] that lazily loads its values from a pluggable
//! [`storage::backend::SettingsBackend`] and writes them back in one batch.
//! The [`provider::SettingsProvider`] discovers the settings collections of all
//! activated plugins and the [`api::SettingsApi`] formats them for transport and
//! applies submitted values.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod access;
pub mod api;
pub mod collection;
pub mod config;
pub mod context;
pub mod definition;
pub mod events;
pub mod key;
pub mod metadata;
pub mod migration;
pub mod plugin;
pub mod plugins;
pub mod plugins_settings;
pub mod prelude;
pub mod provider;
pub mod setting;
pub mod storage;
pub mod translate;
pub mod user;
pub mod validators;

pub use knobs_types as types;

// Re-export commonly used types
pub use collection::{CollectionKind, CollectionScope, PluginCollections, SettingsCollection};
pub use definition::{SettingDefinition, SettingDefinitionBuilder, UiControl};
pub use setting::{Setting, SettingKind};

// vim: ts=4
