//! Built-in plugins declaring settings

use std::sync::Arc;

use crate::plugin::SettingsPlugin;

pub mod example;
pub mod website;

pub use example::ExampleSettingsPlugin;
pub use website::WebsiteMeasurablePlugin;

/// Every built-in plugin, in registration order
pub fn builtin_plugins() -> Vec<Arc<dyn SettingsPlugin>> {
	vec![Arc::new(ExampleSettingsPlugin::new()), Arc::new(WebsiteMeasurablePlugin::new())]
}

// vim: ts=4
