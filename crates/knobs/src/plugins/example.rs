//! Demonstration plugin with system and user settings

use async_trait::async_trait;

use crate::collection::SettingsCollection;
use crate::definition::{SettingDefinition, UiControl};
use crate::plugin::SettingsPlugin;
use crate::prelude::*;
use crate::validators;

pub const PLUGIN_NAME: &str = "ExampleSettingsPlugin";

const MIN_REFRESH_INTERVAL: i64 = 15;
const PASSWORD_SALT: &str = "ExampleSettingsPlugin";

#[derive(Debug, Default)]
pub struct ExampleSettingsPlugin;

impl ExampleSettingsPlugin {
	pub fn new() -> Self {
		Self
	}
}

#[async_trait]
impl SettingsPlugin for ExampleSettingsPlugin {
	fn name(&self) -> &str {
		PLUGIN_NAME
	}

	async fn declare_system_settings(
		&self,
		ctx: &SettingsContext,
		collection: &mut SettingsCollection,
	) -> ClResult<()> {
		collection.make_setting(
			ctx,
			SettingDefinition::builder("metric", "Metric to display")
				.ui_control(UiControl::Select)
				.default("nb_visits")
				.available_values([("nb_visits", "Visits"), ("nb_actions", "Actions"), ("visitors", "Visitors")])
				.introduction("Only Super Users can change the following settings:")
				.description("Choose the metric that should be displayed in the browser tab")
				.build()?,
		)?;

		collection.make_setting(
			ctx,
			SettingDefinition::builder("browsers", "Supported Browsers")
				.typ(SettingType::Array)
				.ui_control(UiControl::MultiSelect)
				.default(&["firefox", "chromium", "safari"][..])
				.available_values([("firefox", "Firefox"), ("chromium", "Chromium"), ("safari", "safari")])
				.description("The value will be only displayed in the following browsers")
				.build()?,
		)?;

		collection.make_setting(
			ctx,
			SettingDefinition::builder("description", "Description for value")
				.ui_control(UiControl::Textarea)
				.default("This is the value: \nAnother line")
				.description("This description will be displayed next to the value")
				.build()?,
		)?;

		collection.make_setting(
			ctx,
			SettingDefinition::builder("password", "API password")
				.ui_control(UiControl::Password)
				.description("Password for the 3rd API where we fetch the value")
				.transform_arc(validators::salted_sha256(PASSWORD_SALT))
				.build()?,
		)?;

		Ok(())
	}

	async fn declare_user_settings(
		&self,
		ctx: &SettingsContext,
		collection: &mut SettingsCollection,
	) -> ClResult<()> {
		collection.make_setting(
			ctx,
			SettingDefinition::builder("autoRefresh", "Auto refresh")
				.typ(SettingType::Bool)
				.ui_control(UiControl::Checkbox)
				.default(false)
				.description("If enabled, the value will be automatically refreshed depending on the specified interval")
				.build()?,
		)?;

		let min_interval = validators::min_int(MIN_REFRESH_INTERVAL);
		collection.make_setting(
			ctx,
			SettingDefinition::builder("refreshInterval", "Refresh Interval")
				.typ(SettingType::Int)
				.ui_control(UiControl::Text)
				.default(30)
				.ui_control_attribute("size", "3")
				.description("Defines how often the value should be updated")
				.inline_help(format!("Enter a number which is >= {}", MIN_REFRESH_INTERVAL))
				.validator(move |value, definition| {
					min_interval(value, definition).map_err(|_| Error::InvalidValue("Value is invalid".into()))
				})
				.build()?,
		)?;

		collection.make_setting(
			ctx,
			SettingDefinition::builder("color", "Color")
				.ui_control(UiControl::Radio)
				.default("red")
				.available_values([("red", "Red"), ("blue", "Blue"), ("green", "Green")])
				.description("Pick your favourite color")
				.build()?,
		)?;

		Ok(())
	}
}

// vim: ts=4
