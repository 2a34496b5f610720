//! Display metadata and batch application of submitted values

use serde::Serialize;
use std::collections::BTreeMap;

use crate::collection::PluginCollections;
use crate::definition::UiControl;
use crate::prelude::*;
use crate::setting::Setting;

/// Submitted values, `plugin name -> setting name -> value`
pub type IncomingValues = BTreeMap<String, BTreeMap<String, serde_json::Value>>;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableValueMetadata {
	pub key: Box<str>,
	pub value: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub group: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingMetadata {
	pub name: Box<str>,
	pub title: String,
	pub value: SettingValue,
	pub default_value: SettingValue,
	#[serde(rename = "type")]
	pub typ: SettingType,
	#[serde(rename = "uiControlType")]
	pub ui_control: UiControl,
	pub available_values: Option<Vec<AvailableValueMetadata>>,
	pub description: Option<String>,
	pub inline_help: Option<Vec<String>>,
	pub introduction: Option<String>,
	pub ui_control_attributes: BTreeMap<Box<str>, Box<str>>,
	pub show_if: Option<Box<str>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginSettingsMetadata {
	pub plugin_name: PluginName,
	pub settings: Vec<SettingMetadata>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SettingsMetadata;

impl SettingsMetadata {
	/// Formats the writable settings of every plugin for transport
	pub async fn format_for_display(
		&self,
		ctx: &SettingsContext,
		writable: &[(PluginName, Vec<Setting>)],
	) -> ClResult<Vec<PluginSettingsMetadata>> {
		let mut res = Vec::with_capacity(writable.len());
		for (plugin_name, settings) in writable {
			let mut formatted = Vec::with_capacity(settings.len());
			for setting in settings {
				formatted.push(self.format_setting(ctx, setting).await?);
			}
			res.push(PluginSettingsMetadata { plugin_name: plugin_name.clone(), settings: formatted });
		}
		Ok(res)
	}

	pub async fn format_setting(&self, ctx: &SettingsContext, setting: &Setting) -> ClResult<SettingMetadata> {
		let definition = setting.definition();
		let available_values = definition.available_values.as_ref().map(|values| {
			values
				.iter()
				.map(|v| AvailableValueMetadata {
					key: v.key.clone(),
					value: ctx.translate(&v.label),
					group: v.group.as_deref().map(|g| ctx.translate(g)),
				})
				.collect()
		});

		Ok(SettingMetadata {
			name: definition.name.clone(),
			title: ctx.translate(&definition.title),
			value: setting.get_value().await?,
			default_value: setting.default_value().clone(),
			typ: definition.typ,
			ui_control: definition.ui_control,
			available_values,
			description: definition.description.as_deref().map(|d| ctx.translate(d)),
			inline_help: (!definition.inline_help.is_empty())
				.then(|| definition.inline_help.iter().map(|line| ctx.translate(line)).collect()),
			introduction: definition.introduction.as_deref().map(|i| ctx.translate(i)),
			ui_control_attributes: definition.ui_control_attributes.clone(),
			show_if: definition.show_if.clone(),
		})
	}

	/// Applies submitted values to the writable settings accepted by `filter`, then saves
	///
	/// Either every value is accepted or nothing is saved: the first rejected
	/// value discards the changes of all collections and is reported prefixed
	/// with the setting title. A failing save is reported as
	/// [`Error::SaveFailed`]; collections saved before the failure stay saved.
	pub async fn apply_incoming_values<F>(
		&self,
		ctx: &SettingsContext,
		collections: &PluginCollections,
		values: &IncomingValues,
		filter: F,
	) -> ClResult<()>
	where
		F: Fn(&Setting) -> bool + Send + Sync,
	{
		if let Err(err) = Self::assign(ctx, collections, values, &filter).await {
			for collection in collections.values() {
				collection.discard_changes().await;
			}
			return Err(err);
		}

		for collection in collections.values() {
			if let Err(err) = collection.save(ctx).await {
				warn!("saving settings of {} failed: {}", collection.plugin_name(), err);
				return Err(Error::SaveFailed);
			}
		}
		Ok(())
	}

	async fn assign<F>(
		ctx: &SettingsContext,
		collections: &PluginCollections,
		values: &IncomingValues,
		filter: &F,
	) -> ClResult<()>
	where
		F: Fn(&Setting) -> bool + Send + Sync,
	{
		for (plugin_name, collection) in collections {
			let Some(plugin_values) = values.get(plugin_name.as_ref()) else {
				continue;
			};

			for setting in collection.get_settings_writable_by_current_user() {
				if !filter(setting) {
					continue;
				}
				let Some(raw) = plugin_values.get(setting.name()).filter(|v| !v.is_null()) else {
					continue;
				};

				let res = match SettingValue::from_json(raw) {
					Ok(value) => setting.set_value(ctx.access(), value).await,
					Err(err) => Err(err),
				};
				res.map_err(|err| err.with_prefix(&ctx.translate(setting.title())))?;
			}
		}
		Ok(())
	}
}

// vim: ts=4
