//! Setting definitions
//!
//! A definition is the immutable description of one setting: name, title,
//! data type, UI control, default value, allowed values, optional validator and
//! transform, and display hints. Definitions are built with
//! [`SettingDefinitionBuilder`], which checks the name and fills in the type and
//! control defaults.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::sync::Arc;

use crate::prelude::*;

/// Validates a value before it is stored
pub type SettingValidator = Arc<dyn Fn(&SettingValue, &SettingDefinition) -> ClResult<()> + Send + Sync>;

/// Converts a validated value to its stored form, replacing type coercion
pub type SettingTransform =
	Arc<dyn Fn(SettingValue, &SettingDefinition) -> ClResult<SettingValue> + Send + Sync>;

/// UI control of a setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UiControl {
	Radio,
	Text,
	Textarea,
	Checkbox,
	Password,
	MultiSelect,
	Select,
	Hidden,
}

impl UiControl {
	pub fn as_str(&self) -> &'static str {
		match self {
			UiControl::Radio => "radio",
			UiControl::Text => "text",
			UiControl::Textarea => "textarea",
			UiControl::Checkbox => "checkbox",
			UiControl::Password => "password",
			UiControl::MultiSelect => "multiselect",
			UiControl::Select => "select",
			UiControl::Hidden => "hidden",
		}
	}

	/// Default control of a data type
	pub fn default_for(typ: SettingType) -> Self {
		match typ {
			SettingType::Bool => UiControl::Checkbox,
			SettingType::Array => UiControl::MultiSelect,
			SettingType::Int | SettingType::Float | SettingType::String => UiControl::Text,
		}
	}

	/// Default data type of a control
	pub fn default_type(&self) -> SettingType {
		match self {
			UiControl::Checkbox => SettingType::Bool,
			UiControl::MultiSelect => SettingType::Array,
			_ => SettingType::String,
		}
	}
}

/// One entry of the allowed values of a setting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailableValue {
	pub key: Box<str>,
	pub label: Box<str>,
	/// Optional group, used by select controls to render option groups
	pub group: Option<Box<str>>,
}

pub struct SettingDefinition {
	pub name: Box<str>,
	pub title: Box<str>,
	pub typ: SettingType,
	pub ui_control: UiControl,
	pub default: SettingValue,
	pub available_values: Option<Vec<AvailableValue>>,
	pub validator: Option<SettingValidator>,
	pub transform: Option<SettingTransform>,
	/// Client-side visibility expression referencing other setting names
	pub show_if: Option<Box<str>>,
	pub description: Option<Box<str>>,
	/// Lines of help shown next to the control
	pub inline_help: Vec<Box<str>>,
	pub introduction: Option<Box<str>>,
	pub ui_control_attributes: BTreeMap<Box<str>, Box<str>>,
	/// Display order inside a collection, smaller first
	pub order: i32,
}

impl Clone for SettingDefinition {
	fn clone(&self) -> Self {
		SettingDefinition {
			name: self.name.clone(),
			title: self.title.clone(),
			typ: self.typ,
			ui_control: self.ui_control,
			default: self.default.clone(),
			available_values: self.available_values.clone(),
			validator: self.validator.clone(),
			transform: self.transform.clone(),
			show_if: self.show_if.clone(),
			description: self.description.clone(),
			inline_help: self.inline_help.clone(),
			introduction: self.introduction.clone(),
			ui_control_attributes: self.ui_control_attributes.clone(),
			order: self.order,
		}
	}
}

impl Debug for SettingDefinition {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SettingDefinition")
			.field("name", &self.name)
			.field("title", &self.title)
			.field("typ", &self.typ)
			.field("ui_control", &self.ui_control)
			.field("default", &self.default)
			.field("available_values", &self.available_values)
			.field("validator", &self.validator.is_some())
			.field("transform", &self.transform.is_some())
			.field("order", &self.order)
			.finish_non_exhaustive()
	}
}

impl SettingDefinition {
	/// Create a builder for constructing a SettingDefinition
	pub fn builder(name: impl Into<Box<str>>, title: impl Into<Box<str>>) -> SettingDefinitionBuilder {
		SettingDefinitionBuilder::new(name, title)
	}

	/// Looks up the label of an allowed value key
	pub fn available_value_label(&self, key: &str) -> Option<&str> {
		self.available_values
			.as_ref()
			.and_then(|values| values.iter().find(|v| v.key.as_ref() == key))
			.map(|v| v.label.as_ref())
	}

	pub fn is_available_value(&self, key: &str) -> bool {
		self.available_value_label(key).is_some()
	}
}

/// Checks that a setting name only consists of `[A-Za-z0-9_]`
pub fn is_valid_setting_name(name: &str) -> bool {
	!name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Builder for SettingDefinition with fluent API
pub struct SettingDefinitionBuilder {
	name: Box<str>,
	title: Box<str>,
	typ: Option<SettingType>,
	ui_control: Option<UiControl>,
	default: Option<SettingValue>,
	available_values: Option<Vec<AvailableValue>>,
	validator: Option<SettingValidator>,
	transform: Option<SettingTransform>,
	show_if: Option<Box<str>>,
	description: Option<Box<str>>,
	inline_help: Vec<Box<str>>,
	introduction: Option<Box<str>>,
	ui_control_attributes: BTreeMap<Box<str>, Box<str>>,
	order: i32,
}

impl SettingDefinitionBuilder {
	pub fn new(name: impl Into<Box<str>>, title: impl Into<Box<str>>) -> Self {
		Self {
			name: name.into(),
			title: title.into(),
			typ: None,
			ui_control: None,
			default: None,
			available_values: None,
			validator: None,
			transform: None,
			show_if: None,
			description: None,
			inline_help: Vec::new(),
			introduction: None,
			ui_control_attributes: BTreeMap::new(),
			order: 100,
		}
	}

	pub fn typ(mut self, typ: SettingType) -> Self {
		self.typ = Some(typ);
		self
	}

	pub fn ui_control(mut self, ui_control: UiControl) -> Self {
		self.ui_control = Some(ui_control);
		self
	}

	/// Set the default value (defaults to the empty value of the type)
	pub fn default(mut self, value: impl Into<SettingValue>) -> Self {
		self.default = Some(value.into());
		self
	}

	/// Set the allowed values as `(key, label)` pairs
	pub fn available_values<K, L>(mut self, values: impl IntoIterator<Item = (K, L)>) -> Self
	where
		K: Into<Box<str>>,
		L: Into<Box<str>>,
	{
		let list = self.available_values.get_or_insert_with(Vec::new);
		list.extend(values.into_iter().map(|(key, label)| AvailableValue {
			key: key.into(),
			label: label.into(),
			group: None,
		}));
		self
	}

	/// Add one allowed value inside an option group
	pub fn grouped_available_value(
		mut self,
		group: impl Into<Box<str>>,
		key: impl Into<Box<str>>,
		label: impl Into<Box<str>>,
	) -> Self {
		self.available_values.get_or_insert_with(Vec::new).push(AvailableValue {
			key: key.into(),
			label: label.into(),
			group: Some(group.into()),
		});
		self
	}

	/// Set a validation function, replacing the allowed values check
	pub fn validator<F>(mut self, f: F) -> Self
	where
		F: Fn(&SettingValue, &SettingDefinition) -> ClResult<()> + Send + Sync + 'static,
	{
		self.validator = Some(Arc::new(f));
		self
	}

	pub fn validator_arc(mut self, validator: SettingValidator) -> Self {
		self.validator = Some(validator);
		self
	}

	/// Set a transform function, replacing type coercion on write
	pub fn transform<F>(mut self, f: F) -> Self
	where
		F: Fn(SettingValue, &SettingDefinition) -> ClResult<SettingValue> + Send + Sync + 'static,
	{
		self.transform = Some(Arc::new(f));
		self
	}

	pub fn transform_arc(mut self, transform: SettingTransform) -> Self {
		self.transform = Some(transform);
		self
	}

	pub fn show_if(mut self, expr: impl Into<Box<str>>) -> Self {
		self.show_if = Some(expr.into());
		self
	}

	pub fn description(mut self, description: impl Into<Box<str>>) -> Self {
		self.description = Some(description.into());
		self
	}

	/// Appends a line of inline help
	pub fn inline_help(mut self, line: impl Into<Box<str>>) -> Self {
		self.inline_help.push(line.into());
		self
	}

	pub fn introduction(mut self, introduction: impl Into<Box<str>>) -> Self {
		self.introduction = Some(introduction.into());
		self
	}

	pub fn ui_control_attribute(mut self, name: impl Into<Box<str>>, value: impl Into<Box<str>>) -> Self {
		self.ui_control_attributes.insert(name.into(), value.into());
		self
	}

	pub fn order(mut self, order: i32) -> Self {
		self.order = order;
		self
	}

	/// Build the SettingDefinition
	pub fn build(self) -> ClResult<SettingDefinition> {
		if !is_valid_setting_name(&self.name) {
			return Err(Error::InvalidName(self.name));
		}

		let (typ, ui_control) = match (self.typ, self.ui_control) {
			(Some(typ), Some(ui_control)) => (typ, ui_control),
			(Some(typ), None) => (typ, UiControl::default_for(typ)),
			(None, Some(ui_control)) => (ui_control.default_type(), ui_control),
			(None, None) => (SettingType::String, UiControl::Text),
		};

		let default = match self.default {
			Some(value) => typ.normalize(value),
			None => empty_value(typ),
		};

		Ok(SettingDefinition {
			name: self.name,
			title: self.title,
			typ,
			ui_control,
			default,
			available_values: self.available_values,
			validator: self.validator,
			transform: self.transform,
			show_if: self.show_if,
			description: self.description,
			inline_help: self.inline_help,
			introduction: self.introduction,
			ui_control_attributes: self.ui_control_attributes,
			order: self.order,
		})
	}
}

/// Empty value of a data type, the default of definitions without an explicit one
pub fn empty_value(typ: SettingType) -> SettingValue {
	match typ {
		SettingType::Int => SettingValue::Int(0),
		SettingType::Float => SettingValue::Float(0.0),
		SettingType::String => SettingValue::String(String::new()),
		SettingType::Bool => SettingValue::Bool(false),
		SettingType::Array => SettingValue::StringList(Vec::new()),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_invalid_name_is_rejected() {
		let res = SettingDefinition::builder("my-setting", "My Setting").build();
		assert!(matches!(res, Err(Error::InvalidName(name)) if name.as_ref() == "my-setting"));
		assert!(SettingDefinition::builder("", "Empty").build().is_err());
		assert!(SettingDefinition::builder("refresh_Interval2", "Ok").build().is_ok());
	}

	#[test]
	fn test_control_and_type_defaults() {
		let def = SettingDefinition::builder("a", "A").ui_control(UiControl::Checkbox).build().unwrap();
		assert_eq!(def.typ, SettingType::Bool);
		assert_eq!(def.default, SettingValue::Bool(false));

		let def = SettingDefinition::builder("b", "B").typ(SettingType::Array).build().unwrap();
		assert_eq!(def.ui_control, UiControl::MultiSelect);

		let def = SettingDefinition::builder("c", "C").build().unwrap();
		assert_eq!(def.typ, SettingType::String);
		assert_eq!(def.ui_control, UiControl::Text);
	}

	#[test]
	fn test_default_is_normalized() {
		let def = SettingDefinition::builder("refreshInterval", "Refresh Interval")
			.typ(SettingType::Int)
			.default("30")
			.build()
			.unwrap();
		assert_eq!(def.default, SettingValue::Int(30));
	}

	#[test]
	fn test_available_values() {
		let def = SettingDefinition::builder("color", "Color")
			.ui_control(UiControl::Radio)
			.available_values([("red", "Red"), ("blue", "Blue")])
			.grouped_available_value("Dark", "black", "Black")
			.build()
			.unwrap();
		assert!(def.is_available_value("blue"));
		assert!(!def.is_available_value("green"));
		assert_eq!(def.available_value_label("black"), Some("Black"));
	}

	#[test]
	fn test_inline_help_lines() {
		let def = SettingDefinition::builder("d", "D").build().unwrap();
		assert!(def.inline_help.is_empty());

		let def = SettingDefinition::builder("d", "D").inline_help("first").inline_help("second").build().unwrap();
		assert_eq!(def.inline_help, vec![Box::<str>::from("first"), Box::<str>::from("second")]);
	}
}

// vim: ts=4
