//! Settings of measurables of type `website`
//!
//! Most values are built-in properties stored on the site row. The only plugin
//! owned value is `use_default_site_search_params`.

use async_trait::async_trait;

use crate::collection::SettingsCollection;
use crate::definition::{SettingDefinition, UiControl};
use crate::plugin::SettingsPlugin;
use crate::prelude::*;
use crate::validators;

pub const PLUGIN_NAME: &str = "WebsiteMeasurable";
pub const MEASURABLE_TYPE: &str = "website";

const USE_DEFAULT_SEARCH_PARAMS: &str = "use_default_site_search_params";
const SEARCH_KEYWORD_PARAMS: &str = "sitesearch_keyword_parameters";

#[derive(Debug, Default)]
pub struct WebsiteMeasurablePlugin;

impl WebsiteMeasurablePlugin {
	pub fn new() -> Self {
		Self
	}
}

fn list_textarea(name: &str, title: &str) -> crate::definition::SettingDefinitionBuilder {
	SettingDefinition::builder(name, title)
		.typ(SettingType::Array)
		.ui_control(UiControl::Textarea)
		.ui_control_attribute("cols", "20")
		.ui_control_attribute("rows", "4")
		.transform_arc(validators::trim_list())
}

#[async_trait]
impl SettingsPlugin for WebsiteMeasurablePlugin {
	fn name(&self) -> &str {
		PLUGIN_NAME
	}

	async fn declare_measurable_settings(
		&self,
		ctx: &SettingsContext,
		collection: &mut SettingsCollection,
	) -> ClResult<()> {
		if !collection.has_measurable_type(MEASURABLE_TYPE) {
			return Ok(());
		}

		collection.make_property(
			ctx,
			SettingDefinition::builder("urls", "SitesManager_Urls")
				.typ(SettingType::Array)
				.ui_control(UiControl::Textarea)
				.default(&["http://siteUrl.com/", "http://siteUrl2.com/"][..])
				.inline_help("SitesManager_AliasUrlHelp")
				.ui_control_attribute("cols", "25")
				.ui_control_attribute("rows", "3")
				.validator_arc(validators::url_list())
				.transform_arc(validators::normalize_urls())
				.build()?,
		)?;

		collection.make_property(
			ctx,
			SettingDefinition::builder("exclude_unknown_urls", "SitesManager_OnlyMatchedUrlsAllowed")
				.typ(SettingType::Bool)
				.ui_control(UiControl::Checkbox)
				.default(false)
				.inline_help("SitesManager_OnlyMatchedUrlsAllowedHelp")
				.build()?,
		)?;

		collection.make_property(
			ctx,
			SettingDefinition::builder("keep_url_fragment", "SitesManager_KeepURLFragmentsLong")
				.ui_control(UiControl::Select)
				.default("0")
				.available_values([("0", "General_Default"), ("1", "General_Yes"), ("2", "General_No")])
				.build()?,
		)?;

		collection.make_property(
			ctx,
			list_textarea("excluded_ips", "SitesManager_ExcludedIps")
				.inline_help("SitesManager_HelpExcludedIps")
				.build()?,
		)?;

		collection.make_property(
			ctx,
			list_textarea("excluded_parameters", "SitesManager_ExcludedParameters")
				.inline_help("SitesManager_ListOfQueryParametersToExclude")
				.build()?,
		)?;

		collection.make_property(
			ctx,
			list_textarea("excluded_user_agents", "SitesManager_ExcludedUserAgents")
				.inline_help("SitesManager_GlobalExcludedUserAgentHelp1")
				.inline_help("SitesManager_GlobalExcludedUserAgentHelp2")
				.build()?,
		)?;

		collection.make_property(
			ctx,
			SettingDefinition::builder("sitesearch", "Actions_SubmenuSitesearch")
				.ui_control(UiControl::Select)
				.default("1")
				.available_values([("1", "SitesManager_EnableSiteSearch"), ("0", "SitesManager_DisableSiteSearch")])
				.inline_help("SitesManager_SiteSearchUse")
				.build()?,
		)?;

		collection.make_setting(
			ctx,
			SettingDefinition::builder(USE_DEFAULT_SEARCH_PARAMS, "SitesManager_SearchUseDefault")
				.typ(SettingType::Bool)
				.ui_control(UiControl::Checkbox)
				.default(true)
				.show_if("sitesearch")
				.description("SitesManager_SearchKeywordLabel")
				.build()?,
		)?;

		collection.make_property(
			ctx,
			SettingDefinition::builder(SEARCH_KEYWORD_PARAMS, "SitesManager_SearchKeywordLabel")
				.typ(SettingType::Array)
				.ui_control(UiControl::Text)
				.inline_help("SitesManager_SearchKeywordParametersDesc")
				.show_if("sitesearch && !use_default_site_search_params")
				.transform_arc(validators::trim_list())
				.build()?,
		)?;

		collection.make_property(
			ctx,
			SettingDefinition::builder("sitesearch_category_parameters", "SitesManager_SearchCategoryLabel")
				.typ(SettingType::Array)
				.ui_control(UiControl::Text)
				.inline_help("SitesManager_SearchCategoryParametersDesc")
				.show_if("sitesearch && !use_default_site_search_params")
				.transform_arc(validators::trim_list())
				.build()?,
		)?;

		// the defaults are used as long as no own keyword parameters are configured
		let has_own_keywords = match collection.get_setting(SEARCH_KEYWORD_PARAMS) {
			Some(setting) => setting.get_value().await?.as_list().is_some_and(|list| !list.is_empty()),
			None => false,
		};
		if let Some(setting) = collection.get_setting_mut(USE_DEFAULT_SEARCH_PARAMS) {
			setting.set_default_value(!has_own_keywords);
		}

		collection.make_property(
			ctx,
			SettingDefinition::builder("ecommerce", "Goals_Ecommerce")
				.ui_control(UiControl::Select)
				.default("0")
				.available_values([("0", "SitesManager_NotAnEcommerceSite"), ("1", "SitesManager_EnableEcommerce")])
				.inline_help("SitesManager_EcommerceHelp")
				.build()?,
		)?;

		Ok(())
	}
}

// vim: ts=4
