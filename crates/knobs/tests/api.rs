//! Settings API tests
//!
//! Covers the transport facing operations:
//! 1. Access checks of every entry point
//! 2. Metadata of writable settings
//! 3. Batch application of submitted values, all or nothing

mod common;

#[cfg(test)]
mod tests {
	use serde_json::json;
	use std::sync::Arc;

	use knobs::api::SettingsApi;
	use knobs::metadata::IncomingValues;
	use knobs::prelude::*;
	use knobs::translate::MapTranslator;

	use crate::common::*;

	fn api(env: &TestEnv) -> SettingsApi {
		SettingsApi::new(env.provider.clone())
	}

	fn incoming(plugin: &str, values: serde_json::Value) -> IncomingValues {
		let mut res = IncomingValues::new();
		res.insert(plugin.into(), serde_json::from_value(values).unwrap());
		res
	}

	#[tokio::test]
	async fn test_access_checks() {
		let env = create_test_env().await;
		let api = api(&env);

		let alice = env.ctx(Actor::user("alice").with_view_access(SiteId(1)));
		assert!(matches!(api.get_system_settings(&alice).await, Err(Error::PermissionDenied(_))));
		let values = incoming(EXAMPLE, json!({ "metric": "visitors" }));
		assert!(matches!(api.set_system_settings(&alice, &values).await, Err(Error::PermissionDenied(_))));

		let anonymous = env.ctx(Actor::anonymous());
		assert!(matches!(api.get_user_settings(&anonymous).await, Err(Error::PermissionDenied(_))));
		assert!(matches!(api.get_measurable_settings(&alice, SiteId(1)).await, Err(Error::PermissionDenied(_))));
	}

	#[tokio::test]
	async fn test_system_settings_metadata() {
		let env = create_test_env().await;
		let ctx = env.ctx(Actor::super_user("root"));

		let plugins = api(&env).get_system_settings(&ctx).await.unwrap();
		assert_eq!(plugins.len(), 1);
		assert_eq!(plugins[0].plugin_name.as_ref(), EXAMPLE);

		let names: Vec<&str> = plugins[0].settings.iter().map(|s| s.name.as_ref()).collect();
		assert_eq!(names, ["metric", "browsers", "description", "password"]);

		let metric = serde_json::to_value(&plugins[0].settings[0]).unwrap();
		assert_eq!(metric["value"], json!("nb_visits"));
		assert_eq!(metric["defaultValue"], json!("nb_visits"));
		assert_eq!(metric["type"], json!("string"));
		assert_eq!(metric["uiControlType"], json!("select"));
		assert_eq!(metric["availableValues"][1]["key"], json!("nb_actions"));
	}

	#[tokio::test]
	async fn test_metadata_is_translated() {
		let translator = MapTranslator::new().with("de", "Metric to display", "Angezeigte Metrik");
		let env = create_test_env_with(move |env| env.with_translator(Arc::new(translator))).await;
		let ctx = SettingsContext::new(env.env.clone(), AccessContext::new(Actor::super_user("root")).with_locale("de"));

		let plugins = api(&env).get_system_settings(&ctx).await.unwrap();
		assert_eq!(plugins[0].settings[0].title, "Angezeigte Metrik");
		assert_eq!(plugins[0].settings[1].title, "Supported Browsers");
	}

	#[tokio::test]
	async fn test_set_user_settings() {
		let env = create_test_env().await;
		let api = api(&env);
		{
			let ctx = env.ctx(Actor::user("alice").with_view_access(SiteId(1)));
			let values = incoming(
				EXAMPLE,
				json!({ "autoRefresh": true, "refreshInterval": "45", "color": null, "unknown": 1 }),
			);
			api.set_user_settings(&ctx, &values).await.unwrap();
		}

		let ctx = env.ctx(Actor::user("alice").with_view_access(SiteId(1)));
		let plugins = api.get_user_settings(&ctx).await.unwrap();
		let settings = &plugins[0].settings;
		let value_of = |name: &str| settings.iter().find(|s| s.name.as_ref() == name).unwrap().value.clone();
		assert_eq!(value_of("autoRefresh"), SettingValue::Bool(true));
		assert_eq!(value_of("refreshInterval"), SettingValue::Int(45));
		assert_eq!(value_of("color"), SettingValue::from("red"));
	}

	#[tokio::test]
	async fn test_rejected_value_discards_the_whole_batch() {
		let env = create_test_env().await;
		let api = api(&env);
		{
			let ctx = env.ctx(Actor::super_user("root"));
			let values = incoming(EXAMPLE, json!({ "metric": "nb_actions", "browsers": ["opera"] }));
			match api.set_system_settings(&ctx, &values).await {
				Err(Error::InvalidValue(msg)) => assert!(msg.starts_with("Supported Browsers: ")),
				res => panic!("unexpected result {:?}", res),
			}
		}

		let ctx = env.ctx(Actor::super_user("root"));
		let plugins = api.get_system_settings(&ctx).await.unwrap();
		assert_eq!(plugins[0].settings[0].value, SettingValue::from("nb_visits"));
	}

	#[tokio::test]
	async fn test_failing_store_reports_save_failed() {
		setup_test_logging();
		let env = Arc::new(SettingsEnv::new(Arc::new(FailingStore)));
		let ctx = SettingsContext::new(env, AccessContext::new(Actor::super_user("root")));
		let api = SettingsApi::new(provider());

		let values = incoming(EXAMPLE, json!({ "metric": "visitors" }));
		assert!(matches!(api.set_system_settings(&ctx, &values).await, Err(Error::SaveFailed)));
	}

	#[tokio::test]
	async fn test_has_plugin_settings_for_current_user() {
		let env = create_test_env().await;
		let api = api(&env);
		let plugins_settings = api.plugins_settings();

		let root = env.ctx(Actor::super_user("root"));
		assert!(plugins_settings.has_system_plugin_settings_for_current_user(&root, EXAMPLE).await.unwrap());
		let names = plugins_settings.plugin_names_having_system_settings(&root).await.unwrap();
		assert_eq!(names, vec![Box::<str>::from(EXAMPLE)]);

		let alice = env.ctx(Actor::user("alice").with_view_access(SiteId(1)));
		assert!(!plugins_settings.has_system_plugin_settings_for_current_user(&alice, EXAMPLE).await.unwrap());
		assert!(plugins_settings.has_user_plugin_settings_for_current_user(&alice, EXAMPLE).await.unwrap());

		let anonymous = env.ctx(Actor::anonymous());
		assert!(!plugins_settings.has_user_plugin_settings_for_current_user(&anonymous, EXAMPLE).await.unwrap());
	}
}

// vim: ts=4
