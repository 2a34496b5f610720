//! Measurable settings tests
//!
//! Exercises the website plugin against site rows:
//! 1. Measurable type resolution
//! 2. Properties mapped onto site columns and alias URLs
//! 3. Plugin owned measurable settings
//! 4. Settings of measurables that do not exist yet

mod common;

#[cfg(test)]
mod tests {
	use serde_json::json;

	use knobs::api::SettingsApi;
	use knobs::collection::SettingsCollection;
	use knobs::metadata::IncomingValues;
	use knobs::prelude::*;
	use knobs::types::store_adapter::SettingsStoreAdapter;

	use crate::common::*;

	async fn website_settings(env: &TestEnv, ctx: &SettingsContext, site_id: SiteId) -> SettingsCollection {
		env.provider.measurable_settings(ctx, WEBSITE, Some(site_id), None).await.unwrap().unwrap()
	}

	fn admin(site_id: SiteId) -> Actor {
		Actor::user("alice").with_admin_access(site_id)
	}

	#[tokio::test]
	async fn test_measurable_type_is_resolved() {
		let env = create_test_env().await;
		let ctx = env.ctx(Actor::super_user("root"));

		let res = SettingsCollection::measurable(&ctx, WEBSITE, Some(SiteId(999)), None).await;
		assert!(matches!(res, Err(Error::NoSuchMeasurableType(Some(SiteId(999))))));
		let res = SettingsCollection::measurable(&ctx, WEBSITE, None, None).await;
		assert!(matches!(res, Err(Error::NoSuchMeasurableType(None))));

		let site_id = env.create_site("Shop", "http://shop.example.org", "website").await;
		let collection = SettingsCollection::measurable(&ctx, WEBSITE, Some(site_id), None).await.unwrap();
		assert_eq!(collection.measurable_type(), Some("website"));

		let app_id = env.create_site("App", "http://app.example.org", "mobileapp").await;
		assert!(env.provider.measurable_settings(&ctx, WEBSITE, Some(app_id), None).await.unwrap().is_none());
	}

	#[tokio::test]
	async fn test_properties_are_read_from_the_site_row() {
		let env = create_test_env().await;
		let site_id = env.create_site("Shop", "http://shop.example.org", "website").await;
		env.adapter
			.replace_site_alias_urls(site_id, &["http://www.shop.example.org".into()])
			.await
			.unwrap();

		let ctx = env.ctx(admin(site_id));
		let website = website_settings(&env, &ctx, site_id).await;
		assert_eq!(
			website.get_setting("urls").unwrap().get_value().await.unwrap(),
			SettingValue::from(&["http://shop.example.org", "http://www.shop.example.org"][..])
		);
		assert_eq!(website.get_setting("sitesearch").unwrap().get_value().await.unwrap(), SettingValue::from("1"));
		assert_eq!(
			website.get_setting("exclude_unknown_urls").unwrap().get_value().await.unwrap(),
			SettingValue::Bool(false)
		);
	}

	#[tokio::test]
	async fn test_properties_are_written_to_the_site_row() {
		let env = create_test_env().await;
		let site_id = env.create_site("Shop", "http://shop.example.org", "website").await;
		{
			let ctx = env.ctx(admin(site_id));
			let website = website_settings(&env, &ctx, site_id).await;
			website
				.get_setting("urls")
				.unwrap()
				.set_value(
					ctx.access(),
					SettingValue::from(&["shop.example.org/", "http://www.shop.example.org", "shop.example.org"][..]),
				)
				.await
				.unwrap();
			website
				.get_setting("excluded_ips")
				.unwrap()
				.set_value(ctx.access(), SettingValue::from(&[" 1.2.3.4 ", "", "10.0.0.*"][..]))
				.await
				.unwrap();
			website.get_setting("ecommerce").unwrap().set_value(ctx.access(), "1".into()).await.unwrap();
			website.save(&ctx).await.unwrap();
		}

		let fields = env.adapter.read_site(site_id).await.unwrap().unwrap();
		assert_eq!(fields.get("main_url").cloned().flatten().as_deref(), Some("http://shop.example.org"));
		assert_eq!(fields.get("excluded_ips").cloned().flatten().as_deref(), Some("1.2.3.4,10.0.0.*"));
		assert_eq!(fields.get("ecommerce").cloned().flatten().as_deref(), Some("1"));
		let aliases = env.adapter.list_site_alias_urls(site_id).await.unwrap();
		assert_eq!(aliases, vec![Box::<str>::from("http://www.shop.example.org")]);
	}

	#[tokio::test]
	async fn test_failed_site_update_keeps_alias_urls_untouched() {
		let env = create_test_env().await;
		let missing = SiteId(999);
		let ctx = env.ctx(Actor::super_user("root"));
		let website =
			env.provider.measurable_settings(&ctx, WEBSITE, Some(missing), Some("website")).await.unwrap().unwrap();

		website
			.get_setting("urls")
			.unwrap()
			.set_value(ctx.access(), SettingValue::from(&["http://a.example.org", "http://b.example.org"][..]))
			.await
			.unwrap();
		assert!(matches!(website.save(&ctx).await, Err(Error::NotFound)));
		assert!(env.adapter.list_site_alias_urls(missing).await.unwrap().is_empty());
	}

	#[tokio::test]
	async fn test_invalid_urls_are_rejected() {
		let env = create_test_env().await;
		let site_id = env.create_site("Shop", "http://shop.example.org", "website").await;
		let ctx = env.ctx(admin(site_id));
		let website = website_settings(&env, &ctx, site_id).await;

		let urls = website.get_setting("urls").unwrap();
		let res = urls.set_value(ctx.access(), SettingValue::from(&["not a url"][..])).await;
		assert!(matches!(res, Err(Error::InvalidValue(_))));
		let res = urls.set_value(ctx.access(), SettingValue::StringList(vec![])).await;
		assert!(matches!(res, Err(Error::InvalidValue(_))));
	}

	#[tokio::test]
	async fn test_search_defaults_follow_own_keywords() {
		let env = create_test_env().await;
		let site_id = env.create_site("Shop", "http://shop.example.org", "website").await;
		{
			let ctx = env.ctx(admin(site_id));
			let website = website_settings(&env, &ctx, site_id).await;
			assert_eq!(
				website.get_setting("use_default_site_search_params").unwrap().get_value().await.unwrap(),
				SettingValue::Bool(true)
			);
			website
				.get_setting("sitesearch_keyword_parameters")
				.unwrap()
				.set_value(ctx.access(), SettingValue::from(&["q"][..]))
				.await
				.unwrap();
			website.save(&ctx).await.unwrap();
		}

		let ctx = env.ctx(admin(site_id));
		let website = website_settings(&env, &ctx, site_id).await;
		assert_eq!(
			website.get_setting("use_default_site_search_params").unwrap().get_value().await.unwrap(),
			SettingValue::Bool(false)
		);
	}

	#[tokio::test]
	async fn test_plugin_measurable_settings_are_stored_per_site() {
		let env = create_test_env().await;
		let shop = env.create_site("Shop", "http://shop.example.org", "website").await;
		let blog = env.create_site("Blog", "http://blog.example.org", "website").await;
		{
			let ctx = env.ctx(admin(shop));
			let website = website_settings(&env, &ctx, shop).await;
			website
				.get_setting("use_default_site_search_params")
				.unwrap()
				.set_value(ctx.access(), SettingValue::Bool(false))
				.await
				.unwrap();
			website.save(&ctx).await.unwrap();
		}

		let rows = env.adapter.list_site_settings(shop, WEBSITE).await.unwrap();
		assert_eq!(rows.len(), 1);
		assert_eq!(rows[0].setting_name.as_ref(), "use_default_site_search_params");
		assert!(env.adapter.list_site_settings(blog, WEBSITE).await.unwrap().is_empty());
	}

	#[tokio::test]
	async fn test_view_access_is_read_only() {
		let env = create_test_env().await;
		let site_id = env.create_site("Shop", "http://shop.example.org", "website").await;
		let ctx = env.ctx(Actor::user("bob").with_view_access(site_id));
		let website = website_settings(&env, &ctx, site_id).await;

		let ecommerce = website.get_setting("ecommerce").unwrap();
		assert!(!ecommerce.is_writable_by_current_user());
		assert!(matches!(ecommerce.set_value(ctx.access(), "1".into()).await, Err(Error::PermissionDenied(_))));
	}

	#[tokio::test]
	async fn test_writability_is_bound_to_the_building_request() {
		let env = create_test_env().await;
		let site_id = env.create_site("Shop", "http://shop.example.org", "website").await;
		let bob = env.ctx(Actor::user("bob").with_view_access(site_id));
		let website = website_settings(&env, &bob, site_id).await;

		let root = AccessContext::new(Actor::super_user("root"));
		let ecommerce = website.get_setting("ecommerce").unwrap();
		assert!(matches!(ecommerce.set_value(&root, "1".into()).await, Err(Error::PermissionDenied(_))));

		ecommerce.set_value(&AccessContext::tracker(Actor::anonymous()), "1".into()).await.unwrap();
		assert_eq!(ecommerce.get_value().await.unwrap(), SettingValue::from("1"));
	}

	#[tokio::test]
	async fn test_settings_of_a_new_measurable_stay_in_memory() {
		let env = create_test_env().await;
		let ctx = env.ctx(Actor::super_user("root"));
		let website = env.provider.measurable_settings(&ctx, WEBSITE, None, Some("website")).await.unwrap().unwrap();

		let urls = website.get_setting("urls").unwrap();
		urls.set_value(ctx.access(), SettingValue::from(&["new.example.org"][..])).await.unwrap();
		website.save(&ctx).await.unwrap();
		assert_eq!(urls.get_value().await.unwrap(), SettingValue::from(&["http://new.example.org"][..]));
		assert_eq!(urls.storage().lock().await.backend().backend_name(), "null");
	}

	#[tokio::test]
	async fn test_set_measurable_settings_through_the_api() {
		let env = create_test_env().await;
		let site_id = env.create_site("Shop", "http://shop.example.org", "website").await;
		let api = SettingsApi::new(env.provider.clone());
		let ctx = env.ctx(admin(site_id));

		let mut values = IncomingValues::new();
		values.insert(WEBSITE.into(), serde_json::from_value(json!({ "sitesearch": "0" })).unwrap());
		api.set_measurable_settings(&ctx, site_id, &values).await.unwrap();

		let fields = env.adapter.read_site(site_id).await.unwrap().unwrap();
		assert_eq!(fields.get("sitesearch").cloned().flatten().as_deref(), Some("0"));

		let plugins = api.get_measurable_settings(&env.ctx(admin(site_id)), site_id).await.unwrap();
		let sitesearch = plugins[0].settings.iter().find(|s| s.name.as_ref() == "sitesearch").unwrap();
		assert_eq!(sitesearch.value, SettingValue::from("0"));

		let user_agents = plugins[0].settings.iter().find(|s| s.name.as_ref() == "excluded_user_agents").unwrap();
		let user_agents = serde_json::to_value(user_agents).unwrap();
		assert_eq!(
			user_agents["inlineHelp"],
			json!(["SitesManager_GlobalExcludedUserAgentHelp1", "SitesManager_GlobalExcludedUserAgentHelp2"])
		);
		assert_eq!(serde_json::to_value(sitesearch).unwrap()["inlineHelp"], json!(["SitesManager_SiteSearchUse"]));
	}
}

// vim: ts=4
