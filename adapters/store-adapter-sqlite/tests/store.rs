//! Settings store adapter tests
//!
//! Exercises the raw row operations against a temporary SQLite database:
//! 1. Option rows and prefix listing
//! 2. Multi-valued plugin setting rows
//! 3. Measurable setting rows scoped by plugin
//! 4. Site rows and alias URLs

#[cfg(test)]
mod tests {
	use knobs_store_adapter_sqlite::SettingsStoreSqlite;
	use knobs_types::prelude::*;
	use knobs_types::store_adapter::{CreateSiteData, PluginSettingRow, SettingsStoreAdapter};
	use tempfile::TempDir;

	/// Helper to create a test adapter with temporary database
	async fn create_test_adapter() -> ClResult<(SettingsStoreSqlite, TempDir)> {
		let tmp_dir = TempDir::new().unwrap();
		let adapter = SettingsStoreSqlite::new(tmp_dir.path().join("settings.db")).await?;
		Ok((adapter, tmp_dir))
	}

	#[tokio::test]
	async fn test_option_roundtrip() {
		let (adapter, _tmp) = create_test_adapter().await.expect("Failed to create adapter");

		assert_eq!(adapter.read_option("Plugin_Foo_Settings").await.unwrap(), None);
		adapter.update_option("Plugin_Foo_Settings", "{\"a\":1}").await.unwrap();
		adapter.update_option("Plugin_Foo_Settings", "{\"a\":2}").await.unwrap();
		assert_eq!(
			adapter.read_option("Plugin_Foo_Settings").await.unwrap().as_deref(),
			Some("{\"a\":2}")
		);

		adapter.delete_option("Plugin_Foo_Settings").await.unwrap();
		adapter.delete_option("Plugin_Foo_Settings").await.unwrap();
		assert_eq!(adapter.read_option("Plugin_Foo_Settings").await.unwrap(), None);
	}

	#[tokio::test]
	async fn test_list_options_escapes_wildcards() {
		let (adapter, _tmp) = create_test_adapter().await.expect("Failed to create adapter");

		adapter.update_option("Plugin_Foo_Settings", "{}").await.unwrap();
		adapter.update_option("PluginXBar_Settings", "{}").await.unwrap();
		adapter.update_option("Plugin_Bar_Other", "{}").await.unwrap();

		let options = adapter.list_options("Plugin_", "_Settings").await.unwrap();
		assert_eq!(options.len(), 1);
		assert_eq!(options[0].0.as_ref(), "Plugin_Foo_Settings");
	}

	fn row(name: &str, value_index: u32, value: &str) -> PluginSettingRow {
		PluginSettingRow { setting_name: name.into(), value_index, setting_value: value.into() }
	}

	#[tokio::test]
	async fn test_plugin_settings_rows() {
		let (adapter, _tmp) = create_test_adapter().await.expect("Failed to create adapter");

		let rows = [row("browsers", 1, "\"firefox\""), row("browsers", 2, "\"opera\""), row("metric", 0, "\"nb_visits\"")];
		adapter.replace_plugin_settings("Example", "", &[], &rows).await.unwrap();
		adapter.replace_plugin_settings("Example", "alice", &[], &[row("color", 0, "\"red\"")]).await.unwrap();

		let listed = adapter.list_plugin_settings("Example", "").await.unwrap();
		assert_eq!(listed.len(), 3);
		assert_eq!(listed[0].setting_name.as_ref(), "browsers");
		assert_eq!(listed[1].value_index, 2);

		// Shrinking a list removes the surplus rows, deleting a name removes all its rows
		adapter
			.replace_plugin_settings("Example", "", &["metric".into()], &[row("browsers", 1, "\"chrome\"")])
			.await
			.unwrap();
		let listed = adapter.list_plugin_settings("Example", "").await.unwrap();
		assert_eq!(listed, vec![row("browsers", 1, "\"chrome\"")]);

		// User rows are untouched
		assert_eq!(adapter.list_plugin_settings("Example", "alice").await.unwrap().len(), 1);
	}

	#[tokio::test]
	async fn test_delete_plugin_settings_for_user() {
		let (adapter, _tmp) = create_test_adapter().await.expect("Failed to create adapter");

		let rows = [row("color", 0, "\"red\"")];
		adapter.replace_plugin_settings("A", "alice", &[], &rows).await.unwrap();
		adapter.replace_plugin_settings("B", "alice", &[], &rows).await.unwrap();
		adapter.replace_plugin_settings("A", "bob", &[], &rows).await.unwrap();

		assert_eq!(adapter.delete_plugin_settings_for_user("alice").await.unwrap(), 2);
		assert!(adapter.list_plugin_settings("A", "alice").await.unwrap().is_empty());
		assert_eq!(adapter.list_plugin_settings("A", "bob").await.unwrap().len(), 1);
	}

	#[tokio::test]
	async fn test_site_settings_are_scoped_by_plugin() {
		let (adapter, _tmp) = create_test_adapter().await.expect("Failed to create adapter");
		let site = SiteId(1);

		adapter
			.replace_site_settings(site, "A", &[], &[("color".into(), "\"red\"".into())])
			.await
			.unwrap();
		adapter
			.replace_site_settings(site, "B", &[], &[("size".into(), "3".into())])
			.await
			.unwrap();

		// Deleting a name of plugin A never touches plugin B
		adapter.replace_site_settings(site, "A", &["color".into()], &[]).await.unwrap();
		assert!(adapter.list_site_settings(site, "A").await.unwrap().is_empty());
		assert_eq!(adapter.list_site_settings(site, "B").await.unwrap().len(), 1);

		adapter.delete_site_settings(site, "B").await.unwrap();
		assert!(adapter.list_site_settings(site, "B").await.unwrap().is_empty());
	}

	#[tokio::test]
	async fn test_site_rows() {
		let (adapter, _tmp) = create_test_adapter().await.expect("Failed to create adapter");

		let site = adapter
			.create_site(&CreateSiteData { name: "Shop", main_url: "https://shop.example", typ: "website" })
			.await
			.unwrap();
		assert_eq!(adapter.read_site_type(site).await.unwrap().as_deref(), Some("website"));
		assert_eq!(adapter.read_site_type(SiteId(999)).await.unwrap(), None);

		adapter
			.update_site(site, &[("excluded_ips".into(), Some("1.2.3.4,5.6.7.8".into()))])
			.await
			.unwrap();
		let fields = adapter.read_site(site).await.unwrap().unwrap();
		assert_eq!(fields.get("excluded_ips").cloned().flatten().as_deref(), Some("1.2.3.4,5.6.7.8"));
		assert_eq!(fields.get("main_url").cloned().flatten().as_deref(), Some("https://shop.example"));

		let res = adapter.update_site(site, &[("idsite".into(), Some("5".into()))]).await;
		assert!(matches!(res, Err(Error::InvalidValue(_))));
		assert!(adapter.read_site(SiteId(999)).await.unwrap().is_none());
	}

	#[tokio::test]
	async fn test_site_alias_urls() {
		let (adapter, _tmp) = create_test_adapter().await.expect("Failed to create adapter");

		let site = adapter
			.create_site(&CreateSiteData { name: "Blog", main_url: "https://blog.example", typ: "website" })
			.await
			.unwrap();
		adapter
			.replace_site_alias_urls(site, &["https://a.example".into(), "https://b.example".into()])
			.await
			.unwrap();
		adapter.replace_site_alias_urls(site, &["https://c.example".into()]).await.unwrap();

		let urls = adapter.list_site_alias_urls(site).await.unwrap();
		assert_eq!(urls, vec![Box::<str>::from("https://c.example")]);
	}

	#[tokio::test]
	async fn test_site_update_with_urls() {
		let (adapter, _tmp) = create_test_adapter().await.expect("Failed to create adapter");

		let site = adapter
			.create_site(&CreateSiteData { name: "Blog", main_url: "https://blog.example", typ: "website" })
			.await
			.unwrap();
		adapter
			.update_site_with_urls(
				site,
				&[("main_url".into(), Some("https://www.blog.example".into()))],
				Some(&[Box::<str>::from("https://a.example")][..]),
			)
			.await
			.unwrap();
		let fields = adapter.read_site(site).await.unwrap().unwrap();
		assert_eq!(fields.get("main_url").cloned().flatten().as_deref(), Some("https://www.blog.example"));
		assert_eq!(adapter.list_site_alias_urls(site).await.unwrap(), vec![Box::<str>::from("https://a.example")]);

		// a rejected update leaves the alias URLs alone
		let aliases = [Box::<str>::from("https://b.example")];
		let res = adapter
			.update_site_with_urls(site, &[("idsite".into(), Some("5".into()))], Some(&aliases[..]))
			.await;
		assert!(matches!(res, Err(Error::InvalidValue(_))));
		assert_eq!(adapter.list_site_alias_urls(site).await.unwrap(), vec![Box::<str>::from("https://a.example")]);

		let aliases = [Box::<str>::from("https://c.example")];
		let res = adapter.update_site_with_urls(SiteId(999), &[], Some(&aliases[..])).await;
		assert!(matches!(res, Err(Error::NotFound)));
		assert!(adapter.list_site_alias_urls(SiteId(999)).await.unwrap().is_empty());
	}
}

// vim: ts=4
