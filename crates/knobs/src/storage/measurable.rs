//! Backend mapping measurable properties onto the site row
//!
//! Every site column becomes a value of the same name, comma separated columns
//! become lists. The virtual `urls` value is the main URL followed by the alias
//! URLs. Deleting is a no-op, a measurable is never removed through its settings.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;

use knobs_types::store_adapter::{COMMA_SEPARATED_SITE_COLUMNS, SITE_COLUMNS, SettingsStoreAdapter};

use super::backend::{SettingsBackend, ValueMap};
use crate::prelude::*;

pub const URLS: &str = "urls";
const MAIN_URL: &str = "main_url";

#[derive(Debug)]
pub struct MeasurableBackend {
	storage_id: Box<str>,
	site_id: SiteId,
	adapter: Arc<dyn SettingsStoreAdapter>,
}

impl MeasurableBackend {
	pub fn new(adapter: Arc<dyn SettingsStoreAdapter>, site_id: SiteId) -> ClResult<Self> {
		if site_id.0 == 0 {
			return Err(Error::InvalidValue("No site ID given".into()));
		}
		Ok(Self { storage_id: format!("Measurable_{}", site_id).into(), site_id, adapter })
	}
}

fn split_list(s: &str) -> Vec<String> {
	s.split(',').map(str::trim).filter(|s| !s.is_empty()).map(str::to_string).collect()
}

fn column_value(value: &SettingValue) -> Box<str> {
	match value {
		SettingValue::StringList(list) => list.join(",").into(),
		value => value.to_scalar_string().unwrap_or_default().into(),
	}
}

#[async_trait]
impl SettingsBackend for MeasurableBackend {
	fn storage_id(&self) -> &str {
		&self.storage_id
	}

	fn backend_name(&self) -> &'static str {
		"measurable"
	}

	async fn load(&self) -> ClResult<ValueMap> {
		let Some(fields) = self.adapter.read_site(self.site_id).await? else {
			return Ok(ValueMap::new());
		};

		let mut values = ValueMap::new();
		for (column, value) in fields {
			let Some(value) = value else { continue };
			let value = if COMMA_SEPARATED_SITE_COLUMNS.contains(&column.as_ref()) {
				SettingValue::StringList(split_list(&value))
			} else {
				SettingValue::String(value.into())
			};
			values.insert(column, value);
		}

		let mut urls = Vec::new();
		if let Some(SettingValue::String(main_url)) = values.get(MAIN_URL) {
			urls.push(main_url.clone());
		}
		urls.extend(self.adapter.list_site_alias_urls(self.site_id).await?.into_iter().map(String::from));
		values.insert(URLS.into(), SettingValue::StringList(urls));

		Ok(values)
	}

	async fn save(&self, values: &ValueMap) -> ClResult<()> {
		let mut fields: BTreeMap<Box<str>, Option<Box<str>>> = BTreeMap::new();
		for (name, value) in values {
			if name.as_ref() == URLS {
				continue;
			}
			if !SITE_COLUMNS.contains(&name.as_ref()) {
				debug!("{}: ignoring unknown site column {}", self.storage_id, name);
				continue;
			}
			fields.insert(name.clone(), Some(column_value(value)));
		}

		let mut alias_urls = None;
		if let Some(urls) = values.get(URLS) {
			let mut unique: Vec<Box<str>> = Vec::new();
			for url in urls.as_list().unwrap_or_default() {
				let url = url.trim();
				if !url.is_empty() && !unique.iter().any(|u| u.as_ref() == url) {
					unique.push(url.into());
				}
			}
			if let Some((main_url, aliases)) = unique.split_first() {
				fields.insert(MAIN_URL.into(), Some(main_url.clone()));
				alias_urls = Some(aliases.to_vec());
			}
		}

		let fields: Vec<(Box<str>, Option<Box<str>>)> = fields.into_iter().collect();
		self.adapter.update_site_with_urls(self.site_id, &fields, alias_urls.as_deref()).await
	}

	async fn delete(&self) -> ClResult<()> {
		debug!("{}: delete is a no-op for measurables", self.storage_id);
		Ok(())
	}
}


// vim: ts=4
