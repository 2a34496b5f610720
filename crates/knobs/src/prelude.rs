pub use knobs_types::error::{ClResult, Error};
pub use knobs_types::types::{PluginName, SiteId, UserLogin};
pub use knobs_types::value::{SettingType, SettingValue};

pub use crate::access::{AccessContext, Actor, RequestOrigin};
pub use crate::context::{SettingsContext, SettingsEnv};

pub use tracing::{debug, debug_span, error, info, info_span, warn};

// vim: ts=4
