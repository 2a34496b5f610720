pub use crate::error::{ClResult, Error};
pub use crate::types::{PluginName, SiteId, UserLogin};
pub use crate::value::{SettingType, SettingValue};

pub use tracing::{debug, debug_span, error, info, info_span, warn};

// vim: ts=4
