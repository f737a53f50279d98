// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core business logic and types.
//!
//! This module holds the access-and-tracking core: the settings arena, the
//! node wrapper, the tree owner, the error taxonomy and the typed-lookup
//! helpers. It depends on the ports layer only through the parser seam.

pub mod config;
pub mod errors;
pub mod lookup;
pub mod setting;
pub mod tree;

// Re-export commonly used types
pub use config::{Config, ConfigNotify};
pub use errors::{ConfigError, Result};
pub use lookup::FromSetting;
pub use setting::Setting;
pub use tree::{SettingId, SettingKind, SettingValue, SettingsTree, DEFAULT_EXEMPT_PREFIX};
