// SPDX-License-Identifier: MIT OR Apache-2.0

//! A typed, path-aware access layer over a parsed configuration tree,
//! with unused-entry tracking.
//!
//! This crate wraps a parsed hierarchical configuration document in a
//! small, typed API and keeps track of which entries the program actually
//! consulted. Entries that were present in the file but never looked up
//! are reported through a callback when the [`Config`](domain::Config)
//! owner is dropped, which catches stale and misspelled keys that would
//! otherwise sit in a file unnoticed.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: the settings arena, the [`Setting`](domain::Setting)
//!   node wrapper, the [`Config`](domain::Config) owner, errors and the
//!   typed-lookup helpers
//! - **Ports**: the [`TreeParser`](ports::TreeParser) trait, the seam to
//!   the file-format collaborator
//! - **Adapters**: the shipped TOML parser
//!   ([`TomlParser`](adapters::TomlParser)), which keeps source spans so
//!   every diagnostic can name a file and line
//!
//! # Usage tracking
//!
//! Every *visiting* lookup ([`Setting::child`](domain::Setting::child),
//! [`Setting::elem`](domain::Setting::elem), or the lookup helpers) marks
//! the resolved node and all of its ancestors as used. At drop, the owner
//! walks every leaf and hands it to the notification callback; leaves
//! whose [`visited`](domain::Setting::visited) predicate is false are the
//! unused entries. Paths under the reserved `root.version` prefix are
//! always treated as used (configurable through
//! [`Config::set_exempt_prefixes`](domain::Config::set_exempt_prefixes)).
//!
//! # Quick Start
//!
//! ```rust
//! use cfgtrail::prelude::*;
//!
//! # fn main() -> cfgtrail::domain::Result<()> {
//! let mut conf = Config::with_notify(|st| {
//!     if !st.visited() {
//!         eprintln!("config not visited: {}", st.path());
//!     }
//! });
//! conf.load_str(
//!     r#"
//! version = "1.0"
//!
//! [module]
//! name = "svc"
//! port = 8080
//! "#,
//! )?;
//!
//! let module = conf.root().child("module")?;
//! assert_eq!(module.child("name")?.to_string()?, "svc");
//!
//! let mut port = 0u32;
//! lookup_def(module, "port", &mut port, 9000u32);
//! assert_eq!(port, 8080);
//! // On drop, the callback runs for every leaf; all were visited here.
//! # Ok(())
//! # }
//! ```
//!
//! # Concurrency
//!
//! Single-threaded by design: visitation flags are mutated without
//! synchronization, so the tree is `!Sync` and concurrent lookups must be
//! serialized by the caller.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for
/// convenient access.
pub mod prelude {
    pub use crate::adapters::TomlParser;
    pub use crate::domain::lookup::{lookup, lookup_def, lookup_idx, lookup_idx_def};
    pub use crate::domain::{
        Config, ConfigError, ConfigNotify, FromSetting, Result, Setting, SettingKind,
        SettingValue, SettingsTree, DEFAULT_EXEMPT_PREFIX,
    };
    pub use crate::ports::TreeParser;
}
