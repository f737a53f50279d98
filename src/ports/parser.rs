// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tree parser trait definition.
//!
//! This module defines the `TreeParser` trait, the seam between the access
//! layer and the external file-format collaborator. A parser turns
//! configuration text into a [`SettingsTree`]; everything downstream
//! (typed access, path rendering, visitation) is format-agnostic.

use crate::domain::{Result, SettingsTree};

/// A trait for parsing configuration text into a settings tree.
///
/// Implementations own the mapping from their format's value model onto
/// the tree's type tags, and are expected to record a 1-based source line
/// per node so diagnostics can point back into the file (0 when a line is
/// genuinely unknown).
///
/// # Examples
///
/// ```rust
/// use cfgtrail::ports::TreeParser;
/// use cfgtrail::domain::{Result, SettingValue, SettingsTree};
///
/// struct KvParser;
///
/// impl TreeParser for KvParser {
///     fn parse(&self, content: &str, filename: &str) -> Result<SettingsTree> {
///         let mut tree = SettingsTree::new(filename);
///         let root = tree.root();
///         for (lineno, line) in content.lines().enumerate() {
///             if let Some((key, value)) = line.split_once('=') {
///                 tree.push_child(
///                     root,
///                     Some(key.trim()),
///                     SettingValue::Str(value.trim().to_string()),
///                     lineno + 1,
///                 );
///             }
///         }
///         Ok(tree)
///     }
///
///     fn supported_extensions(&self) -> &[&str] {
///         &["kv"]
///     }
/// }
///
/// let tree = KvParser.parse("host = local", "demo.kv").unwrap();
/// assert_eq!(tree.node_count(), 2);
/// ```
pub trait TreeParser {
    /// Parses configuration content into a settings tree.
    ///
    /// # Arguments
    ///
    /// * `content` - The raw text of the configuration document
    /// * `filename` - The source name recorded in the tree and in errors
    ///
    /// # Returns
    ///
    /// * `Ok(SettingsTree)` - The parsed tree
    /// * `Err(ConfigError)` - The content was not valid for this format
    fn parse(&self, content: &str, filename: &str) -> Result<SettingsTree>;

    /// Returns the file extensions supported by this parser.
    fn supported_extensions(&self) -> &[&str];
}
