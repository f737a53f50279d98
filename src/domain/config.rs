// SPDX-License-Identifier: MIT OR Apache-2.0

//! The configuration owner.
//!
//! A [`Config`] owns exactly one [`SettingsTree`] plus an optional
//! notification callback. It is constructed empty, populated once via a
//! load operation, queried many times through [`Config::root`], and swept
//! on drop: every leaf is handed to the callback so unused entries can be
//! reported before the tree is released.

use crate::adapters::TomlParser;
use crate::domain::errors::{ConfigError, Result};
use crate::domain::setting::{for_each_leaf, Setting};
use crate::domain::tree::{SettingsTree, DEFAULT_EXEMPT_PREFIX};
use crate::ports::TreeParser;
use std::fs;
use std::path::Path;
use tracing::debug;

/// The callback invoked once per leaf during the teardown sweep.
///
/// The callback receives every leaf, visited or not; filtering on
/// [`Setting::visited`] is the callback's responsibility.
pub type ConfigNotify = Box<dyn for<'t> FnMut(Setting<'t>)>;

/// Owner of one parsed configuration tree.
///
/// The tree and every node's visitation flag live exactly as long as the
/// `Config`; node wrappers are borrows and cannot outlive it. `Config` is
/// not cloneable: ownership of the tree is single-owner by design.
///
/// # Examples
///
/// ```
/// use cfgtrail::prelude::*;
///
/// # fn main() -> cfgtrail::domain::Result<()> {
/// let mut conf = Config::with_notify(|st| {
///     if !st.visited() {
///         eprintln!("config not visited: {}", st.path());
///     }
/// });
/// conf.load_str("module = { name = \"svc\" }")?;
/// let name = conf.root().child("module")?.child("name")?.to_string()?;
/// assert_eq!(name, "svc");
/// # Ok(())
/// # }
/// ```
pub struct Config {
    tree: SettingsTree,
    notify: Option<ConfigNotify>,
    exempt: Vec<String>,
}

impl Config {
    /// Creates a configuration with an empty tree and no callback.
    pub fn new() -> Self {
        Config {
            tree: SettingsTree::new(""),
            notify: None,
            exempt: vec![DEFAULT_EXEMPT_PREFIX.to_string()],
        }
    }

    /// Creates a configuration whose callback runs once per leaf at drop.
    pub fn with_notify<F>(notify: F) -> Self
    where
        F: for<'t> FnMut(Setting<'t>) + 'static,
    {
        let mut conf = Config::new();
        conf.notify = Some(Box::new(notify));
        conf
    }

    /// Loads a configuration file, replacing the current tree.
    ///
    /// Fails with [`ConfigError::Read`] when the file cannot be read and
    /// [`ConfigError::Parse`] when it is not valid syntax. Loading a second
    /// time, or after a failed load, is outside this design's contract: the
    /// tree (and all visitation state) is simply replaced.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.load_with(path, &TomlParser::new())
    }

    /// Loads a configuration file through a specific parser implementation.
    pub fn load_with<P: AsRef<Path>>(&mut self, path: P, parser: &dyn TreeParser) -> Result<()> {
        let path = path.as_ref();
        let filename = path.display().to_string();
        debug!("loading configuration from {}", filename);
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: filename.clone(),
            source,
        })?;
        self.install(parser.parse(&content, &filename)?);
        Ok(())
    }

    /// Parses an in-memory document, replacing the current tree.
    ///
    /// The source name is recorded as `<string>` in diagnostics.
    pub fn load_str(&mut self, content: &str) -> Result<()> {
        self.install(TomlParser::new().parse(content, "<string>")?);
        Ok(())
    }

    fn install(&mut self, mut tree: SettingsTree) {
        tree.set_exempt_prefixes(self.exempt.clone());
        self.tree = tree;
    }

    /// Returns a wrapper for the tree root.
    ///
    /// Non-visiting: obtaining the root does not mark anything used. Valid
    /// before any load (the tree is then an empty root group).
    pub fn root(&self) -> Setting<'_> {
        Setting::new(&self.tree, self.tree.root())
    }

    /// Replaces the path prefixes exempt from unused-entry reporting.
    ///
    /// The default is `["root.version"]`. Applies to the current tree and
    /// to any tree loaded afterwards.
    pub fn set_exempt_prefixes<I, S>(&mut self, prefixes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exempt = prefixes.into_iter().map(Into::into).collect();
        self.tree.set_exempt_prefixes(self.exempt.clone());
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Config {
    /// Runs the unused-entry sweep before the tree is released.
    ///
    /// When a callback was supplied, every leaf reachable from the root is
    /// handed to it, depth-first in document order, visited or not.
    fn drop(&mut self) {
        if let Some(mut notify) = self.notify.take() {
            for_each_leaf(self.root(), &mut |st| notify(st));
        }
    }
}

impl std::fmt::Display for Config {
    /// Prints the full path of every leaf in the tree, one per line.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.root())
    }
}
