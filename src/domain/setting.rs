// SPDX-License-Identifier: MIT OR Apache-2.0

//! The setting node wrapper.
//!
//! A [`Setting`] is a copyable, non-owning view over one node of a
//! [`SettingsTree`]. It provides type predicates, checked scalar
//! extraction, structural navigation, path rendering and the visiting
//! lookup that drives unused-entry detection. The borrow ties every
//! wrapper to its tree, so a wrapper cannot outlive the configuration
//! that produced it.

use crate::domain::errors::{ConfigError, Result};
use crate::domain::tree::{SettingId, SettingKind, SettingValue, SettingsTree};
use std::fmt;

/// A lightweight handle over one node of a parsed configuration tree.
///
/// Copying a `Setting` is a shallow reference copy; two wrappers may alias
/// the same node, and identity is the underlying [`SettingId`], never the
/// wrapper itself.
///
/// # Examples
///
/// ```
/// use cfgtrail::prelude::*;
///
/// # fn main() -> cfgtrail::domain::Result<()> {
/// let mut conf = Config::new();
/// conf.load_str("module = { name = \"svc\", port = 8080 }")?;
/// let module = conf.root().child("module")?;
/// assert!(module.is_group());
/// assert_eq!(module.child("name")?.to_string()?, "svc");
/// assert_eq!(module.child("port")?.to_int32()?, 8080);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Setting<'t> {
    tree: &'t SettingsTree,
    id: SettingId,
}

impl<'t> Setting<'t> {
    /// Wraps a node of `tree`.
    pub fn new(tree: &'t SettingsTree, id: SettingId) -> Self {
        Setting { tree, id }
    }

    /// The node's identity within its tree.
    pub fn id(&self) -> SettingId {
        self.id
    }

    fn value(&self) -> &'t SettingValue {
        self.tree.value(self.id)
    }

    /// Returns the node's type tag.
    pub fn kind(&self) -> SettingKind {
        self.tree.kind(self.id)
    }

    /// True iff the node holds a boolean.
    pub fn is_bool(&self) -> bool {
        self.kind() == SettingKind::Bool
    }

    /// True iff the node holds a floating-point value.
    pub fn is_float(&self) -> bool {
        self.kind() == SettingKind::Float
    }

    /// True iff the node holds an integer that fits `i32`.
    pub fn is_int32(&self) -> bool {
        matches!(self.value(), SettingValue::Int(v) if i32::try_from(*v).is_ok())
    }

    /// True iff the node holds an integer.
    pub fn is_int64(&self) -> bool {
        self.kind() == SettingKind::Int
    }

    /// True iff the node holds a string.
    pub fn is_string(&self) -> bool {
        self.kind() == SettingKind::Str
    }

    /// True iff the node is a group of named settings.
    pub fn is_group(&self) -> bool {
        self.kind() == SettingKind::Group
    }

    /// True iff the node is a homogeneous scalar sequence.
    pub fn is_array(&self) -> bool {
        self.kind() == SettingKind::Array
    }

    /// True iff the node is a heterogeneous sequence.
    pub fn is_list(&self) -> bool {
        self.kind() == SettingKind::List
    }

    /// True iff the node holds any scalar value.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self.kind(),
            SettingKind::Bool | SettingKind::Int | SettingKind::Float | SettingKind::Str
        )
    }

    /// True iff the node is the tree root.
    pub fn is_root(&self) -> bool {
        self.tree.is_root(self.id)
    }

    /// Extracts a boolean, failing with [`ConfigError::BadValue`] on any
    /// other type.
    pub fn to_bool(&self) -> Result<bool> {
        match self.value() {
            SettingValue::Bool(v) => Ok(*v),
            _ => Err(self.bad_value()),
        }
    }

    /// Extracts a floating-point value.
    pub fn to_float(&self) -> Result<f64> {
        match self.value() {
            SettingValue::Float(v) => Ok(*v),
            _ => Err(self.bad_value()),
        }
    }

    /// Extracts an integer that fits `i32`.
    pub fn to_int32(&self) -> Result<i32> {
        match self.value() {
            SettingValue::Int(v) => i32::try_from(*v).map_err(|_| self.bad_value()),
            _ => Err(self.bad_value()),
        }
    }

    /// Extracts a non-negative integer that fits `i32`.
    ///
    /// A negative source value fails with [`ConfigError::BadValue`]; there
    /// is no bit-pattern reinterpretation.
    pub fn to_uint32(&self) -> Result<u32> {
        match self.value() {
            SettingValue::Int(v) if i32::try_from(*v).is_ok() && *v >= 0 => Ok(*v as u32),
            _ => Err(self.bad_value()),
        }
    }

    /// Extracts an integer at full width.
    pub fn to_int64(&self) -> Result<i64> {
        match self.value() {
            SettingValue::Int(v) => Ok(*v),
            _ => Err(self.bad_value()),
        }
    }

    /// Extracts a non-negative integer as `u64`.
    pub fn to_uint64(&self) -> Result<u64> {
        match self.value() {
            SettingValue::Int(v) => u64::try_from(*v).map_err(|_| self.bad_value()),
            _ => Err(self.bad_value()),
        }
    }

    /// Extracts a string value.
    ///
    /// Shadows [`ToString::to_string`] on purpose: extraction is checked
    /// and returns a `Result`, while `Display` renders leaf paths.
    #[allow(clippy::inherent_to_string_shadow_display)]
    pub fn to_string(&self) -> Result<String> {
        match self.value() {
            SettingValue::Str(v) => Ok(v.clone()),
            _ => Err(self.bad_value()),
        }
    }

    /// Renders the node's path from the root, segments joined with `.`.
    ///
    /// A segment is the node's name when it has one, its position for
    /// array/list elements, and the literal `root` marker for the tree
    /// root. This is the identity carried by every diagnostic.
    pub fn path(&self) -> String {
        let mut segments: Vec<String> = Vec::new();
        let mut cur = self.id;
        while !self.tree.is_root(cur) {
            match self.tree.name(cur) {
                Some(name) => segments.push(name.to_string()),
                None => segments.push(self.tree.index_of(cur).to_string()),
            }
            match self.tree.parent(cur) {
                Some(p) => cur = p,
                None => break,
            }
        }
        segments.push("root".to_string());
        segments.reverse();
        segments.join(".")
    }

    /// Returns the number of children (0 for scalars).
    pub fn size(&self) -> usize {
        self.tree.child_count(self.id)
    }

    /// Returns the immediate ancestor, `None` at the root.
    pub fn parent(&self) -> Option<Setting<'t>> {
        self.tree.parent(self.id).map(|p| Setting::new(self.tree, p))
    }

    /// Returns the node's name, absent for the root and sequence elements.
    pub fn name(&self) -> Option<&'t str> {
        self.tree.name(self.id)
    }

    /// True iff this node is a group with a member of the given name.
    ///
    /// Always false for non-group nodes.
    pub fn exists(&self, name: &str) -> bool {
        self.is_group() && self.tree.member(self.id, name).is_some()
    }

    /// Resolves a member of a group by name.
    ///
    /// When `visit` is true, the resolved node and its ancestors are marked
    /// visited for unused-entry reporting. Fails with
    /// [`ConfigError::NotFound`] when this node is not a group or has no
    /// such member.
    pub fn lookup(&self, name: &str, visit: bool) -> Result<Setting<'t>> {
        if !self.is_group() {
            return Err(self.not_found_name(name));
        }
        match self.tree.member(self.id, name) {
            Some(id) => {
                if visit {
                    self.tree.visit_up(id);
                }
                Ok(Setting::new(self.tree, id))
            }
            None => Err(self.not_found_name(name)),
        }
    }

    /// Resolves a child of a group, array or list by position.
    ///
    /// When `visit` is true, the resolved node and its ancestors are marked
    /// visited. Fails with [`ConfigError::NotFound`] when the index is out
    /// of range or this node holds a scalar.
    pub fn lookup_idx(&self, indx: usize, visit: bool) -> Result<Setting<'t>> {
        if self.is_scalar() {
            return Err(self.not_found_idx(indx));
        }
        match self.tree.elem(self.id, indx) {
            Some(id) => {
                if visit {
                    self.tree.visit_up(id);
                }
                Ok(Setting::new(self.tree, id))
            }
            None => Err(self.not_found_idx(indx)),
        }
    }

    /// Visiting lookup by name; shorthand for `lookup(name, true)`.
    ///
    /// This is the idiomatic access path: any setting reached through
    /// `child` counts as used, as does every group on the way to it.
    pub fn child(&self, name: &str) -> Result<Setting<'t>> {
        self.lookup(name, true)
    }

    /// Visiting lookup by position; shorthand for `lookup_idx(indx, true)`.
    pub fn elem(&self, indx: usize) -> Result<Setting<'t>> {
        self.lookup_idx(indx, true)
    }

    /// The source file this node was parsed from.
    pub fn filename(&self) -> &'t str {
        self.tree.filename()
    }

    /// The node's 1-based source line (0 when unknown).
    pub fn fileline(&self) -> usize {
        self.tree.line(self.id)
    }

    /// True iff the node counts as used.
    ///
    /// A node is visited when its path falls under an exempt prefix
    /// (`root.version` by default) or when a visiting lookup has marked it
    /// or any of its descendants. Evaluated for leaves during the teardown
    /// sweep, but well-defined for any node.
    pub fn visited(&self) -> bool {
        self.tree.is_exempt(&self.path()) || self.tree.is_visited(self.id)
    }

    pub(crate) fn bad_value(&self) -> ConfigError {
        ConfigError::BadValue {
            path: self.path(),
            filename: self.filename().to_string(),
            line: self.fileline(),
        }
    }

    pub(crate) fn not_found_name(&self, name: &str) -> ConfigError {
        ConfigError::NotFound {
            path: format!("{}.{}", self.path(), name),
            filename: self.filename().to_string(),
            line: self.fileline(),
        }
    }

    pub(crate) fn not_found_idx(&self, indx: usize) -> ConfigError {
        ConfigError::NotFound {
            path: format!("{}.{}", self.path(), indx),
            filename: self.filename().to_string(),
            line: self.fileline(),
        }
    }
}

/// Applies `f` to every leaf beneath `st`, depth-first in document order.
///
/// A leaf is a node with zero children, so empty groups and sequences count
/// as leaves, the same definition the teardown sweep uses.
pub(crate) fn for_each_leaf<'t, F: FnMut(Setting<'t>)>(st: Setting<'t>, f: &mut F) {
    let n = st.size();
    if n == 0 {
        f(st);
        return;
    }
    for indx in 0..n {
        if let Ok(child) = st.lookup_idx(indx, false) {
            for_each_leaf(child, f);
        }
    }
}

impl fmt::Display for Setting<'_> {
    /// Prints the full path of every leaf beneath this node, one per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut res = Ok(());
        for_each_leaf(*self, &mut |st| {
            if res.is_ok() {
                res = writeln!(f, "{}", st.path());
            }
        });
        res
    }
}
