// SPDX-License-Identifier: MIT OR Apache-2.0

//! The settings arena backing a loaded configuration.
//!
//! A [`SettingsTree`] is the flattened form of one parsed document: every
//! node of the collaborator's tree becomes one arena slot holding its typed
//! value, optional name, parent link, children and source line. The arena is
//! also the sole owner of the out-of-band visitation flags, so the flags
//! live exactly as long as the tree itself.
//!
//! Parsers (see [`crate::ports::TreeParser`]) build a tree through
//! [`SettingsTree::push_child`]; the access layer reads it back through the
//! accessor methods. Node identity is arena identity: a [`SettingId`] names
//! one node for the lifetime of its tree.

use std::cell::Cell;

/// Path prefix excluded from unused-entry reporting by default.
///
/// Leaves under this prefix report as visited even when never looked up,
/// allowing an undeclared version stanza without triggering a diagnostic.
/// See [`crate::domain::Config::set_exempt_prefixes`] to change the policy.
pub const DEFAULT_EXEMPT_PREFIX: &str = "root.version";

/// Identifies one node within its owning [`SettingsTree`].
///
/// Ids are plain indices: cheap to copy, comparable, and only meaningful
/// against the tree that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SettingId(usize);

/// The type tag of a setting node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKind {
    /// A boolean scalar.
    Bool,
    /// An integer scalar (64-bit storage; see [`crate::domain::Setting::is_int32`]).
    Int,
    /// A floating-point scalar.
    Float,
    /// A string scalar.
    Str,
    /// A group of named settings.
    Group,
    /// A homogeneous sequence of scalars, addressed by position.
    Array,
    /// A heterogeneous sequence, addressed by position.
    List,
}

/// The value stored in a setting node.
///
/// Aggregate variants carry no payload; their contents are the node's
/// children in the arena.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    /// A boolean scalar.
    Bool(bool),
    /// An integer scalar. Stored at full 64-bit width; narrower extractions
    /// are range-checked at access time.
    Int(i64),
    /// A floating-point scalar.
    Float(f64),
    /// A string scalar.
    Str(String),
    /// A group of named children.
    Group,
    /// A homogeneous sequence of scalar children.
    Array,
    /// A heterogeneous sequence of children.
    List,
}

impl SettingValue {
    /// Returns the type tag for this value.
    pub fn kind(&self) -> SettingKind {
        match self {
            SettingValue::Bool(_) => SettingKind::Bool,
            SettingValue::Int(_) => SettingKind::Int,
            SettingValue::Float(_) => SettingKind::Float,
            SettingValue::Str(_) => SettingKind::Str,
            SettingValue::Group => SettingKind::Group,
            SettingValue::Array => SettingKind::Array,
            SettingValue::List => SettingKind::List,
        }
    }
}

#[derive(Debug)]
struct RawSetting {
    value: SettingValue,
    name: Option<String>,
    parent: Option<SettingId>,
    children: Vec<SettingId>,
    line: usize,
    visited: Cell<bool>,
}

/// One parsed configuration document, flattened into an arena.
///
/// The root node always exists (an unnamed group), so a freshly constructed
/// tree is a valid, empty configuration. The tree is deliberately `!Sync`:
/// visitation flags are mutated without synchronization, and concurrent
/// access must be serialized by the caller.
///
/// # Examples
///
/// ```
/// use cfgtrail::domain::{SettingValue, SettingsTree};
///
/// let mut tree = SettingsTree::new("demo.toml");
/// let root = tree.root();
/// let port = tree.push_child(root, Some("port"), SettingValue::Int(8080), 1);
/// assert_eq!(tree.member(root, "port"), Some(port));
/// assert_eq!(tree.parent(port), Some(root));
/// ```
#[derive(Debug)]
pub struct SettingsTree {
    nodes: Vec<RawSetting>,
    filename: String,
    exempt: Vec<String>,
}

impl SettingsTree {
    /// Creates an empty tree (root group only) for the given source name.
    pub fn new(filename: &str) -> Self {
        SettingsTree {
            nodes: vec![RawSetting {
                value: SettingValue::Group,
                name: None,
                parent: None,
                children: Vec::new(),
                line: 0,
                visited: Cell::new(false),
            }],
            filename: filename.to_string(),
            exempt: vec![DEFAULT_EXEMPT_PREFIX.to_string()],
        }
    }

    /// Returns the id of the root node.
    pub fn root(&self) -> SettingId {
        SettingId(0)
    }

    /// Appends a node under `parent` and returns its id.
    ///
    /// `name` is `None` for array/list elements, whose identity is their
    /// position. `line` is the 1-based source line, or 0 when unknown.
    pub fn push_child(
        &mut self,
        parent: SettingId,
        name: Option<&str>,
        value: SettingValue,
        line: usize,
    ) -> SettingId {
        let id = SettingId(self.nodes.len());
        self.nodes.push(RawSetting {
            value,
            name: name.map(str::to_string),
            parent: Some(parent),
            children: Vec::new(),
            line,
            visited: Cell::new(false),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Returns the stored value of a node.
    pub fn value(&self, id: SettingId) -> &SettingValue {
        &self.nodes[id.0].value
    }

    /// Returns the type tag of a node.
    pub fn kind(&self, id: SettingId) -> SettingKind {
        self.nodes[id.0].value.kind()
    }

    /// Returns the node's name, absent for the root and for array/list elements.
    pub fn name(&self, id: SettingId) -> Option<&str> {
        self.nodes[id.0].name.as_deref()
    }

    /// Returns the node's immediate ancestor, `None` at the root.
    pub fn parent(&self, id: SettingId) -> Option<SettingId> {
        self.nodes[id.0].parent
    }

    /// Returns the number of children of a node (0 for scalars).
    pub fn child_count(&self, id: SettingId) -> usize {
        self.nodes[id.0].children.len()
    }

    /// Resolves a named member among the node's children.
    pub fn member(&self, id: SettingId, name: &str) -> Option<SettingId> {
        self.nodes[id.0]
            .children
            .iter()
            .copied()
            .find(|c| self.nodes[c.0].name.as_deref() == Some(name))
    }

    /// Resolves a child by position.
    pub fn elem(&self, id: SettingId, indx: usize) -> Option<SettingId> {
        self.nodes[id.0].children.get(indx).copied()
    }

    /// Returns the node's position among its parent's children (0 at root).
    pub fn index_of(&self, id: SettingId) -> usize {
        match self.nodes[id.0].parent {
            Some(p) => self.nodes[p.0]
                .children
                .iter()
                .position(|c| *c == id)
                .unwrap_or(0),
            None => 0,
        }
    }

    /// True iff the node is the tree root.
    pub fn is_root(&self, id: SettingId) -> bool {
        id.0 == 0
    }

    /// Returns the source file name this tree was parsed from.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Returns the 1-based source line of a node (0 when unknown).
    pub fn line(&self, id: SettingId) -> usize {
        self.nodes[id.0].line
    }

    /// Total number of nodes in the tree, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Replaces the path prefixes exempt from unused-entry reporting.
    pub fn set_exempt_prefixes(&mut self, prefixes: Vec<String>) {
        self.exempt = prefixes;
    }

    /// The path prefixes currently exempt from unused-entry reporting.
    pub fn exempt_prefixes(&self) -> &[String] {
        &self.exempt
    }

    /// Segment-aware prefix test: `root.version` exempts `root.version`
    /// and `root.version.build`, not `root.versionx`.
    pub(crate) fn is_exempt(&self, path: &str) -> bool {
        self.exempt.iter().any(|p| {
            path == p.as_str()
                || (path.len() > p.len()
                    && path.starts_with(p.as_str())
                    && path.as_bytes()[p.len()] == b'.')
        })
    }

    pub(crate) fn is_visited(&self, id: SettingId) -> bool {
        self.nodes[id.0].visited.get()
    }

    /// Marks `id` and its ancestor chain visited, stopping at the first
    /// already-marked ancestor or the root. Iterative on purpose: lookup
    /// depth must not be bounded by stack depth.
    pub(crate) fn visit_up(&self, mut id: SettingId) {
        while !self.is_root(id) && !self.is_visited(id) {
            self.nodes[id.0].visited.set(true);
            match self.parent(id) {
                Some(p) => id = p,
                None => break,
            }
        }
    }
}
