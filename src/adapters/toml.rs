// SPDX-License-Identifier: MIT OR Apache-2.0

//! TOML tree parser adapter.
//!
//! This module provides the shipped implementation of
//! [`TreeParser`](crate::ports::TreeParser), built on `toml_edit`'s
//! span-preserving document so every node can be traced back to a source
//! line.
//!
//! Mapping from the TOML value model onto the tree's type tags:
//!
//! - booleans, integers, floats, strings map to the matching scalar tag;
//!   datetimes are carried as strings
//! - tables and inline tables map to groups
//! - an inline array whose elements are scalars of one kind maps to an
//!   array; any other array, and every array of tables, maps to a list

use crate::domain::{ConfigError, Result, SettingId, SettingValue, SettingsTree};
use crate::ports::TreeParser;
use toml_edit::{Array, ImDocument, Item, Table, Value};
use tracing::debug;

/// TOML parser implementation.
///
/// # Examples
///
/// ```rust
/// use cfgtrail::adapters::TomlParser;
/// use cfgtrail::ports::TreeParser;
///
/// let parser = TomlParser::new();
/// let tree = parser.parse("module = { port = 8080 }", "demo.toml").unwrap();
/// let module = tree.member(tree.root(), "module").unwrap();
/// assert!(tree.member(module, "port").is_some());
/// ```
#[derive(Debug, Clone)]
pub struct TomlParser;

impl TomlParser {
    /// Creates a new TOML parser.
    pub fn new() -> Self {
        TomlParser
    }
}

impl Default for TomlParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeParser for TomlParser {
    fn parse(&self, content: &str, filename: &str) -> Result<SettingsTree> {
        let doc = ImDocument::parse(content.to_owned()).map_err(|source| ConfigError::Parse {
            path: filename.to_string(),
            source,
        })?;

        let lines = LineIndex::new(content);
        let mut tree = SettingsTree::new(filename);
        let root = tree.root();
        convert_table(&mut tree, root, doc.as_table(), &lines);

        debug!(
            "parsed {} settings from {}",
            tree.node_count() - 1,
            filename
        );
        Ok(tree)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["toml"]
    }
}

/// Byte-offset to 1-based line conversion for span-carrying nodes.
struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    fn new(content: &str) -> Self {
        let mut starts = vec![0];
        for (offset, byte) in content.bytes().enumerate() {
            if byte == b'\n' {
                starts.push(offset + 1);
            }
        }
        LineIndex { starts }
    }

    fn line_of(&self, offset: usize) -> usize {
        self.starts.partition_point(|&start| start <= offset)
    }
}

fn convert_table(tree: &mut SettingsTree, parent: SettingId, table: &Table, lines: &LineIndex) {
    for (name, item) in table.iter() {
        let line = table
            .get_key_value(name)
            .and_then(|(key, _)| key.span())
            .map(|span| lines.line_of(span.start))
            .unwrap_or(0);
        convert_item(tree, parent, name, item, line, lines);
    }
}

fn convert_item(
    tree: &mut SettingsTree,
    parent: SettingId,
    name: &str,
    item: &Item,
    line: usize,
    lines: &LineIndex,
) {
    match item {
        Item::Value(value) => {
            convert_value(tree, parent, Some(name), value, line, lines);
        }
        Item::Table(table) => {
            let line = if line != 0 {
                line
            } else {
                table
                    .span()
                    .map(|span| lines.line_of(span.start))
                    .unwrap_or(0)
            };
            let id = tree.push_child(parent, Some(name), SettingValue::Group, line);
            convert_table(tree, id, table, lines);
        }
        Item::ArrayOfTables(tables) => {
            let id = tree.push_child(parent, Some(name), SettingValue::List, line);
            for table in tables.iter() {
                let table_line = table
                    .span()
                    .map(|span| lines.line_of(span.start))
                    .unwrap_or(0);
                let elem = tree.push_child(id, None, SettingValue::Group, table_line);
                convert_table(tree, elem, table, lines);
            }
        }
        Item::None => {}
    }
}

fn convert_value(
    tree: &mut SettingsTree,
    parent: SettingId,
    name: Option<&str>,
    value: &Value,
    line: usize,
    lines: &LineIndex,
) {
    let line = if line != 0 {
        line
    } else {
        value
            .span()
            .map(|span| lines.line_of(span.start))
            .unwrap_or(0)
    };
    match value {
        Value::Boolean(v) => {
            tree.push_child(parent, name, SettingValue::Bool(*v.value()), line);
        }
        Value::Integer(v) => {
            tree.push_child(parent, name, SettingValue::Int(*v.value()), line);
        }
        Value::Float(v) => {
            tree.push_child(parent, name, SettingValue::Float(*v.value()), line);
        }
        Value::String(v) => {
            tree.push_child(parent, name, SettingValue::Str(v.value().clone()), line);
        }
        Value::Datetime(v) => {
            tree.push_child(parent, name, SettingValue::Str(v.value().to_string()), line);
        }
        Value::Array(array) => {
            let tag = if is_uniform_scalar(array) {
                SettingValue::Array
            } else {
                SettingValue::List
            };
            let id = tree.push_child(parent, name, tag, line);
            for elem in array.iter() {
                convert_value(tree, id, None, elem, 0, lines);
            }
        }
        Value::InlineTable(table) => {
            let id = tree.push_child(parent, name, SettingValue::Group, line);
            for (key, elem) in table.iter() {
                convert_value(tree, id, Some(key), elem, 0, lines);
            }
        }
    }
}

fn scalar_tag(value: &Value) -> Option<&'static str> {
    match value {
        Value::Boolean(_) => Some("bool"),
        Value::Integer(_) => Some("int"),
        Value::Float(_) => Some("float"),
        Value::String(_) | Value::Datetime(_) => Some("str"),
        Value::Array(_) | Value::InlineTable(_) => None,
    }
}

fn is_uniform_scalar(array: &Array) -> bool {
    let mut iter = array.iter();
    let first = match iter.next() {
        Some(value) => scalar_tag(value),
        None => return true,
    };
    first.is_some() && iter.all(|value| scalar_tag(value) == first)
}
