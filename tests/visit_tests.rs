// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for visitation tracking and the teardown sweep.
//!
//! The recording callback pattern mirrors the intended production use:
//! the callback receives every leaf and filters on `visited()`.

use cfgtrail::prelude::*;
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

const SERVICE_TOML: &str = r#"version = "1.0"

[module]
name = "svc"
port = 8080
"#;

/// Builds a config whose callback records the path of every unvisited leaf.
fn recording_config() -> (Config, Rc<RefCell<Vec<String>>>) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let conf = Config::with_notify(move |st| {
        if !st.visited() {
            sink.borrow_mut().push(st.path());
        }
    });
    (conf, seen)
}

fn as_set(paths: &[String]) -> HashSet<String> {
    paths.iter().cloned().collect()
}

#[test]
fn test_no_lookups_reports_every_leaf_except_version() {
    let (mut conf, seen) = recording_config();
    conf.load_str(SERVICE_TOML).unwrap();
    drop(conf);
    assert_eq!(
        as_set(&seen.borrow()),
        HashSet::from(["root.module.name".to_string(), "root.module.port".to_string()])
    );
}

#[test]
fn test_all_visited_reports_nothing() {
    let (mut conf, seen) = recording_config();
    conf.load_str(SERVICE_TOML).unwrap();
    {
        let module = conf.root().child("module").unwrap();
        module.child("name").unwrap();
        module.child("port").unwrap();
    }
    drop(conf);
    assert!(seen.borrow().is_empty());
}

#[test]
fn test_partial_visit_reports_only_untouched_leaf() {
    // module.name is consulted, module.port is not, version is never
    // accessed: only root.module.port must be reported.
    let (mut conf, seen) = recording_config();
    conf.load_str(SERVICE_TOML).unwrap();
    {
        let name = conf.root().child("module").unwrap().child("name").unwrap();
        assert_eq!(name.to_string().unwrap(), "svc");
        assert!(name.visited());
        assert!(conf.root().lookup("module", false).unwrap().visited());
        let port = conf
            .root()
            .lookup("module", false)
            .unwrap()
            .lookup("port", false)
            .unwrap();
        assert!(!port.visited());
    }
    drop(conf);
    assert_eq!(*seen.borrow(), ["root.module.port".to_string()]);
}

#[test]
fn test_version_subtree_always_exempt() {
    let (mut conf, seen) = recording_config();
    conf.load_str("version = { major = 1, minor = 2 }\nport = 80\n")
        .unwrap();
    drop(conf);
    assert_eq!(*seen.borrow(), ["root.port".to_string()]);
}

#[test]
fn test_version_like_names_are_not_exempt() {
    let (mut conf, seen) = recording_config();
    conf.load_str("versionx = 1\n").unwrap();
    drop(conf);
    assert_eq!(*seen.borrow(), ["root.versionx".to_string()]);
}

#[test]
fn test_visiting_marks_up_to_already_visited_ancestor() {
    let mut conf = Config::new();
    conf.load_str("[outer.inner]\na = 1\nb = 2\n").unwrap();
    let root = conf.root();

    root.child("outer")
        .unwrap()
        .child("inner")
        .unwrap()
        .child("a")
        .unwrap();
    let outer = root.lookup("outer", false).unwrap();
    let inner = outer.lookup("inner", false).unwrap();
    assert!(outer.visited());
    assert!(inner.visited());
    assert!(inner.lookup("a", false).unwrap().visited());
    assert!(!inner.lookup("b", false).unwrap().visited());

    // Second deep visit stops early at the marked ancestors but still
    // marks the new leaf.
    inner.child("b").unwrap();
    assert!(inner.lookup("b", false).unwrap().visited());
}

#[test]
fn test_non_visiting_lookup_changes_nothing() {
    let (mut conf, seen) = recording_config();
    conf.load_str("[module]\nname = \"svc\"\n").unwrap();
    {
        let module = conf.root().lookup("module", false).unwrap();
        let name = module.lookup("name", false).unwrap();
        assert!(!name.visited());
        assert!(!module.visited());
    }
    drop(conf);
    assert_eq!(*seen.borrow(), ["root.module.name".to_string()]);
}

#[test]
fn test_indexed_visits_mark_elements() {
    let (mut conf, seen) = recording_config();
    conf.load_str("hosts = [\"a\", \"b\"]\n").unwrap();
    conf.root().child("hosts").unwrap().elem(0).unwrap();
    drop(conf);
    assert_eq!(*seen.borrow(), ["root.hosts.1".to_string()]);
}

#[test]
fn test_callback_receives_every_leaf() {
    let count = Rc::new(RefCell::new(0usize));
    let sink = Rc::clone(&count);
    let mut conf = Config::with_notify(move |_st| {
        *sink.borrow_mut() += 1;
    });
    conf.load_str(SERVICE_TOML).unwrap();
    conf.root().child("module").unwrap().child("name").unwrap();
    drop(conf);
    // version, module.name and module.port: visited or not, all reported.
    assert_eq!(*count.borrow(), 3);
}

#[test]
fn test_custom_exempt_prefixes() {
    let (mut conf, seen) = recording_config();
    conf.set_exempt_prefixes(["root.meta", "root.version"]);
    conf.load_str("meta = { revision = 7 }\nversion = \"1.0\"\nport = 80\n")
        .unwrap();
    drop(conf);
    assert_eq!(*seen.borrow(), ["root.port".to_string()]);
}

#[test]
fn test_sweep_order_is_depth_first_document_order() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let mut conf = Config::with_notify(move |st| {
        sink.borrow_mut().push(st.path());
    });
    conf.load_str("a = 1\n[g]\nb = 2\nc = 3\nd = [4, 5]\n").unwrap();
    drop(conf);
    assert_eq!(
        *seen.borrow(),
        [
            "root.a".to_string(),
            "root.g.b".to_string(),
            "root.g.c".to_string(),
            "root.g.d.0".to_string(),
            "root.g.d.1".to_string(),
        ]
    );
}

#[test]
fn test_empty_config_reports_root_as_single_leaf() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let conf = Config::with_notify(move |st| {
        sink.borrow_mut().push((st.path(), st.visited()));
    });
    drop(conf);
    assert_eq!(*seen.borrow(), [("root".to_string(), false)]);
}
