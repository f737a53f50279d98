// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generic typed-lookup helpers.
//!
//! These free functions are the idiomatic entry point for populating typed
//! configuration structures field by field: an existence check, then a
//! visiting lookup coerced into the destination's type. The `_def`
//! variants substitute a caller-supplied default on any failure, including
//! a type mismatch; that recovery is an explicit policy of the default
//! helpers, not a general catch-all.

use crate::domain::errors::Result;
use crate::domain::setting::Setting;

/// Coercion from a setting node into a concrete Rust type.
///
/// Implementations delegate to the corresponding typed extraction on
/// [`Setting`], so a mismatched type tag surfaces as
/// [`crate::domain::ConfigError::BadValue`].
pub trait FromSetting: Sized {
    /// Extracts `Self` from the given node.
    fn from_setting(st: Setting<'_>) -> Result<Self>;
}

impl FromSetting for bool {
    fn from_setting(st: Setting<'_>) -> Result<Self> {
        st.to_bool()
    }
}

impl FromSetting for f64 {
    fn from_setting(st: Setting<'_>) -> Result<Self> {
        st.to_float()
    }
}

impl FromSetting for i32 {
    fn from_setting(st: Setting<'_>) -> Result<Self> {
        st.to_int32()
    }
}

impl FromSetting for u32 {
    fn from_setting(st: Setting<'_>) -> Result<Self> {
        st.to_uint32()
    }
}

impl FromSetting for i64 {
    fn from_setting(st: Setting<'_>) -> Result<Self> {
        st.to_int64()
    }
}

impl FromSetting for u64 {
    fn from_setting(st: Setting<'_>) -> Result<Self> {
        st.to_uint64()
    }
}

impl FromSetting for String {
    fn from_setting(st: Setting<'_>) -> Result<Self> {
        st.to_string()
    }
}

/// Looks up `name` under `st` and coerces the result into `*dst`.
///
/// If the member is absent and `required` is true, fails with
/// [`crate::domain::ConfigError::NotFound`]; if absent and not required,
/// `*dst` is left unchanged. A present member is resolved with a visiting
/// lookup, so it (and its ancestors) count as used.
///
/// # Examples
///
/// ```
/// use cfgtrail::prelude::*;
///
/// # fn main() -> cfgtrail::domain::Result<()> {
/// let mut conf = Config::new();
/// conf.load_str("port = 8080")?;
/// let mut port = 0u32;
/// let mut host = String::from("localhost");
/// lookup(conf.root(), "port", &mut port, true)?;
/// lookup(conf.root(), "host", &mut host, false)?;
/// assert_eq!(port, 8080);
/// assert_eq!(host, "localhost");
/// # Ok(())
/// # }
/// ```
pub fn lookup<T: FromSetting>(
    st: Setting<'_>,
    name: &str,
    dst: &mut T,
    required: bool,
) -> Result<()> {
    if st.exists(name) {
        *dst = T::from_setting(st.lookup(name, true)?)?;
    } else if required {
        return Err(st.not_found_name(name));
    }
    Ok(())
}

/// Like [`lookup`], substituting `def` on any failure.
///
/// Both a missing member and a type mismatch fall back to the default.
pub fn lookup_def<T: FromSetting>(st: Setting<'_>, name: &str, dst: &mut T, def: impl Into<T>) {
    if lookup(st, name, dst, true).is_err() {
        *dst = def.into();
    }
}

/// Index-keyed variant of [`lookup`]; existence is `indx < st.size()`.
pub fn lookup_idx<T: FromSetting>(
    st: Setting<'_>,
    indx: usize,
    dst: &mut T,
    required: bool,
) -> Result<()> {
    if indx < st.size() {
        *dst = T::from_setting(st.lookup_idx(indx, true)?)?;
    } else if required {
        return Err(st.not_found_idx(indx));
    }
    Ok(())
}

/// Index-keyed variant of [`lookup_def`].
pub fn lookup_idx_def<T: FromSetting>(
    st: Setting<'_>,
    indx: usize,
    dst: &mut T,
    def: impl Into<T>,
) {
    if lookup_idx(st, indx, dst, true).is_err() {
        *dst = def.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Config;

    fn conf() -> Config {
        let mut conf = Config::new();
        conf.load_str(
            "name = \"svc\"\nport = 8080\nrate = 0.5\nenabled = true\nhosts = [\"a\", \"b\"]\n",
        )
        .unwrap();
        conf
    }

    #[test]
    fn test_lookup_required_present() {
        let conf = conf();
        let mut name = String::new();
        let mut port = 0u32;
        let mut rate = 0.0f64;
        let mut enabled = false;
        lookup(conf.root(), "name", &mut name, true).unwrap();
        lookup(conf.root(), "port", &mut port, true).unwrap();
        lookup(conf.root(), "rate", &mut rate, true).unwrap();
        lookup(conf.root(), "enabled", &mut enabled, true).unwrap();
        assert_eq!(name, "svc");
        assert_eq!(port, 8080);
        assert!((rate - 0.5).abs() < f64::EPSILON);
        assert!(enabled);
    }

    #[test]
    fn test_lookup_required_absent_fails() {
        let conf = conf();
        let mut missing = 0i64;
        let err = lookup(conf.root(), "missing", &mut missing, true).unwrap_err();
        assert!(err.to_string().contains("root.missing"));
    }

    #[test]
    fn test_lookup_optional_absent_leaves_destination() {
        let conf = conf();
        let mut port = 19i32;
        lookup(conf.root(), "missing", &mut port, false).unwrap();
        assert_eq!(port, 19);
    }

    #[test]
    fn test_lookup_type_mismatch_propagates_bad_value() {
        let conf = conf();
        let mut port = String::new();
        let err = lookup(conf.root(), "port", &mut port, true).unwrap_err();
        assert!(err.to_string().starts_with("config bad value: root.port"));
    }

    #[test]
    fn test_lookup_def_substitutes_on_missing_and_mismatch() {
        let conf = conf();
        let mut timeout = 0u32;
        lookup_def(conf.root(), "timeout", &mut timeout, 30u32);
        assert_eq!(timeout, 30);

        let mut port = String::new();
        lookup_def(conf.root(), "port", &mut port, "fallback");
        assert_eq!(port, "fallback");
    }

    #[test]
    fn test_lookup_marks_visited() {
        let conf = conf();
        let mut port = 0u32;
        lookup(conf.root(), "port", &mut port, true).unwrap();
        assert!(conf.root().lookup("port", false).unwrap().visited());
        assert!(!conf.root().lookup("name", false).unwrap().visited());
    }

    #[test]
    fn test_lookup_idx_on_array() {
        let conf = conf();
        let hosts = conf.root().lookup("hosts", false).unwrap();
        let mut host = String::new();
        lookup_idx(hosts, 1, &mut host, true).unwrap();
        assert_eq!(host, "b");

        let err = lookup_idx(hosts, 5, &mut host, true).unwrap_err();
        assert!(err.to_string().contains("root.hosts.5"));

        host = "kept".to_string();
        lookup_idx(hosts, 5, &mut host, false).unwrap();
        assert_eq!(host, "kept");
    }

    #[test]
    fn test_lookup_idx_def() {
        let conf = conf();
        let hosts = conf.root().lookup("hosts", false).unwrap();
        let mut host = String::new();
        lookup_idx_def(hosts, 9, &mut host, "fallback");
        assert_eq!(host, "fallback");
        lookup_idx_def(hosts, 0, &mut host, "fallback");
        assert_eq!(host, "a");
    }
}
