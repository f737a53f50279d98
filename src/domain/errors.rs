// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the configuration access layer.
//!
//! This module defines the error taxonomy for typed access and loading.
//! All errors use `thiserror` and carry the node's rendered path plus its
//! source location, which is the canonical identity used in diagnostics.

use thiserror::Error;

/// The main error type for configuration operations.
///
/// Every access failure carries the dot-joined path of the setting involved
/// (for example `root.module.port`) together with the source file name and
/// 1-based line the setting came from, so a diagnostic can be traced back to
/// the configuration text without further context.
///
/// # Examples
///
/// ```
/// use cfgtrail::domain::errors::ConfigError;
///
/// let err = ConfigError::BadValue {
///     path: "root.module.port".to_string(),
///     filename: "service.toml".to_string(),
///     line: 3,
/// };
/// assert_eq!(
///     err.to_string(),
///     "config bad value: root.module.port at service.toml:3"
/// );
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A scalar was requested with a type that does not match the stored
    /// type, or an unsigned extraction encountered a negative value.
    #[error("config bad value: {path} at {filename}:{line}")]
    BadValue {
        /// Rendered path of the offending setting.
        path: String,
        /// Source file the setting was read from.
        filename: String,
        /// 1-based source line (0 when unknown).
        line: usize,
    },

    /// A named or indexed child lookup failed because no such child exists.
    #[error("config not found: {path} at {filename}:{line}")]
    NotFound {
        /// Rendered path including the requested-but-missing trailing segment.
        path: String,
        /// Source file of the setting the lookup was made on.
        filename: String,
        /// 1-based source line of the setting the lookup was made on.
        line: usize,
    },

    /// The configuration file could not be read.
    #[error("config read error: {path}")]
    Read {
        /// Path of the file that could not be read.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration text did not parse as valid syntax.
    #[error("config parse error: {path}")]
    Parse {
        /// Path of the file (or `<string>` for in-memory documents).
        path: String,
        /// The underlying parser error.
        #[source]
        source: toml_edit::TomlError,
    },
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_value_display() {
        let err = ConfigError::BadValue {
            path: "root.module.port".to_string(),
            filename: "svc.toml".to_string(),
            line: 7,
        };
        assert_eq!(
            err.to_string(),
            "config bad value: root.module.port at svc.toml:7"
        );
    }

    #[test]
    fn test_not_found_display() {
        let err = ConfigError::NotFound {
            path: "root.module.missing".to_string(),
            filename: "svc.toml".to_string(),
            line: 1,
        };
        assert_eq!(
            err.to_string(),
            "config not found: root.module.missing at svc.toml:1"
        );
    }

    #[test]
    fn test_read_display_carries_path() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = ConfigError::Read {
            path: "/etc/svc.toml".to_string(),
            source: io,
        };
        assert_eq!(err.to_string(), "config read error: /etc/svc.toml");
    }

    #[test]
    fn test_parse_has_source() {
        use std::error::Error;

        let toml_err = match toml_edit::ImDocument::parse("a = ".to_string()) {
            Err(err) => err,
            Ok(_) => panic!("expected parse failure"),
        };
        let err = ConfigError::Parse {
            path: "<string>".to_string(),
            source: toml_err,
        };
        assert_eq!(err.to_string(), "config parse error: <string>");
        assert!(err.source().is_some());
    }
}
