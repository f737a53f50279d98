// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing parser implementations.
//!
//! This module contains the concrete implementations of the ports traits.
//! The shipped adapter parses TOML through `toml_edit`, keeping byte spans
//! so every setting carries its source line.

pub mod toml;

// Re-export adapters
pub use toml::TomlParser;
