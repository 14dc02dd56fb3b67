//! Token colors.
//!
//! This module contains the `PaletteConfig` struct which maps token kinds
//! to `#rrggbb` colors for the ANSI renderer.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use yutex_core::{Result, TokenKind, YutexError};

/// Colors per token kind.
///
/// Keys are token kind names, matched case-insensitively (`Tag`, `comment`,
/// ...). Values are `#rrggbb` hex strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaletteConfig {
    colors: BTreeMap<String, String>,
}

impl PaletteConfig {
    /// Raw hex string configured for `kind`.
    pub fn hex(&self, kind: TokenKind) -> Option<&str> {
        self.colors
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(kind.name()))
            .map(|(_, hex)| hex.as_str())
    }

    /// RGB color configured for `kind`, if it is set and well formed.
    pub fn color(&self, kind: TokenKind) -> Option<(u8, u8, u8)> {
        self.hex(kind).and_then(parse_hex)
    }

    /// Set the color of `kind`.
    pub fn set(&mut self, kind: TokenKind, hex: impl Into<String>) {
        self.colors.retain(|name, _| !name.eq_ignore_ascii_case(kind.name()));
        self.colors.insert(kind.name().to_string(), hex.into());
    }

    /// Merge another palette into this one.
    ///
    /// Colors set in `other` replace the ones here.
    pub fn merge(&mut self, other: &PaletteConfig) {
        for (name, hex) in &other.colors {
            match TokenKind::from_name(name) {
                Some(kind) => self.set(kind, hex.clone()),
                None => {
                    self.colors.insert(name.clone(), hex.clone());
                }
            }
        }
    }

    /// Check that every key names a token kind and every value is a color.
    pub fn validate(&self) -> Result<()> {
        for (name, hex) in &self.colors {
            if TokenKind::from_name(name).is_none() {
                return Err(YutexError::Config(format!("unknown token kind in palette: {}", name)));
            }
            if parse_hex(hex).is_none() {
                return Err(YutexError::Config(format!(
                    "invalid color for {}: {:?} (expected #rrggbb)",
                    name, hex
                )));
            }
        }
        Ok(())
    }
}

/// Parse a `#rrggbb` color. The leading `#` is optional.
///
/// # Example
///
/// ```
/// use yutex_config::parse_hex;
///
/// assert_eq!(parse_hex("#ff8000"), Some((255, 128, 0)));
/// assert_eq!(parse_hex("nope"), None);
/// ```
pub fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#000000"), Some((0, 0, 0)));
        assert_eq!(parse_hex("ABCDEF"), Some((0xab, 0xcd, 0xef)));
        assert_eq!(parse_hex("#12345"), None);
        assert_eq!(parse_hex("#gg0000"), None);
        assert_eq!(parse_hex("#ééé"), None);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let palette: PaletteConfig = toml::from_str(r##"Tag = "#010203""##).unwrap();
        assert_eq!(palette.color(TokenKind::Tag), Some((1, 2, 3)));
        assert_eq!(palette.color(TokenKind::Plain), None);
    }

    #[test]
    fn test_merge_replaces_same_kind() {
        let mut base: PaletteConfig = toml::from_str(r##"Comment = "#111111""##).unwrap();
        let other: PaletteConfig = toml::from_str(r##"comment = "#222222""##).unwrap();
        base.merge(&other);
        assert_eq!(base.hex(TokenKind::Comment), Some("#222222"));
    }

    #[test]
    fn test_validate() {
        let good: PaletteConfig = toml::from_str(r##"Formula = "#e5c07b""##).unwrap();
        assert!(good.validate().is_ok());

        let unknown: PaletteConfig = toml::from_str(r##"Heading = "#e5c07b""##).unwrap();
        assert!(unknown.validate().is_err());

        let bad: PaletteConfig = toml::from_str(r#"Formula = "yellow""#).unwrap();
        assert!(bad.validate().is_err());
    }
}
