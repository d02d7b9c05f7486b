//! crates/logging/src/config.rs
//! Diagnostics configuration from the environment or `key=value` tokens.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Environment variable selecting the color mode (`auto`, `always`, `never`).
pub const COLOR_ENV: &str = "DIAG_COLOR";
/// Any value disables color regardless of [`COLOR_ENV`].
pub const NO_COLOR_ENV: &str = "NO_COLOR";
/// Environment variable holding the global level.
pub const LEVEL_ENV: &str = "DIAG_LEVEL";
/// Environment variable holding the global mask, decimal or `0x` hex.
pub const MASK_ENV: &str = "DIAG_MASK";

/// Color mode.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ColorChoice {
    /// Color on Linux, plain elsewhere.
    #[default]
    Auto,
    /// Always color.
    Always,
    /// Never color.
    Never,
}

impl ColorChoice {
    /// Resolves the choice to an on/off decision.
    #[must_use]
    pub const fn enabled(self) -> bool {
        match self {
            Self::Auto => palette::default_enabled(),
            Self::Always => true,
            Self::Never => false,
        }
    }

    /// Lowercase name accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Always => "always",
            Self::Never => "never",
        }
    }
}

impl fmt::Display for ColorChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorChoice {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "always" | "on" | "yes" => Ok(Self::Always),
            "never" | "off" | "no" => Ok(Self::Never),
            _ => Err(ConfigError::InvalidValue {
                key: "color",
                value: s.to_owned(),
            }),
        }
    }
}

/// Process-wide diagnostics settings applied by [`init`](crate::init).
///
/// ```
/// use logging::{ColorChoice, DiagConfig};
///
/// let mut config = DiagConfig::default();
/// config.apply_token("color=never").unwrap();
/// config.apply_token("mask=0xA").unwrap();
/// assert_eq!(config.color, ColorChoice::Never);
/// assert_eq!(config.mask, 10);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DiagConfig {
    /// Color mode.
    pub color: ColorChoice,
    /// Global level consulted by [`lvl_msg`](crate::lvl_msg).
    pub level: i32,
    /// Global mask consulted by [`mask_msg`](crate::mask_msg).
    pub mask: u32,
}

impl DiagConfig {
    /// Reads [`COLOR_ENV`], [`NO_COLOR_ENV`], [`LEVEL_ENV`] and [`MASK_ENV`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// As [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(value) = lookup(COLOR_ENV) {
            config.color = value.parse()?;
        }
        if lookup(NO_COLOR_ENV).is_some() {
            config.color = ColorChoice::Never;
        }
        if let Some(value) = lookup(LEVEL_ENV) {
            config.level = parse_level(&value)?;
        }
        if let Some(value) = lookup(MASK_ENV) {
            config.mask = parse_mask(&value)?;
        }
        Ok(config)
    }

    /// Applies one `key=value` token: `color`, `level` or `mask`.
    pub fn apply_token(&mut self, token: &str) -> Result<(), ConfigError> {
        let (key, value) = token
            .split_once('=')
            .ok_or_else(|| ConfigError::MalformedToken {
                token: token.to_owned(),
            })?;
        match key.trim() {
            "color" => self.color = value.parse()?,
            "level" => self.level = parse_level(value)?,
            "mask" => self.mask = parse_mask(value)?,
            other => {
                return Err(ConfigError::UnknownKey {
                    key: other.to_owned(),
                });
            }
        }
        Ok(())
    }

    /// Applies each comma-separated token in turn.
    pub fn apply_tokens(&mut self, tokens: &str) -> Result<(), ConfigError> {
        tokens
            .split(',')
            .filter(|token| !token.trim().is_empty())
            .try_for_each(|token| self.apply_token(token))
    }
}

fn parse_level(value: &str) -> Result<i32, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: "level",
        value: value.to_owned(),
    })
}

fn parse_mask(value: &str) -> Result<u32, ConfigError> {
    let trimmed = value.trim();
    let parsed = match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => trimmed.parse(),
    };
    parsed.map_err(|_| ConfigError::InvalidValue {
        key: "mask",
        value: value.to_owned(),
    })
}
