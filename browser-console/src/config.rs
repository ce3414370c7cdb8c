//! Startup configuration.
//!
//! The only setting is whether output is enabled. It can come from a TOML document and from the
//! [`ENABLED_ENV_VAR`] environment variable, the latter taking precedence:
//!
//! ```toml
//! # browser-console.toml
//! enabled = false
//! ```

use std::ffi::OsString;

use serde::Deserialize;

use crate::console::BrowserConsole;
use crate::error::ConfigError;

/// Environment variable overriding [`Config::enabled`].
pub const ENABLED_ENV_VAR: &str = "BROWSER_CONSOLE_ENABLED";

/// Browser console configuration.
///
/// # Examples
///
/// ```rust
/// use browser_console::Config;
///
/// let config = Config::from_toml("enabled = false").unwrap();
/// assert!(!config.enabled);
/// assert!(!config.console().is_enabled());
///
/// assert!(Config::default().enabled);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Whether consoles created from this configuration write anything.
    pub enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Config {
    /// Parses a TOML document; missing keys keep their defaults.
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// The default configuration with environment overrides applied.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_overrides()
    }

    /// Applies overrides from the process environment.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides_from(|name| std::env::var_os(name))
    }

    pub(crate) fn with_overrides_from(
        mut self,
        lookup: impl Fn(&str) -> Option<OsString>,
    ) -> Result<Self, ConfigError> {
        if let Some(raw) = lookup(ENABLED_ENV_VAR) {
            let value = raw.to_string_lossy();
            self.enabled = parse_named_flag(ENABLED_ENV_VAR, &value)?;
        }
        Ok(self)
    }

    /// Creates a console on standard output honoring this configuration.
    pub fn console(&self) -> BrowserConsole {
        BrowserConsole::new(self.enabled)
    }
}

/// Parses a boolean flag as it appears in environment variables and on the command line.
///
/// Accepts, ignoring ASCII case and surrounding whitespace, `true`, `(true)`, `1`, `on` and
/// `yes` as `true`, and `false`, `(false)`, `0`, `off`, `no` and the empty string as `false`.
///
/// # Examples
///
/// ```rust
/// use browser_console::parse_flag;
///
/// assert!(parse_flag("TRUE").unwrap());
/// assert!(!parse_flag("(false)").unwrap());
/// assert!(parse_flag("maybe").is_err());
/// ```
pub fn parse_flag(value: &str) -> Result<bool, ConfigError> {
    parse_named_flag("flag", value)
}

fn parse_named_flag(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "(true)" | "1" | "on" | "yes" => Ok(true),
        "false" | "(false)" | "0" | "off" | "no" | "" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            name,
            value: value.to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn env(value: Option<&str>) -> impl Fn(&str) -> Option<OsString> {
        let value = value.map(OsString::from);
        move |name| {
            assert_eq!(name, ENABLED_ENV_VAR);
            value.clone()
        }
    }

    #[test]
    fn toml_defaults_and_values() {
        assert_eq!(Config::from_toml("").unwrap(), Config { enabled: true });
        assert_eq!(
            Config::from_toml(indoc! {"
                # keep the page clean in production
                enabled = false
            "})
            .unwrap(),
            Config { enabled: false }
        );
    }

    #[test]
    fn toml_rejects_unknown_keys_and_wrong_types() {
        assert!(matches!(
            Config::from_toml("enable = false"),
            Err(ConfigError::Toml(_))
        ));
        assert!(matches!(
            Config::from_toml(r#"enabled = "no""#),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn environment_overrides_toml() {
        let config = Config::from_toml("enabled = true").unwrap();

        assert_eq!(
            config.with_overrides_from(env(Some("false"))).unwrap(),
            Config { enabled: false }
        );
        assert_eq!(
            config.with_overrides_from(env(None)).unwrap(),
            Config { enabled: true }
        );
    }

    #[test]
    fn invalid_environment_value_names_the_variable() {
        let error = Config::default()
            .with_overrides_from(env(Some("sometimes")))
            .unwrap_err();

        assert_eq!(
            error.to_string(),
            "invalid value \"sometimes\" for BROWSER_CONSOLE_ENABLED, expected a boolean"
        );
    }

    #[test]
    fn flag_spellings() {
        for value in ["true", "(true)", "1", "on", "yes", " Yes ", "TRUE"] {
            assert!(parse_flag(value).unwrap(), "{value:?}");
        }
        for value in ["false", "(false)", "0", "off", "no", "", "False"] {
            assert!(!parse_flag(value).unwrap(), "{value:?}");
        }
        for value in ["2", "enabled", "null", "tru"] {
            assert!(parse_flag(value).is_err(), "{value:?}");
        }
    }
}
