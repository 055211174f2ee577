//! Stage options as decoded string values.
//!
//! Every filter publishes the options it understands as a slice of
//! [`ConfigOption`]. A [`StageConfig`] holds the raw `Key=Value` pairs a user
//! supplied and is validated against that slice before a filter is built, so
//! missing or misspelled options never reach a filter constructor.

use std::collections::BTreeMap;

use crate::error::{ConfigError, Result};

/// Description of one string option accepted by a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigOption {
    pub name: &'static str,
    pub help: &'static str,
    pub default: &'static str,
    pub required: bool,
}

/// Raw option values for one stage, keyed by option name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageConfig {
    values: BTreeMap<String, String>,
}

impl StageConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Parse `Key=Value`. Only the first `=` splits, so values may contain one.
    pub fn parse_assignment(text: &str) -> Result<(String, String)> {
        match text.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                Ok((key.trim().to_string(), value.to_string()))
            }
            _ => Err(ConfigError::MalformedAssignment(text.to_string())),
        }
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Like `get`, but absence is an error naming the filter.
    pub fn require(&self, filter: &str, key: &str) -> Result<&str> {
        self.get(key).ok_or_else(|| ConfigError::MissingOption {
            filter: filter.to_string(),
            option: key.to_string(),
        })
    }

    /// Reject unknown keys and missing required options.
    pub fn validate(&self, filter: &str, options: &[ConfigOption]) -> Result<()> {
        if let Some(key) = self
            .values
            .keys()
            .find(|k| !options.iter().any(|o| o.name == k.as_str()))
        {
            return Err(ConfigError::UnknownOption {
                filter: filter.to_string(),
                option: key.clone(),
            });
        }
        for opt in options.iter().filter(|o| o.required) {
            self.require(filter, opt.name)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPTIONS: &[ConfigOption] = &[
        ConfigOption {
            name: "Field",
            help: "",
            default: "",
            required: true,
        },
        ConfigOption {
            name: "Note",
            help: "",
            default: "",
            required: false,
        },
    ];

    #[test]
    fn test_parse_assignment() {
        let (k, v) = StageConfig::parse_assignment("StartDatetime=2020-01-01 00:00:00").unwrap();
        assert_eq!(k, "StartDatetime");
        assert_eq!(v, "2020-01-01 00:00:00");
    }

    #[test]
    fn test_parse_assignment_keeps_later_equals() {
        let (_, v) = StageConfig::parse_assignment("Note=a=b").unwrap();
        assert_eq!(v, "a=b");
    }

    #[test]
    fn test_parse_assignment_malformed() {
        assert!(StageConfig::parse_assignment("Field").is_err());
        assert!(StageConfig::parse_assignment("=ts").is_err());
    }

    #[test]
    fn test_validate_ok() {
        let cfg = StageConfig::from_pairs([("Field", "ts")]);
        assert!(cfg.validate("Test", OPTIONS).is_ok());
    }

    #[test]
    fn test_validate_missing_required() {
        let cfg = StageConfig::from_pairs([("Note", "x")]);
        let err = cfg.validate("Test", OPTIONS).unwrap_err();
        assert!(matches!(err, ConfigError::MissingOption { ref option, .. } if option == "Field"));
    }

    #[test]
    fn test_validate_unknown_option() {
        let mut cfg = StageConfig::new();
        cfg.set("Field", "ts");
        cfg.set("Feild", "ts");
        let err = cfg.validate("Test", OPTIONS).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownOption { ref option, .. } if option == "Feild"));
    }
}
