//! The flavor's configuration record.
//!
//! All recognized option names are fixed; setting an unknown name or a
//! wrongly-typed value fails at construction time rather than being
//! silently ignored. The serde path enforces the same policy via
//! `deny_unknown_fields`.

use serde::Deserialize;
use thiserror::Error;

/// Configuration for assembling a [`Twardown`](crate::Twardown) pipeline.
///
/// Every behavior toggle defaults to enabled; `filename` is consumed by
/// the magic-record preprocessor and defaults to empty.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TwardownOptions {
    /// Render pipe tables.
    #[serde(rename = "enable_tables")]
    pub tables: bool,
    /// Extract fenced code blocks.
    #[serde(rename = "enable_fenced_code")]
    pub fenced_code: bool,
    /// Tag code blocks with `language-…` classes for highlighters.
    #[serde(rename = "enable_code_highlighting")]
    pub code_highlighting: bool,
    /// Assign heading IDs and honor `[TOC]` markers.
    #[serde(rename = "enable_toc")]
    pub toc: bool,
    /// Extract front matter into the metadata map.
    #[serde(rename = "enable_meta")]
    pub meta: bool,
    /// Render `- [ ]` / `- [x]` blocks as task lists.
    #[serde(rename = "enable_task_lists")]
    pub task_lists: bool,
    /// Insert a `this_file` provenance record into front matter.
    #[serde(rename = "enable_magic_records")]
    pub magic_records: bool,
    /// Source filename recorded by the magic-record preprocessor.
    pub filename: String,
}

impl Default for TwardownOptions {
    fn default() -> Self {
        Self {
            tables: true,
            fenced_code: true,
            code_highlighting: true,
            toc: true,
            meta: true,
            task_lists: true,
            magic_records: true,
            filename: String::new(),
        }
    }
}

/// A value supplied for a named option.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OptionValue {
    /// A behavior toggle.
    Bool(bool),
    /// A text option.
    Text(String),
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Error raised for a bad option name or value.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionError {
    /// The option name is not recognized.
    #[error("unknown option '{0}'")]
    UnknownOption(String),
    /// The option exists but the value has the wrong type.
    #[error("option '{option}' expects a {expected} value")]
    InvalidValue {
        /// The option that was being set.
        option: String,
        /// The expected value kind.
        expected: &'static str,
    },
}

impl TwardownOptions {
    /// Set an option by its documented name.
    ///
    /// # Errors
    ///
    /// Returns [`OptionError::UnknownOption`] for an unrecognized name
    /// and [`OptionError::InvalidValue`] for a wrongly-typed value.
    pub fn set(&mut self, name: &str, value: OptionValue) -> Result<(), OptionError> {
        match name {
            "enable_tables" => self.tables = expect_bool(name, value)?,
            "enable_fenced_code" => self.fenced_code = expect_bool(name, value)?,
            "enable_code_highlighting" => self.code_highlighting = expect_bool(name, value)?,
            "enable_toc" => self.toc = expect_bool(name, value)?,
            "enable_meta" => self.meta = expect_bool(name, value)?,
            "enable_task_lists" => self.task_lists = expect_bool(name, value)?,
            "enable_magic_records" => self.magic_records = expect_bool(name, value)?,
            "filename" => self.filename = expect_text(name, value)?,
            _ => return Err(OptionError::UnknownOption(name.to_owned())),
        }
        Ok(())
    }

    /// Build options from name/value pairs, starting from the defaults.
    ///
    /// # Errors
    ///
    /// Fails on the first unrecognized name or wrongly-typed value.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, OptionError>
    where
        I: IntoIterator<Item = (&'a str, OptionValue)>,
    {
        let mut options = Self::default();
        for (name, value) in pairs {
            options.set(name, value)?;
        }
        Ok(options)
    }
}

fn expect_bool(name: &str, value: OptionValue) -> Result<bool, OptionError> {
    match value {
        OptionValue::Bool(flag) => Ok(flag),
        OptionValue::Text(_) => Err(OptionError::InvalidValue {
            option: name.to_owned(),
            expected: "boolean",
        }),
    }
}

fn expect_text(name: &str, value: OptionValue) -> Result<String, OptionError> {
    match value {
        OptionValue::Text(text) => Ok(text),
        OptionValue::Bool(_) => Err(OptionError::InvalidValue {
            option: name.to_owned(),
            expected: "text",
        }),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_defaults() {
        let options = TwardownOptions::default();
        assert!(options.tables);
        assert!(options.fenced_code);
        assert!(options.code_highlighting);
        assert!(options.toc);
        assert!(options.meta);
        assert!(options.task_lists);
        assert!(options.magic_records);
        assert_eq!(options.filename, "");
    }

    #[test]
    fn test_set_toggles() {
        let mut options = TwardownOptions::default();
        options.set("enable_tables", false.into()).unwrap();
        options.set("enable_task_lists", false.into()).unwrap();
        assert!(!options.tables);
        assert!(!options.task_lists);
        assert!(options.toc);
    }

    #[test]
    fn test_set_filename() {
        let mut options = TwardownOptions::default();
        options.set("filename", "notes/today.md".into()).unwrap();
        assert_eq!(options.filename, "notes/today.md");
    }

    #[test]
    fn test_unknown_option_rejected() {
        let mut options = TwardownOptions::default();
        let err = options.set("enable_flux_capacitor", true.into()).unwrap_err();
        assert_eq!(
            err,
            OptionError::UnknownOption("enable_flux_capacitor".to_owned())
        );
    }

    #[test]
    fn test_wrongly_typed_value_rejected() {
        let mut options = TwardownOptions::default();
        let err = options.set("enable_tables", "yes".into()).unwrap_err();
        assert_eq!(
            err,
            OptionError::InvalidValue {
                option: "enable_tables".to_owned(),
                expected: "boolean",
            }
        );

        let err = options.set("filename", true.into()).unwrap_err();
        assert_eq!(
            err,
            OptionError::InvalidValue {
                option: "filename".to_owned(),
                expected: "text",
            }
        );
    }

    #[test]
    fn test_from_pairs() {
        let options = TwardownOptions::from_pairs([
            ("enable_toc", OptionValue::Bool(false)),
            ("filename", OptionValue::from("doc.md")),
        ])
        .unwrap();
        assert!(!options.toc);
        assert_eq!(options.filename, "doc.md");
    }

    #[test]
    fn test_from_pairs_unknown_name_fails() {
        let err =
            TwardownOptions::from_pairs([("frobnicate", OptionValue::Bool(true))]).unwrap_err();
        assert_eq!(err, OptionError::UnknownOption("frobnicate".to_owned()));
    }

    #[test]
    fn test_deserialize_known_fields() {
        let options: TwardownOptions =
            serde_json::from_str(r#"{"enable_tables": false, "filename": "a.md"}"#).unwrap();
        assert!(!options.tables);
        assert_eq!(options.filename, "a.md");
        assert!(options.meta);
    }

    #[test]
    fn test_deserialize_unknown_field_fails() {
        let result: Result<TwardownOptions, _> =
            serde_json::from_str(r#"{"enable_sparkles": true}"#);
        assert!(result.is_err());
    }
}
