//! Generic `[props]` section.
//!
//! Values are kept as written and only checked against the
//! keys we know about. Unknown keys are ignored so plugins
//! and newer versions can share one config file.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::error::Error;

/// Type a property value must convert to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropType {
    Boolean,
    Int,
    Long,
    String,
}

impl fmt::Display for PropType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Boolean => "boolean",
            Self::Int => "int",
            Self::Long => "long",
            Self::String => "string",
        };
        f.write_str(name)
    }
}

impl PropType {
    fn accepts(&self, value: &str) -> bool {
        match self {
            Self::Boolean => {
                value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("false")
            }
            Self::Int => value.parse::<i32>().is_ok(),
            Self::Long => value.parse::<i64>().is_ok(),
            Self::String => true,
        }
    }
}

/// Known property keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropKey {
    /// Log rewritten SQL.
    SqlShow,
    /// Worker threads used for statement execution.
    ExecutorSize,
    /// Connections a single query may use per data source.
    MaxConnectionsSizePerQuery,
    /// Verify table metadata is identical across data nodes on startup.
    CheckTableMetadataEnabled,
    /// Read from the cipher column even when a plain column exists.
    QueryWithCipherColumn,
}

impl PropKey {
    pub const ALL: [PropKey; 5] = [
        PropKey::SqlShow,
        PropKey::ExecutorSize,
        PropKey::MaxConnectionsSizePerQuery,
        PropKey::CheckTableMetadataEnabled,
        PropKey::QueryWithCipherColumn,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::SqlShow => "sql.show",
            Self::ExecutorSize => "executor.size",
            Self::MaxConnectionsSizePerQuery => "max.connections.size.per.query",
            Self::CheckTableMetadataEnabled => "check.table.metadata.enabled",
            Self::QueryWithCipherColumn => "query.with.cipher.column",
        }
    }

    pub fn prop_type(&self) -> PropType {
        match self {
            Self::SqlShow | Self::CheckTableMetadataEnabled | Self::QueryWithCipherColumn => {
                PropType::Boolean
            }
            Self::ExecutorSize | Self::MaxConnectionsSizePerQuery => PropType::Int,
        }
    }

    pub fn default_value(&self) -> &'static str {
        match self {
            Self::SqlShow => "false",
            Self::ExecutorSize => "0",
            Self::MaxConnectionsSizePerQuery => "1",
            Self::CheckTableMetadataEnabled => "false",
            Self::QueryWithCipherColumn => "true",
        }
    }

    pub fn find(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|prop| prop.key() == key)
    }
}

/// Properties, as written in the config file.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct Props {
    values: BTreeMap<String, toml::Value>,
}

impl Props {
    pub fn new(values: BTreeMap<String, toml::Value>) -> Result<Self, Error> {
        let props = Self { values };
        props.validate()?;
        Ok(props)
    }

    /// Check every known key and report all bad values at once.
    pub fn validate(&self) -> Result<(), Error> {
        let errors = self
            .values
            .keys()
            .filter_map(|key| PropKey::find(key))
            .filter_map(|prop| {
                let value = self.raw(prop)?;
                if prop.prop_type().accepts(&value) {
                    None
                } else {
                    Some(format!(
                        "Value '{}' of '{}' cannot convert to type '{}'.",
                        value,
                        prop.key(),
                        prop.prop_type()
                    ))
                }
            })
            .collect::<Vec<_>>();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::InvalidProps(errors.join(" ")))
        }
    }

    fn raw(&self, prop: PropKey) -> Option<String> {
        self.values.get(prop.key()).map(|value| match value {
            toml::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    /// Value as written, or the default if missing or empty.
    pub fn value(&self, prop: PropKey) -> String {
        self.raw(prop)
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| prop.default_value().to_string())
    }

    pub fn bool(&self, prop: PropKey) -> bool {
        self.value(prop).eq_ignore_ascii_case("true")
    }

    pub fn int(&self, prop: PropKey) -> i64 {
        self.value(prop)
            .parse()
            .or_else(|_| prop.default_value().parse())
            .unwrap_or_default()
    }

    pub fn sql_show(&self) -> bool {
        self.bool(PropKey::SqlShow)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn props(source: &str) -> Props {
        toml::from_str(source).unwrap()
    }

    #[test]
    fn test_defaults() {
        let props = Props::default();
        assert!(!props.sql_show());
        assert!(props.bool(PropKey::QueryWithCipherColumn));
        assert_eq!(props.int(PropKey::MaxConnectionsSizePerQuery), 1);
    }

    #[test]
    fn test_typed_values() {
        let props = props(
            r#"
"sql.show" = true
"executor.size" = 8
"max.connections.size.per.query" = "4"
"#,
        );
        props.validate().unwrap();
        assert!(props.sql_show());
        assert_eq!(props.int(PropKey::ExecutorSize), 8);
        assert_eq!(props.int(PropKey::MaxConnectionsSizePerQuery), 4);
    }

    #[test]
    fn test_all_errors_reported() {
        let props = props(
            r#"
"sql.show" = "maybe"
"executor.size" = "eight"
"unknown.key" = "whatever"
"#,
        );
        let err = props.validate().unwrap_err().to_string();
        assert_eq!(
            err,
            "Value 'eight' of 'executor.size' cannot convert to type 'int'. \
             Value 'maybe' of 'sql.show' cannot convert to type 'boolean'."
        );
    }

    #[test]
    fn test_empty_falls_back_to_default() {
        let props = props(r#""max.connections.size.per.query" = """#);
        assert_eq!(props.int(PropKey::MaxConnectionsSizePerQuery), 1);
    }
}
