use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::{Error, Result};

pub const ALIAS_PREFIX: &str = "alias_prefix";
pub const STRICT: &str = "strict";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Text(SmolStr),
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Int(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Text(SmolStr::new(value))
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Text(SmolStr::new(value))
    }
}

/// Builder options, kept in insertion order. Defaults are always present;
/// any other key may be added but reading a key never set is an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options(IndexMap<SmolStr, OptionValue>);

impl Default for Options {
    fn default() -> Self {
        let mut map = IndexMap::new();
        map.insert(SmolStr::new_static(ALIAS_PREFIX), OptionValue::from("t_"));
        map.insert(SmolStr::new_static(STRICT), OptionValue::Bool(false));
        Self(map)
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set<K, V>(&mut self, key: K, value: V) -> &mut Self
    where
        K: Into<SmolStr>,
        V: Into<OptionValue>,
    {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn has(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Result<&OptionValue> {
        self.0
            .get(key)
            .ok_or_else(|| Error::invalid_argument(format!("undefined option: {key}")))
    }

    pub fn get_bool(&self, key: &str) -> Result<bool> {
        match self.get(key)? {
            OptionValue::Bool(value) => Ok(*value),
            other => Err(Error::invalid_argument(format!(
                "option {key} is not a boolean: {other:?}"
            ))),
        }
    }

    pub fn get_str(&self, key: &str) -> Result<&str> {
        match self.get(key)? {
            OptionValue::Text(value) => Ok(value.as_str()),
            other => Err(Error::invalid_argument(format!(
                "option {key} is not text: {other:?}"
            ))),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }
}
