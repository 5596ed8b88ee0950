// src/cache/key.rs
//
// Request keys
//
// A key is an operation plus an ordered map of primitive parameters. Equality
// is by value, so the same UI state always yields the same key no matter in
// which order parameters were attached.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::integrations::tmdb::endpoints::{Operation, OperationFamily};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Bool(bool),
    Text(String),
}

impl std::fmt::Display for ParamValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamValue::Int(v) => write!(f, "{}", v),
            ParamValue::Bool(v) => write!(f, "{}", v),
            ParamValue::Text(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<u32> for ParamValue {
    fn from(v: u32) -> Self {
        ParamValue::Int(i64::from(v))
    }
}

impl From<u64> for ParamValue {
    fn from(v: u64) -> Self {
        match i64::try_from(v) {
            Ok(v) => ParamValue::Int(v),
            Err(_) => ParamValue::Text(v.to_string()),
        }
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        ParamValue::Int(i64::from(v))
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Text(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Text(v)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RequestKey {
    operation: Operation,
    params: BTreeMap<String, ParamValue>,
}

impl RequestKey {
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            params: BTreeMap::new(),
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn params(&self) -> &BTreeMap<String, ParamValue> {
        &self.params
    }

    pub fn param(&self, name: &str) -> Option<&ParamValue> {
        self.params.get(name)
    }
}

impl std::fmt::Display for RequestKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.operation)?;
        for (idx, (name, value)) in self.params.iter().enumerate() {
            let sep = if idx == 0 { '?' } else { '&' };
            write!(f, "{}{}={}", sep, name, value)?;
        }
        Ok(())
    }
}

/// Partial key used to invalidate or remove several entries at once.
///
/// Empty prefix matches everything; each populated field narrows the match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyPrefix {
    family: Option<OperationFamily>,
    operation: Option<Operation>,
    params: BTreeMap<String, ParamValue>,
}

impl KeyPrefix {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn family(family: OperationFamily) -> Self {
        Self {
            family: Some(family),
            ..Self::default()
        }
    }

    pub fn operation(operation: Operation) -> Self {
        Self {
            operation: Some(operation),
            ..Self::default()
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn matches(&self, key: &RequestKey) -> bool {
        if let Some(family) = self.family {
            if key.operation.family() != family {
                return false;
            }
        }
        if let Some(operation) = self.operation {
            if key.operation != operation {
                return false;
            }
        }
        self.params
            .iter()
            .all(|(name, value)| key.params.get(name) == Some(value))
    }
}
