//! JSON-Patch style partial updates
//! Only top-level fields are addressable: `taxes.percentage` style paths are not supported.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchOp {
    Replace,
    Delete,
}

/// One edit against a top-level field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchOperation {
    pub path: String,
    pub op: PatchOp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

/// New value for one field of an update
#[derive(Debug, Clone, PartialEq)]
pub enum PatchValue<T> {
    /// Leave the field alone
    Undefined,
    /// Remove the field
    Null,
    /// Replace the field
    Value(T),
}

impl<T> Default for PatchValue<T> {
    fn default() -> Self {
        PatchValue::Undefined
    }
}

impl<T> PatchValue<T> {
    pub fn is_undefined(&self) -> bool {
        matches!(self, PatchValue::Undefined)
    }
}

impl<T: Serialize> PatchValue<T> {
    /// Erase the field type
    pub fn to_json(&self) -> Result<PatchValue<Value>> {
        Ok(match self {
            PatchValue::Undefined => PatchValue::Undefined,
            PatchValue::Null => PatchValue::Null,
            PatchValue::Value(v) => PatchValue::Value(serde_json::to_value(v)?),
        })
    }
}

impl<T> From<Option<T>> for PatchValue<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => PatchValue::Value(v),
            None => PatchValue::Undefined,
        }
    }
}

/// Build patch operations in field order.
/// Undefined fields are skipped, `Null` or a JSON `null` value becomes `delete`, everything else `replace`.
pub fn build_patch<I, K>(fields: I) -> Vec<PatchOperation>
where
    I: IntoIterator<Item = (K, PatchValue<Value>)>,
    K: AsRef<str>,
{
    fields
        .into_iter()
        .filter_map(|(name, value)| {
            let path = format!("/{}", name.as_ref());
            match value {
                PatchValue::Undefined => None,
                PatchValue::Null | PatchValue::Value(Value::Null) => Some(PatchOperation {
                    path,
                    op: PatchOp::Delete,
                    value: None,
                }),
                PatchValue::Value(value) => Some(PatchOperation {
                    path,
                    op: PatchOp::Replace,
                    value: Some(value),
                }),
            }
        })
        .collect()
}
