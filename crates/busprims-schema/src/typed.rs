use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::descriptor::{SchemaDescriptor, ValidationFailure, ValidationIssue};

/// Schema binding over a serde-deserializable Rust type.
///
/// A payload is accepted iff it deserializes into `T`; the decoded value is
/// the canonical re-serialization of the deserialized `T`, so defaults are
/// filled in and field handling follows `T`'s serde attributes. Rejection
/// carries the deserializer's message as a single issue.
pub struct TypedSchema<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> TypedSchema<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for TypedSchema<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SchemaDescriptor for TypedSchema<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    fn validate(&self, value: &Value) -> Result<Value, ValidationFailure> {
        let decoded: T = serde_json::from_value(value.clone())
            .map_err(|err| ValidationIssue::new(err.to_string()))?;

        serde_json::to_value(&decoded)
            .map_err(|err| ValidationIssue::new(err.to_string()).into())
    }
}
