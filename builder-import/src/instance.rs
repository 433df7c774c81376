//! Shape normalization for raw JSON field values.

use builder_model::{META_KEY, TypeDefinition, VALUE_KEY};
use serde_json::Value;

/// Splits a field value into instances: an array yields its elements, any
/// other value yields itself. `null`s are dropped.
pub(crate) fn instances(raw: &Value) -> Vec<&Value> {
    match raw {
        Value::Array(items) => items.iter().filter(|v| !v.is_null()).collect(),
        Value::Null => Vec::new(),
        other => vec![other],
    }
}

/// Payload of a metadata envelope, if `value` is one.
fn envelope_payload(value: &Value) -> Option<&Value> {
    value.as_object()?.get(VALUE_KEY)
}

/// Removes one envelope layer.
fn unwrap_once(value: &Value) -> &Value {
    envelope_payload(value).unwrap_or(value)
}

/// Payload of a structured instance of `def`.
///
/// When `def` declares its own scalar `value` attribute, `{"value": ...}` is
/// ambiguous. The instance is read as an envelope only if the payload is an
/// object or `null` (neither fits that attribute) and no sibling key is
/// another declared attribute.
pub(crate) fn structured_payload<'a>(instance: &'a Value, def: &TypeDefinition) -> &'a Value {
    let Some(own_value) = def.attribute(VALUE_KEY) else {
        return unwrap_once(instance);
    };
    if !own_value.ty.is_scalar() {
        return instance;
    }
    let Some(object) = instance.as_object() else {
        return instance;
    };
    let Some(payload) = object.get(VALUE_KEY) else {
        return instance;
    };

    let declared_sibling = object
        .keys()
        .any(|k| k != VALUE_KEY && k != META_KEY && def.attribute(k).is_some());
    if (payload.is_object() || payload.is_null()) && !declared_sibling {
        payload
    } else {
        instance
    }
}
