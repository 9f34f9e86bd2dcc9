//! Conversions between DynamoDB attribute maps and JSON items.
//!
//! Pure functions, testable without a table.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use base64::{engine::general_purpose, Engine as _};
use serde_json::{Number, Value};

use crate::error::StoreError;
use crate::keys::ItemKey;
use crate::store::Item;

/// Key attributes for `GetItem`, `UpdateItem` and `DeleteItem`.
pub fn key_to_attributes(key: &ItemKey) -> HashMap<String, AttributeValue> {
    let mut attributes = HashMap::new();
    let (name, value) = &key.partition;
    attributes.insert(name.clone(), AttributeValue::S(value.clone()));
    if let Some((name, value)) = &key.sort {
        attributes.insert(name.clone(), AttributeValue::S(value.clone()));
    }
    attributes
}

/// Placeholder values of an update expression. Every value is a string.
pub fn values_to_attributes<'a>(
    values: impl IntoIterator<Item = (&'a String, &'a String)>,
) -> HashMap<String, AttributeValue> {
    values
        .into_iter()
        .map(|(placeholder, value)| (placeholder.clone(), AttributeValue::S(value.clone())))
        .collect()
}

pub fn item_to_json(item: HashMap<String, AttributeValue>) -> Result<Item, StoreError> {
    item.into_iter()
        .map(|(name, value)| attribute_to_json(value).map(|value| (name, value)))
        .collect()
}

fn attribute_to_json(value: AttributeValue) -> Result<Value, StoreError> {
    Ok(match value {
        AttributeValue::S(s) => Value::String(s),
        AttributeValue::N(n) => number_to_json(n),
        AttributeValue::Bool(b) => Value::Bool(b),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::B(blob) => Value::String(general_purpose::STANDARD.encode(blob.as_ref())),
        AttributeValue::Ss(strings) => strings.into_iter().map(Value::String).collect(),
        AttributeValue::Ns(numbers) => numbers.into_iter().map(number_to_json).collect(),
        AttributeValue::Bs(blobs) => blobs
            .iter()
            .map(|blob| Value::String(general_purpose::STANDARD.encode(blob.as_ref())))
            .collect(),
        AttributeValue::L(list) => Value::Array(
            list.into_iter()
                .map(attribute_to_json)
                .collect::<Result<_, _>>()?,
        ),
        AttributeValue::M(map) => Value::Object(item_to_json(map)?),
        other => {
            return Err(StoreError::InvalidItem(format!(
                "unsupported attribute type: {other:?}"
            )))
        }
    })
}

/// DynamoDB numbers are decimal strings; anything JSON cannot hold stays a string.
fn number_to_json(n: String) -> Value {
    match n.parse::<Number>() {
        Ok(number) => Value::Number(number),
        Err(_) => Value::String(n),
    }
}
