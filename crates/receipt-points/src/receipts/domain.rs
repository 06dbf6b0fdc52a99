use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

const RECEIPT_FIELDS: [&str; 5] = ["retailer", "purchaseDate", "purchaseTime", "items", "total"];
const ITEM_FIELDS: [&str; 2] = ["shortDescription", "price"];

/// Identifier handed out when a receipt is processed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReceiptId(pub String);

impl ReceiptId {
    /// Fresh random identifier; collisions are not expected within a process lifetime.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReceiptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Line item as submitted. The price stays textual so a bad value only voids its own rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReceiptItem {
    #[serde(deserialize_with = "null_as_default")]
    pub short_description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub price: String,
}

/// Purchase receipt submitted for scoring.
///
/// Every scalar field is kept as the caller wrote it; interpretation (decimal amounts,
/// `YYYY-MM-DD` dates, `HH:MM` times) happens rule by rule during scoring.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Receipt {
    #[serde(deserialize_with = "null_as_default")]
    pub retailer: String,
    #[serde(deserialize_with = "null_as_default")]
    pub purchase_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub purchase_time: String,
    #[serde(deserialize_with = "items_or_default")]
    pub items: Vec<ReceiptItem>,
    #[serde(deserialize_with = "null_as_default")]
    pub total: String,
}

impl Receipt {
    /// Decode the first JSON document in `body`.
    ///
    /// The document must be an object (or `null`, read as an empty receipt). Field names
    /// match case-insensitively, with an exact-case key winning over its variants; repeated
    /// keys keep the last value. Missing or `null` fields and `null` items fall back to empty
    /// values, and anything after the first complete document is ignored.
    pub fn from_json(body: &[u8]) -> Result<Self, ReceiptParseError> {
        let mut documents = serde_json::Deserializer::from_slice(body).into_iter::<Value>();
        let document = match documents.next() {
            Some(Ok(document)) => document,
            Some(Err(err)) => return Err(ReceiptParseError::Malformed(err)),
            None => return Err(ReceiptParseError::Empty),
        };

        let mut document = canonical_object(document, &RECEIPT_FIELDS, "a receipt object")?;
        if document.is_null() {
            return Ok(Self::default());
        }

        if let Some(Value::Array(items)) = document.get_mut("items") {
            for item in items.iter_mut() {
                *item = canonical_object(std::mem::take(item), &ITEM_FIELDS, "an item object")?;
            }
        }

        Ok(serde_json::from_value(document)?)
    }
}

/// Envelope-level decode failure for a submitted receipt.
#[derive(Debug, thiserror::Error)]
pub enum ReceiptParseError {
    #[error("request body is empty")]
    Empty,
    #[error("expected {expected}, found {found}")]
    UnexpectedShape {
        expected: &'static str,
        found: &'static str,
    },
    #[error(transparent)]
    Malformed(#[from] serde_json::Error),
}

/// Rename keys onto `fields` ignoring ASCII case. `null` passes through untouched.
fn canonical_object(
    value: Value,
    fields: &[&str],
    expected: &'static str,
) -> Result<Value, ReceiptParseError> {
    let object = match value {
        Value::Object(object) => object,
        Value::Null => return Ok(Value::Null),
        other => {
            return Err(ReceiptParseError::UnexpectedShape {
                expected,
                found: json_kind(&other),
            })
        }
    };

    // Exact-case keys go last so they overwrite case-insensitive matches.
    let (exact, folded): (Vec<_>, Vec<_>) = object
        .into_iter()
        .partition(|(key, _)| fields.contains(&key.as_str()));

    let mut canonical = Map::new();
    for (key, value) in folded.into_iter().chain(exact) {
        let name = fields
            .iter()
            .find(|field| field.eq_ignore_ascii_case(&key))
            .map(|field| field.to_string())
            .unwrap_or(key);
        canonical.insert(name, value);
    }
    Ok(Value::Object(canonical))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn items_or_default<'de, D>(deserializer: D) -> Result<Vec<ReceiptItem>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = Option::<Vec<Option<ReceiptItem>>>::deserialize(deserializer)?;
    Ok(items
        .unwrap_or_default()
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect())
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
