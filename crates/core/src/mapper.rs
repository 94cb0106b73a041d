//! Transformation functions for Yelp API v2 responses
//!
//! Responses are parsed into a generic [`serde_json::Value`] tree and read
//! through named accessors, each with an explicit policy:
//!
//! - **strict**: the field must be present with the right JSON type
//! - **tolerant**: absence yields `None` (only the street address)
//!
//! Missing structure (`location`, `location.coordinate`) fails the whole call.
//! A missing or mistyped required scalar rejects that one business, and the
//! remaining businesses are still mapped.

use serde_json::{Map, Value};

use crate::business::Business;

/// Error type for a whole mapping call
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("could not parse JSON response: {source}\n{body}")]
    Parse {
        body: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("API error {id}: {text}")]
    Api { id: String, text: String },

    #[error("response has no `businesses` array")]
    MissingBusinesses,

    #[error("response contains no businesses")]
    NoBusinesses,

    #[error("business #{index}: {source}")]
    Business {
        index: usize,
        #[source]
        source: FieldError,
    },

    #[error("business #{index} has no usable `{field}` field")]
    MissingField { index: usize, field: String },
}

/// Error type for a single business object
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("not a JSON object")]
    NotAnObject,

    #[error("missing `{0}` object")]
    MissingObject(&'static str),

    #[error("missing required field `{0}`")]
    Missing(&'static str),

    #[error("field `{field}` is not a {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
}

impl FieldError {
    /// Structural errors fail the whole call instead of one record
    pub fn is_structural(&self) -> bool {
        matches!(self, FieldError::NotAnObject | FieldError::MissingObject(_))
    }
}

/// A business that could not be mapped, with its position in the response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    pub index: usize,
    pub error: FieldError,
}

/// Output of full-record extraction
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BusinessBatch {
    /// Mapped records, in response order
    pub records: Vec<Business>,
    /// Businesses skipped because a required scalar was missing
    pub rejected: Vec<RejectedRecord>,
}

/// Parse a response body into a JSON tree
pub fn parse_response(body: &str) -> Result<Value, MapError> {
    serde_json::from_str(body).map_err(|source| MapError::Parse {
        body: body.to_string(),
        source,
    })
}

/// Read the top-level `businesses` array
///
/// An `{"error": {...}}` payload is reported as [`MapError::Api`].
pub fn business_list(root: &Value) -> Result<&Vec<Value>, MapError> {
    if let Some(list) = root.get("businesses").and_then(Value::as_array) {
        return Ok(list);
    }

    match root.get("error") {
        Some(error) => Err(api_error(error)),
        None => Err(MapError::MissingBusinesses),
    }
}

fn api_error(error: &Value) -> MapError {
    let text = |key: &str| {
        error
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string()
    };

    MapError::Api {
        id: text("id"),
        text: text("text"),
    }
}

/// Map every business in a search response into a flat record
pub fn extract_businesses(body: &str) -> Result<BusinessBatch, MapError> {
    let root = parse_response(body)?;
    let items = business_list(&root)?;

    let mut batch = BusinessBatch::default();

    for (index, item) in items.iter().enumerate() {
        match map_business(item) {
            Ok(business) => batch.records.push(business),
            Err(source) if source.is_structural() => {
                return Err(MapError::Business { index, source })
            }
            Err(error) => batch.rejected.push(RejectedRecord { index, error }),
        }
    }

    Ok(batch)
}

/// Pull one top-level field out of every business in a search response
///
/// Strings are returned as-is; numbers and booleans as their JSON text.
/// A missing, null or structured value fails the call.
pub fn extract_field(body: &str, field: &str) -> Result<Vec<String>, MapError> {
    let root = parse_response(body)?;
    let items = business_list(&root)?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let object = item.as_object().ok_or(MapError::Business {
                index,
                source: FieldError::NotAnObject,
            })?;

            match object.get(field) {
                Some(Value::String(s)) => Ok(s.clone()),
                Some(Value::Number(n)) => Ok(n.to_string()),
                Some(Value::Bool(b)) => Ok(b.to_string()),
                _ => Err(MapError::MissingField {
                    index,
                    field: field.to_string(),
                }),
            }
        })
        .collect()
}

/// `id` of the first business in a search response
///
/// Only the first entry is read; later entries are not validated.
pub fn first_business_id(body: &str) -> Result<String, MapError> {
    let root = parse_response(body)?;
    let first = business_list(&root)?
        .first()
        .ok_or(MapError::NoBusinesses)?;

    let object = first.as_object().ok_or(MapError::Business {
        index: 0,
        source: FieldError::NotAnObject,
    })?;

    object
        .get("id")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| MapError::MissingField {
            index: 0,
            field: "id".to_string(),
        })
}

/// Map a lookup-by-id response (a single business object)
///
/// Unlike search extraction, a missing required scalar fails the call.
pub fn map_business_detail(body: &str) -> Result<Business, MapError> {
    let root = parse_response(body)?;

    if let Some(error) = root.get("error") {
        return Err(api_error(error));
    }

    map_business(&root).map_err(|source| MapError::Business { index: 0, source })
}

/// Project one business object into a [`Business`]
pub fn map_business(value: &Value) -> Result<Business, FieldError> {
    let business = value.as_object().ok_or(FieldError::NotAnObject)?;
    let location = object(business, "location")?;
    let coordinate = object(location, "coordinate")?;

    Ok(Business {
        name: string(business, "name")?,
        address: first_string(location, "address"),
        city: string(location, "city")?,
        state: string(location, "state_code")?,
        zip_code: string(location, "postal_code")?,
        country_code: string(location, "country_code")?,
        url: string(business, "url")?,
        phone: string(business, "phone")?,
        rating: number(business, "rating")?,
        latitude: number(coordinate, "latitude")?,
        longitude: number(coordinate, "longitude")?,
    })
}

fn object<'a>(
    parent: &'a Map<String, Value>,
    key: &'static str,
) -> Result<&'a Map<String, Value>, FieldError> {
    parent
        .get(key)
        .and_then(Value::as_object)
        .ok_or(FieldError::MissingObject(key))
}

fn string(parent: &Map<String, Value>, key: &'static str) -> Result<String, FieldError> {
    match parent.get(key) {
        None | Some(Value::Null) => Err(FieldError::Missing(key)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(FieldError::WrongType {
            field: key,
            expected: "string",
        }),
    }
}

fn number(parent: &Map<String, Value>, key: &'static str) -> Result<f64, FieldError> {
    match parent.get(key) {
        None | Some(Value::Null) => Err(FieldError::Missing(key)),
        Some(value) => value.as_f64().ok_or(FieldError::WrongType {
            field: key,
            expected: "number",
        }),
    }
}

// Tolerant: an empty or absent list just means no street address.
fn first_string(parent: &Map<String, Value>, key: &str) -> Option<String> {
    parent
        .get(key)?
        .as_array()?
        .first()?
        .as_str()
        .map(str::to_string)
}
