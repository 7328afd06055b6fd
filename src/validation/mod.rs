use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::PaginationConfig;
use crate::database::models::property::PropertyInput;
use crate::database::query_builder::{ListParams, OrderBy, PropertyFilter, SortDirection};

/// One violated field in an otherwise well-formed request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Raw, string-typed query parameters for GET /properties, exactly as they
/// arrive on the wire.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawListQuery {
    pub skip: Option<String>,
    pub take: Option<String>,
    pub address: Option<String>,
    pub price_min: Option<String>,
    pub price_max: Option<String>,
    pub bedrooms: Option<String>,
    pub bathrooms: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub order_by: Option<String>,
    pub order: Option<String>,
}

/// Coerce and range-check the list query, applying configured defaults.
/// Collects an error for every violated field instead of stopping at the
/// first one.
pub fn list_params(raw: RawListQuery, pagination: &PaginationConfig) -> Result<ListParams, Vec<FieldError>> {
    let mut errors = Vec::new();

    let skip = match raw.skip.as_deref() {
        None => pagination.skip_default,
        Some(s) => match s.parse::<i64>() {
            Ok(v) if v >= pagination.skip_min => v,
            _ => {
                errors.push(FieldError::new(
                    "skip",
                    format!("must be an integer >= {}", pagination.skip_min),
                ));
                pagination.skip_default
            }
        },
    };

    let take = match raw.take.as_deref() {
        None => pagination.take_default,
        Some(s) => match s.parse::<i64>() {
            Ok(v) if v >= pagination.take_min && v <= pagination.take_max => v,
            _ => {
                errors.push(FieldError::new(
                    "take",
                    format!(
                        "must be an integer between {} and {}",
                        pagination.take_min, pagination.take_max
                    ),
                ));
                pagination.take_default
            }
        },
    };

    let address = match raw.address {
        None => None,
        Some(s) if s.chars().count() >= 3 => Some(s),
        Some(_) => {
            errors.push(FieldError::new("address", "must be at least 3 characters long"));
            None
        }
    };

    let price_min = parse_price(raw.price_min.as_deref(), "priceMin", &mut errors);
    let price_max = parse_price(raw.price_max.as_deref(), "priceMax", &mut errors);
    let bedrooms = parse_room_count(raw.bedrooms.as_deref(), "bedrooms", &mut errors);
    let bathrooms = parse_room_count(raw.bathrooms.as_deref(), "bathrooms", &mut errors);

    let order_by = match raw.order_by.as_deref() {
        None => OrderBy::Id,
        Some(s) => match OrderBy::parse(s) {
            Some(column) => column,
            None => {
                errors.push(FieldError::new(
                    "orderBy",
                    "must be one of id, address, price, bedrooms, bathrooms, type",
                ));
                OrderBy::Id
            }
        },
    };

    let order = match raw.order.as_deref() {
        None => SortDirection::Asc,
        Some(s) => match SortDirection::parse(s) {
            Some(direction) => direction,
            None => {
                errors.push(FieldError::new("order", "must be ASC or DESC"));
                SortDirection::Asc
            }
        },
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ListParams {
        skip,
        take,
        filter: PropertyFilter {
            address,
            price_min,
            price_max,
            bedrooms,
            bathrooms,
            kind: raw.kind,
        },
        order_by,
        order,
    })
}

fn parse_price(raw: Option<&str>, field: &str, errors: &mut Vec<FieldError>) -> Option<f64> {
    let raw = raw?;
    match raw.parse::<f64>() {
        Ok(v) if v >= 0.0 && v.is_finite() => Some(v),
        _ => {
            errors.push(FieldError::new(field, "must be a number >= 0"));
            None
        }
    }
}

fn parse_room_count(raw: Option<&str>, field: &str, errors: &mut Vec<FieldError>) -> Option<i32> {
    let raw = raw?;
    match raw.parse::<i32>() {
        Ok(v) if v >= 0 => Some(v),
        _ => {
            errors.push(FieldError::new(field, "must be an integer >= 0"));
            None
        }
    }
}

/// Parse and validate a JSON body for create and full update. All of
/// address/price/bedrooms/bathrooms are required; `type` stays optional
/// (null counts as absent).
pub fn property_input(body: &Value) -> Result<PropertyInput, Vec<FieldError>> {
    let Some(obj) = body.as_object() else {
        return Err(vec![FieldError::new("body", "must be a JSON object")]);
    };

    let mut errors = Vec::new();

    let address = match obj.get("address").and_then(Value::as_str) {
        Some(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => {
            errors.push(FieldError::new("address", "must be a non-empty string"));
            None
        }
    };

    let price = match obj.get("price").and_then(Value::as_f64) {
        Some(v) => Some(v),
        None => {
            errors.push(FieldError::new("price", "must be a number"));
            None
        }
    };

    let bedrooms = body_room_count(obj.get("bedrooms"), "bedrooms", &mut errors);
    let bathrooms = body_room_count(obj.get("bathrooms"), "bathrooms", &mut errors);

    let kind = match obj.get("type") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.push(FieldError::new("type", "must be a string"));
            None
        }
    };

    match (address, price, bedrooms, bathrooms) {
        (Some(address), Some(price), Some(bedrooms), Some(bathrooms)) if errors.is_empty() => {
            Ok(PropertyInput {
                address,
                price,
                bedrooms,
                bathrooms,
                kind,
            })
        }
        _ => Err(errors),
    }
}

fn body_room_count(value: Option<&Value>, field: &str, errors: &mut Vec<FieldError>) -> Option<i32> {
    match value.and_then(Value::as_i64) {
        Some(v) if i32::try_from(v).is_ok() => Some(v as i32),
        _ => {
            errors.push(FieldError::new(field, "must be an integer"));
            None
        }
    }
}

/// Parse a path id. Non-numeric input is a validation failure, not a 404.
pub fn record_id(raw: &str) -> Result<i32, Vec<FieldError>> {
    raw.parse::<i32>()
        .map_err(|_| vec![FieldError::new("id", "must be an integer")])
}
