use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One property listing as stored. `type` is a reserved word in Rust, so the
/// field is `kind` internally and renamed on both the wire and the row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Property {
    pub id: i32,
    pub address: String,
    pub price: f64,
    pub bedrooms: i32,
    pub bathrooms: i32,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: Option<String>,
}

/// A full record as supplied by the caller; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyInput {
    pub address: String,
    pub price: f64,
    pub bedrooms: i32,
    pub bathrooms: i32,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl PropertyInput {
    pub fn with_id(self, id: i32) -> Property {
        Property {
            id,
            address: self.address,
            price: self.price,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            kind: self.kind,
        }
    }
}

/// Pagination metadata returned with every list response. `count` is the
/// filtered total, independent of skip/take.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pagination {
    pub skip: i64,
    pub take: i64,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertiesResponse {
    pub properties: Vec<Property>,
    pub pagination: Pagination,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_kind_as_type() {
        let property = Property {
            id: 1,
            address: "74434 East Sweet Bottom Br #18393".to_string(),
            price: 20714261.0,
            bedrooms: 2,
            bathrooms: 5,
            kind: None,
        };
        let value = serde_json::to_value(&property).unwrap();
        assert_eq!(value["type"], json!(null));
        assert!(value.get("kind").is_none());
    }

    #[test]
    fn with_id_merges_unchanged_id() {
        let input = PropertyInput {
            address: "8369 West MAJESTY STREET Path #1765".to_string(),
            price: 9375751.0,
            bedrooms: 3,
            bathrooms: 6,
            kind: Some("House".to_string()),
        };
        let property = input.clone().with_id(42);
        assert_eq!(property.id, 42);
        assert_eq!(property.address, input.address);
        assert_eq!(property.kind, input.kind);
    }
}
