mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

fn error_fields(body: &Value) -> Vec<String> {
    body["errors"]
        .as_array()
        .map(|errors| {
            errors
                .iter()
                .map(|e| e["field"].as_str().unwrap_or_default().to_string())
                .collect()
        })
        .unwrap_or_default()
}

#[tokio::test]
async fn list_rejects_every_bad_param_at_once() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!(
            "{}/properties?skip=-1&take=0&address=ab&priceMin=cheap&order=sideways",
            server.base_url
        ))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    let fields = error_fields(&body);
    for expected in ["skip", "take", "address", "priceMin", "order"] {
        assert!(fields.contains(&expected.to_string()), "missing {} in {:?}", expected, fields);
    }

    Ok(())
}

#[tokio::test]
async fn list_rejects_take_above_max() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/properties?take=101", server.base_url))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&res.json::<Value>().await?), vec!["take"]);

    Ok(())
}

#[tokio::test]
async fn list_rejects_unknown_order_by() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/properties?orderBy=garage", server.base_url))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&res.json::<Value>().await?), vec!["orderBy"]);

    Ok(())
}

#[tokio::test]
async fn list_rejects_negative_price_bounds() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/properties?priceMin=-5&priceMax=-1", server.base_url))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&res.json::<Value>().await?), vec!["priceMin", "priceMax"]);

    Ok(())
}

#[tokio::test]
async fn create_missing_price_is_400() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/properties", server.base_url))
        .json(&json!({
            "address": "74434 East Sweet Bottom Br #18393",
            "bedrooms": 2,
            "bathrooms": 5
        }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&res.json::<Value>().await?), vec!["price"]);

    Ok(())
}

#[tokio::test]
async fn create_empty_body_names_every_required_field() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/properties", server.base_url))
        .json(&json!({}))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let fields = error_fields(&res.json::<Value>().await?);
    assert_eq!(fields, vec!["address", "price", "bedrooms", "bathrooms"]);

    Ok(())
}

#[tokio::test]
async fn non_numeric_id_is_400_everywhere() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/properties/abc", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&res.json::<Value>().await?), vec!["id"]);

    let res = client
        .delete(format!("{}/properties/abc", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client
        .put(format!("{}/properties/abc", server.base_url))
        .json(&json!({"address": "1 Somewhere", "price": 1.0, "bedrooms": 1, "bathrooms": 1}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn put_validation_failure_beats_missing_record() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    // Invalid body on a nonexistent id: validation halts the request before
    // the service runs, so this is 400, not 404.
    let res = client
        .put(format!("{}/properties/2000000000", server.base_url))
        .json(&json!({"address": ""}))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    Ok(())
}
