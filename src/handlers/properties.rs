use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;

use crate::error::ApiError;
use crate::services::PropertyService;
use crate::validation::{self, RawListQuery};

/// GET /properties - list with pagination, filtering and sorting
pub async fn list(Query(raw): Query<RawListQuery>) -> Result<impl IntoResponse, ApiError> {
    let params = validation::list_params(raw, &crate::config::config().pagination)?;

    let service = PropertyService::new().await?;
    let page = service.list(&params).await?;

    Ok(Json(page))
}

/// GET /properties/:id - fetch a single record
pub async fn get(Path(id): Path<String>) -> Result<impl IntoResponse, ApiError> {
    let id = validation::record_id(&id)?;

    let service = PropertyService::new().await?;
    let property = service.get_by_id(id).await?;

    Ok(Json(property))
}

/// POST /properties - create a record; the store assigns the id
pub async fn create(Json(body): Json<Value>) -> Result<impl IntoResponse, ApiError> {
    let input = validation::property_input(&body)?;

    let service = PropertyService::new().await?;
    let created = service.create(input).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /properties/:id - full-record replacement
pub async fn update(
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let id = validation::record_id(&id)?;
    let input = validation::property_input(&body)?;

    let service = PropertyService::new().await?;
    let updated = service.update(id, input).await?;

    Ok(Json(updated))
}

/// DELETE /properties/:id - remove a record
pub async fn delete(Path(id): Path<String>) -> Result<impl IntoResponse, ApiError> {
    let id = validation::record_id(&id)?;

    let service = PropertyService::new().await?;
    service.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
