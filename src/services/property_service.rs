use sqlx::{PgPool, Row};
use thiserror::Error;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::property::{Pagination, PropertiesResponse, Property, PropertyInput};
use crate::database::query_builder::{bind_param_query, bind_param_query_as, ListParams, PropertyQuery};

#[derive(Debug, Error)]
pub enum PropertyError {
    #[error("Property not found")]
    NotFound,

    /// The existence check passed but the mutation affected zero rows.
    /// Distinct from NotFound: this is a write failure, not a missing record.
    #[error("Write affected no rows")]
    WriteConflict,

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl From<sqlx::Error> for PropertyError {
    fn from(err: sqlx::Error) -> Self {
        PropertyError::Database(DatabaseError::Sqlx(err))
    }
}

pub struct PropertyService {
    pool: PgPool,
}

impl PropertyService {
    pub async fn new() -> Result<Self, DatabaseError> {
        Ok(Self {
            pool: DatabaseManager::pool().await?,
        })
    }

    pub fn with_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// One page of matching records plus the filtered total. The SELECT and
    /// the COUNT are built from the same typed filter, so `count` reflects
    /// every matching record regardless of skip/take.
    pub async fn list(&self, params: &ListParams) -> Result<PropertiesResponse, PropertyError> {
        let query = PropertyQuery::new(params);

        let select = query.to_select_sql();
        let mut rows = sqlx::query_as::<_, Property>(&select.query);
        for value in select.params.iter() {
            rows = bind_param_query_as(rows, value);
        }
        let properties = rows.fetch_all(&self.pool).await?;

        let count_sql = query.to_count_sql();
        let mut count_query = sqlx::query(&count_sql.query);
        for value in count_sql.params.iter() {
            count_query = bind_param_query(count_query, value);
        }
        let row = count_query.fetch_one(&self.pool).await?;
        let count: i64 = row.try_get("count")?;

        Ok(PropertiesResponse {
            properties,
            pagination: Pagination {
                skip: params.skip,
                take: params.take,
                count,
            },
        })
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Property, PropertyError> {
        let property = sqlx::query_as::<_, Property>("SELECT * FROM \"properties\" WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        property.ok_or(PropertyError::NotFound)
    }

    pub async fn create(&self, input: PropertyInput) -> Result<Property, PropertyError> {
        let property = sqlx::query_as::<_, Property>(
            "INSERT INTO \"properties\" (address, price, bedrooms, bathrooms, \"type\") \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(&input.address)
        .bind(input.price)
        .bind(input.bedrooms)
        .bind(input.bathrooms)
        .bind(&input.kind)
        .fetch_one(&self.pool)
        .await?;

        Ok(property)
    }

    /// Full-record replacement. The existence check and the UPDATE are two
    /// sequential calls; the race between them is accepted behavior.
    pub async fn update(&self, id: i32, input: PropertyInput) -> Result<Property, PropertyError> {
        if !self.exists(id).await? {
            return Err(PropertyError::NotFound);
        }

        let result = sqlx::query(
            "UPDATE \"properties\" \
             SET address = $1, price = $2, bedrooms = $3, bathrooms = $4, \"type\" = $5 \
             WHERE id = $6",
        )
        .bind(&input.address)
        .bind(input.price)
        .bind(input.bedrooms)
        .bind(input.bathrooms)
        .bind(&input.kind)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 1 {
            Ok(input.with_id(id))
        } else {
            Err(PropertyError::WriteConflict)
        }
    }

    pub async fn delete(&self, id: i32) -> Result<bool, PropertyError> {
        if !self.exists(id).await? {
            return Err(PropertyError::NotFound);
        }

        let result = sqlx::query("DELETE FROM \"properties\" WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        let deleted = result.rows_affected() == 1;
        if !deleted {
            tracing::warn!(id, "delete affected no rows after existence check passed");
        }
        Ok(deleted)
    }

    async fn exists(&self, id: i32) -> Result<bool, PropertyError> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM \"properties\" WHERE id = $1) AS present")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.try_get("present")?)
    }
}
