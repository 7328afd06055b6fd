use serde_json::{json, Value};
use sqlx::{self, postgres::PgArguments, FromRow};

const TABLE: &str = "properties";

/// Sortable columns of the properties table. Parsing is strict: the set of
/// accepted names is the externally visible `orderBy` contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderBy {
    Id,
    Address,
    Price,
    Bedrooms,
    Bathrooms,
    Type,
}

impl OrderBy {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "id" => Some(OrderBy::Id),
            "address" => Some(OrderBy::Address),
            "price" => Some(OrderBy::Price),
            "bedrooms" => Some(OrderBy::Bedrooms),
            "bathrooms" => Some(OrderBy::Bathrooms),
            "type" => Some(OrderBy::Type),
            _ => None,
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            OrderBy::Id => "id",
            OrderBy::Address => "address",
            OrderBy::Price => "price",
            OrderBy::Bedrooms => "bedrooms",
            OrderBy::Bathrooms => "bathrooms",
            OrderBy::Type => "type",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("asc") {
            Some(SortDirection::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Some(SortDirection::Desc)
        } else {
            None
        }
    }

    pub fn to_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Typed filter fields for the list operation. Present fields are combined
/// with AND; absent fields add no predicate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyFilter {
    pub address: Option<String>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub kind: Option<String>,
}

/// Fully validated parameters for the list operation.
#[derive(Debug, Clone)]
pub struct ListParams {
    pub skip: i64,
    pub take: i64,
    pub filter: PropertyFilter,
    pub order_by: OrderBy,
    pub order: SortDirection,
}

#[derive(Debug, Clone)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<Value>,
}

/// Builds the SELECT and COUNT statements for one list request. Both share
/// the same WHERE clause; only the SELECT carries ORDER BY/LIMIT/OFFSET.
pub struct PropertyQuery<'a> {
    list: &'a ListParams,
}

impl<'a> PropertyQuery<'a> {
    pub fn new(list: &'a ListParams) -> Self {
        Self { list }
    }

    pub fn to_select_sql(&self) -> SqlResult {
        let mut params = Vec::new();
        let where_clause = self.build_where(&mut params);

        let query = [
            format!("SELECT * FROM \"{}\"", TABLE),
            if where_clause.is_empty() { String::new() } else { format!("WHERE {}", where_clause) },
            format!("ORDER BY \"{}\" {}", self.list.order_by.column(), self.list.order.to_sql()),
            format!("LIMIT {} OFFSET {}", self.list.take, self.list.skip),
        ]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

        SqlResult { query, params }
    }

    pub fn to_count_sql(&self) -> SqlResult {
        let mut params = Vec::new();
        let where_clause = self.build_where(&mut params);

        let query = if where_clause.is_empty() {
            format!("SELECT COUNT(*) AS count FROM \"{}\"", TABLE)
        } else {
            format!("SELECT COUNT(*) AS count FROM \"{}\" WHERE {}", TABLE, where_clause)
        };

        SqlResult { query, params }
    }

    fn build_where(&self, params: &mut Vec<Value>) -> String {
        let filter = &self.list.filter;
        let mut conditions = Vec::new();

        if let Some(address) = &filter.address {
            let pattern = format!("%{}%", address);
            conditions.push(format!("\"address\" ILIKE {}", param(params, json!(pattern))));
        }

        // A lone bound is strict; the combined range is inclusive on both ends.
        match (filter.price_min, filter.price_max) {
            (Some(min), None) => {
                conditions.push(format!("\"price\" > {}", param(params, json!(min))));
            }
            (None, Some(max)) => {
                conditions.push(format!("\"price\" < {}", param(params, json!(max))));
            }
            (Some(min), Some(max)) => {
                let lo = param(params, json!(min));
                let hi = param(params, json!(max));
                conditions.push(format!("\"price\" >= {} AND \"price\" <= {}", lo, hi));
            }
            (None, None) => {}
        }

        if let Some(bedrooms) = filter.bedrooms {
            conditions.push(format!("\"bedrooms\" = {}", param(params, json!(bedrooms))));
        }
        if let Some(bathrooms) = filter.bathrooms {
            conditions.push(format!("\"bathrooms\" = {}", param(params, json!(bathrooms))));
        }
        if let Some(kind) = &filter.kind {
            conditions.push(format!("\"type\" ILIKE {}", param(params, json!(kind))));
        }

        conditions.join(" AND ")
    }
}

fn param(params: &mut Vec<Value>, value: Value) -> String {
    params.push(value);
    format!("${}", params.len())
}

pub fn bind_param_query<'q>(
    q: sqlx::query::Query<'q, sqlx::Postgres, PgArguments>,
    v: &'q Value,
) -> sqlx::query::Query<'q, sqlx::Postgres, PgArguments> {
    match v {
        Value::Null => q.bind(None::<String>),
        Value::Bool(b) => q.bind(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                q.bind(i)
            } else if let Some(f) = n.as_f64() {
                q.bind(f)
            } else {
                q.bind(n.to_string())
            }
        }
        Value::String(s) => q.bind(s.as_str()),
        other => q.bind(other.to_string()),
    }
}

pub fn bind_param_query_as<'q, O>(
    q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>,
    v: &'q Value,
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>
where
    O: for<'r> FromRow<'r, sqlx::postgres::PgRow>,
{
    match v {
        Value::Null => q.bind(None::<String>),
        Value::Bool(b) => q.bind(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                q.bind(i)
            } else if let Some(f) = n.as_f64() {
                q.bind(f)
            } else {
                q.bind(n.to_string())
            }
        }
        Value::String(s) => q.bind(s.as_str()),
        other => q.bind(other.to_string()),
    }
}
