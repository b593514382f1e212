use serde::{de::DeserializeOwned, Serialize};
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::QueryAs;
use sqlx::{FromRow, Postgres};

use crate::schema::TableSchema;

/// A persisted record type: a store-assigned id plus a set of mutable fields.
///
/// Implementors describe their table once through [`Entity::SCHEMA`]; the
/// generic [`Repository`](crate::Repository) derives every statement from it.
pub trait Entity:
    Serialize + for<'r> FromRow<'r, PgRow> + Clone + Send + Sync + Unpin + 'static
{
    /// Caller-supplied values, everything except the id
    type Fields: Serialize + DeserializeOwned + Clone + Send + Sync + 'static;

    const SCHEMA: &'static TableSchema;

    fn id(&self) -> i32;

    fn fields(&self) -> &Self::Fields;

    fn from_parts(id: i32, fields: Self::Fields) -> Self;

    /// Bind the fields in `SCHEMA.columns` order
    fn bind_fields<'q, O>(
        fields: Self::Fields,
        query: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> QueryAs<'q, Postgres, O, PgArguments>;
}
