// PostgreSQL implementation of the entity operations
use sqlx::PgPool;
use tracing::debug;

use crate::entity::Entity;
use crate::error::{DatabaseError, DatabaseResult};

pub(crate) async fn create<E: Entity>(pool: &PgPool, fields: E::Fields) -> DatabaseResult<E> {
    let sql = E::SCHEMA.insert_sql();
    let row = E::bind_fields(fields, sqlx::query_as::<_, E>(&sql))
        .fetch_one(pool)
        .await?;

    debug!(table = E::SCHEMA.table, id = row.id(), "Inserted row");
    Ok(row)
}

pub(crate) async fn list<E: Entity>(pool: &PgPool) -> DatabaseResult<Vec<E>> {
    let sql = E::SCHEMA.select_all_sql();
    let rows = sqlx::query_as::<_, E>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub(crate) async fn get<E: Entity>(pool: &PgPool, id: i32) -> DatabaseResult<E> {
    let sql = E::SCHEMA.select_by_id_sql();
    sqlx::query_as::<_, E>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found(E::SCHEMA.entity, id))
}

pub(crate) async fn update<E: Entity>(pool: &PgPool, id: i32, fields: E::Fields) -> DatabaseResult<E> {
    let sql = E::SCHEMA.update_sql();
    let row = E::bind_fields(fields, sqlx::query_as::<_, E>(&sql))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found(E::SCHEMA.entity, id))?;

    debug!(table = E::SCHEMA.table, id, "Updated row");
    Ok(row)
}

pub(crate) async fn delete<E: Entity>(pool: &PgPool, id: i32) -> DatabaseResult<()> {
    let sql = E::SCHEMA.delete_sql();
    let rows_affected = sqlx::query(&sql)
        .bind(id)
        .execute(pool)
        .await?
        .rows_affected();

    if rows_affected == 0 {
        return Err(DatabaseError::not_found(E::SCHEMA.entity, id));
    }
    debug!(table = E::SCHEMA.table, id, "Deleted row");
    Ok(())
}
