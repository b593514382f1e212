//! In-process entity store
//!
//! Mirrors the PostgreSQL backend's observable behavior (serial ids starting
//! at 1, column width and numeric checks, the referential policy) so that the
//! repository contract can be exercised without a database server.

use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;
use std::sync::Arc;

use parking_lot::RwLock;
use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::{Map, Value};
use tracing::debug;

use crate::entity::Entity;
use crate::error::{DatabaseError, DatabaseResult};
use crate::models::ALL_TABLES;
use crate::schema::{ColumnType, ReferentialPolicy, TableSchema};

type Row = Map<String, Value>;

#[derive(Debug, Default)]
struct MemoryTable {
    last_id: i32,
    rows: BTreeMap<i32, Row>,
}

/// Thread-safe in-memory tables keyed by table name
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<HashMap<&'static str, MemoryTable>>>,
    policy: ReferentialPolicy,
}

impl MemoryStore {
    pub fn new(policy: ReferentialPolicy) -> Self {
        Self {
            tables: Arc::new(RwLock::new(HashMap::new())),
            policy,
        }
    }

    pub fn policy(&self) -> ReferentialPolicy {
        self.policy
    }

    pub fn create<E: Entity>(&self, fields: E::Fields) -> DatabaseResult<E> {
        let schema = E::SCHEMA;
        let row = normalize_row(schema, to_row(&fields)?)?;

        let mut tables = self.tables.write();
        self.check_references(&tables, schema, &row)?;

        let table = tables.entry(schema.table).or_default();
        let id = table
            .last_id
            .checked_add(1)
            .ok_or_else(|| DatabaseError::QueryFailed(format!("{} id sequence exhausted", schema.table)))?;
        table.last_id = id;
        table.rows.insert(id, row.clone());

        debug!(table = schema.table, id, "Inserted row");
        from_row::<E>(id, row)
    }

    pub fn list<E: Entity>(&self) -> DatabaseResult<Vec<E>> {
        let tables = self.tables.read();
        match tables.get(E::SCHEMA.table) {
            Some(table) => table
                .rows
                .iter()
                .map(|(id, row)| from_row::<E>(*id, row.clone()))
                .collect(),
            None => Ok(Vec::new()),
        }
    }

    pub fn get<E: Entity>(&self, id: i32) -> DatabaseResult<E> {
        let tables = self.tables.read();
        let row = tables
            .get(E::SCHEMA.table)
            .and_then(|table| table.rows.get(&id))
            .cloned()
            .ok_or_else(|| DatabaseError::not_found(E::SCHEMA.entity, id))?;
        from_row::<E>(id, row)
    }

    pub fn update<E: Entity>(&self, id: i32, fields: E::Fields) -> DatabaseResult<E> {
        let schema = E::SCHEMA;
        let row = normalize_row(schema, to_row(&fields)?)?;

        let mut tables = self.tables.write();
        let exists = tables
            .get(schema.table)
            .is_some_and(|table| table.rows.contains_key(&id));
        if !exists {
            return Err(DatabaseError::not_found(schema.entity, id));
        }
        self.check_references(&tables, schema, &row)?;

        if let Some(table) = tables.get_mut(schema.table) {
            table.rows.insert(id, row.clone());
        }

        debug!(table = schema.table, id, "Updated row");
        from_row::<E>(id, row)
    }

    pub fn delete<E: Entity>(&self, id: i32) -> DatabaseResult<()> {
        let schema = E::SCHEMA;
        let mut tables = self.tables.write();
        let exists = tables
            .get(schema.table)
            .is_some_and(|table| table.rows.contains_key(&id));
        if !exists {
            return Err(DatabaseError::not_found(schema.entity, id));
        }

        if self.policy == ReferentialPolicy::Enforce {
            if let Some(child) = find_referencing_table(&tables, schema, id) {
                return Err(DatabaseError::Constraint(format!(
                    "{} {} is still referenced from table \"{}\"",
                    schema.entity, id, child
                )));
            }
        }

        if let Some(table) = tables.get_mut(schema.table) {
            table.rows.remove(&id);
        }
        debug!(table = schema.table, id, "Deleted row");
        Ok(())
    }

    fn check_references(
        &self,
        tables: &HashMap<&'static str, MemoryTable>,
        schema: &TableSchema,
        row: &Row,
    ) -> DatabaseResult<()> {
        if self.policy == ReferentialPolicy::Orphan {
            return Ok(());
        }

        for (column, fk) in schema.foreign_keys() {
            let Some(parent_id) = row.get(column).and_then(Value::as_i64) else {
                continue;
            };
            let present = i32::try_from(parent_id).is_ok_and(|parent_id| {
                tables
                    .get(fk.table)
                    .is_some_and(|parent| parent.rows.contains_key(&parent_id))
            });
            if !present {
                return Err(DatabaseError::Constraint(format!(
                    "insert or update on table \"{}\" violates foreign key: {} {} is not present in table \"{}\"",
                    schema.table, column, parent_id, fk.table
                )));
            }
        }
        Ok(())
    }
}

fn find_referencing_table(
    tables: &HashMap<&'static str, MemoryTable>,
    parent: &TableSchema,
    id: i32,
) -> Option<&'static str> {
    ALL_TABLES.iter().find_map(|child| {
        let referenced = child
            .foreign_keys()
            .filter(|(_, fk)| fk.table == parent.table)
            .any(|(column, _)| {
                tables.get(child.table).is_some_and(|table| {
                    table
                        .rows
                        .values()
                        .any(|row| row.get(column).and_then(Value::as_i64) == Some(i64::from(id)))
                })
            });
        referenced.then_some(child.table)
    })
}

fn to_row<T: serde::Serialize>(fields: &T) -> DatabaseResult<Row> {
    match serde_json::to_value(fields).map_err(|e| DatabaseError::InternalError(e.into()))? {
        Value::Object(row) => Ok(row),
        other => Err(DatabaseError::SchemaError(format!(
            "entity fields must serialize to an object, got {}",
            other
        ))),
    }
}

fn from_row<E: Entity>(id: i32, row: Row) -> DatabaseResult<E> {
    let fields: E::Fields = serde_json::from_value(Value::Object(row))
        .map_err(|e| DatabaseError::SchemaError(format!("corrupt {} row {}: {}", E::SCHEMA.table, id, e)))?;
    Ok(E::from_parts(id, fields))
}

/// Apply the column rules PostgreSQL would: VARCHAR widths and NUMERIC rounding/overflow.
fn normalize_row(schema: &TableSchema, mut row: Row) -> DatabaseResult<Row> {
    for column in schema.columns {
        let value = row.get_mut(column.name).ok_or_else(|| {
            DatabaseError::Validation(format!("null value in column \"{}\"", column.name))
        })?;

        match column.column_type {
            ColumnType::Text(max_len) => {
                let len = value.as_str().map_or(0, |s| s.chars().count());
                if len > max_len {
                    return Err(DatabaseError::Validation(format!(
                        "value too long for type character varying({}) in column \"{}\"",
                        max_len, column.name
                    )));
                }
            }
            ColumnType::Decimal { precision, scale } => {
                let raw = match value {
                    Value::String(s) => s.clone(),
                    Value::Number(n) => n.to_string(),
                    _ => String::new(),
                };
                let mut amount = Decimal::from_str(&raw).map_err(|_| {
                    DatabaseError::Validation(format!("invalid numeric value in column \"{}\"", column.name))
                })?;
                amount = amount.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
                amount.rescale(scale);
                let limit = Decimal::from(10_i64.pow(precision.saturating_sub(scale)));
                if amount.abs() >= limit {
                    return Err(DatabaseError::Validation(format!(
                        "numeric field overflow in column \"{}\"",
                        column.name
                    )));
                }
                *value = Value::String(amount.to_string());
            }
            ColumnType::Integer | ColumnType::Date => {}
        }
    }
    Ok(row)
}
