// Entity records and their table schemas
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::schema::{Column, ColumnType, TableSchema};

pub const PATIENTS: TableSchema = TableSchema {
    entity: "patient",
    table: "patients",
    id_column: "patient_id",
    columns: &[
        Column::new("name", ColumnType::Text(100)),
        Column::new("age", ColumnType::Integer),
        Column::new("gender", ColumnType::Text(10)),
        Column::new("phone", ColumnType::Text(15)),
    ],
};

pub const DOCTORS: TableSchema = TableSchema {
    entity: "doctor",
    table: "doctors",
    id_column: "doctor_id",
    columns: &[
        Column::new("name", ColumnType::Text(100)),
        Column::new("specialization", ColumnType::Text(100)),
        Column::new("phone", ColumnType::Text(15)),
    ],
};

pub const APPOINTMENTS: TableSchema = TableSchema {
    entity: "appointment",
    table: "appointments",
    id_column: "appointment_id",
    columns: &[
        Column::foreign_key("patient_id", "patients", "patient_id"),
        Column::foreign_key("doctor_id", "doctors", "doctor_id"),
        Column::new("appointment_date", ColumnType::Date),
        Column::new("status", ColumnType::Text(50)),
    ],
};

pub const BILLING: TableSchema = TableSchema {
    entity: "bill",
    table: "billing",
    id_column: "bill_id",
    columns: &[
        Column::foreign_key("patient_id", "patients", "patient_id"),
        Column::new(
            "amount",
            ColumnType::Decimal {
                precision: 10,
                scale: 2,
            },
        ),
        Column::new("payment_status", ColumnType::Text(50)),
    ],
};

/// All entity tables, parents before the tables that reference them
pub const ALL_TABLES: [&TableSchema; 4] = [&PATIENTS, &DOCTORS, &APPOINTMENTS, &BILLING];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PatientFields {
    pub name: String,
    pub age: i32,
    pub gender: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Patient {
    #[serde(rename = "patient_id")]
    #[sqlx(rename = "patient_id")]
    pub id: i32,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub fields: PatientFields,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct DoctorFields {
    pub name: String,
    pub specialization: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Doctor {
    #[serde(rename = "doctor_id")]
    #[sqlx(rename = "doctor_id")]
    pub id: i32,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub fields: DoctorFields,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct AppointmentFields {
    pub patient_id: i32,
    pub doctor_id: i32,
    pub appointment_date: NaiveDate,
    /// Free-text label such as "scheduled", "completed" or "cancelled"
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Appointment {
    #[serde(rename = "appointment_id")]
    #[sqlx(rename = "appointment_id")]
    pub id: i32,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub fields: AppointmentFields,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct BillingFields {
    pub patient_id: i32,
    pub amount: Decimal,
    /// Free-text label such as "paid", "pending" or "unpaid"
    pub payment_status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Billing {
    #[serde(rename = "bill_id")]
    #[sqlx(rename = "bill_id")]
    pub id: i32,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub fields: BillingFields,
}

/// Implements [`Entity`](crate::Entity) for an `{ id, fields }` record.
/// Field names must be listed in schema column order.
macro_rules! impl_entity {
    ($entity:ty, $fields:ty, $schema:expr, [$($field:ident),+ $(,)?]) => {
        impl $crate::entity::Entity for $entity {
            type Fields = $fields;

            const SCHEMA: &'static TableSchema = &$schema;

            fn id(&self) -> i32 {
                self.id
            }

            fn fields(&self) -> &Self::Fields {
                &self.fields
            }

            fn from_parts(id: i32, fields: Self::Fields) -> Self {
                Self { id, fields }
            }

            fn bind_fields<'q, O>(
                fields: Self::Fields,
                query: sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments>,
            ) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments> {
                query$(.bind(fields.$field))+
            }
        }
    };
}

impl_entity!(Patient, PatientFields, PATIENTS, [name, age, gender, phone]);
impl_entity!(Doctor, DoctorFields, DOCTORS, [name, specialization, phone]);
impl_entity!(
    Appointment,
    AppointmentFields,
    APPOINTMENTS,
    [patient_id, doctor_id, appointment_date, status]
);
impl_entity!(Billing, BillingFields, BILLING, [patient_id, amount, payment_status]);
