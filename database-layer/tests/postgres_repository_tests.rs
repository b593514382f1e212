//! PostgreSQL Repository Tests
//!
//! To run these tests:
//! 1. Ensure PostgreSQL is running and DATABASE_URL points at a scratch database
//! 2. cargo test -p database-layer --test postgres_repository_tests -- --ignored --test-threads=1
//!
//! The tests drop and recreate the entity tables.

use chrono::NaiveDate;
use database_layer::*;
use rust_decimal::Decimal;
use sqlx::PgPool;

async fn setup_store(policy: ReferentialPolicy) -> Store {
    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "postgresql://localhost/hospital_test".to_string());

    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test database");

    sqlx::query("DROP TABLE IF EXISTS billing, appointments, doctors, patients")
        .execute(&pool)
        .await
        .expect("Failed to reset test tables");

    let pool = DatabasePool::from_pool(pool, policy);
    pool.ensure_schema().await.expect("Failed to create tables");
    Store::Postgres(pool)
}

fn asha() -> PatientFields {
    PatientFields {
        name: "Asha".to_string(),
        age: 30,
        gender: "F".to_string(),
        phone: "555-0100".to_string(),
    }
}

fn checkup(patient_id: i32, doctor_id: i32) -> AppointmentFields {
    AppointmentFields {
        patient_id,
        doctor_id,
        appointment_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        status: "scheduled".to_string(),
    }
}

#[tokio::test]
#[ignore] // Run with: cargo test postgres_patient_lifecycle -- --ignored
async fn test_postgres_patient_lifecycle() {
    let store = setup_store(ReferentialPolicy::Orphan).await;
    let patients = Repository::<Patient>::new(store.clone());

    let created = patients.create(asha()).await.unwrap();
    assert_eq!(created.id, 1);
    assert_eq!(patients.get_by_id(1).await.unwrap(), created);

    let mut older = asha();
    older.age = 31;
    let updated = patients.update(1, older.clone()).await.unwrap();
    assert_eq!(updated.id, 1);
    assert_eq!(patients.get_by_id(1).await.unwrap().fields, older);

    patients.delete_by_id(1).await.unwrap();
    assert!(matches!(
        patients.get_by_id(1).await,
        Err(DatabaseError::NotFound { .. })
    ));
    assert!(matches!(
        patients.delete_by_id(1).await,
        Err(DatabaseError::NotFound { .. })
    ));

    store.close().await;
}

#[tokio::test]
#[ignore]
async fn test_postgres_orphan_policy_keeps_appointments() {
    let store = setup_store(ReferentialPolicy::Orphan).await;
    let patients = Repository::<Patient>::new(store.clone());
    let appointments = Repository::<Appointment>::new(store.clone());

    let patient = patients.create(asha()).await.unwrap();
    let appointment = appointments.create(checkup(patient.id, 1)).await.unwrap();

    patients.delete_by_id(patient.id).await.unwrap();

    assert_eq!(appointments.list().await.unwrap(), vec![appointment]);
    store.close().await;
}

#[tokio::test]
#[ignore]
async fn test_postgres_enforce_policy_maps_constraint_errors() {
    let store = setup_store(ReferentialPolicy::Enforce).await;
    let patients = Repository::<Patient>::new(store.clone());
    let doctors = Repository::<Doctor>::new(store.clone());
    let appointments = Repository::<Appointment>::new(store.clone());

    let patient = patients.create(asha()).await.unwrap();
    let err = appointments.create(checkup(patient.id, 5)).await.unwrap_err();
    assert!(matches!(err, DatabaseError::Constraint(_)));

    let doctor = doctors
        .create(DoctorFields {
            name: "Dr. Lee".to_string(),
            specialization: "Pediatrics".to_string(),
            phone: "555-0150".to_string(),
        })
        .await
        .unwrap();
    appointments.create(checkup(patient.id, doctor.id)).await.unwrap();

    let err = patients.delete_by_id(patient.id).await.unwrap_err();
    assert!(matches!(err, DatabaseError::Constraint(_)));

    store.close().await;
}

#[tokio::test]
#[ignore]
async fn test_postgres_validation_errors() {
    let store = setup_store(ReferentialPolicy::Orphan).await;
    let patients = Repository::<Patient>::new(store.clone());
    let bills = Repository::<Billing>::new(store.clone());

    let mut fields = asha();
    fields.phone = "+1 (555) 0100 ext. 42".to_string();
    let err = patients.create(fields).await.unwrap_err();
    assert!(matches!(err, DatabaseError::Validation(_)));

    let bill = bills
        .create(BillingFields {
            patient_id: 1,
            amount: Decimal::new(995, 1),
            payment_status: "pending".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(bill.fields.amount.to_string(), "99.50");

    store.close().await;
}
