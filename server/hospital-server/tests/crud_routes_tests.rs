use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use database_layer::{DatabasePool, ReferentialPolicy, Store};
use logger_redacted::PiiRedactor;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

use hospital_server::{create_app, HospitalServer, ServerConfig};

/// Router over a fresh in-memory store
struct TestApp {
    app: Router,
}

impl TestApp {
    fn new(policy: ReferentialPolicy) -> Self {
        Self::with_store(Store::memory(policy))
    }

    fn with_store(store: Store) -> Self {
        let config = ServerConfig {
            database_url: "memory".to_string(),
            referential_policy: store.policy(),
            ..ServerConfig::default()
        };
        let server = HospitalServer::with_store(config, store, PiiRedactor::default());

        Self {
            app: create_app(server),
        }
    }

    async fn get(&self, uri: &str) -> Response {
        let request = Request::builder()
            .uri(uri)
            .method("GET")
            .body(Body::empty())
            .unwrap();

        self.app.clone().oneshot(request).await.unwrap()
    }

    async fn post_form(&self, uri: &str, form: &str) -> Response {
        let request = Request::builder()
            .uri(uri)
            .method("POST")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap();

        self.app.clone().oneshot(request).await.unwrap()
    }

    async fn get_json(&self, uri: &str) -> Value {
        let response = self.get(uri).await;
        assert_eq!(response.status(), StatusCode::OK, "GET {uri}");
        body_json(response).await
    }
}

async fn body_json(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

const ASHA: &str = "name=Asha&age=30&gender=F&phone=555-0100";

#[tokio::test]
async fn test_add_patient_redirects_to_listing() {
    let app = TestApp::new(ReferentialPolicy::Orphan);

    let response = app.post_form("/add_patient", ASHA).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/patients");

    let listing = app.get_json("/patients").await;
    assert_eq!(listing["success"], true);
    let patients = listing["data"].as_array().unwrap();
    assert_eq!(patients.len(), 1);
    assert_eq!(patients[0]["patient_id"], 1);
    assert_eq!(patients[0]["name"], "Asha");
    assert_eq!(patients[0]["age"], 30);
    assert_eq!(patients[0]["phone"], "555-0100");
}

#[tokio::test]
async fn test_invalid_age_is_validation_error() {
    let app = TestApp::new(ReferentialPolicy::Orphan);

    let response = app
        .post_form("/add_patient", "name=Asha&age=thirty&gender=F")
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error_type"], "validation_error");
    assert!(body["field_errors"]["age"].is_array());
    assert!(body["field_errors"]["phone"].is_array());
    assert!(body["error_id"].is_string());

    let listing = app.get_json("/patients").await;
    assert!(listing["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_update_patient_keeps_id() {
    let app = TestApp::new(ReferentialPolicy::Orphan);
    app.post_form("/add_patient", ASHA).await;

    let response = app
        .post_form("/update_patient/1", "name=Asha+Rao&age=31&gender=F&phone=555-0199")
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/patients");

    let edited = app.get_json("/update_patient/1").await;
    assert_eq!(edited["data"]["patient_id"], 1);
    assert_eq!(edited["data"]["name"], "Asha Rao");
    assert_eq!(edited["data"]["age"], 31);
}

#[tokio::test]
async fn test_missing_and_malformed_ids() {
    let app = TestApp::new(ReferentialPolicy::Orphan);

    let response = app.get("/delete_patient/99").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error_type"], "not_found");

    let response = app.post_form("/update_doctor/5", "name=X&specialization=Y&phone=1").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.get("/update_bill/abc").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error_type"], "validation_error");
}

#[tokio::test]
async fn test_deleted_patient_is_gone() {
    let app = TestApp::new(ReferentialPolicy::Orphan);
    app.post_form("/add_patient", ASHA).await;

    let response = app.get("/delete_patient/1").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/patients");

    assert_eq!(app.get("/update_patient/1").await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_appointment_survives_patient_delete() {
    let app = TestApp::new(ReferentialPolicy::Orphan);
    app.post_form("/add_patient", ASHA).await;

    // doctor 1 does not exist
    let response = app
        .post_form(
            "/add_appointment",
            "patient_id=1&doctor_id=1&appointment_date=2024-05-01&status=scheduled",
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/appointments");

    let view = app.get_json("/appointments").await;
    let appointments = view["data"]["appointments"].as_array().unwrap();
    assert_eq!(appointments.len(), 1);
    assert_eq!(appointments[0]["appointment_id"], 1);
    assert_eq!(appointments[0]["appointment_date"], "2024-05-01");
    assert_eq!(view["data"]["patients"].as_array().unwrap().len(), 1);
    assert!(view["data"]["doctors"].as_array().unwrap().is_empty());

    app.get("/delete_patient/1").await;

    let view = app.get_json("/appointments").await;
    assert_eq!(view["data"]["appointments"][0], appointments[0]);
    assert!(view["data"]["patients"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_add_bill_stores_two_decimal_places() {
    let app = TestApp::new(ReferentialPolicy::Orphan);
    app.post_form("/add_patient", ASHA).await;

    let response = app
        .post_form("/add_bill", "patient_id=1&amount=99.5&payment_status=pending")
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/billing");

    let view = app.get_json("/billing").await;
    assert_eq!(view["data"]["bills"][0]["bill_id"], 1);
    assert_eq!(view["data"]["bills"][0]["amount"], "99.50");
    assert_eq!(view["data"]["patients"][0]["name"], "Asha");

    let response = app
        .post_form("/update_bill/1", "patient_id=1&amount=120&payment_status=paid")
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let edited = app.get_json("/update_bill/1").await;
    assert_eq!(edited["data"]["amount"], "120.00");
    assert_eq!(edited["data"]["payment_status"], "paid");
}

#[tokio::test]
async fn test_overlong_phone_is_rejected() {
    let app = TestApp::new(ReferentialPolicy::Orphan);

    let response = app
        .post_form(
            "/add_doctor",
            "name=Dr.+Lee&specialization=Pediatrics&phone=%2B1+%28555%29+0100+ext.+42",
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error_type"], "validation_error");
}

#[tokio::test]
async fn test_enforce_policy_reports_conflicts() {
    let app = TestApp::new(ReferentialPolicy::Enforce);
    app.post_form("/add_patient", ASHA).await;

    let response = app
        .post_form(
            "/add_appointment",
            "patient_id=1&doctor_id=3&appointment_date=2024-05-01&status=scheduled",
        )
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["error_type"], "conflict");

    app.post_form("/add_bill", "patient_id=1&amount=10&payment_status=pending")
        .await;
    let response = app.get("/delete_patient/1").await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let listing = app.get_json("/patients").await;
    assert_eq!(listing["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_index_and_health() {
    let app = TestApp::new(ReferentialPolicy::Orphan);

    let index = app.get_json("/").await;
    let listings: Vec<&str> = index["data"]["resources"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|resource| resource["listing"].as_str())
        .collect();
    assert_eq!(listings, vec!["/patients", "/doctors", "/appointments", "/billing"]);

    let health = app.get_json("/health").await;
    assert_eq!(health["data"]["status"], "healthy");
    assert_eq!(health["data"]["backend"], "memory");
    assert_eq!(health["data"]["referential_policy"], "orphan");
}

#[tokio::test]
async fn test_doctor_lifecycle() {
    let app = TestApp::new(ReferentialPolicy::Orphan);

    let response = app
        .post_form("/add_doctor", "name=Dr.+Lee&specialization=Pediatrics&phone=555-0150")
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/doctors");

    let listing = app.get_json("/doctors").await;
    let doctors = listing["data"].as_array().unwrap();
    assert_eq!(doctors.len(), 1);
    assert_eq!(doctors[0]["doctor_id"], 1);
    assert_eq!(doctors[0]["name"], "Dr. Lee");
    assert_eq!(doctors[0]["specialization"], "Pediatrics");

    let response = app
        .post_form(
            "/update_doctor/1",
            "name=Dr.+Lee&specialization=Neonatology&phone=555-0151",
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/doctors");

    let edited = app.get_json("/update_doctor/1").await;
    assert_eq!(edited["data"]["doctor_id"], 1);
    assert_eq!(edited["data"]["specialization"], "Neonatology");
    assert_eq!(edited["data"]["phone"], "555-0151");

    let response = app.get("/delete_doctor/1").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/doctors");

    assert!(app.get_json("/doctors").await["data"].as_array().unwrap().is_empty());
    let response = app.get("/update_doctor/1").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error_type"], "not_found");
}

#[tokio::test]
async fn test_appointment_update_and_delete() {
    let app = TestApp::new(ReferentialPolicy::Orphan);
    app.post_form("/add_patient", ASHA).await;
    app.post_form(
        "/add_appointment",
        "patient_id=1&doctor_id=1&appointment_date=2024-05-01&status=scheduled",
    )
    .await;

    let response = app
        .post_form(
            "/update_appointment/1",
            "patient_id=1&doctor_id=1&appointment_date=2024-06-15&status=completed",
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/appointments");

    let edited = app.get_json("/update_appointment/1").await;
    assert_eq!(edited["data"]["appointment_id"], 1);
    assert_eq!(edited["data"]["appointment_date"], "2024-06-15");
    assert_eq!(edited["data"]["status"], "completed");

    let response = app.get("/delete_appointment/1").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/appointments");

    let view = app.get_json("/appointments").await;
    assert!(view["data"]["appointments"].as_array().unwrap().is_empty());
    assert_eq!(app.get("/update_appointment/1").await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_reports_unreachable_store() {
    let pool = PgPoolOptions::new()
        .connect_lazy("postgresql://localhost/hospital_db")
        .unwrap();
    pool.close().await;
    let app = TestApp::with_store(Store::Postgres(DatabasePool::from_pool(
        pool,
        ReferentialPolicy::Orphan,
    )));

    let response = app.get("/health").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["data"]["status"], "degraded");
    assert_eq!(body["data"]["backend"], "postgres");
    assert_eq!(body["data"]["checks"]["database"], "unreachable");
}
