use axum::extract::State;
use axum::Json;
use database_layer::{Billing, BillingFields, Patient};
use serde::{Deserialize, Serialize};

use crate::error::{api_success, ApiError, ApiResponse, ApiResult};
use crate::handlers::common::crud::FormResource;
use crate::routes::paths;
use crate::server::HospitalServer;
use crate::validation::{CoerceForm, FieldErrors};

#[derive(Debug, Deserialize)]
pub struct BillForm {
    pub patient_id: Option<String>,
    pub amount: Option<String>,
    pub payment_status: Option<String>,
}

impl CoerceForm for BillForm {
    type Output = BillingFields;

    fn coerce(self) -> Result<BillingFields, ApiError> {
        let mut errors = FieldErrors::new();
        let patient_id = errors.integer("patient_id", self.patient_id);
        let amount = errors.decimal("amount", self.amount);
        let payment_status = errors.text("payment_status", self.payment_status);

        match (patient_id, amount, payment_status) {
            (Some(patient_id), Some(amount), Some(payment_status)) => Ok(BillingFields {
                patient_id,
                amount,
                payment_status,
            }),
            _ => Err(errors.into_error()),
        }
    }
}

impl FormResource for Billing {
    type Form = BillForm;

    const LISTING_PATH: &'static str = paths::billing::LIST;
}

/// Bill listing with the patients a new bill can be raised against
#[derive(Debug, Serialize)]
pub struct BillingView {
    pub bills: Vec<Billing>,
    pub patients: Vec<Patient>,
}

pub async fn list_bills(
    State(server): State<HospitalServer>,
) -> ApiResult<Json<ApiResponse<BillingView>>> {
    let bills = server.repository::<Billing>();
    let patients = server.repository::<Patient>();

    let (bills, patients) = tokio::try_join!(bills.list(), patients.list())?;

    Ok(Json(api_success(BillingView { bills, patients })))
}
