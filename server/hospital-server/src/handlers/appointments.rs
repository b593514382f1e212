use axum::extract::State;
use axum::Json;
use database_layer::{Appointment, AppointmentFields, Doctor, Patient};
use serde::{Deserialize, Serialize};

use crate::error::{api_success, ApiError, ApiResponse, ApiResult};
use crate::handlers::common::crud::FormResource;
use crate::routes::paths;
use crate::server::HospitalServer;
use crate::validation::{CoerceForm, FieldErrors};

#[derive(Debug, Deserialize)]
pub struct AppointmentForm {
    pub patient_id: Option<String>,
    pub doctor_id: Option<String>,
    pub appointment_date: Option<String>,
    pub status: Option<String>,
}

impl CoerceForm for AppointmentForm {
    type Output = AppointmentFields;

    fn coerce(self) -> Result<AppointmentFields, ApiError> {
        let mut errors = FieldErrors::new();
        let patient_id = errors.integer("patient_id", self.patient_id);
        let doctor_id = errors.integer("doctor_id", self.doctor_id);
        let appointment_date = errors.date("appointment_date", self.appointment_date);
        let status = errors.text("status", self.status);

        match (patient_id, doctor_id, appointment_date, status) {
            (Some(patient_id), Some(doctor_id), Some(appointment_date), Some(status)) => {
                Ok(AppointmentFields {
                    patient_id,
                    doctor_id,
                    appointment_date,
                    status,
                })
            }
            _ => Err(errors.into_error()),
        }
    }
}

impl FormResource for Appointment {
    type Form = AppointmentForm;

    const LISTING_PATH: &'static str = paths::appointments::LIST;
}

/// Appointment listing with the patients and doctors a new booking can pick from
#[derive(Debug, Serialize)]
pub struct AppointmentsView {
    pub appointments: Vec<Appointment>,
    pub patients: Vec<Patient>,
    pub doctors: Vec<Doctor>,
}

pub async fn list_appointments(
    State(server): State<HospitalServer>,
) -> ApiResult<Json<ApiResponse<AppointmentsView>>> {
    let appointments = server.repository::<Appointment>();
    let patients = server.repository::<Patient>();
    let doctors = server.repository::<Doctor>();

    let (appointments, patients, doctors) =
        tokio::try_join!(appointments.list(), patients.list(), doctors.list())?;

    Ok(Json(api_success(AppointmentsView {
        appointments,
        patients,
        doctors,
    })))
}
