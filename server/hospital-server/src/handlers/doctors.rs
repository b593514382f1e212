use database_layer::{Doctor, DoctorFields};
use serde::Deserialize;

use crate::error::ApiError;
use crate::handlers::common::crud::FormResource;
use crate::routes::paths;
use crate::validation::{CoerceForm, FieldErrors};

#[derive(Debug, Deserialize)]
pub struct DoctorForm {
    pub name: Option<String>,
    pub specialization: Option<String>,
    pub phone: Option<String>,
}

impl CoerceForm for DoctorForm {
    type Output = DoctorFields;

    fn coerce(self) -> Result<DoctorFields, ApiError> {
        let mut errors = FieldErrors::new();
        let name = errors.text("name", self.name);
        let specialization = errors.text("specialization", self.specialization);
        let phone = errors.text("phone", self.phone);

        match (name, specialization, phone) {
            (Some(name), Some(specialization), Some(phone)) => Ok(DoctorFields {
                name,
                specialization,
                phone,
            }),
            _ => Err(errors.into_error()),
        }
    }
}

impl FormResource for Doctor {
    type Form = DoctorForm;

    const LISTING_PATH: &'static str = paths::doctors::LIST;
}
