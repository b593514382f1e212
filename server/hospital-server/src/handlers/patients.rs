use database_layer::{Patient, PatientFields};
use serde::Deserialize;

use crate::error::ApiError;
use crate::handlers::common::crud::FormResource;
use crate::routes::paths;
use crate::validation::{CoerceForm, FieldErrors};

#[derive(Debug, Deserialize)]
pub struct PatientForm {
    pub name: Option<String>,
    pub age: Option<String>,
    pub gender: Option<String>,
    pub phone: Option<String>,
}

impl CoerceForm for PatientForm {
    type Output = PatientFields;

    fn coerce(self) -> Result<PatientFields, ApiError> {
        let mut errors = FieldErrors::new();
        let name = errors.text("name", self.name);
        let age = errors.integer("age", self.age);
        let gender = errors.text("gender", self.gender);
        let phone = errors.text("phone", self.phone);

        match (name, age, gender, phone) {
            (Some(name), Some(age), Some(gender), Some(phone)) => Ok(PatientFields {
                name,
                age,
                gender,
                phone,
            }),
            _ => Err(errors.into_error()),
        }
    }
}

impl FormResource for Patient {
    type Form = PatientForm;

    const LISTING_PATH: &'static str = paths::patients::LIST;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerces_age_and_keeps_text_verbatim() {
        let form = PatientForm {
            name: Some("Asha".to_string()),
            age: Some("30".to_string()),
            gender: Some("F".to_string()),
            phone: Some(" 555-0100".to_string()),
        };

        let fields = form.coerce().unwrap();
        assert_eq!(fields.age, 30);
        assert_eq!(fields.phone, " 555-0100");
    }

    #[test]
    fn missing_fields_are_reported_together() {
        let form = PatientForm {
            name: None,
            age: Some("thirty".to_string()),
            gender: Some("F".to_string()),
            phone: None,
        };

        match form.coerce() {
            Err(ApiError::Validation {
                field_errors: Some(fields),
                ..
            }) => {
                let mut names: Vec<_> = fields.keys().cloned().collect();
                names.sort();
                assert_eq!(names, vec!["age", "name", "phone"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
