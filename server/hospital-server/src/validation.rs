//! Form coercion for create and update submissions
//!
//! Every form field arrives as text. Each form type implements
//! [`CoerceForm`], turning the raw submission into typed entity fields.
//! Problems are collected per field with [`FieldErrors`] so a single response
//! reports every bad field, not just the first one.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::ApiError;

/// Accepted date format for appointment dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Decimal places kept on money amounts
pub const AMOUNT_SCALE: u32 = 2;

/// Trait for turning a raw form submission into typed entity fields
///
/// # Example
///
/// ```rust
/// use hospital_server::error::ApiError;
/// use hospital_server::validation::{CoerceForm, FieldErrors};
///
/// struct AgeForm {
///     age: Option<String>,
/// }
///
/// impl CoerceForm for AgeForm {
///     type Output = i32;
///
///     fn coerce(self) -> Result<i32, ApiError> {
///         let mut errors = FieldErrors::new();
///         let age = errors.integer("age", self.age);
///         match age {
///             Some(age) => Ok(age),
///             None => Err(errors.into_error()),
///         }
///     }
/// }
///
/// let form = AgeForm { age: Some(" 30 ".to_string()) };
/// assert_eq!(form.coerce().unwrap(), 30);
/// ```
pub trait CoerceForm {
    type Output;

    /// Returns the typed fields, or a validation error naming every bad field
    fn coerce(self) -> Result<Self::Output, ApiError>;
}

/// Per-field error collector
#[derive(Debug, Default)]
pub struct FieldErrors {
    errors: HashMap<String, Vec<String>>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Required text field, kept as submitted
    pub fn text(&mut self, field: &str, value: Option<String>) -> Option<String> {
        match value {
            Some(value) => Some(value),
            None => {
                self.add(field, format!("{field} is required"));
                None
            }
        }
    }

    pub fn integer(&mut self, field: &str, value: Option<String>) -> Option<i32> {
        self.parse(field, value, parse_integer)
    }

    pub fn decimal(&mut self, field: &str, value: Option<String>) -> Option<Decimal> {
        self.parse(field, value, parse_decimal)
    }

    pub fn date(&mut self, field: &str, value: Option<String>) -> Option<NaiveDate> {
        self.parse(field, value, parse_date)
    }

    fn parse<T>(
        &mut self,
        field: &str,
        value: Option<String>,
        parser: fn(&str) -> Result<T, String>,
    ) -> Option<T> {
        let raw = self.text(field, value)?;
        match parser(&raw) {
            Ok(parsed) => Some(parsed),
            Err(message) => {
                self.add(field, message);
                None
            }
        }
    }

    pub fn into_error(self) -> ApiError {
        ApiError::validation_with_fields("Invalid form submission", self.errors)
    }
}

pub fn parse_integer(raw: &str) -> Result<i32, String> {
    let trimmed = raw.trim();
    i32::from_str(trimmed).map_err(|_| format!("'{trimmed}' is not a whole number"))
}

/// Decimal with at most two places; longer inputs round half away from zero
pub fn parse_decimal(raw: &str) -> Result<Decimal, String> {
    let trimmed = raw.trim();
    let mut value = Decimal::from_str(trimmed)
        .map_err(|_| format!("'{trimmed}' is not a decimal number"))?
        .round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero);
    value.rescale(AMOUNT_SCALE);
    Ok(value)
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| format!("'{trimmed}' is not a date in YYYY-MM-DD format"))
}

/// Path ids are validated the same way as form integers
pub fn parse_id(raw: &str) -> Result<i32, ApiError> {
    parse_integer(raw).map_err(|message| {
        let mut errors = FieldErrors::new();
        errors.add("id", message);
        ApiError::validation_with_fields("Invalid record id", errors.errors)
    })
}
