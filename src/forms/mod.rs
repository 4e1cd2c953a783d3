//! Input checks the view layer runs before calling into the store.
//!
//! Forms hold raw text as typed by the user. Converting one yields the
//! typed payload the store expects, or `AppError::Validation` with one
//! message per offending field.

mod fleet;
mod logbook;

pub use fleet::{CustomerForm, DriverForm, TruckForm};
pub use logbook::{DeliveryForm, FuelingForm, MaintenanceForm};

use crate::error::ValidationErrors;

/// Trimmed `value`, recording `message` under `field` when it is blank.
fn required(errors: &mut ValidationErrors, field: &'static str, value: &str, message: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(field, message);
    }
    trimmed.to_string()
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

fn positive(errors: &mut ValidationErrors, field: &'static str, raw: &str, message: &str) -> f64 {
    match parse_number(raw) {
        Some(value) if value > 0.0 => value,
        _ => {
            errors.add(field, message);
            0.0
        }
    }
}

fn non_negative(errors: &mut ValidationErrors, field: &'static str, raw: &str, message: &str) -> f64 {
    match parse_number(raw) {
        Some(value) if value >= 0.0 => value,
        _ => {
            errors.add(field, message);
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::parse_number;

    #[test]
    fn numbers_must_be_finite() {
        assert_eq!(parse_number(" 12.5 "), Some(12.5));
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("doze"), None);
    }
}
