use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

use super::required;
use crate::error::{AppError, ValidationErrors};
use crate::models::customer::{Customer, NewCustomer};
use crate::models::driver::{Driver, NewDriver};
use crate::models::truck::{NewTruck, Truck};

const MIN_PASSWORD_LEN: usize = 3;

lazy_static! {
    static ref PLATE_CLASSIC: Regex = Regex::new(r"(?i)^[A-Z]{3}-?\d{4}$").expect("valid plate regex");
    static ref PLATE_MERCOSUL: Regex =
        Regex::new(r"(?i)^[A-Z]{3}\d[A-Z]\d{2}$").expect("valid plate regex");
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DriverForm {
    pub name: String,
    pub username: String,
    /// Blank when editing means "keep the current password".
    #[serde(default)]
    pub password: String,
}

impl DriverForm {
    pub fn validate_new(self, drivers: &[Driver]) -> Result<NewDriver, AppError> {
        let mut errors = self.check(drivers, None);
        if self.password.trim().is_empty() {
            errors.add("password", "Senha é obrigatória para novos motoristas.");
        }

        errors.finish(NewDriver {
            name: self.name.trim().to_string(),
            username: self.username.trim().to_string(),
            password: self.password.trim().to_string(),
        })
    }

    pub fn apply_to(self, existing: &Driver, drivers: &[Driver]) -> Result<Driver, AppError> {
        let errors = self.check(drivers, Some(existing.id.as_str()));

        let password = match self.password.trim() {
            "" => existing.password.clone(),
            given => given.to_string(),
        };

        errors.finish(Driver {
            id: existing.id.clone(),
            name: self.name.trim().to_string(),
            username: self.username.trim().to_string(),
            password,
        })
    }

    fn check(&self, drivers: &[Driver], editing: Option<&str>) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        required(&mut errors, "name", &self.name, "Nome do motorista é obrigatório.");

        let username = required(
            &mut errors,
            "username",
            &self.username,
            "Nome de usuário é obrigatório.",
        );
        let taken = drivers
            .iter()
            .any(|driver| driver.username == username && Some(driver.id.as_str()) != editing);
        if !username.is_empty() && taken {
            errors.add("username", "Este nome de usuário já está em uso.");
        }

        let password = self.password.trim();
        if !password.is_empty() && password.chars().count() < MIN_PASSWORD_LEN {
            errors.add("password", "Senha deve ter pelo menos 3 caracteres.");
        }

        errors
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TruckForm {
    pub plate: String,
}

impl TruckForm {
    pub fn validate_new(self) -> Result<NewTruck, AppError> {
        let plate = self.normalized_plate()?;
        Ok(NewTruck { plate })
    }

    pub fn apply_to(self, existing: &Truck) -> Result<Truck, AppError> {
        let plate = self.normalized_plate()?;
        Ok(Truck {
            id: existing.id.clone(),
            plate,
        })
    }

    /// Upper-cased with the separating hyphen dropped: `abc-1234` becomes
    /// `ABC1234`.
    fn normalized_plate(&self) -> Result<String, AppError> {
        let mut errors = ValidationErrors::new();
        let plate = self.plate.trim();

        if plate.is_empty() {
            errors.add("plate", "A placa do caminhão é obrigatória.");
        } else if !PLATE_CLASSIC.is_match(plate) && !PLATE_MERCOSUL.is_match(plate) {
            errors.add("plate", "Formato de placa inválido. Use AAA-1234 ou AAA1B34.");
        }

        errors.finish(plate.to_uppercase().replacen('-', "", 1))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomerForm {
    pub name: String,
    pub address: String,
}

impl CustomerForm {
    pub fn validate_new(self) -> Result<NewCustomer, AppError> {
        let mut errors = ValidationErrors::new();
        let name = required(&mut errors, "name", &self.name, "Nome do cliente é obrigatório.");
        let address = required(
            &mut errors,
            "address",
            &self.address,
            "Endereço do cliente é obrigatório.",
        );
        errors.finish(NewCustomer { name, address })
    }

    pub fn apply_to(self, existing: &Customer) -> Result<Customer, AppError> {
        let draft = self.validate_new()?;
        Ok(Customer {
            id: existing.id.clone(),
            name: draft.name,
            address: draft.address,
        })
    }
}
