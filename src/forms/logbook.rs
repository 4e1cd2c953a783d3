use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;

use super::{non_negative, positive, required};
use crate::error::{AppError, ValidationErrors};
use crate::models::customer::Customer;
use crate::models::delivery::{Delivery, NewDelivery};
use crate::models::driver::Driver;
use crate::models::fueling::NewFueling;
use crate::models::{Entity, hour_minute};
use crate::models::maintenance::NewMaintenance;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DeliveryForm {
    /// A registered customer whose name and address replace the typed ones.
    #[serde(default)]
    pub selected_customer_id: Option<String>,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub address: String,
    pub delivery_date: Option<NaiveDate>,
    pub start_time: String,
    pub end_time: String,
    pub water_quantity: String,
    pub truck_plate: String,
    pub receiver_signature: String,
    pub receiver_rg: String,
}

impl DeliveryForm {
    /// `driver` is the logged-in driver the delivery is attributed to.
    pub fn validate(self, driver: Option<&Driver>, customers: &[Customer]) -> Result<NewDelivery, AppError> {
        let snapshot = driver.map(|driver| (driver.id.clone(), driver.name.clone()));
        self.into_draft(snapshot, customers)
    }

    /// Admin edit of an existing delivery. Passing `None` keeps the driver
    /// recorded on it.
    pub fn apply_to(
        self,
        existing: &Delivery,
        driver: Option<&Driver>,
        customers: &[Customer],
    ) -> Result<Delivery, AppError> {
        let snapshot = match driver {
            Some(driver) => (driver.id.clone(), driver.name.clone()),
            None => (existing.driver_id.clone(), existing.driver_name.clone()),
        };
        let draft = self.into_draft(Some(snapshot), customers)?;
        Ok(Delivery::from_draft(existing.id.clone(), draft))
    }

    fn into_draft(
        self,
        driver: Option<(String, String)>,
        customers: &[Customer],
    ) -> Result<NewDelivery, AppError> {
        let mut errors = ValidationErrors::new();

        let selected = self
            .selected_customer_id
            .as_deref()
            .and_then(|id| customers.iter().find(|customer| customer.id == id));
        let (raw_name, raw_address) = match selected {
            Some(customer) => (customer.name.as_str(), customer.address.as_str()),
            None => (self.customer_name.as_str(), self.address.as_str()),
        };

        let customer_name = required(
            &mut errors,
            "customerName",
            raw_name,
            "Nome do cliente é obrigatório.",
        );
        let address = required(&mut errors, "address", raw_address, "Endereço é obrigatório.");

        let start_time = parse_time(
            &mut errors,
            "startTime",
            &self.start_time,
            "Horário de início é obrigatório.",
        );
        let end_time = parse_time(
            &mut errors,
            "endTime",
            &self.end_time,
            "Horário de saída é obrigatório.",
        );
        if let (Some(start), Some(end)) = (start_time, end_time) {
            if start >= end {
                errors.add(
                    "endTime",
                    "Horário de saída deve ser após o horário de início.",
                );
            }
        }

        let water_quantity = positive(
            &mut errors,
            "waterQuantity",
            &self.water_quantity,
            "Quantidade de água deve ser um número positivo.",
        );

        let (driver_id, driver_name) = match driver {
            Some((id, name)) if !name.trim().is_empty() => (id, name),
            _ => {
                errors.add("driverName", "Motorista não identificado.");
                (String::new(), String::new())
            }
        };

        let truck_plate = required(
            &mut errors,
            "truckPlate",
            &self.truck_plate,
            "Placa do caminhão é obrigatória.",
        );
        if self.delivery_date.is_none() {
            errors.add("deliveryDate", "Data da entrega é obrigatória.");
        }
        let receiver_signature = required(
            &mut errors,
            "receiverSignature",
            &self.receiver_signature,
            "Assinatura (nome do receptor) é obrigatória.",
        );
        let receiver_rg = required(
            &mut errors,
            "receiverRg",
            &self.receiver_rg,
            "RG do receptor é obrigatório.",
        );

        let (Some(delivery_date), Some(start_time), Some(end_time)) =
            (self.delivery_date, start_time, end_time)
        else {
            return Err(AppError::Validation(errors));
        };

        errors.finish(NewDelivery {
            customer_name,
            address,
            delivery_date,
            start_time,
            end_time,
            water_quantity,
            driver_name,
            driver_id,
            truck_plate,
            receiver_signature,
            receiver_rg,
            selected_customer_id: selected.map(|customer| customer.id.clone()),
        })
    }
}

fn parse_time(
    errors: &mut ValidationErrors,
    field: &'static str,
    raw: &str,
    message: &str,
) -> Option<NaiveTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        errors.add(field, message);
        return None;
    }

    match NaiveTime::parse_from_str(raw, hour_minute::FORMAT) {
        Ok(time) => Some(time),
        Err(_) => {
            errors.add(field, "Horário inválido. Use HH:MM.");
            None
        }
    }
}

fn require_driver(errors: &mut ValidationErrors, driver: Option<&Driver>) -> (String, String) {
    match driver {
        Some(driver) => (driver.id.clone(), driver.name.clone()),
        None => {
            errors.add("driver", "Motorista não autenticado.");
            (String::new(), String::new())
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FuelingForm {
    pub truck_plate: String,
    pub station_name: String,
    pub liters: String,
    pub total_value: String,
    #[serde(default)]
    pub observation: String,
    pub date: Option<NaiveDate>,
}

impl FuelingForm {
    pub fn validate(self, driver: Option<&Driver>) -> Result<NewFueling, AppError> {
        let mut errors = ValidationErrors::new();
        let (driver_id, driver_name) = require_driver(&mut errors, driver);
        let truck_plate = required(
            &mut errors,
            "truckPlate",
            &self.truck_plate,
            "Placa do caminhão é obrigatória.",
        );
        let station_name = required(
            &mut errors,
            "stationName",
            &self.station_name,
            "Nome do posto é obrigatório.",
        );
        let liters = positive(
            &mut errors,
            "liters",
            &self.liters,
            "Quantidade de litros deve ser um número positivo.",
        );
        let total_value = positive(
            &mut errors,
            "totalValue",
            &self.total_value,
            "Valor total deve ser um número positivo.",
        );

        let Some(date) = self.date else {
            errors.add("date", "Data do abastecimento é obrigatória.");
            return Err(AppError::Validation(errors));
        };

        errors.finish(NewFueling {
            driver_id,
            driver_name,
            truck_plate,
            station_name,
            liters,
            total_value,
            observation: self.observation,
            date,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MaintenanceForm {
    pub truck_plate: String,
    pub issue: String,
    pub mechanic: String,
    pub cost: String,
    #[serde(default)]
    pub observation: String,
    pub date: Option<NaiveDate>,
}

impl MaintenanceForm {
    pub fn validate(self, driver: Option<&Driver>) -> Result<NewMaintenance, AppError> {
        let mut errors = ValidationErrors::new();
        let (driver_id, driver_name) = require_driver(&mut errors, driver);
        let truck_plate = required(
            &mut errors,
            "truckPlate",
            &self.truck_plate,
            "Placa do caminhão é obrigatória.",
        );
        let issue = required(
            &mut errors,
            "issue",
            &self.issue,
            "Descrição do problema é obrigatória.",
        );
        let mechanic = required(
            &mut errors,
            "mechanic",
            &self.mechanic,
            "Nome do mecânico/oficina é obrigatório.",
        );
        // Free repairs are allowed.
        let cost = non_negative(
            &mut errors,
            "cost",
            &self.cost,
            "Custo deve ser um número (pode ser zero).",
        );

        let Some(date) = self.date else {
            errors.add("date", "Data da manutenção é obrigatória.");
            return Err(AppError::Validation(errors));
        };

        errors.finish(NewMaintenance {
            driver_id,
            driver_name,
            truck_plate,
            issue,
            mechanic,
            cost,
            observation: self.observation,
            date,
        })
    }
}
