use tracing::debug;

use super::{Store, appended, removed, replaced};
use crate::error::AppError;
use crate::models::customer::{Customer, NewCustomer};
use crate::models::delivery::{Delivery, NewDelivery};
use crate::models::driver::{Driver, NewDriver};
use crate::models::fueling::{Fueling, NewFueling};
use crate::models::maintenance::{Maintenance, NewMaintenance};
use crate::models::truck::{NewTruck, Truck};
use crate::storage::StorageKey;

// Update and delete return `Ok(false)` without touching storage when the id
// is unknown.

impl Store {
    pub fn add_delivery(&mut self, draft: NewDelivery) -> Result<Delivery, AppError> {
        let (next, delivery) = appended(&self.deliveries, self.fresh_id(), draft);
        self.persist(&next)?;
        self.deliveries = next;
        self.committed(StorageKey::Deliveries, "add", self.deliveries.len(), "Entrega registrada.");
        Ok(delivery)
    }

    pub fn update_delivery(&mut self, delivery: Delivery) -> Result<bool, AppError> {
        let Some(next) = replaced(&self.deliveries, &delivery) else {
            debug!(id = %delivery.id, "update_delivery: unknown id");
            return Ok(false);
        };
        self.persist(&next)?;
        self.deliveries = next;
        self.committed(StorageKey::Deliveries, "update", self.deliveries.len(), "Entrega atualizada.");
        Ok(true)
    }

    pub fn delete_delivery(&mut self, id: &str) -> Result<bool, AppError> {
        let Some(next) = removed(&self.deliveries, id) else {
            debug!(id, "delete_delivery: unknown id");
            return Ok(false);
        };
        self.persist(&next)?;
        self.deliveries = next;
        self.committed(StorageKey::Deliveries, "delete", self.deliveries.len(), "Entrega excluída.");
        Ok(true)
    }

    pub fn add_driver(&mut self, draft: NewDriver) -> Result<Driver, AppError> {
        let (next, driver) = appended(&self.drivers, self.fresh_id(), draft);
        self.persist(&next)?;
        self.drivers = next;
        self.committed(StorageKey::Drivers, "add", self.drivers.len(), "Motorista adicionado.");
        Ok(driver)
    }

    /// Historical deliveries, fuelings and maintenances keep the old name.
    pub fn update_driver(&mut self, driver: Driver) -> Result<bool, AppError> {
        let Some(next) = replaced(&self.drivers, &driver) else {
            debug!(id = %driver.id, "update_driver: unknown id");
            return Ok(false);
        };
        self.persist(&next)?;
        self.drivers = next;
        self.committed(StorageKey::Drivers, "update", self.drivers.len(), "Motorista atualizado.");
        Ok(true)
    }

    /// Also ends the driver session if it belongs to the deleted driver.
    pub fn delete_driver(&mut self, id: &str) -> Result<bool, AppError> {
        let Some(next) = removed(&self.drivers, id) else {
            debug!(id, "delete_driver: unknown id");
            return Ok(false);
        };
        self.persist(&next)?;
        self.drivers = next;

        if self.authenticated_driver().is_some_and(|driver| driver.id == id) {
            self.driver_logout()?;
        }

        self.committed(StorageKey::Drivers, "delete", self.drivers.len(), "Motorista excluído.");
        Ok(true)
    }

    pub fn add_truck(&mut self, draft: NewTruck) -> Result<Truck, AppError> {
        let (next, truck) = appended(&self.trucks, self.fresh_id(), draft);
        self.persist(&next)?;
        self.trucks = next;
        self.committed(StorageKey::Trucks, "add", self.trucks.len(), "Caminhão adicionado.");
        Ok(truck)
    }

    pub fn update_truck(&mut self, truck: Truck) -> Result<bool, AppError> {
        let Some(next) = replaced(&self.trucks, &truck) else {
            debug!(id = %truck.id, "update_truck: unknown id");
            return Ok(false);
        };
        self.persist(&next)?;
        self.trucks = next;
        self.committed(StorageKey::Trucks, "update", self.trucks.len(), "Caminhão atualizado.");
        Ok(true)
    }

    pub fn delete_truck(&mut self, id: &str) -> Result<bool, AppError> {
        let Some(next) = removed(&self.trucks, id) else {
            debug!(id, "delete_truck: unknown id");
            return Ok(false);
        };
        self.persist(&next)?;
        self.trucks = next;
        self.committed(StorageKey::Trucks, "delete", self.trucks.len(), "Caminhão excluído.");
        Ok(true)
    }

    pub fn add_customer(&mut self, draft: NewCustomer) -> Result<Customer, AppError> {
        let (next, customer) = appended(&self.customers, self.fresh_id(), draft);
        self.persist(&next)?;
        self.customers = next;
        self.committed(StorageKey::Customers, "add", self.customers.len(), "Cliente adicionado.");
        Ok(customer)
    }

    pub fn update_customer(&mut self, customer: Customer) -> Result<bool, AppError> {
        let Some(next) = replaced(&self.customers, &customer) else {
            debug!(id = %customer.id, "update_customer: unknown id");
            return Ok(false);
        };
        self.persist(&next)?;
        self.customers = next;
        self.committed(StorageKey::Customers, "update", self.customers.len(), "Cliente atualizado.");
        Ok(true)
    }

    pub fn delete_customer(&mut self, id: &str) -> Result<bool, AppError> {
        let Some(next) = removed(&self.customers, id) else {
            debug!(id, "delete_customer: unknown id");
            return Ok(false);
        };
        self.persist(&next)?;
        self.customers = next;
        self.committed(StorageKey::Customers, "delete", self.customers.len(), "Cliente excluído.");
        Ok(true)
    }

    pub fn add_fueling(&mut self, draft: NewFueling) -> Result<Fueling, AppError> {
        let (next, fueling) = appended(&self.fuelings, self.fresh_id(), draft);
        self.persist(&next)?;
        self.fuelings = next;
        self.committed(
            StorageKey::Fuelings,
            "add",
            self.fuelings.len(),
            "Registro de abastecimento adicionado.",
        );
        Ok(fueling)
    }

    pub fn add_maintenance(&mut self, draft: NewMaintenance) -> Result<Maintenance, AppError> {
        let (next, maintenance) = appended(&self.maintenances, self.fresh_id(), draft);
        self.persist(&next)?;
        self.maintenances = next;
        self.committed(
            StorageKey::Maintenances,
            "add",
            self.maintenances.len(),
            "Registro de manutenção adicionado.",
        );
        Ok(maintenance)
    }
}
