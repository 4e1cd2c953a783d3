//! The application's single source of truth.
//!
//! `Store` owns the six record collections and the current session. Every
//! mutation builds the next collection, hands it to the [`Storage`] backend
//! and only then swaps it into memory, so callers never observe a state that
//! was not persisted.

mod auth;
mod records;
pub mod seed;

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::Entity;
use crate::models::customer::Customer;
use crate::models::delivery::Delivery;
use crate::models::driver::Driver;
use crate::models::fueling::Fueling;
use crate::models::maintenance::Maintenance;
use crate::models::session::Session;
use crate::models::truck::Truck;
use crate::notify::{Notification, Notifier};
use crate::observability::metrics::Metrics;
use crate::storage::{Storage, StorageKey};

pub use auth::{ADMIN_PASSWORD, ADMIN_USERNAME};

pub struct Store {
    deliveries: Vec<Delivery>,
    drivers: Vec<Driver>,
    trucks: Vec<Truck>,
    customers: Vec<Customer>,
    fuelings: Vec<Fueling>,
    maintenances: Vec<Maintenance>,
    session: Session,
    storage: Arc<dyn Storage>,
    notifier: Arc<dyn Notifier>,
    metrics: Metrics,
}

impl Store {
    /// Loads every collection and the session from `storage`.
    ///
    /// Drivers, trucks and customers that were never persisted are seeded
    /// with the default fleet and written back immediately. A persisted
    /// session is restored as-is, without checking it against the drivers.
    pub fn open(
        storage: Arc<dyn Storage>,
        notifier: Arc<dyn Notifier>,
        metrics: Metrics,
    ) -> Result<Self, AppError> {
        let backend = storage.as_ref();
        let deliveries = load_collection::<Delivery>(backend)?.unwrap_or_default();
        let drivers = load_or_seed(backend, seed::default_drivers)?;
        let trucks = load_or_seed(backend, seed::default_trucks)?;
        let customers = load_or_seed(backend, seed::default_customers)?;
        let fuelings = load_collection::<Fueling>(backend)?.unwrap_or_default();
        let maintenances = load_collection::<Maintenance>(backend)?.unwrap_or_default();
        let session = restore_session(backend)?;

        let store = Self {
            deliveries,
            drivers,
            trucks,
            customers,
            fuelings,
            maintenances,
            session,
            storage,
            notifier,
            metrics,
        };

        store.refresh_gauges();
        info!(
            deliveries = store.deliveries.len(),
            drivers = store.drivers.len(),
            trucks = store.trucks.len(),
            customers = store.customers.len(),
            fuelings = store.fuelings.len(),
            maintenances = store.maintenances.len(),
            "store opened"
        );

        Ok(store)
    }

    pub fn deliveries(&self) -> &[Delivery] {
        &self.deliveries
    }

    pub fn drivers(&self) -> &[Driver] {
        &self.drivers
    }

    pub fn trucks(&self) -> &[Truck] {
        &self.trucks
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn fuelings(&self) -> &[Fueling] {
        &self.fuelings
    }

    pub fn maintenances(&self) -> &[Maintenance] {
        &self.maintenances
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Whether an admin session is active.
    pub fn is_authenticated(&self) -> bool {
        self.session.is_admin()
    }

    pub fn authenticated_driver(&self) -> Option<&Driver> {
        self.session.driver()
    }

    pub fn customer(&self, id: &str) -> Option<&Customer> {
        self.customers.iter().find(|customer| customer.id == id)
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    fn persist<T: Entity>(&self, items: &[T]) -> Result<(), AppError> {
        let blob = serde_json::to_string(items)?;
        self.storage.save(T::KEY, &blob)
    }

    /// A new identifier not used by any record in any collection.
    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if !self.contains_id(&id) {
                return id;
            }
        }
    }

    fn contains_id(&self, id: &str) -> bool {
        has_id(&self.deliveries, id)
            || has_id(&self.drivers, id)
            || has_id(&self.trucks, id)
            || has_id(&self.customers, id)
            || has_id(&self.fuelings, id)
            || has_id(&self.maintenances, id)
    }

    fn committed(&self, key: StorageKey, operation: &str, records: usize, message: &str) {
        self.metrics.record_mutation(key.as_str(), operation);
        self.metrics.set_records(key.as_str(), records);
        info!(collection = %key, operation, records, "collection updated");
        self.notifier.notify(Notification::success(message));
    }

    fn refresh_gauges(&self) {
        self.metrics
            .set_records(StorageKey::Deliveries.as_str(), self.deliveries.len());
        self.metrics
            .set_records(StorageKey::Drivers.as_str(), self.drivers.len());
        self.metrics
            .set_records(StorageKey::Trucks.as_str(), self.trucks.len());
        self.metrics
            .set_records(StorageKey::Customers.as_str(), self.customers.len());
        self.metrics
            .set_records(StorageKey::Fuelings.as_str(), self.fuelings.len());
        self.metrics
            .set_records(StorageKey::Maintenances.as_str(), self.maintenances.len());
    }
}

fn has_id<T: Entity>(items: &[T], id: &str) -> bool {
    items.iter().any(|item| item.id() == id)
}

fn appended<T: Entity>(items: &[T], id: String, draft: T::Draft) -> (Vec<T>, T) {
    let record = T::from_draft(id, draft);
    let mut next = Vec::with_capacity(items.len() + 1);
    next.extend_from_slice(items);
    next.push(record.clone());
    (next, record)
}

/// `None` when no member carries `record`'s id.
fn replaced<T: Entity>(items: &[T], record: &T) -> Option<Vec<T>> {
    if !has_id(items, record.id()) {
        return None;
    }

    Some(
        items
            .iter()
            .map(|item| {
                if item.id() == record.id() {
                    record.clone()
                } else {
                    item.clone()
                }
            })
            .collect(),
    )
}

/// `None` when nothing matches `id`.
fn removed<T: Entity>(items: &[T], id: &str) -> Option<Vec<T>> {
    if !has_id(items, id) {
        return None;
    }

    Some(items.iter().filter(|item| item.id() != id).cloned().collect())
}

fn load_collection<T: Entity>(storage: &dyn Storage) -> Result<Option<Vec<T>>, AppError> {
    storage
        .load(T::KEY)?
        .map(|raw| {
            serde_json::from_str(&raw).map_err(|err| {
                AppError::Serialization(format!("invalid {} blob: {err}", T::KEY))
            })
        })
        .transpose()
}

fn load_or_seed<T: Entity>(
    storage: &dyn Storage,
    defaults: fn() -> Vec<T>,
) -> Result<Vec<T>, AppError> {
    if let Some(items) = load_collection(storage)? {
        return Ok(items);
    }

    let items = defaults();
    let key = T::KEY;
    storage.save(key, &serde_json::to_string(&items)?)?;
    info!(collection = %key, records = items.len(), "seeded default records");
    Ok(items)
}

fn restore_session(storage: &dyn Storage) -> Result<Session, AppError> {
    let admin = storage
        .load(StorageKey::IsAuthenticated)?
        .is_some_and(|flag| flag == "true");

    let driver: Option<Driver> = storage
        .load(StorageKey::AuthenticatedDriver)?
        .map(|raw| {
            serde_json::from_str(&raw).map_err(|err| {
                AppError::Serialization(format!(
                    "invalid {} blob: {err}",
                    StorageKey::AuthenticatedDriver
                ))
            })
        })
        .transpose()?;

    let session = match (admin, driver) {
        (true, Some(driver)) => {
            warn!(driver_id = %driver.id, "admin and driver sessions both persisted; restoring admin");
            Session::Admin
        }
        (true, None) => Session::Admin,
        (false, Some(driver)) => Session::Driver(driver),
        (false, None) => Session::Anonymous,
    };

    Ok(session)
}
