//! Durable key/value mirror of the store.
//!
//! Every collection and both session flags live under one fixed key. Values
//! are opaque text blobs (JSON for collections and the driver session, the
//! literal `true` for the admin flag).

mod file;
mod memory;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub use file::FileStorage;
pub use memory::MemoryStorage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StorageKey {
    Deliveries,
    Drivers,
    Trucks,
    Customers,
    Fuelings,
    Maintenances,
    IsAuthenticated,
    AuthenticatedDriver,
}

impl StorageKey {
    pub const ALL: [StorageKey; 8] = [
        StorageKey::Deliveries,
        StorageKey::Drivers,
        StorageKey::Trucks,
        StorageKey::Customers,
        StorageKey::Fuelings,
        StorageKey::Maintenances,
        StorageKey::IsAuthenticated,
        StorageKey::AuthenticatedDriver,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::Deliveries => "deliveries",
            StorageKey::Drivers => "drivers",
            StorageKey::Trucks => "trucks",
            StorageKey::Customers => "customers",
            StorageKey::Fuelings => "fuelings",
            StorageKey::Maintenances => "maintenances",
            StorageKey::IsAuthenticated => "isAuthenticated",
            StorageKey::AuthenticatedDriver => "authenticatedDriver",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub trait Storage: Send + Sync {
    /// Returns the stored value, or `None` if the key was never written or
    /// has been cleared.
    fn load(&self, key: StorageKey) -> Result<Option<String>, AppError>;

    /// Overwrites the value for `key`.
    fn save(&self, key: StorageKey, value: &str) -> Result<(), AppError>;

    fn clear(&self, key: StorageKey) -> Result<(), AppError>;
}
