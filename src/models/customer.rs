use serde::{Deserialize, Serialize};

use crate::models::Entity;
use crate::storage::StorageKey;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCustomer {
    pub name: String,
    pub address: String,
}

impl Entity for Customer {
    const KEY: StorageKey = StorageKey::Customers;
    type Draft = NewCustomer;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, draft: NewCustomer) -> Self {
        Self {
            id,
            name: draft.name,
            address: draft.address,
        }
    }
}
