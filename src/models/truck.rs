use serde::{Deserialize, Serialize};

use crate::models::Entity;
use crate::storage::StorageKey;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Truck {
    pub id: String,
    pub plate: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewTruck {
    pub plate: String,
}

impl Entity for Truck {
    const KEY: StorageKey = StorageKey::Trucks;
    type Draft = NewTruck;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, draft: NewTruck) -> Self {
        Self {
            id,
            plate: draft.plate,
        }
    }
}
