use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::Entity;
use crate::storage::StorageKey;

/// Append-only, like fuelings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Maintenance {
    pub id: String,
    pub driver_id: String,
    pub driver_name: String,
    pub truck_plate: String,
    pub issue: String,
    pub mechanic: String,
    pub cost: f64,
    #[serde(default)]
    pub observation: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewMaintenance {
    pub driver_id: String,
    pub driver_name: String,
    pub truck_plate: String,
    pub issue: String,
    pub mechanic: String,
    pub cost: f64,
    pub observation: String,
    pub date: NaiveDate,
}

impl Entity for Maintenance {
    const KEY: StorageKey = StorageKey::Maintenances;
    type Draft = NewMaintenance;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, draft: NewMaintenance) -> Self {
        Self {
            id,
            driver_id: draft.driver_id,
            driver_name: draft.driver_name,
            truck_plate: draft.truck_plate,
            issue: draft.issue,
            mechanic: draft.mechanic,
            cost: draft.cost,
            observation: draft.observation,
            date: draft.date,
        }
    }
}
