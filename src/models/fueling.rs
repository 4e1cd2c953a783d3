use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::Entity;
use crate::storage::StorageKey;

/// Append-only: fuelings are never edited or removed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Fueling {
    pub id: String,
    pub driver_id: String,
    pub driver_name: String,
    pub truck_plate: String,
    pub station_name: String,
    pub liters: f64,
    pub total_value: f64,
    #[serde(default)]
    pub observation: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewFueling {
    pub driver_id: String,
    pub driver_name: String,
    pub truck_plate: String,
    pub station_name: String,
    pub liters: f64,
    pub total_value: f64,
    pub observation: String,
    pub date: NaiveDate,
}

impl Entity for Fueling {
    const KEY: StorageKey = StorageKey::Fuelings;
    type Draft = NewFueling;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, draft: NewFueling) -> Self {
        Self {
            id,
            driver_id: draft.driver_id,
            driver_name: draft.driver_name,
            truck_plate: draft.truck_plate,
            station_name: draft.station_name,
            liters: draft.liters,
            total_value: draft.total_value,
            observation: draft.observation,
            date: draft.date,
        }
    }
}
