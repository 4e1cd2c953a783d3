use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::models::{Entity, hour_minute};
use crate::storage::StorageKey;

/// A water delivery as logged by a driver.
///
/// `customer_name`, `driver_name` and `truck_plate` are copied at creation
/// time and are not kept in sync with later edits to the source records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    pub id: String,
    pub customer_name: String,
    pub address: String,
    pub delivery_date: NaiveDate,
    #[serde(with = "hour_minute")]
    pub start_time: NaiveTime,
    #[serde(with = "hour_minute")]
    pub end_time: NaiveTime,
    /// Liters delivered.
    pub water_quantity: f64,
    pub driver_name: String,
    pub driver_id: String,
    pub truck_plate: String,
    pub receiver_signature: String,
    pub receiver_rg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_customer_id: Option<String>,
}

impl Delivery {
    pub fn starts_at(&self) -> NaiveDateTime {
        self.delivery_date.and_time(self.start_time)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewDelivery {
    pub customer_name: String,
    pub address: String,
    pub delivery_date: NaiveDate,
    #[serde(with = "hour_minute")]
    pub start_time: NaiveTime,
    #[serde(with = "hour_minute")]
    pub end_time: NaiveTime,
    pub water_quantity: f64,
    pub driver_name: String,
    pub driver_id: String,
    pub truck_plate: String,
    pub receiver_signature: String,
    pub receiver_rg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_customer_id: Option<String>,
}

impl Entity for Delivery {
    const KEY: StorageKey = StorageKey::Deliveries;
    type Draft = NewDelivery;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, draft: NewDelivery) -> Self {
        Self {
            id,
            customer_name: draft.customer_name,
            address: draft.address,
            delivery_date: draft.delivery_date,
            start_time: draft.start_time,
            end_time: draft.end_time,
            water_quantity: draft.water_quantity,
            driver_name: draft.driver_name,
            driver_id: draft.driver_id,
            truck_plate: draft.truck_plate,
            receiver_signature: draft.receiver_signature,
            receiver_rg: draft.receiver_rg,
            selected_customer_id: draft.selected_customer_id,
        }
    }
}
