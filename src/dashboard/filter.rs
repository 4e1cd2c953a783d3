use chrono::NaiveDate;

use crate::models::delivery::Delivery;
use crate::models::fueling::Fueling;
use crate::models::maintenance::Maintenance;

/// Inclusive calendar-day range; a missing bound is open.
///
/// A range whose start lies after its end matches nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
    }
}

/// Case-insensitive substring match; a blank needle matches anything.
fn matches(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[derive(Debug, Clone, Default)]
pub struct DeliveryFilter {
    /// Matched against customer name or address.
    pub search: String,
    pub range: DateRange,
    pub driver: String,
    pub truck: String,
}

impl DeliveryFilter {
    /// Matching deliveries, most recent start first.
    pub fn apply(&self, deliveries: &[Delivery]) -> Vec<Delivery> {
        let mut selected: Vec<Delivery> = deliveries
            .iter()
            .filter(|delivery| self.range.contains(delivery.delivery_date))
            .filter(|delivery| {
                matches(&delivery.customer_name, &self.search) || matches(&delivery.address, &self.search)
            })
            .filter(|delivery| matches(&delivery.driver_name, &self.driver))
            .filter(|delivery| matches(&delivery.truck_plate, &self.truck))
            .cloned()
            .collect();

        selected.sort_by(|a, b| b.starts_at().cmp(&a.starts_at()));
        selected
    }
}

#[derive(Debug, Clone, Default)]
pub struct FuelingFilter {
    /// Matched against station name or driver name.
    pub search: String,
    pub range: DateRange,
    pub truck: String,
}

impl FuelingFilter {
    pub fn apply(&self, fuelings: &[Fueling]) -> Vec<Fueling> {
        let mut selected: Vec<Fueling> = fuelings
            .iter()
            .filter(|fueling| self.range.contains(fueling.date))
            .filter(|fueling| {
                matches(&fueling.station_name, &self.search) || matches(&fueling.driver_name, &self.search)
            })
            .filter(|fueling| matches(&fueling.truck_plate, &self.truck))
            .cloned()
            .collect();

        selected.sort_by(|a, b| b.date.cmp(&a.date));
        selected
    }
}

#[derive(Debug, Clone, Default)]
pub struct MaintenanceFilter {
    /// Matched against issue, mechanic or driver name.
    pub search: String,
    pub range: DateRange,
    pub truck: String,
}

impl MaintenanceFilter {
    pub fn apply(&self, maintenances: &[Maintenance]) -> Vec<Maintenance> {
        let mut selected: Vec<Maintenance> = maintenances
            .iter()
            .filter(|maintenance| self.range.contains(maintenance.date))
            .filter(|maintenance| {
                matches(&maintenance.issue, &self.search)
                    || matches(&maintenance.mechanic, &self.search)
                    || matches(&maintenance.driver_name, &self.search)
            })
            .filter(|maintenance| matches(&maintenance.truck_plate, &self.truck))
            .cloned()
            .collect();

        selected.sort_by(|a, b| b.date.cmp(&a.date));
        selected
    }
}
