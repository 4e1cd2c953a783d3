pub mod customer;
pub mod delivery;
pub mod driver;
pub mod fueling;
pub mod maintenance;
pub mod session;
pub mod truck;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::storage::StorageKey;

/// A record kept in one of the six persisted collections.
pub trait Entity: Clone + Serialize + DeserializeOwned {
    /// Storage key the whole collection is persisted under.
    const KEY: StorageKey;

    /// Creation payload, everything but the identifier.
    type Draft;

    fn id(&self) -> &str;

    fn from_draft(id: String, draft: Self::Draft) -> Self;
}

/// `HH:MM` wall-clock times as entered on the delivery form.
pub mod hour_minute {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%H:%M";

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&time.format(FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map_err(serde::de::Error::custom)
    }
}
