use serde::{Deserialize, Serialize};

use crate::models::Entity;
use crate::storage::StorageKey;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Driver {
    pub id: String,
    pub name: String,
    pub username: String,
    /// Compared verbatim on login.
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewDriver {
    pub name: String,
    pub username: String,
    pub password: String,
}

impl Entity for Driver {
    const KEY: StorageKey = StorageKey::Drivers;
    type Draft = NewDriver;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, draft: NewDriver) -> Self {
        Self {
            id,
            name: draft.name,
            username: draft.username,
            password: draft.password,
        }
    }
}
