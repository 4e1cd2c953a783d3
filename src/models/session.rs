use serde::{Deserialize, Serialize};

use crate::models::driver::Driver;

/// Who is currently logged in. Admin and driver sessions never coexist.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub enum Session {
    #[default]
    Anonymous,
    Admin,
    Driver(Driver),
}

impl Session {
    pub fn is_admin(&self) -> bool {
        matches!(self, Session::Admin)
    }

    pub fn driver(&self) -> Option<&Driver> {
        match self {
            Session::Driver(driver) => Some(driver),
            _ => None,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Session::Anonymous)
    }
}
