//! User roles.
//!
//! The platform has exactly three roles. Their string forms must match the
//! CHECK constraint on `users.role` in the initial migration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_SALES: &str = "sales";
pub const ROLE_PRODUCTION: &str = "production";

/// A user's role on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Sales,
    Production,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => ROLE_ADMIN,
            Role::Sales => ROLE_SALES,
            Role::Production => ROLE_PRODUCTION,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_ADMIN => Ok(Role::Admin),
            ROLE_SALES => Ok(Role::Sales),
            ROLE_PRODUCTION => Ok(Role::Production),
            other => Err(CoreError::Validation(format!("Unknown role: {other}"))),
        }
    }
}
