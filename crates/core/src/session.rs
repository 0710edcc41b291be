use eyre::{eyre, Result, WrapErr};
use std::env;

use crate::errors::{BookingError, BookingResult};
use crate::models::user::Role;

/// The signed-in user, passed explicitly into every screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: i64,
    pub role: Role,
    /// Bearer token attached to backend requests, when present
    pub token: Option<String>,
}

impl Session {
    pub fn new(user_id: i64, role: Role) -> Self {
        Self {
            user_id,
            role,
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Load the session from `SPORTZONE_USER_ID`, `SPORTZONE_ROLE` and the
    /// optional `SPORTZONE_TOKEN`.
    pub fn from_env() -> Result<Self> {
        let user_id = env::var("SPORTZONE_USER_ID")
            .map_err(|_| eyre!("SPORTZONE_USER_ID environment variable not set"))?
            .parse::<i64>()
            .wrap_err("SPORTZONE_USER_ID must be a valid integer")?;

        let role = env::var("SPORTZONE_ROLE")
            .map_err(|_| eyre!("SPORTZONE_ROLE environment variable not set"))?
            .parse::<Role>()
            .map_err(|e| eyre!("Invalid SPORTZONE_ROLE: {}", e))?;

        let token = env::var("SPORTZONE_TOKEN").ok().filter(|t| !t.is_empty());

        Ok(Self {
            user_id,
            role,
            token,
        })
    }

    pub fn require_role(&self, role: Role) -> BookingResult<()> {
        if self.role != role {
            return Err(BookingError::Authorization(format!(
                "{} access required, signed in as {}",
                role, self.role
            )));
        }
        Ok(())
    }
}
