use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::error::DomainError;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: String, password_hash: String, is_admin: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            is_admin,
            created_at: Utc::now(),
        }
    }
}

/// Who the caller is, as stated by a verified token.
///
/// The admin flag is the one baked into the token at login, so a privilege
/// change only shows up after the user logs in again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
    pub admin: bool,
}

impl Identity {
    pub fn require_admin(&self) -> Result<AdminGrant, DomainError> {
        if self.admin {
            Ok(AdminGrant {
                user_id: self.user_id,
            })
        } else {
            Err(DomainError::Forbidden)
        }
    }
}

/// Capability handed out by [`Identity::require_admin`]. Place writes take one
/// of these; the stores themselves never look at roles.
#[derive(Debug, Clone, Copy)]
pub struct AdminGrant {
    user_id: Uuid,
}

impl AdminGrant {
    pub fn user_id(&self) -> Uuid {
        self.user_id
    }
}
