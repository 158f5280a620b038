//! Customer types.

use serde::{Deserialize, Serialize};

use crate::UserId;

/// A customer. Users are provisioned outside this service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Primary key.
    pub user_id: UserId,
    /// Display name.
    pub full_name: String,
    /// Contact email.
    pub email: String,
}

/// User entry for the order form dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserOption {
    /// Primary key.
    pub user_id: UserId,
    /// Display name.
    pub full_name: String,
}

impl From<&User> for UserOption {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.user_id,
            full_name: user.full_name.clone(),
        }
    }
}
