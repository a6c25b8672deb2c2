use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, FieldError};
use crate::ports::STAFF_ROLE;

pub const USERNAME_MAX_LEN: usize = 150;

/// User entity - an account that can author posts and comments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Staff users may sign in to the admin console.
    pub is_staff: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with generated ID and timestamps.
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            password_hash,
            is_staff: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn staff(mut self) -> Self {
        self.is_staff = true;
        self
    }

    /// Roles encoded into access tokens.
    pub fn roles(&self) -> Vec<String> {
        let mut roles = vec!["user".to_string()];
        if self.is_staff {
            roles.push(STAFF_ROLE.to_string());
        }
        roles
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        let mut errors = Vec::new();
        let len = self.username.chars().count();
        if len == 0 {
            errors.push(FieldError::new("username", "This field is required."));
        } else if len > USERNAME_MAX_LEN {
            errors.push(FieldError::new(
                "username",
                format!("Ensure this value has at most {USERNAME_MAX_LEN} characters (it has {len})."),
            ));
        }
        if !self
            .username
            .chars()
            .all(|c| c.is_alphanumeric() || "@.+-_".contains(c))
        {
            errors.push(FieldError::new(
                "username",
                "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.",
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(DomainError::InvalidFields(errors))
        }
    }
}

impl std::fmt::Display for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.username)
    }
}
