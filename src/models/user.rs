//! User model
//!
//! Users are the people who record expenses. Only a password hash is kept,
//! and it is never serialized.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::UserId;
use crate::crypto;

/// A registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub username: String,

    /// Argon2id PHC string
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// Day the user was created
    pub created_at: NaiveDate,
}

impl User {
    /// Full display name
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Check a candidate password against the stored hash
    pub fn verify_password(&self, candidate: &str) -> bool {
        crypto::verify_password(candidate, &self.password_hash)
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (@{})", self.full_name(), self.username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: UserId::new("usr-00000001"),
            first_name: "Jane".into(),
            last_name: "Smith".into(),
            username: "jsmith".into(),
            password_hash: "$argon2id$v=19$m=1024,t=1,p=1$c2FsdHNhbHQ$aGFzaGhhc2g".into(),
            created_at: NaiveDate::from_ymd_opt(2024, 12, 1).unwrap(),
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(sample_user().to_string(), "Jane Smith (@jsmith)");
    }

    #[test]
    fn test_hash_not_serialized() {
        let json = serde_json::to_string(&sample_user()).unwrap();
        assert!(!json.contains("argon2"));
        assert!(json.contains("\"firstName\":\"Jane\""));
    }

    #[test]
    fn test_wrong_password_rejected() {
        assert!(!sample_user().verify_password("anything"));
    }
}
