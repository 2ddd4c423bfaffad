//! User repository
//!
//! In-memory list of users in creation order.

use crate::error::{SpendError, SpendResult};
use crate::models::{User, UserId};

#[derive(Debug, Default)]
pub struct UserRepository {
    users: Vec<User>,
}

impl UserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> &[User] {
        &self.users
    }

    pub fn get(&self, id: &UserId) -> Option<&User> {
        self.users.iter().find(|u| &u.id == id)
    }

    /// Find a user by username (case-insensitive)
    pub fn find_by_username(&self, username: &str) -> Option<&User> {
        let wanted = username.trim().to_lowercase();
        self.users
            .iter()
            .find(|u| u.username.to_lowercase() == wanted)
    }

    /// Append a user
    pub fn insert(&mut self, user: User) -> SpendResult<()> {
        if self.get(&user.id).is_some() {
            return Err(SpendError::Duplicate {
                entity_type: "User",
                identifier: user.id.to_string(),
            });
        }
        self.users.push(user);
        Ok(())
    }

    /// Remove a user, returning it if it was present
    pub fn remove(&mut self, id: &UserId) -> Option<User> {
        let index = self.users.iter().position(|u| &u.id == id)?;
        Some(self.users.remove(index))
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn user(id: &str, username: &str) -> User {
        User {
            id: id.into(),
            first_name: "Test".into(),
            last_name: "User".into(),
            username: username.into(),
            password_hash: String::new(),
            created_at: NaiveDate::from_ymd_opt(2024, 12, 1).unwrap(),
        }
    }

    #[test]
    fn test_insert_and_find() {
        let mut repo = UserRepository::new();
        repo.insert(user("usr-1", "alice")).unwrap();
        repo.insert(user("usr-2", "bob")).unwrap();

        assert_eq!(repo.len(), 2);
        assert_eq!(repo.find_by_username("ALICE").unwrap().id.as_str(), "usr-1");
        assert!(repo.find_by_username("carol").is_none());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut repo = UserRepository::new();
        repo.insert(user("usr-1", "alice")).unwrap();
        assert!(repo.insert(user("usr-1", "bob")).is_err());
    }

    #[test]
    fn test_remove() {
        let mut repo = UserRepository::new();
        repo.insert(user("usr-1", "alice")).unwrap();
        assert!(repo.remove(&"usr-1".into()).is_some());
        assert!(repo.remove(&"usr-1".into()).is_none());
        assert!(repo.is_empty());
    }
}
