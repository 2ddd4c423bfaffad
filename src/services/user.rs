//! User service
//!
//! Creates and removes the users who record expenses. Passwords are hashed
//! before a user is stored.

use chrono::Local;
use log::info;

use crate::audit::EntityType;
use crate::crypto::{hash_password, PasswordHashParams};
use crate::error::SpendResult;
use crate::models::{User, UserForm, UserId};
use crate::storage::Storage;

use super::expense::DeleteOutcome;

/// Service for user management
pub struct UserService<'a> {
    storage: &'a mut Storage,
    params: PasswordHashParams,
}

impl<'a> UserService<'a> {
    pub fn new(storage: &'a mut Storage) -> Self {
        Self {
            storage,
            params: PasswordHashParams::default(),
        }
    }

    /// Use custom password hashing costs
    pub fn with_params(mut self, params: PasswordHashParams) -> Self {
        self.params = params;
        self
    }

    pub fn list(&self) -> &[User] {
        self.storage.users.all()
    }

    /// Validate a form and add the user it describes
    pub fn create(&mut self, form: &UserForm) -> SpendResult<User> {
        let errors = form.validate(self.storage.users.all());
        if !errors.is_empty() {
            return Err(errors.into());
        }

        let mut id = UserId::generate();
        while self.storage.users.get(&id).is_some() {
            id = UserId::generate();
        }

        let user = User {
            id,
            first_name: form.first_name.trim().to_string(),
            last_name: form.last_name.trim().to_string(),
            username: form.username.trim().to_string(),
            password_hash: hash_password(&form.password, &self.params)?,
            created_at: Local::now().date_naive(),
        };

        self.storage.users.insert(user.clone())?;
        info!("Created user {}", user);

        self.storage.log_create(
            EntityType::User,
            user.id.as_str(),
            Some(user.username.clone()),
            &user,
        )?;

        Ok(user)
    }

    /// Delete a user after confirmation. `confirm` is only asked when the
    /// user exists.
    pub fn delete<F>(&mut self, id: &UserId, confirm: F) -> SpendResult<DeleteOutcome<User>>
    where
        F: FnOnce(&User) -> bool,
    {
        let Some(user) = self.storage.users.get(id) else {
            return Ok(DeleteOutcome::NotFound);
        };

        if !confirm(user) {
            return Ok(DeleteOutcome::Cancelled);
        }

        let Some(removed) = self.storage.users.remove(id) else {
            return Ok(DeleteOutcome::NotFound);
        };
        info!("Deleted user {}", removed);

        self.storage.log_delete(
            EntityType::User,
            removed.id.as_str(),
            Some(removed.username.clone()),
            &removed,
        )?;

        Ok(DeleteOutcome::Deleted(removed))
    }
}
