use argon2::{
    password_hash::{Error as PasswordHashError, PasswordHash, PasswordHasher, PasswordVerifier,
        SaltString},
    Argon2,
};
use log::debug;
use rand::rngs::OsRng;
use std::sync::Arc;
use uuid::Uuid;

use super::users_errors::UserError;
use super::users_model::{Identity, NewUser, User};
use super::users_traits::{UserRepositoryTrait, UserServiceTrait};
use crate::errors::{DatabaseError, Error, Result};

/// Identity gate: maps credential pairs to authenticated identities.
pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
    /// Hash verified on the unknown-username path so that lookup misses cost
    /// the same as a wrong password.
    fallback_hash: String,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepositoryTrait>) -> Self {
        let salt = SaltString::generate(&mut OsRng);
        let fallback_hash = Argon2::default()
            .hash_password(b"wagerbook-fallback", &salt)
            .map(|hash| hash.to_string())
            .unwrap_or_default();
        Self {
            repository,
            fallback_hash,
        }
    }

    fn hash_password(password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| UserError::Hashing(e.to_string()).into())
    }

    fn verify_password(stored_hash: &str, candidate: &str) -> Result<()> {
        let parsed =
            PasswordHash::new(stored_hash).map_err(|e| UserError::Hashing(e.to_string()))?;
        Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed)
            .map_err(|err| match err {
                PasswordHashError::Password => Error::from(UserError::InvalidCredentials),
                other => UserError::Hashing(other.to_string()).into(),
            })
    }
}

#[async_trait::async_trait]
impl UserServiceTrait for UserService {
    async fn register(&self, new_user: NewUser) -> Result<User> {
        new_user.validate()?;
        let username = new_user.normalized_username();
        debug!("Registering user '{}'", username);

        let user = User {
            id: Uuid::new_v4().to_string(),
            username: username.clone(),
            password_hash: Self::hash_password(&new_user.password)?,
            created_at: chrono::Utc::now().naive_utc(),
        };

        match self.repository.create_user(user).await {
            Err(Error::Database(DatabaseError::UniqueViolation(_))) => {
                Err(UserError::UsernameTaken(username).into())
            }
            other => other,
        }
    }

    fn authenticate(&self, username: &str, password: &str) -> Result<Identity> {
        match self.repository.find_by_username(username.trim())? {
            Some(user) => {
                Self::verify_password(&user.password_hash, password)?;
                Ok(Identity {
                    user_id: user.id,
                    username: user.username,
                })
            }
            None => {
                if let Ok(parsed) = PasswordHash::new(&self.fallback_hash) {
                    let _ = Argon2::default().verify_password(password.as_bytes(), &parsed);
                }
                Err(UserError::InvalidCredentials.into())
            }
        }
    }
}
