use serde::Serialize;
use tracing::{debug, info};

use crate::errors::ServiceError;

/// A registered account. The password is kept in plaintext and never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub username: String,
    #[serde(skip_serializing)]
    password: String,
}

impl User {
    fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

/// Proof that a request's claimed username belongs to a registered user.
///
/// Only [`UserDirectory::resolve_identity`] hands these out, so any operation
/// taking `&Identity` can only run for a known user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    username: String,
}

impl Identity {
    pub fn username(&self) -> &str {
        &self.username
    }
}

#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: Vec<User>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, username: &str, password: &str) -> Result<(), ServiceError> {
        if self.find_by_username(username).is_ok() {
            debug!(%username, "user exists");
            return Err(ServiceError::AlreadyExists);
        }
        self.users.push(User { username: username.to_string(), password: password.to_string() });
        info!(%username, "user_registered");
        Ok(())
    }

    pub fn authenticate(&self, username: &str, password: &str) -> Result<&User, ServiceError> {
        self.users
            .iter()
            .find(|u| u.matches(username, password))
            .ok_or(ServiceError::InvalidCredentials)
    }

    pub fn find_by_username(&self, username: &str) -> Result<&User, ServiceError> {
        self.users.iter().find(|u| u.username == username).ok_or(ServiceError::UserNotFound)
    }

    /// Registration gate: map a claimed username to an [`Identity`].
    pub fn resolve_identity(&self, claimed: Option<&str>) -> Result<Identity, ServiceError> {
        let username = claimed.ok_or(ServiceError::Unauthorized)?;
        let user = self.find_by_username(username).map_err(|_| ServiceError::Unauthorized)?;
        Ok(Identity { username: user.username.clone() })
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

    #[test]
    fn duplicate_registration_keeps_original_password() {
        let mut dir = UserDirectory::new();
        dir.register("bob", "pw").unwrap();
        assert_eq!(dir.register("bob", "pw2"), Err(ServiceError::AlreadyExists));
        assert_eq!(dir.len(), 1);
        assert!(dir.authenticate("bob", "pw").is_ok());
        assert_eq!(dir.authenticate("bob", "pw2"), Err(ServiceError::InvalidCredentials));
    }

    #[test]
    fn authenticate_requires_exact_match() {
        let mut dir = UserDirectory::new();
        dir.register("bob", "pw").unwrap();
        assert_eq!(dir.authenticate("bob", "pw").unwrap().username, "bob");
        assert_eq!(dir.authenticate("bob", "wrong"), Err(ServiceError::InvalidCredentials));
        assert_eq!(dir.authenticate("Bob", "pw"), Err(ServiceError::InvalidCredentials));
        assert_eq!(dir.authenticate("alice", "pw"), Err(ServiceError::InvalidCredentials));
    }

    #[test]
    fn find_by_username() {
        let mut dir = UserDirectory::new();
        assert!(dir.is_empty());
        dir.register("alice", "secret").unwrap();
        assert_eq!(dir.find_by_username("alice").unwrap().username, "alice");
        assert_eq!(dir.find_by_username("bob"), Err(ServiceError::UserNotFound));
    }

    #[test]
    fn gate_resolves_only_known_users() {
        let mut dir = UserDirectory::new();
        dir.register("alice", "secret").unwrap();
        assert_eq!(dir.resolve_identity(Some("alice")).unwrap().username(), "alice");
        assert_eq!(dir.resolve_identity(Some("mallory")), Err(ServiceError::Unauthorized));
        assert_eq!(dir.resolve_identity(None), Err(ServiceError::Unauthorized));
    }

    #[test]
    fn password_is_not_serialized() {
        let mut dir = UserDirectory::new();
        dir.register("alice", "secret").unwrap();
        let v = serde_json::to_value(dir.find_by_username("alice").unwrap()).unwrap();
        assert_eq!(v, serde_json::json!({"username": "alice"}));
    }
}
