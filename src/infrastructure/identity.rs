//! Identity collaborator gating access to the registry.
//!
//! The provider is an external black box: it is configured with a
//! publishable key and hands out sessions. The application only cares
//! whether a session exists; no authorization rules beyond that.

use crate::domain::{RegistryError, RegistryResult};
use std::env;

pub const PUBLISHABLE_KEY_VAR: &str = "IDENTITY_PUBLISHABLE_KEY";
const USER_VAR: &str = "IDENTITY_USER";

pub struct IdentityProvider {
    publishable_key: String,
}

/// An authenticated session. Exists only while the user is signed in.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: String,
}

impl IdentityProvider {
    pub fn new(publishable_key: impl Into<String>) -> Self {
        Self {
            publishable_key: publishable_key.into(),
        }
    }

    /// Builds the provider from the environment.
    ///
    /// # Errors
    ///
    /// A missing or empty publishable key is fatal at startup.
    pub fn from_env() -> RegistryResult<Self> {
        let key = env::var(PUBLISHABLE_KEY_VAR)
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| RegistryError::MissingConfig(PUBLISHABLE_KEY_VAR.to_string()))?;
        Ok(Self::new(key))
    }

    pub fn publishable_key(&self) -> &str {
        &self.publishable_key
    }

    /// Signs the user in and returns their session.
    ///
    /// The identity widget itself is external; here the display name comes
    /// from `IDENTITY_USER` with a generic fallback.
    pub fn sign_in(&self) -> Session {
        let user = env::var(USER_VAR).unwrap_or_else(|_| "user".to_string());
        Session { user }
    }
}
