#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;

use std::sync::RwLock;

use anyhow::bail;
use anyhow::Result;
use once_cell::sync::Lazy;

use crate::domain::models::UserIdentity;

static IDENTITY: Lazy<RwLock<Option<UserIdentity>>> = Lazy::new(|| return RwLock::new(None));

/// Process-wide signed-in identity. Set once on a successful login, cleared
/// on logout, and read everywhere the owner email scopes a request. Reachable
/// only through these accessors so tests can substitute a fake identity.
pub struct AuthState {}

impl AuthState {
    pub fn sign_in(identity: UserIdentity) {
        *IDENTITY.write().unwrap() = Some(identity);
    }

    pub fn sign_out() {
        *IDENTITY.write().unwrap() = None;
    }

    pub fn current() -> Option<UserIdentity> {
        return IDENTITY.read().unwrap().clone();
    }

    /// The identity every project list/delete call is scoped by.
    pub fn require() -> Result<UserIdentity> {
        match AuthState::current() {
            Some(identity) => return Ok(identity),
            None => bail!("You are not signed in."),
        }
    }
}
