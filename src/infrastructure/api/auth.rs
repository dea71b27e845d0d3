#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;

use anyhow::Result;
use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::error_detail;
use super::transport_error;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::AuthBackend;
use crate::domain::models::UserIdentity;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct SignupRequest {
    firstname: String,
    lastname: String,
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct SignupResponse {
    message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct LoginResponse {
    message: String,
    user: UserIdentity,
}

pub struct AuthApi {
    url: String,
}

impl Default for AuthApi {
    fn default() -> AuthApi {
        return AuthApi {
            url: Config::get(ConfigKey::ServerUrl),
        };
    }
}

#[async_trait]
impl AuthBackend for AuthApi {
    #[allow(clippy::implicit_return)]
    async fn signup(
        &self,
        firstname: &str,
        lastname: &str,
        email: &str,
        password: &str,
    ) -> Result<String> {
        let req = SignupRequest {
            firstname: firstname.to_string(),
            lastname: lastname.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };

        let res = reqwest::Client::new()
            .post(format!("{url}/auth/signup", url = self.url))
            .json(&req)
            .send()
            .await
            .map_err(|err| return transport_error(err, "Signup failed"))?;

        if !res.status().is_success() {
            return Err(error_detail(res, "Signup failed").await);
        }

        let body = res
            .json::<SignupResponse>()
            .await
            .map_err(|err| return transport_error(err, "Signup failed"))?;

        return Ok(body.message);
    }

    #[allow(clippy::implicit_return)]
    async fn login(&self, email: &str, password: &str) -> Result<UserIdentity> {
        let req = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let res = reqwest::Client::new()
            .post(format!("{url}/auth/login", url = self.url))
            .json(&req)
            .send()
            .await
            .map_err(|err| return transport_error(err, "Login failed"))?;

        if !res.status().is_success() {
            return Err(error_detail(res, "Login failed").await);
        }

        let body = res
            .json::<LoginResponse>()
            .await
            .map_err(|err| return transport_error(err, "Login failed"))?;
        tracing::debug!(email = body.user.email.as_str(), "logged in");

        return Ok(body.user);
    }
}
