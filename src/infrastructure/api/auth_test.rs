use anyhow::Result;

use super::AuthApi;
use super::LoginResponse;
use super::SignupResponse;
use crate::domain::models::AuthBackend;
use crate::domain::models::UserIdentity;

impl AuthApi {
    fn with_url(url: String) -> AuthApi {
        return AuthApi { url };
    }
}

#[tokio::test]
async fn it_signs_up_a_new_account() -> Result<()> {
    let body = serde_json::to_string(&SignupResponse {
        message: "Signup successful!".to_string(),
    })?;

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/auth/signup")
        .match_header("Content-Type", "application/json")
        .with_status(200)
        .with_body(body)
        .create();

    let auth = AuthApi::with_url(server.url());
    let message = auth
        .signup("Ada", "Lovelace", "ada@example.com", "hunter22")
        .await?;

    mock.assert();
    assert_eq!(message, "Signup successful!");

    return Ok(());
}

#[tokio::test]
async fn it_surfaces_the_duplicate_email_detail() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/auth/signup")
        .with_status(400)
        .with_body("{\"detail\": \"Email already registered\"}")
        .create();

    let auth = AuthApi::with_url(server.url());
    let res = auth
        .signup("Ada", "Lovelace", "ada@example.com", "hunter22")
        .await;

    mock.assert();
    assert_eq!(res.unwrap_err().to_string(), "Email already registered");
}

#[tokio::test]
async fn it_logs_in_and_returns_the_identity() -> Result<()> {
    let body = serde_json::to_string(&LoginResponse {
        message: "Login successful!".to_string(),
        user: UserIdentity {
            firstname: "Ada".to_string(),
            lastname: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
        },
    })?;

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/auth/login")
        .with_status(200)
        .with_body(body)
        .create();

    let auth = AuthApi::with_url(server.url());
    let identity = auth.login("ada@example.com", "hunter22").await?;

    mock.assert();
    assert_eq!(identity.email, "ada@example.com");
    assert_eq!(identity.display_name(), "Ada Lovelace");

    return Ok(());
}

#[tokio::test]
async fn it_falls_back_to_a_generic_login_error() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/auth/login")
        .with_status(500)
        .with_body("boom")
        .create();

    let auth = AuthApi::with_url(server.url());
    let res = auth.login("ada@example.com", "hunter22").await;

    mock.assert();
    assert_eq!(res.unwrap_err().to_string(), "Login failed");
}
