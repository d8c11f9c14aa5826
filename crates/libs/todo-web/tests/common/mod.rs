#![allow(dead_code)]

use std::error::Error;

use api_client::ApiClient;
use todo_web::account::{AuthResponse, SignInRequest, SignUpRequest};

pub mod api_client;
pub mod test_context;

pub const TEST_SECRET: &str = "integration-test-secret";

pub async fn sign_up(
    api: &ApiClient,
    client: &reqwest::Client,
    email: &str,
    password: &str,
) -> Result<AuthResponse, Box<dyn Error>> {
    let body = SignUpRequest {
        email: email.to_string(),
        password: password.to_string(),
    };
    let (status, response) = api.post(client, "sign_up", &body, None).await?;
    assert!(status.is_success(), "sign up failed with {status}: {response}");
    Ok(serde_json::from_value(response)?)
}

pub async fn sign_in(
    api: &ApiClient,
    client: &reqwest::Client,
    login_body: SignInRequest,
) -> Result<(reqwest::StatusCode, serde_json::Value), Box<dyn Error>> {
    api.post(client, "sign_in", &login_body, None).await
}
