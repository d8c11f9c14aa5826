use std::error::Error;

use chrono::{TimeDelta, Utc};
use common::{sign_in, sign_up, test_context::TestContext};
use reqwest::StatusCode;
use todo_auth::{
    claims::IdentityClaims,
    jwt::TokenCodec,
    secret::SigningSecret,
    secret_hash::{HashFormat, StoredHash},
};
use todo_web::{
    account::{SignInRequest, SignUpRequest},
    store::CredentialStore,
};

mod common;

fn error_message(body: &serde_json::Value) -> &str {
    body["error"]["message"].as_str().unwrap_or_default()
}

#[tokio::test]
async fn test_sign_up_and_sign_in() -> Result<(), Box<dyn Error>> {
    let ctx = TestContext::start().await;

    let created = sign_up(&ctx.api, &ctx.client, "a@b.com", "secret1").await?;
    assert_eq!(created.user.email, "a@b.com");
    assert!(created.user.id > 0);

    let stored = ctx.store.find_by_email("a@b.com")?.expect("account persisted");
    assert_ne!(stored.password_hash, "secret1");
    assert_eq!(
        StoredHash::parse(&stored.password_hash).format(),
        HashFormat::Pbkdf2Sha512
    );

    let (status, body) = sign_in(
        &ctx.api,
        &ctx.client,
        SignInRequest::new("a@b.com", "secret1"),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().expect("token in response");
    assert_eq!(token.split('.').count(), 3);
    assert_eq!(body["user"]["id"], created.user.id);
    assert_eq!(body["token_type"], "Bearer");

    let (status, body) = ctx.api.get(&ctx.client, "session", Some(token)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["userId"], created.user.id);

    Ok(())
}

#[tokio::test]
async fn test_invalid_credentials_are_indistinguishable() -> Result<(), Box<dyn Error>> {
    let ctx = TestContext::start().await;
    sign_up(&ctx.api, &ctx.client, "a@b.com", "secret1").await?;

    let (wrong_status, wrong_body) = sign_in(
        &ctx.api,
        &ctx.client,
        SignInRequest::new("a@b.com", "wrong"),
    )
    .await?;
    let (unknown_status, unknown_body) = sign_in(
        &ctx.api,
        &ctx.client,
        SignInRequest::new("nobody@b.com", "secret1"),
    )
    .await?;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_message(&wrong_body), "Invalid credentials");
    assert_eq!(wrong_status, unknown_status);
    assert_eq!(wrong_body, unknown_body);

    Ok(())
}

#[tokio::test]
async fn test_legacy_account_signs_in() -> Result<(), Box<dyn Error>> {
    let ctx = TestContext::start().await;
    ctx.store.insert("test@example.com", "hashed_password123")?;

    let (status, body) = sign_in(
        &ctx.api,
        &ctx.client,
        SignInRequest::new("test@example.com", "password123"),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], "test@example.com");

    Ok(())
}

#[tokio::test]
async fn test_anonymous_request_to_protected_route() -> Result<(), Box<dyn Error>> {
    let ctx = TestContext::start().await;

    let (status, body) = ctx.api.get(&ctx.client, "session", None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_message(&body), "Authentication required");

    let (status, body) = ctx.api.get(&ctx.client, "healthcheck", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    Ok(())
}

#[tokio::test]
async fn test_rejected_tokens_are_anonymous() -> Result<(), Box<dyn Error>> {
    let ctx = TestContext::start().await;

    let expired = ctx.codec.encode(&IdentityClaims::new(
        1,
        "a@b.com",
        Utc::now() - TimeDelta::days(8),
    ))?;
    let forged = TokenCodec::new(&SigningSecret::new("not-the-server-secret"))
        .encode(&IdentityClaims::issue(1, "a@b.com"))?;

    for token in [expired.as_str(), forged.as_str(), "a.b.c", "not-a-token"] {
        let (status, body) = ctx.api.get(&ctx.client, "session", Some(token)).await?;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{token}");
        assert_eq!(error_message(&body), "Authentication required");
    }

    let valid = ctx.codec.encode(&IdentityClaims::issue(1, "a@b.com"))?;
    let (status, _) = ctx
        .api
        .get_with_header(&ctx.client, "session", &format!("Basic {valid}"))
        .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn test_sign_up_rejections() -> Result<(), Box<dyn Error>> {
    let ctx = TestContext::start().await;
    sign_up(&ctx.api, &ctx.client, "a@b.com", "secret1").await?;

    let duplicate = SignUpRequest {
        email: String::from("a@b.com"),
        password: String::from("secret2"),
    };
    let (status, _) = ctx.api.post(&ctx.client, "sign_up", &duplicate, None).await?;
    assert_eq!(status, StatusCode::CONFLICT);

    let short = SignUpRequest {
        email: String::from("c@d.com"),
        password: String::from("123"),
    };
    let (status, _) = ctx.api.post(&ctx.client, "sign_up", &short, None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn test_unreadable_bodies_get_the_error_envelope() -> Result<(), Box<dyn Error>> {
    let ctx = TestContext::start().await;

    for (endpoint, body) in [
        ("sign_up", "{not json"),
        ("sign_up", r#"{"email":"a@b.com"}"#),
        ("sign_in", r#"{"email":"a@b.com","password":7}"#),
    ] {
        let (status, body) = ctx.api.post_raw(&ctx.client, endpoint, body).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{endpoint}");
        assert_eq!(error_message(&body), "Invalid request body");
        assert_eq!(body["error"]["status"], 400);
    }

    Ok(())
}
