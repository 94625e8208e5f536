mod common;

use anyhow::Result;
use chrono::{Duration, Utc};
use office_inventory_api::auth::{generate_jwt, Claims};
use reqwest::{Client, Method, StatusCode};
use uuid::Uuid;

use common::{desk, object_id, token_for, TestServer, SECRET};

fn office_requests(server: &TestServer) -> Vec<(Method, String)> {
    let id = Uuid::new_v4();
    vec![
        (Method::GET, server.url("/offices")),
        (Method::POST, server.url("/offices")),
        (Method::PUT, server.url(&format!("/offices/{}", id))),
        (Method::DELETE, server.url(&format!("/offices/{}", id))),
    ]
}

#[tokio::test]
async fn health_endpoint_is_public() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = Client::new().get(server.url("/health")).send().await?;

    assert_eq!(res.status(), StatusCode::OK, "unexpected status: {}", res.status());
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn every_office_endpoint_requires_a_token() -> Result<()> {
    let server = TestServer::spawn().await?;
    let client = Client::new();

    for (method, url) in office_requests(&server) {
        let res = client.request(method.clone(), url.as_str()).json(&desk()).send().await?;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "{} {}", method, url);

        let body = res.json::<serde_json::Value>().await?;
        assert_eq!(body["code"], "UNAUTHORIZED", "{}", body);
    }

    assert!(server.store.is_empty().await, "unauthenticated request mutated the store");
    Ok(())
}

#[tokio::test]
async fn malformed_authorization_headers_are_rejected() -> Result<()> {
    let server = TestServer::spawn().await?;
    let client = Client::new();
    let token = token_for(&object_id());

    for header in [
        token.clone(),
        format!("Basic {}", token),
        "Bearer ".to_string(),
        "Bearer not.a.jwt".to_string(),
    ] {
        let res = client
            .post(server.url("/offices"))
            .header("Authorization", &header)
            .json(&desk())
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "header: {:?}", header);
    }

    assert!(server.store.is_empty().await);
    Ok(())
}

#[tokio::test]
async fn expired_token_is_rejected() -> Result<()> {
    let server = TestServer::spawn().await?;
    let claims = Claims {
        sub: Some(object_id()),
        user_id: None,
        exp: (Utc::now() - Duration::hours(2)).timestamp(),
        iat: (Utc::now() - Duration::hours(3)).timestamp(),
    };
    let token = generate_jwt(&claims, SECRET)?;

    let res = Client::new()
        .post(server.url("/offices"))
        .bearer_auth(token)
        .json(&desk())
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(server.store.is_empty().await);
    Ok(())
}

#[tokio::test]
async fn token_signed_with_another_secret_is_rejected() -> Result<()> {
    let server = TestServer::spawn().await?;
    let token = generate_jwt(&Claims::new(object_id(), 1)?, "some-other-secret")?;

    let res = Client::new()
        .get(server.url("/offices"))
        .bearer_auth(token)
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn user_id_claim_from_external_issuer_is_accepted() -> Result<()> {
    let server = TestServer::spawn().await?;
    let client = Client::new();
    let exp = (Utc::now() + Duration::hours(1)).timestamp();
    let user = object_id();

    let user_id_only = Claims { sub: None, user_id: Some(user.clone()), exp, iat: 0 };
    let both = Claims { sub: Some(user.clone()), user_id: Some(user.clone()), exp, iat: 0 };
    let neither = Claims { sub: None, user_id: None, exp, iat: 0 };

    for claims in [user_id_only, both] {
        let res = client
            .get(server.url("/offices"))
            .bearer_auth(generate_jwt(&claims, SECRET)?)
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::OK, "{:?}", claims);
    }

    let res = client
        .post(server.url("/offices"))
        .bearer_auth(generate_jwt(&neither, SECRET)?)
        .json(&desk())
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(server.store.is_empty().await);
    Ok(())
}

#[tokio::test]
async fn valid_token_is_accepted() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = Client::new()
        .get(server.url("/offices"))
        .bearer_auth(token_for(&object_id()))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body, serde_json::json!([]));
    Ok(())
}
