//! Integration tests for the OAuth installation flow.
//!
//! The token endpoint is served by a wiremock `MockServer`; `api_host`
//! points the confirmer at it. Call counts are verified when each server is
//! dropped.

use std::collections::HashMap;
use std::time::Duration;

use serde_json::json;
use shopify_admin::auth::oauth::{
    AccessMode, AuthorizationUriBuilder, ConfirmationRedirect, InstallationConfirmer, Nonce,
    OAuthError, SecurityCheckFailure, SecurityChecks,
};
use shopify_admin::{ApiKey, ApiSecretKey, HostUrl, Session, ShopDomain, ShopifyConfig};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{header, method, path};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

const SHOP: &str = "some-shop.myshopify.com";
const CODE: &str = "0907a61c0c8d55e99db179b68161bc00";

fn config(server: &MockServer) -> ShopifyConfig {
    ShopifyConfig::builder()
        .api_key(ApiKey::new("test-api-key").unwrap())
        .api_secret_key(ApiSecretKey::new("hush").unwrap())
        .scopes("read_products,write_orders".parse().unwrap())
        .api_host(HostUrl::new(server.uri()).unwrap())
        .build()
        .unwrap()
}

/// Builds a redirect signed with the config's secret.
fn signed_redirect(config: &ShopifyConfig, shop: &str, state: Option<&str>) -> ConfirmationRedirect {
    let unsigned = ConfirmationRedirect::new(CODE, shop, state.map(String::from), "1337178173", "");
    let hmac = SecurityChecks::generate_hmac(&unsigned, config.credentials());
    ConfirmationRedirect { hmac, ..unsigned }
}

fn offline_body() -> serde_json::Value {
    json!({
        "access_token": "shpat_offline",
        "scope": "write_orders,read_customers"
    })
}

fn online_body() -> serde_json::Value {
    json!({
        "access_token": "shpua_online",
        "scope": "write_orders",
        "expires_in": 86399,
        "associated_user_scope": "write_orders",
        "associated_user": {
            "id": 902_541_635,
            "first_name": "John",
            "last_name": "Smith",
            "email": "john@example.com",
            "email_verified": true,
            "account_owner": true,
            "locale": "en",
            "collaborator": false
        }
    })
}

/// Matches a multipart body holding exactly the given text fields.
struct FormFields(Vec<(&'static str, &'static str)>);

impl FormFields {
    fn names(body: &str) -> Vec<String> {
        body.split("form-data; name=\"")
            .skip(1)
            .filter_map(|rest| rest.split('"').next())
            .map(String::from)
            .collect()
    }
}

impl Match for FormFields {
    fn matches(&self, request: &Request) -> bool {
        let body = String::from_utf8_lossy(&request.body);
        let mut names = Self::names(&body);
        names.sort();
        let mut expected: Vec<String> = self.0.iter().map(|(name, _)| (*name).to_string()).collect();
        expected.sort();

        names == expected
            && self
                .0
                .iter()
                .all(|(name, value)| body.contains(&format!("name=\"{name}\"\r\n\r\n{value}\r\n")))
    }
}

fn token_request_fields() -> FormFields {
    FormFields(vec![
        ("client_id", "test-api-key"),
        ("client_secret", "hush"),
        ("code", CODE),
    ])
}

async fn mount_token_endpoint(server: &MockServer, body: serde_json::Value, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/admin/oauth/access_token"))
        .and(header("Accept", "application/json"))
        .and(token_request_fields())
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_offline_token_exchange() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, offline_body(), 1).await;
    let config = config(&server);

    let redirect = signed_redirect(&config, SHOP, Some("nonce-1"));
    let token = InstallationConfirmer::new(&config)
        .request_access_token(&redirect, config.credentials(), Some("nonce-1"))
        .await
        .unwrap();

    assert_eq!(token.access_token(), "shpat_offline");
    assert_eq!(
        token.scopes().requested(),
        vec!["write_orders", "read_customers"]
    );
    assert!(!token.is_online());
    assert!(token.expires_in().is_none());
    assert!(token.associated_user().is_none());
    assert!(token.associated_user_scopes().is_none());
}

#[tokio::test]
async fn test_online_token_exchange_populates_user_fields() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, online_body(), 1).await;
    let config = config(&server);

    let redirect = signed_redirect(&config, SHOP, Some("nonce-2"));
    let token = InstallationConfirmer::new(&config)
        .request_access_token(&redirect, config.credentials(), Some("nonce-2"))
        .await
        .unwrap();

    assert!(token.is_online());
    assert_eq!(token.expires_in(), Some(86399));
    let user = token.associated_user().unwrap();
    assert_eq!(user.id, 902_541_635);
    assert_eq!(user.email, "john@example.com");
    assert!(user.account_owner);
    assert_eq!(
        token.associated_user_scopes().unwrap().requested(),
        vec!["write_orders"]
    );

    let session = Session::from_access_token(ShopDomain::new("some-shop").unwrap(), &token);
    assert!(session.is_online);
    assert_eq!(session.id, "some-shop.myshopify.com_902541635");
    assert!(session.expires.is_some());
}

#[tokio::test]
async fn test_bad_nonce_never_reaches_token_endpoint() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, offline_body(), 0).await;
    let config = config(&server);

    let redirect = signed_redirect(&config, SHOP, Some("forged"));
    let result = InstallationConfirmer::new(&config)
        .request_access_token(&redirect, config.credentials(), Some("expected"))
        .await;

    assert!(matches!(
        result,
        Err(OAuthError::SecurityCheckFailed(SecurityCheckFailure::NonceMismatch { .. }))
    ));
}

#[tokio::test]
async fn test_invalid_hostname_never_reaches_token_endpoint() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, offline_body(), 0).await;
    let config = config(&server);

    let redirect = signed_redirect(&config, "evil.example.com", None);
    let result = InstallationConfirmer::new(&config)
        .request_access_token(&redirect, config.credentials(), None)
        .await;

    assert!(matches!(
        result,
        Err(OAuthError::SecurityCheckFailed(SecurityCheckFailure::InvalidHostname { ref hostname }))
            if hostname == "evil.example.com"
    ));
}

#[tokio::test]
async fn test_tampered_hmac_never_reaches_token_endpoint() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, offline_body(), 0).await;
    let config = config(&server);

    let mut redirect = signed_redirect(&config, SHOP, None);
    redirect.code = "a-different-code".to_string();

    let result = InstallationConfirmer::new(&config)
        .request_access_token(&redirect, config.credentials(), None)
        .await;

    assert!(matches!(
        result,
        Err(OAuthError::SecurityCheckFailed(SecurityCheckFailure::InvalidHmac { .. }))
    ));
}

#[tokio::test]
async fn test_strict_nonce_matching_rejects_missing_nonce() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, offline_body(), 0).await;
    let config = config(&server);

    let redirect = signed_redirect(&config, SHOP, None);
    let result = InstallationConfirmer::new(&config)
        .with_security_checks(SecurityChecks::strict())
        .request_access_token(&redirect, config.credentials(), None)
        .await;

    assert!(matches!(
        result,
        Err(OAuthError::SecurityCheckFailed(SecurityCheckFailure::NonceMismatch {
            expected: None,
            received: None
        }))
    ));
}

#[tokio::test]
async fn test_non_success_status_is_passed_through() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/oauth/access_token"))
        .respond_with(ResponseTemplate::new(400).set_body_string(
            r#"{"error":"invalid_request","error_description":"The authorization code was not found or was already used"}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;
    let config = config(&server);

    let redirect = signed_redirect(&config, SHOP, None);
    let result = InstallationConfirmer::new(&config)
        .request_access_token(&redirect, config.credentials(), None)
        .await;

    match result {
        Err(OAuthError::TokenExchangeFailed { status, message }) => {
            assert_eq!(status, 400);
            assert!(message.contains("already used"));
        }
        other => panic!("expected TokenExchangeFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_response_without_scope_is_rejected() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, json!({"access_token": "shpat_x"}), 1).await;
    let config = config(&server);

    let redirect = signed_redirect(&config, SHOP, None);
    let result = InstallationConfirmer::new(&config)
        .request_access_token(&redirect, config.credentials(), None)
        .await;

    assert!(matches!(
        result,
        Err(OAuthError::MissingExpectedAttribute { ref attribute }) if attribute == "scope"
    ));
}

#[tokio::test]
async fn test_cancellation_aborts_slow_exchange() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/oauth/access_token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(offline_body())
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;
    let config = config(&server);

    let redirect = signed_redirect(&config, SHOP, None);
    let confirmer = InstallationConfirmer::new(&config);
    let cancel = CancellationToken::new();

    let canceller = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            cancel.cancel();
        })
    };

    let result = confirmer
        .request_access_token_with_cancellation(&redirect, config.credentials(), None, &cancel)
        .await;
    canceller.await.unwrap();

    assert!(matches!(result, Err(OAuthError::Cancelled)));
}

#[tokio::test]
async fn test_full_flow_from_authorization_url_to_callback() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, online_body(), 1).await;
    let config = config(&server);

    let nonce = Nonce::generate();
    let url = AuthorizationUriBuilder::from_config(&config)
        .with_shop(ShopDomain::new("some-shop").unwrap())
        .with_redirect_uri(HostUrl::new("https://app.example.com/auth/callback").unwrap())
        .with_nonce(nonce.as_ref())
        .with_access_mode(AccessMode::Online)
        .build()
        .unwrap();
    assert!(url.starts_with("https://some-shop.myshopify.com/admin/oauth/authorize?client_id=test-api-key"));
    assert!(url.contains(&format!("state={nonce}")));

    // Shopify echoes the nonce back in the callback query.
    let unsigned = signed_redirect(&config, SHOP, Some(nonce.as_ref()));
    let mut query = HashMap::new();
    query.insert("code".to_string(), unsigned.code.clone());
    query.insert("shop".to_string(), unsigned.shop.clone());
    query.insert("state".to_string(), nonce.to_string());
    query.insert("timestamp".to_string(), unsigned.timestamp.clone());
    query.insert("hmac".to_string(), unsigned.hmac.clone());

    let redirect = ConfirmationRedirect::from_query(&query).unwrap();
    let token = InstallationConfirmer::new(&config)
        .request_access_token(&redirect, config.credentials(), Some(nonce.as_ref()))
        .await
        .unwrap();

    assert_eq!(token.access_token(), "shpua_online");
}
