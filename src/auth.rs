//! Short-lived platform authorizations scoped to a single command invocation.
//!
//! Every command mints a fresh read+identity authorization, uses it for
//! exactly one privileged call, and revokes it during cleanup. Nothing is
//! cached or reused, so no long-lived token is ever held.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::Context;
use crate::errors::CliError;

const AUTH_DESCRIPTION: &str = "Borealis PG CLI plugin temporary auth token";
const AUTH_EXPIRES_IN_SECS: u32 = 180;
const AUTH_SCOPE: [&str; 2] = ["read", "identity"];

/// A minted authorization: the service-assigned id (used to revoke it) and
/// the bearer token for the privileged call.
#[derive(Debug, Clone)]
pub struct Authorization {
    pub id: String,
    pub token: String,
}

#[derive(Serialize)]
struct CreateAuthorizationBody {
    description: &'static str,
    expires_in: u32,
    scope: [&'static str; 2],
}

#[derive(Deserialize)]
struct AuthorizationResponse {
    id: String,
    access_token: AccessToken,
}

#[derive(Deserialize)]
struct AccessToken {
    token: String,
}

/// Mint an authorization that expires after 180 seconds. Not retried: a
/// failure here aborts the command before any privileged work begins.
pub async fn create_authorization(ctx: &Context) -> Result<Authorization, CliError> {
    let body = CreateAuthorizationBody {
        description: AUTH_DESCRIPTION,
        expires_in: AUTH_EXPIRES_IN_SECS,
        scope: AUTH_SCOPE,
    };

    let response = ctx
        .platform_request(Method::POST, "/oauth/authorizations")
        .json(&body)
        .send()
        .await
        .map_err(|err| CliError::Identity(err.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(CliError::Identity(format!(
            "platform API responded with status {}",
            status.as_u16()
        )));
    }

    let parsed: AuthorizationResponse = response
        .json()
        .await
        .map_err(|err| CliError::Identity(err.to_string()))?;

    Ok(Authorization {
        id: parsed.id,
        token: parsed.access_token.token,
    })
}

/// Revoke a minted authorization by id. Revocation is best-effort cleanup;
/// the caller logs a failure rather than letting it mask the command's own
/// outcome.
pub async fn revoke_authorization(ctx: &Context, auth: &Authorization) -> Result<(), CliError> {
    let response = ctx
        .platform_request(
            Method::DELETE,
            &format!("/oauth/authorizations/{}", auth.id),
        )
        .send()
        .await
        .map_err(|err| CliError::Identity(err.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(CliError::Identity(format!(
            "authorization {} could not be revoked (status {})",
            auth.id,
            status.as_u16()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_context(server: &MockServer) -> Context {
        Context::new(Config {
            api_key: "platform-key".into(),
            platform_api_url: server.uri(),
            data_api_url: server.uri(),
        })
    }

    #[tokio::test]
    async fn test_create_sends_scoped_short_lived_request() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/oauth/authorizations"))
            .and(header("authorization", "Bearer platform-key"))
            .and(body_json(serde_json::json!({
                "description": "Borealis PG CLI plugin temporary auth token",
                "expires_in": 180,
                "scope": ["read", "identity"],
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "id": "auth-1",
                "access_token": {"token": "secret-token"},
            })))
            .expect(1)
            .mount(&server)
            .await;

        let ctx = test_context(&server);
        let auth = create_authorization(&ctx).await.unwrap();

        assert_eq!(auth.id, "auth-1");
        assert_eq!(auth.token, "secret-token");
    }

    #[tokio::test]
    async fn test_create_fails_on_non_2xx() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/oauth/authorizations"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let ctx = test_context(&server);
        let err = create_authorization(&ctx).await.unwrap_err();

        assert!(matches!(err, CliError::Identity(_)));
        assert!(err.to_string().contains("401"));
    }

    #[tokio::test]
    async fn test_revoke_targets_the_minted_id() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/oauth/authorizations/auth-1"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let ctx = test_context(&server);
        let auth = Authorization {
            id: "auth-1".into(),
            token: "secret-token".into(),
        };

        revoke_authorization(&ctx, &auth).await.unwrap();
    }

    #[tokio::test]
    async fn test_revoke_surfaces_failure_to_caller() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/oauth/authorizations/auth-1"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let ctx = test_context(&server);
        let auth = Authorization {
            id: "auth-1".into(),
            token: "secret-token".into(),
        };

        let err = revoke_authorization(&ctx, &auth).await.unwrap_err();
        assert!(matches!(err, CliError::Identity(_)));
    }
}
