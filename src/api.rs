//! The privileged data API operations. Each command exists to perform
//! exactly one of these, under a freshly minted authorization's bearer
//! token rather than the platform API key.

use reqwest::Method;
use serde::Deserialize;

use crate::auth::Authorization;
use crate::client::Context;

/// Failure arm of one privileged call: either a structured status response
/// from the service, or a transport-level failure that must never be
/// mistaken for one.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("service responded with status {status}")]
    Status { status: u16, reason: Option<String> },

    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

#[derive(Deserialize)]
struct FailureBody {
    reason: Option<serde_json::Value>,
}

impl FailureBody {
    /// The service usually sends a plain string; anything else is
    /// stringified rather than discarded.
    fn reason_text(self) -> Option<String> {
        self.reason.map(|value| match value {
            serde_json::Value::String(text) => text,
            other => other.to_string(),
        })
    }
}

/// Version pair returned when an upgrade is accepted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeStarted {
    pub current_pg_major_version: String,
    pub target_pg_major_version: String,
}

/// Upgrade availability and progress for an add-on. `next_pg_major_version`
/// is absent when the add-on is already at the newest supported version.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeInfo {
    pub current_pg_major_version: String,
    pub next_pg_major_version: Option<String>,
    pub upgrade_status: String,
}

/// Discard the in-progress version upgrade. 200 with an empty body on
/// success.
pub async fn cancel_upgrade(
    ctx: &Context,
    addon_name: &str,
    auth: &Authorization,
) -> Result<(), ApiError> {
    let response = ctx
        .data_request(
            Method::DELETE,
            &format!("/heroku/resources/{addon_name}/pg-version-upgrades/current"),
            &auth.token,
        )
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(failure(response).await);
    }

    Ok(())
}

/// Begin an upgrade to the next major version. 202 with the current/target
/// version pair on success.
pub async fn start_upgrade(
    ctx: &Context,
    addon_name: &str,
    auth: &Authorization,
) -> Result<UpgradeStarted, ApiError> {
    let response = ctx
        .data_request(
            Method::POST,
            &format!("/heroku/resources/{addon_name}/pg-version-upgrades"),
            &auth.token,
        )
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(failure(response).await);
    }

    Ok(response.json().await?)
}

/// Fetch upgrade availability and status for the add-on.
pub async fn fetch_upgrade_info(
    ctx: &Context,
    addon_name: &str,
    auth: &Authorization,
) -> Result<UpgradeInfo, ApiError> {
    let response = ctx
        .data_request(
            Method::GET,
            &format!("/heroku/resources/{addon_name}/pg-version-upgrades"),
            &auth.token,
        )
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(failure(response).await);
    }

    Ok(response.json().await?)
}

/// Extract the status code and the optional structured reason from a
/// non-success response. A missing or malformed body simply yields no
/// reason.
async fn failure(response: reqwest::Response) -> ApiError {
    let status = response.status().as_u16();
    let reason = response
        .json::<FailureBody>()
        .await
        .ok()
        .and_then(FailureBody::reason_text);

    ApiError::Status { status, reason }
}
