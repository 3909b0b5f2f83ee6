//! Resolution of user-supplied add-on/app names into exactly one attached
//! Borealis Isolated Postgres add-on.
//!
//! Resolution happens under the user's platform API key (the inventory
//! services), not under the per-command authorization. Ambiguity is always
//! an error: with several candidate add-ons in play, the caller must name
//! one explicitly rather than have the CLI guess.

use reqwest::Method;
use serde::Deserialize;

use crate::client::Context;
use crate::errors::CliError;

/// Service identifier that marks an add-on as a Borealis Isolated Postgres
/// instance in the platform's add-on listings.
pub const ADDON_SERVICE_NAME: &str = "borealis-pg";

/// The resolved target: one add-on, the app it is attached to, and the
/// attachment binding them. Fetched fresh per invocation, never cached.
#[derive(Debug, Clone)]
pub struct AddonAttachment {
    pub addon_id: String,
    pub addon_name: String,
    pub app_id: String,
    pub app_name: String,
    pub attachment_id: String,
    pub attachment_name: String,
}

#[derive(Deserialize)]
struct AddonSummary {
    id: String,
    #[allow(dead_code)]
    name: String,
    addon_service: AddonService,
}

#[derive(Deserialize)]
struct AddonService {
    name: String,
}

#[derive(Deserialize)]
struct AttachmentSummary {
    id: String,
    name: String,
    addon: NamedRef,
    app: NamedRef,
}

#[derive(Deserialize)]
struct NamedRef {
    id: String,
    name: String,
}

/// Turn the `--addon`/`--app` flags into exactly one attachment, or fail
/// with an error specific enough for the user to fix their flags.
pub async fn resolve_attachment(
    ctx: &Context,
    addon: Option<&str>,
    app: Option<&str>,
) -> Result<AddonAttachment, CliError> {
    match (addon, app) {
        (Some(addon), _) => resolve_by_addon(ctx, addon, app).await,
        (None, Some(app)) => resolve_by_app(ctx, app).await,
        (None, None) => Err(CliError::MissingTarget),
    }
}

/// An explicit add-on name is looked up directly. When an app name is also
/// given, the attachment belonging to that app is preferred.
async fn resolve_by_addon(
    ctx: &Context,
    addon: &str,
    app: Option<&str>,
) -> Result<AddonAttachment, CliError> {
    let attachments = list_attachments(ctx, addon).await.map_err(|err| match err {
        CliError::Platform { status: 404 } => CliError::AddonNotFound(addon.to_string()),
        other => other,
    })?;

    pick_attachment(attachments, app).ok_or_else(|| CliError::AddonNotFound(addon.to_string()))
}

/// With only an app name, list the app's add-ons and require exactly one
/// belonging to the managed service family.
async fn resolve_by_app(ctx: &Context, app: &str) -> Result<AddonAttachment, CliError> {
    let response = ctx
        .platform_request(Method::GET, &format!("/apps/{app}/addons"))
        .send()
        .await?;

    let status = response.status();
    if status.as_u16() == 404 {
        return Err(CliError::AppNotFound(app.to_string()));
    }
    if !status.is_success() {
        return Err(CliError::Platform {
            status: status.as_u16(),
        });
    }

    let addons: Vec<AddonSummary> = response.json().await?;

    let mut candidates = addons
        .into_iter()
        .filter(|addon| addon.addon_service.name == ADDON_SERVICE_NAME);
    let addon = match (candidates.next(), candidates.next()) {
        (None, _) => return Err(CliError::NoAddonAttached(app.to_string())),
        (Some(_), Some(_)) => return Err(CliError::AmbiguousAddon(app.to_string())),
        (Some(only), None) => only,
    };

    let attachments = list_attachments(ctx, &addon.id).await?;
    pick_attachment(attachments, Some(app)).ok_or_else(|| CliError::NoAddonAttached(app.to_string()))
}

async fn list_attachments(
    ctx: &Context,
    addon: &str,
) -> Result<Vec<AttachmentSummary>, CliError> {
    let response = ctx
        .platform_request(Method::GET, &format!("/addons/{addon}/addon-attachments"))
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(CliError::Platform {
            status: status.as_u16(),
        });
    }

    Ok(response.json().await?)
}

fn pick_attachment(
    attachments: Vec<AttachmentSummary>,
    app: Option<&str>,
) -> Option<AddonAttachment> {
    let index = app
        .and_then(|app| attachments.iter().position(|att| att.app.name == app))
        .unwrap_or(0);

    attachments.into_iter().nth(index).map(|att| AddonAttachment {
        addon_id: att.addon.id,
        addon_name: att.addon.name,
        app_id: att.app.id,
        app_name: att.app.name,
        attachment_id: att.id,
        attachment_name: att.name,
    })
}
