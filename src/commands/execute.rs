use crate::api;
use crate::client::Context;
use crate::errors::CliError;
use crate::executor::{self, Rendering, StatusMessages};

static STATUS_MESSAGES: StatusMessages = StatusMessages(&[
    (
        400,
        Rendering::WithReason("The add-on is in a state that prevents upgrades"),
    ),
    (
        403,
        Rendering::Fixed("Add-on database write access has been revoked"),
    ),
    (
        404,
        Rendering::Fixed("Add-on is not a Borealis Isolated Postgres add-on"),
    ),
    (
        409,
        Rendering::Fixed(
            "Add-on database is currently undergoing maintenance. Please try again later.",
        ),
    ),
    (422, Rendering::Fixed("Add-on is not finished provisioning")),
]);

/// Start an upgrade to the next PostgreSQL major version. The upgrade itself
/// runs in the background on the service side; this command only triggers it.
pub async fn run(ctx: &Context, addon: Option<&str>, app: Option<&str>) -> Result<(), CliError> {
    let (attachment, started) = executor::execute(
        ctx,
        addon,
        app,
        |addon_name| format!("Starting PostgreSQL major version upgrade for add-on {addon_name}"),
        &STATUS_MESSAGES,
        |addon_name, authorization| async move {
            api::start_upgrade(ctx, &addon_name, &authorization).await
        },
    )
    .await?;

    eprintln!(
        "{} is being upgraded from PostgreSQL version {} to version {} in the background. \
         The system will send an email when the upgrade process is complete.",
        attachment.addon_name,
        started.current_pg_major_version,
        started.target_pg_major_version,
    );

    Ok(())
}
