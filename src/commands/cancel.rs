use crate::api;
use crate::client::Context;
use crate::errors::CliError;
use crate::executor::{self, Rendering, StatusMessages};

static STATUS_MESSAGES: StatusMessages = StatusMessages(&[
    (
        400,
        Rendering::Fixed("There is no PostgreSQL version upgrade in progress for add-on"),
    ),
    (
        404,
        Rendering::Fixed("Add-on is not a Borealis Isolated Postgres add-on"),
    ),
    (422, Rendering::Fixed("Add-on is not finished provisioning")),
]);

/// Cancel an in-progress PostgreSQL major version upgrade.
pub async fn run(ctx: &Context, addon: Option<&str>, app: Option<&str>) -> Result<(), CliError> {
    executor::execute(
        ctx,
        addon,
        app,
        |addon_name| {
            format!("Cancelling PostgreSQL major version upgrade for add-on {addon_name}")
        },
        &STATUS_MESSAGES,
        |addon_name, authorization| async move {
            api::cancel_upgrade(ctx, &addon_name, &authorization).await
        },
    )
    .await?;

    eprintln!();
    eprintln!("It may be several minutes before the add-on is ready to try another upgrade.");

    Ok(())
}
