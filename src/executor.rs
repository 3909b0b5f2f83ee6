//! Shared orchestration for every command.
//!
//! One invocation mints a scoped authorization, resolves the target add-on,
//! runs the single privileged call with progress feedback, and revokes the
//! authorization in a cleanup phase that runs on every exit path once the
//! authorization exists. Status failures from the privileged call are
//! translated through the command's status table; transport failures pass
//! through untranslated.

use std::future::Future;

use crate::api::ApiError;
use crate::auth::{self, Authorization};
use crate::client::Context;
use crate::errors::CliError;
use crate::resolver::{self, AddonAttachment};
use crate::spinner;

const FALLBACK_MESSAGE: &str = "Add-on service is temporarily unavailable. Try again later.";

/// How a mapped status renders: a fixed sentence, or a sentence with the
/// service's raw reason appended on a second line.
#[derive(Debug, Clone, Copy)]
pub enum Rendering {
    Fixed(&'static str),
    WithReason(&'static str),
}

/// Per-command table from remote status code to a stable user-facing
/// message. Codes a command does not anticipate fall through to a generic
/// service-unavailable message.
pub struct StatusMessages(pub &'static [(u16, Rendering)]);

impl StatusMessages {
    pub fn describe(&self, status: u16, reason: Option<&str>) -> String {
        for (code, rendering) in self.0 {
            if *code != status {
                continue;
            }
            return match rendering {
                Rendering::Fixed(message) => (*message).to_string(),
                Rendering::WithReason(message) => match reason {
                    Some(reason) => format!("{message}:\n{reason}"),
                    None => (*message).to_string(),
                },
            };
        }

        FALLBACK_MESSAGE.to_string()
    }
}

/// Run one command end to end. Returns the resolved attachment alongside the
/// operation's payload so callers can name the add-on in their output.
///
/// `operation` receives the resolved add-on name and the minted
/// authorization, and performs the command's one privileged call.
pub async fn execute<T, Op, Fut>(
    ctx: &Context,
    addon: Option<&str>,
    app: Option<&str>,
    label: impl FnOnce(&str) -> String,
    statuses: &StatusMessages,
    operation: Op,
) -> Result<(AddonAttachment, T), CliError>
where
    Op: FnOnce(String, Authorization) -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    // A failure here is terminal with nothing to clean up.
    let authorization = auth::create_authorization(ctx).await?;

    // Everything after acquisition funnels through `outcome` so revocation
    // runs on this path and every failure path alike.
    let outcome = run_privileged(ctx, addon, app, label, statuses, operation, &authorization).await;

    if let Err(err) = auth::revoke_authorization(ctx, &authorization).await {
        tracing::warn!(
            authorization = %authorization.id,
            error = %err,
            "failed to revoke temporary authorization"
        );
    }

    outcome
}

async fn run_privileged<T, Op, Fut>(
    ctx: &Context,
    addon: Option<&str>,
    app: Option<&str>,
    label: impl FnOnce(&str) -> String,
    statuses: &StatusMessages,
    operation: Op,
    authorization: &Authorization,
) -> Result<(AddonAttachment, T), CliError>
where
    Op: FnOnce(String, Authorization) -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let attachment = resolver::resolve_attachment(ctx, addon, app).await?;

    let result = spinner::run(
        &label(&attachment.addon_name),
        operation(attachment.addon_name.clone(), authorization.clone()),
    )
    .await;

    match result {
        Ok(payload) => Ok((attachment, payload)),
        Err(ApiError::Status { status, reason }) => Err(CliError::Operation {
            message: statuses.describe(status, reason.as_deref()),
        }),
        Err(ApiError::Transport(err)) => Err(CliError::Transport(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static MESSAGES: StatusMessages = StatusMessages(&[
        (400, Rendering::WithReason("The add-on is in a state that prevents upgrades")),
        (404, Rendering::Fixed("Add-on is not a Borealis Isolated Postgres add-on")),
    ]);

    #[test]
    fn test_mapped_code_yields_its_sentence() {
        assert_eq!(
            MESSAGES.describe(404, None),
            "Add-on is not a Borealis Isolated Postgres add-on"
        );
    }

    #[test]
    fn test_reason_is_appended_on_a_second_line() {
        assert_eq!(
            MESSAGES.describe(400, Some("Bad state!")),
            "The add-on is in a state that prevents upgrades:\nBad state!"
        );
    }

    #[test]
    fn test_reason_entry_without_a_reason_stays_single_line() {
        assert_eq!(
            MESSAGES.describe(400, None),
            "The add-on is in a state that prevents upgrades"
        );
    }

    #[test]
    fn test_unmapped_code_falls_back_to_unavailable() {
        assert_eq!(MESSAGES.describe(503, None), FALLBACK_MESSAGE);
        assert_eq!(MESSAGES.describe(418, Some("teapot")), FALLBACK_MESSAGE);
    }
}
