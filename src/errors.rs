use thiserror::Error;

/// Everything a command can fail with, one variant per user-distinguishable
/// outcome.
///
/// `Operation` carries a message already translated through the command's
/// status table. `Transport` passes network-level failures through verbatim
/// so they are never mistaken for a structured service response.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("unable to create a temporary platform authorization: {0}")]
    Identity(String),

    #[error("an add-on name (--addon) or app name (--app) must be provided")]
    MissingTarget,

    #[error("add-on {0} was not found")]
    AddonNotFound(String),

    #[error("app {0} was not found")]
    AppNotFound(String),

    #[error("app {0} has no Borealis Isolated Postgres add-on attached")]
    NoAddonAttached(String),

    #[error("app {0} has multiple Borealis Isolated Postgres add-ons attached; specify one with --addon")]
    AmbiguousAddon(String),

    #[error("unexpected response from the platform API (status {status})")]
    Platform { status: u16 },

    #[error("{message}")]
    Operation { message: String },

    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}
