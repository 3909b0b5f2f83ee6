use clap::{Args, Parser, Subcommand};

/// Borealis PG — manage Borealis Isolated Postgres add-ons
#[derive(Parser)]
#[command(name = "borealis-pg", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// PostgreSQL major version upgrades
    Upgrade {
        #[command(subcommand)]
        command: UpgradeCommands,
    },
}

#[derive(Subcommand)]
pub enum UpgradeCommands {
    /// Start an upgrade to the next PostgreSQL major version
    ///
    /// Upgrades are performed asynchronously and may take well over an hour
    /// to complete. Once finished, the database can't be rolled back to the
    /// previous major version.
    Execute {
        #[command(flatten)]
        target: TargetFlags,
    },

    /// Cancel a PostgreSQL version upgrade that is still in progress
    Cancel {
        #[command(flatten)]
        target: TargetFlags,
    },

    /// Show PostgreSQL version upgrade availability and status
    Info {
        #[command(flatten)]
        target: TargetFlags,
    },
}

/// Flags identifying the add-on a command acts on. At least one must be
/// supplied; with only an app name, the app must have exactly one Borealis
/// Isolated Postgres add-on attached.
#[derive(Args)]
pub struct TargetFlags {
    /// Name of the target add-on (or attachment)
    #[arg(short = 'o', long)]
    pub addon: Option<String>,

    /// Name of the app the add-on is attached to
    #[arg(short = 'a', long)]
    pub app: Option<String>,
}
