use crate::api::{self, UpgradeInfo};
use crate::client::Context;
use crate::errors::CliError;
use crate::executor::{self, Rendering, StatusMessages};

static STATUS_MESSAGES: StatusMessages = StatusMessages(&[
    (
        404,
        Rendering::Fixed("Add-on is not a Borealis Isolated Postgres add-on"),
    ),
    (422, Rendering::Fixed("Add-on is not finished provisioning")),
]);

// Width of the longest key plus one leading space; all keys right-align on
// the colon.
const KEY_WIDTH: usize = 33;

/// Show whether the add-on can be upgraded to a newer PostgreSQL major
/// version, and the status of any upgrade in progress.
pub async fn run(ctx: &Context, addon: Option<&str>, app: Option<&str>) -> Result<(), CliError> {
    let (_, info) = executor::execute(
        ctx,
        addon,
        app,
        |addon_name| format!("Fetching PostgreSQL version upgrade info for add-on {addon_name}"),
        &STATUS_MESSAGES,
        |addon_name, authorization| async move {
            api::fetch_upgrade_info(ctx, &addon_name, &authorization).await
        },
    )
    .await?;

    println!();
    print!("{}", render(&info));

    Ok(())
}

/// Three aligned key/value lines. The absent next version renders as `N/A`
/// here, at the presentation boundary, and nowhere earlier.
fn render(info: &UpgradeInfo) -> String {
    let next = info.next_pg_major_version.as_deref().unwrap_or("N/A");

    format!(
        "{:>KEY_WIDTH$}: {}\n{:>KEY_WIDTH$}: {}\n{:>KEY_WIDTH$}: {}\n",
        "Current PostgreSQL major version",
        info.current_pg_major_version,
        "Next PostgreSQL major version",
        next,
        "Upgrade Status",
        info.upgrade_status,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(next: Option<&str>) -> UpgradeInfo {
        UpgradeInfo {
            current_pg_major_version: "16".into(),
            next_pg_major_version: next.map(String::from),
            upgrade_status: "available".into(),
        }
    }

    #[test]
    fn test_render_aligns_all_keys_on_the_colon() {
        let rendered = render(&sample(Some("17")));
        let columns: Vec<usize> = rendered
            .lines()
            .map(|line| line.find(':').expect("every line has a key/value separator"))
            .collect();

        assert_eq!(columns.len(), 3);
        assert!(columns.iter().all(|col| *col == columns[0]));
    }

    #[test]
    fn test_render_shows_the_next_version_when_present() {
        let rendered = render(&sample(Some("17")));
        assert!(rendered.contains("Current PostgreSQL major version: 16"));
        assert!(rendered.contains("Next PostgreSQL major version: 17"));
        assert!(rendered.contains("Upgrade Status: available"));
    }

    #[test]
    fn test_render_substitutes_na_when_no_next_version() {
        let rendered = render(&sample(None));
        assert!(rendered.contains("Next PostgreSQL major version: N/A"));
    }
}
