use anyhow::Context as _;

const DEFAULT_PLATFORM_API_URL: &str = "https://api.heroku.com";
const DEFAULT_DATA_API_URL: &str = "https://pg-heroku-addons-api.borealis-data.com";

#[derive(Debug, Clone)]
pub struct Config {
    /// The user's long-lived platform API key. Used only for the identity
    /// and inventory services, never for the privileged data API call.
    pub api_key: String,
    pub platform_api_url: String,
    pub data_api_url: String,
}

pub fn load() -> anyhow::Result<Config> {
    dotenvy::dotenv().ok();

    let api_key = std::env::var("HEROKU_API_KEY").map_err(|_| {
        anyhow::anyhow!(
            "HEROKU_API_KEY is not set. Provide a platform API key \
             (e.g. the output of `heroku auth:token`)."
        )
    })?;

    Ok(Config {
        api_key,
        platform_api_url: base_url(
            "HEROKU_API_URL",
            std::env::var("HEROKU_API_URL").ok(),
            DEFAULT_PLATFORM_API_URL,
        )?,
        data_api_url: base_url(
            "BOREALIS_PG_API_URL",
            std::env::var("BOREALIS_PG_API_URL").ok(),
            DEFAULT_DATA_API_URL,
        )?,
    })
}

/// Validate an API base URL and normalize away any trailing slash so request
/// paths can be appended directly.
fn base_url(var: &str, value: Option<String>, default: &str) -> anyhow::Result<String> {
    let raw = value.unwrap_or_else(|| default.to_string());
    let parsed =
        url::Url::parse(&raw).with_context(|| format!("{var} is not a valid URL: {raw}"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        anyhow::bail!("{var} must be an http(s) URL, got: {raw}");
    }
    Ok(raw.trim_end_matches('/').to_string())
}
