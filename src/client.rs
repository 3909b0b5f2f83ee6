use std::time::Duration;

use reqwest::Method;

use crate::config::Config;

/// Platform API requests follow the versioned media type the service expects.
const PLATFORM_ACCEPT: &str = "application/vnd.heroku+json; version=3";

/// Shared state for one command invocation: the HTTP client plus resolved
/// configuration. Built once in `main` and borrowed by every network module.
pub struct Context {
    pub http: reqwest::Client,
    pub config: Config,
}

impl Context {
    pub fn new(config: Config) -> Self {
        let http = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .expect("failed to build HTTP client");

        Self { http, config }
    }

    /// A request to the platform identity/inventory API, authenticated with
    /// the user's own API key.
    pub fn platform_request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.config.platform_api_url, path))
            .bearer_auth(&self.config.api_key)
            .header(reqwest::header::ACCEPT, PLATFORM_ACCEPT)
    }

    /// A request to the data API, authenticated with a short-lived
    /// authorization token rather than the platform API key.
    pub fn data_request(&self, method: Method, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.config.data_api_url, path))
            .bearer_auth(token)
    }
}
