//! Blocking page fetch
//!
//! GET a page with ureq, validate the response and hand the decoded body to
//! a [`Parser`].

use std::time::Duration;

use crate::error::Error;
use crate::parser::Parser;
use crate::value::Bind;

const DEFAULT_USER_AGENT: &str = concat!("ogp_parser/", env!("CARGO_PKG_VERSION"));

/// HTTP options for [`fetch_with`].
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl FetchOptions {
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Fetch `url` and parse its OpenGraph properties into `target`.
pub fn fetch<T: Bind>(url: &str, target: &mut T) -> Result<(), Error> {
    fetch_with(url, target, &Parser::new(), &FetchOptions::default())
}

/// Same as [`fetch`] with an explicit parser and HTTP options.
pub fn fetch_with<T: Bind>(
    url: &str,
    target: &mut T,
    parser: &Parser,
    options: &FetchOptions,
) -> Result<(), Error> {
    let agent = ureq::Agent::new_with_config(
        ureq::Agent::config_builder()
            .timeout_global(Some(options.timeout))
            .user_agent(options.user_agent.as_str())
            .http_status_as_error(false)
            .build(),
    );

    tracing::debug!(url, "fetching page");
    let resp = agent.get(url).call()?;

    let status = resp.status().as_u16();
    let content_type = resp
        .headers()
        .get("content-type")
        .and_then(|value| value.to_str().ok());
    check_response(status, content_type)?;

    // ureq decodes the body using the charset of the Content-Type.
    let html = resp.into_body().read_to_string()?;
    parser.parse(&html, target)?;
    Ok(())
}

/// Accept only `200 OK` responses that are HTML or do not say what they are.
pub(crate) fn check_response(status: u16, content_type: Option<&str>) -> Result<(), Error> {
    if status != 200 {
        return Err(Error::BadStatusCode(status));
    }

    let Some(content_type) = content_type.filter(|ct| !ct.is_empty()) else {
        return Ok(());
    };

    let media_type = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    if media_type.is_empty() || !media_type.contains('/') {
        return Err(Error::InvalidContentType(content_type.to_string()));
    }
    if media_type != "text/html" {
        return Err(Error::UnsupportedPage(media_type));
    }
    Ok(())
}
