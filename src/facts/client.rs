//! Pagure API client
//!
//! Minimal HTTP client for fetching pages of a project's issue collection.

use super::page::{FailureCause, Page, PageFetcher};
use super::Mode;
use crate::Result;
use chrono::{DateTime, Utc};
use ohno::{IntoAppError, app_err};
use url::Url;

const LOG_TARGET: &str = "     client";
const USER_AGENT: &str = concat!("pagure-stats/", env!("CARGO_PKG_VERSION"));

/// HTTP client fetching one page per call.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
}

impl Client {
    /// Create a new API client
    pub fn new() -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .into_app_err("creating the HTTP client")?;

        Ok(Self { http })
    }
}

impl PageFetcher for Client {
    async fn fetch(&self, url: &str) -> Page {
        log::debug!(target: LOG_TARGET, "GET {url}");

        let resp = match self.http.get(url).send().await {
            Ok(resp) => resp,
            Err(e) => return Page::failed(url, FailureCause::Transport(e.to_string())),
        };

        let status = resp.status();
        if !status.is_success() {
            return Page::failed(url, FailureCause::Status(status.as_u16()));
        }

        match resp.bytes().await {
            Ok(body) => Page::from_body(url, &body),
            Err(e) => Page::failed(url, FailureCause::Transport(e.to_string())),
        }
    }
}

/// Parse and normalize the tracker's base URL so relative paths can be joined onto it.
///
/// # Errors
///
/// Returns an error if the text is not an absolute `http` or `https` URL.
pub fn parse_base_url(text: &str) -> Result<Url> {
    let mut url = Url::parse(text).into_app_err_with(|| format!("invalid tracker URL '{text}'"))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(app_err!("tracker URL '{text}' must use http or https"));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

/// URL of the first page of `repository`'s issues for `mode`.
///
/// The server is asked for issues updated since the start of the window; the exact window
/// filtering happens client-side.
///
/// # Errors
///
/// Returns an error if the repository name does not form a valid URL path.
pub fn issues_url(base_url: &Url, repository: &str, mode: Mode, since: DateTime<Utc>, per_page: Option<u8>) -> Result<Url> {
    let repository = repository.trim_matches('/');
    if repository.is_empty() {
        return Err(app_err!("repository name must not be empty"));
    }

    let mut url = base_url
        .join(&format!("api/0/{repository}/issues"))
        .into_app_err_with(|| format!("building the issues URL for repository '{repository}'"))?;

    {
        let mut query = url.query_pairs_mut();
        let _ = query.append_pair("status", mode.status_filter());
        let _ = query.append_pair("since", &since.timestamp().to_string());
        if let Some(per_page) = per_page {
            let _ = query.append_pair("per_page", &per_page.to_string());
        }
    }

    Ok(url)
}

/// URL of the human-facing issue list of `repository`.
///
/// # Errors
///
/// Returns an error if the repository name does not form a valid URL path.
pub fn repository_issues_page(base_url: &Url, repository: &str) -> Result<Url> {
    let repository = repository.trim_matches('/');
    base_url
        .join(&format!("{repository}/issues"))
        .into_app_err_with(|| format!("building the issue page URL for repository '{repository}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        parse_base_url("https://pagure.io/").unwrap()
    }

    fn since() -> DateTime<Utc> {
        DateTime::from_timestamp(1_600_000_000, 0).unwrap()
    }

    #[test]
    fn test_parse_base_url_adds_trailing_slash() {
        let url = parse_base_url("https://example.com/pagure").unwrap();
        assert_eq!(url.as_str(), "https://example.com/pagure/");
    }

    #[test]
    fn test_parse_base_url_rejects_other_schemes() {
        assert!(parse_base_url("ftp://pagure.io/").is_err());
        assert!(parse_base_url("pagure.io").is_err());
    }

    #[test]
    fn test_issues_url_closed() {
        let url = issues_url(&base(), "infra/tickets", Mode::Closed, since(), None).unwrap();
        assert_eq!(url.as_str(), "https://pagure.io/api/0/infra/tickets/issues?status=Closed&since=1600000000");
    }

    #[test]
    fn test_issues_url_open_with_per_page() {
        let url = issues_url(&base(), "/fedora-infra/", Mode::Open, since(), Some(100)).unwrap();
        assert_eq!(
            url.as_str(),
            "https://pagure.io/api/0/fedora-infra/issues?status=all&since=1600000000&per_page=100"
        );
    }

    #[test]
    fn test_issues_url_under_sub_path() {
        let base = parse_base_url("https://example.com/pagure").unwrap();
        let url = issues_url(&base, "project", Mode::Closed, since(), None).unwrap();
        assert!(url.as_str().starts_with("https://example.com/pagure/api/0/project/issues?"));
    }

    #[test]
    fn test_issues_url_empty_repository() {
        assert!(issues_url(&base(), "/", Mode::Closed, since(), None).is_err());
    }

    #[test]
    fn test_repository_issues_page() {
        let url = repository_issues_page(&base(), "infra/tickets").unwrap();
        assert_eq!(url.as_str(), "https://pagure.io/infra/tickets/issues");
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot initialize the TLS backend")]
    fn test_client_new() {
        let _client = Client::new().unwrap();
    }
}
