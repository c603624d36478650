//! One page of a paginated issue collection.

use core::fmt::{Display, Formatter};
use serde::Deserialize;

/// Why fetching a page did not produce usable data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureCause {
    /// The server answered with a non-success HTTP status.
    Status(u16),

    /// The request could not be completed (connection, TLS, ...).
    Transport(String),

    /// The response body is not the expected JSON document.
    Body(String),

    /// The server pointed back to a page that was already fetched.
    RepeatedPage,
}

impl Display for FailureCause {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Status(code) => write!(f, "HTTP status {code}"),
            Self::Transport(e) => write!(f, "request failed: {e}"),
            Self::Body(e) => write!(f, "unexpected response body: {e}"),
            Self::RepeatedPage => write!(f, "pagination points back to an already fetched page"),
        }
    }
}

/// A page that could not be fetched, and the URL it was fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub url: String,
    pub cause: FailureCause,
}

impl Display for FetchFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} ({})", self.cause, self.url)
    }
}

/// One response of the collection endpoint.
///
/// A failed fetch yields a page with no issues, no next page, and `failure` set, so that
/// the end of pagination can be told apart from an aborted one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    /// Raw issue objects, decoded individually by the extractor.
    pub issues: Vec<serde_json::Value>,
    pub next_page_url: Option<String>,
    pub failure: Option<FetchFailure>,
}

#[derive(Deserialize)]
struct PageBody {
    issues: Vec<serde_json::Value>,
    #[serde(default)]
    pagination: Option<Pagination>,
}

#[derive(Deserialize)]
struct Pagination {
    #[serde(default)]
    next: Option<String>,
}

impl Page {
    /// A page that could not be fetched from `url`.
    #[must_use]
    pub fn failed(url: &str, cause: FailureCause) -> Self {
        Self {
            issues: Vec::new(),
            next_page_url: None,
            failure: Some(FetchFailure {
                url: url.to_string(),
                cause,
            }),
        }
    }

    /// Decode the JSON body returned for `url`.
    #[must_use]
    pub fn from_body(url: &str, body: &[u8]) -> Self {
        match serde_json::from_slice::<PageBody>(body) {
            Ok(body) => Self {
                issues: body.issues,
                next_page_url: body.pagination.and_then(|p| p.next).filter(|next| !next.is_empty()),
                failure: None,
            },
            Err(e) => Self::failed(url, FailureCause::Body(e.to_string())),
        }
    }

    /// Number of raw issues carried by this page.
    #[must_use]
    pub fn total(&self) -> usize {
        self.issues.len()
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}

/// Source of pages, one request per call.
pub trait PageFetcher {
    /// Fetch the page at `url`.
    ///
    /// Never fails: problems are reported through [`Page::failure`].
    fn fetch(&self, url: &str) -> impl Future<Output = Page> + Send;
}
