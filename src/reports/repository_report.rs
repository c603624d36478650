use crate::facts::{StatsOutcome, TimeWindow};
use url::Url;

/// Statistics gathered for one repository, ready for reporting.
#[derive(Debug, Clone)]
pub struct RepositoryReport {
    pub repository: String,

    /// Human-facing issue list of the repository.
    pub issues_page: Url,

    pub window: TimeWindow,
    pub closed: Option<StatsOutcome>,
    pub open: Option<StatsOutcome>,
}

impl RepositoryReport {
    #[must_use]
    pub const fn new(repository: String, issues_page: Url, window: TimeWindow) -> Self {
        Self {
            repository,
            issues_page,
            window,
            closed: None,
            open: None,
        }
    }

    /// The outcomes present in this report, closed first.
    pub fn outcomes(&self) -> impl Iterator<Item = &StatsOutcome> {
        self.closed.iter().chain(self.open.iter())
    }

    /// The outcome whose tag and resolution counts represent the repository.
    ///
    /// Closed-mode statistics are preferred when both modes were collected.
    #[must_use]
    pub fn primary(&self) -> Option<&StatsOutcome> {
        self.closed.as_ref().or(self.open.as_ref())
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.outcomes().all(StatsOutcome::is_complete)
    }
}
