use crate::facts::{Page, PageFetcher};
use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use core::time::Duration;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::Arc;
use std::time::Instant;

/// Refresh rate of the spinner (10 Hz).
const REFRESH_INTERVAL_MS: u64 = 100;

const TEMPLATE: &str = "{prefix:>12.bold.cyan} [{spinner}] {msg}";
const TEMPLATE_NO_COLOR: &str = "{prefix:>12} [{spinner}] {msg}";

/// A spinner on stderr that stays hidden until the work has run for a while.
#[derive(Debug, Clone)]
pub struct ProgressReporter {
    bar: ProgressBar,
    visible_after: Option<Instant>,
    visible: Arc<AtomicBool>,
}

impl ProgressReporter {
    /// Create a spinner that becomes visible once `delay` has elapsed.
    #[must_use]
    pub fn new(delay: Duration, use_colors: bool) -> Self {
        let bar = ProgressBar::hidden();
        let template = if use_colors { TEMPLATE } else { TEMPLATE_NO_COLOR };
        if let Ok(style) = ProgressStyle::default_spinner().template(template) {
            bar.set_style(style);
        }

        Self {
            bar,
            visible_after: Instant::now().checked_add(delay),
            visible: Arc::new(AtomicBool::new(false)),
        }
    }

    /// A reporter that never draws anything.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            bar: ProgressBar::hidden(),
            visible_after: None,
            visible: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Set the label shown left of the spinner, e.g. `Closed`.
    pub fn set_phase(&self, phase: &str) {
        self.bar.set_prefix(phase.to_string());
    }

    pub fn set_message(&self, message: String) {
        self.reveal_if_due();
        self.bar.set_message(message);
    }

    /// Remove the spinner from the terminal.
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    fn reveal_if_due(&self) {
        let Some(visible_after) = self.visible_after else {
            return;
        };

        if Instant::now() >= visible_after && !self.visible.swap(true, Ordering::Relaxed) {
            self.bar.set_draw_target(ProgressDrawTarget::stderr());
            self.bar.enable_steady_tick(Duration::from_millis(REFRESH_INTERVAL_MS));
        }
    }
}

/// Page fetcher that reports each request on a [`ProgressReporter`].
#[derive(Debug)]
pub struct ProgressFetcher<'a, F> {
    inner: &'a F,
    reporter: &'a ProgressReporter,
    label: String,
    pages: AtomicU32,
}

impl<'a, F> ProgressFetcher<'a, F> {
    pub const fn new(inner: &'a F, reporter: &'a ProgressReporter, label: String) -> Self {
        Self {
            inner,
            reporter,
            label,
            pages: AtomicU32::new(0),
        }
    }
}

impl<F: PageFetcher + Sync> PageFetcher for ProgressFetcher<'_, F> {
    async fn fetch(&self, url: &str) -> Page {
        let page = self.pages.fetch_add(1, Ordering::Relaxed) + 1;
        self.reporter.set_message(format!("{} (page {page})", self.label));
        self.inner.fetch(url).await
    }
}
