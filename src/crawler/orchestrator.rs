//! Crawl orchestrator
//!
//! Drives one source adapter across its page range, strictly sequentially:
//! the pacing delay between requests is the anti-blocking mechanism, and
//! concurrent fetches would defeat it. Per-page failures are recorded and
//! the crawl moves on; the only thing that ends a crawl is exhausting the
//! page range or an explicit cancellation.

use reqwest::Client;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::crawler::{fetch_page, FetchOutcome, Pacing};
use crate::model::{CrawlResult, Ranked};
use crate::sources::SourceAdapter;
use crate::state::PageState;

/// Cooperative cancellation flag, checked between pages
///
/// An in-flight fetch runs to completion or its own timeout; cancellation
/// only prevents the next page from starting.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Page range and pacing for one crawl invocation
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    /// First page index, 1-based, inclusive
    pub first_page: u32,

    /// Last page index, inclusive
    pub last_page: u32,

    pub pacing: Pacing,
}

impl CrawlOptions {
    pub fn pages_attempted(&self) -> u32 {
        self.last_page.saturating_sub(self.first_page) + 1
    }
}

/// What one page contributed to the crawl
enum PageOutcome<T> {
    Batch(Vec<T>),
    Empty,
    Failed(String),
}

/// Crawls one source across its configured page range
///
/// Pages run in increasing order. A failed fetch records one
/// [`crate::model::PageFailure`] and the crawl continues; successful pages
/// append their listings in extraction order. The result is frozen on
/// return.
pub async fn crawl_source<A: SourceAdapter>(
    client: &Client,
    adapter: &A,
    options: &CrawlOptions,
    cancel: &CancelToken,
) -> CrawlResult<A::Listing> {
    let mut result = CrawlResult::new();
    let mut max_rank_seen: Option<u32> = None;

    tracing::info!(
        "Crawling source '{}', pages {}..={}",
        adapter.name(),
        options.first_page,
        options.last_page
    );

    for page in options.first_page..=options.last_page {
        if cancel.is_cancelled() {
            tracing::info!(
                "Crawl of '{}' cancelled before page {}",
                adapter.name(),
                page
            );
            break;
        }

        match process_page(client, adapter, page).await {
            Ok(PageOutcome::Batch(batch)) => {
                tracing::info!(
                    "Page {} of '{}': {} listings",
                    page,
                    adapter.name(),
                    batch.len()
                );
                check_rank_order(adapter.name(), page, &batch, &mut max_rank_seen);
                result.extend_page(batch);
            }
            Ok(PageOutcome::Empty) => {
                tracing::info!("Page {} of '{}': no listings", page, adapter.name());
            }
            Ok(PageOutcome::Failed(reason)) => {
                tracing::warn!("Page {} of '{}' failed: {}", page, adapter.name(), reason);
                result.record_failure(page, reason);
            }
            Err(e) => {
                tracing::error!("Page {} of '{}' aborted: {}", page, adapter.name(), e);
                result.record_failure(page, e.to_string());
            }
        }

        if page < options.last_page && !cancel.is_cancelled() {
            options.pacing.pause().await;
        }
    }

    tracing::info!(
        "Crawl of '{}' complete: {} listings, {} failed pages",
        adapter.name(),
        result.listings.len(),
        result.failures.len()
    );

    result
}

/// Runs one page through the adapter pipeline
///
/// The page walks the `Pending -> Fetched -> Parsed -> Normalized -> Done`
/// state machine, exiting early through `FetchFailed` or `EmptyPage`.
async fn process_page<A: SourceAdapter>(
    client: &Client,
    adapter: &A,
    page: u32,
) -> crate::Result<PageOutcome<A::Listing>> {
    let state = PageState::Pending;
    let url = adapter.page_url(page);
    tracing::debug!("Fetching {}", url);

    let raw = match fetch_page(client, &url, adapter.headers()).await {
        FetchOutcome::Body(raw) => raw,
        FetchOutcome::Empty => {
            return Ok(PageOutcome::Empty);
        }
        FetchOutcome::Transient(reason) | FetchOutcome::Permanent(reason) => {
            state.transition_to(PageState::FetchFailed)?;
            return Ok(PageOutcome::Failed(reason));
        }
    };
    let state = state.transition_to(PageState::Fetched)?;

    let records = adapter.extract(&raw.body);
    let state = state.transition_to(PageState::Parsed)?;

    if records.is_empty() {
        state.transition_to(PageState::EmptyPage)?;
        return Ok(PageOutcome::Empty);
    }

    let mut batch = Vec::with_capacity(records.len());
    for record in &records {
        match adapter.normalize(record) {
            Ok(listing) => batch.push(listing),
            Err(e) => {
                tracing::warn!("Dropping listing on page {}: {}", page, e);
            }
        }
    }
    let state = state.transition_to(PageState::Normalized)?;
    state.transition_to(PageState::Done)?;

    if batch.is_empty() {
        // Every record failed required-field conversion.
        return Ok(PageOutcome::Empty);
    }
    Ok(PageOutcome::Batch(batch))
}

/// Warns when a page's ranks regress below an earlier page's maximum
///
/// Both sources paginate by fixed rank windows, so ranks are expected to be
/// non-decreasing across pages. A regression means the source served
/// malformed or shuffled pages; the entries are retained either way.
fn check_rank_order<T: Ranked>(
    source: &str,
    page: u32,
    batch: &[T],
    max_rank_seen: &mut Option<u32>,
) {
    let Some(batch_min) = batch.iter().map(Ranked::rank).min() else {
        return;
    };
    let batch_max = batch.iter().map(Ranked::rank).max().unwrap_or(batch_min);

    if let Some(previous_max) = *max_rank_seen {
        if batch_min < previous_max {
            tracing::warn!(
                "Source '{}' page {}: rank {} is below earlier maximum {}",
                source,
                page,
                batch_min,
                previous_max
            );
        }
    }
    *max_rank_seen = Some(max_rank_seen.map_or(batch_max, |m| m.max(batch_max)));
}
