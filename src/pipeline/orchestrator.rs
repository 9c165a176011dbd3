use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::types::{FailurePolicy, ScrollConfig};
use crate::domain::listing::canonical_detail_url;
use crate::domain::processed::ProcessedSet;
use crate::error::{OrpetsError, Result};
use crate::pipeline::pet_text::PetTextService;
use crate::pipeline::visibility::is_visible;
use crate::ports::page::Page;

/// A listing that could not be augmented.
#[derive(Debug)]
pub struct ListingFailure {
    pub index: usize,
    pub error: OrpetsError,
}

/// What the worker did with one scan's batch.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Listings claimed by the scan, in processing order.
    pub claimed: Vec<usize>,
    pub appended: Vec<usize>,
    pub failed: Vec<ListingFailure>,
    /// Listings handed back unprocessed after the batch was aborted.
    pub released: Vec<usize>,
}

struct ScanBatch {
    listings: Vec<usize>,
    done: oneshot::Sender<BatchReport>,
}

/// Handle to one scan's outcome. Dropping it does not cancel the work.
pub struct ScanTicket {
    claimed: usize,
    rx: oneshot::Receiver<BatchReport>,
}

impl ScanTicket {
    /// Number of listings this scan claimed.
    pub fn claimed(&self) -> usize {
        self.claimed
    }

    pub async fn wait(self) -> BatchReport {
        self.rx.await.unwrap_or_default()
    }
}

fn lock(processed: &Mutex<ProcessedSet>) -> MutexGuard<'_, ProcessedSet> {
    processed.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Drives lazy augmentation of a page's listings.
///
/// Each scroll or load event scans the page synchronously and claims every
/// newly visible listing before anything is awaited. Claimed listings are
/// handed to a single worker task that fetches them strictly one at a time,
/// so a listing is never fetched twice even when events arrive while the
/// worker is still busy.
pub struct ScrollOrchestrator<P: Page + 'static> {
    page: Arc<P>,
    processed: Arc<Mutex<ProcessedSet>>,
    queue: mpsc::UnboundedSender<ScanBatch>,
    worker: JoinHandle<()>,
}

impl<P: Page + 'static> ScrollOrchestrator<P> {
    /// Must be called from within a Tokio runtime.
    pub fn new(page: Arc<P>, service: Arc<PetTextService>, config: ScrollConfig) -> Self {
        let processed = Arc::new(Mutex::new(ProcessedSet::new()));
        let (queue, rx) = mpsc::unbounded_channel();

        let worker = Worker {
            page: Arc::clone(&page),
            service,
            processed: Arc::clone(&processed),
            config,
        };
        let worker = tokio::spawn(worker.run(rx));

        Self {
            page,
            processed,
            queue,
            worker,
        }
    }

    pub fn page(&self) -> &Arc<P> {
        &self.page
    }

    pub fn processed_count(&self) -> usize {
        lock(&self.processed).len()
    }

    pub fn is_processed(&self, index: usize) -> bool {
        lock(&self.processed).contains(index)
    }

    /// Scan the page and queue every unclaimed, fully visible listing.
    /// Listings are visited from the last to the first.
    pub fn on_scroll_or_load(&self) -> ScanTicket {
        let viewport = self.page.viewport_height();
        let mut claimed = Vec::new();
        {
            let mut processed = lock(&self.processed);
            for index in (0..self.page.listing_count()).rev() {
                if processed.contains(index) {
                    continue;
                }
                let Some(rect) = self.page.bounding_rect(index) else {
                    continue;
                };
                if is_visible(rect, viewport) && processed.mark(index) {
                    claimed.push(index);
                }
            }
        }

        let (done, rx) = oneshot::channel();
        let count = claimed.len();
        if count > 0 {
            debug!(listings = ?claimed, "Claimed visible listings");
        }

        let batch = ScanBatch {
            listings: claimed,
            done,
        };
        if let Err(mpsc::error::SendError(batch)) = self.queue.send(batch) {
            warn!("Scroll worker has stopped, releasing claimed listings");
            let mut processed = lock(&self.processed);
            for index in batch.listings {
                processed.release(index);
            }
        }

        ScanTicket { claimed: count, rx }
    }

    /// Close the queue and wait for queued batches to finish.
    pub async fn shutdown(self) {
        drop(self.queue);
        if let Err(e) = self.worker.await {
            warn!(error = %e, "Scroll worker terminated abnormally");
        }
    }
}

struct Worker<P: Page + 'static> {
    page: Arc<P>,
    service: Arc<PetTextService>,
    processed: Arc<Mutex<ProcessedSet>>,
    config: ScrollConfig,
}

impl<P: Page + 'static> Worker<P> {
    async fn run(self, mut rx: mpsc::UnboundedReceiver<ScanBatch>) {
        while let Some(batch) = rx.recv().await {
            let report = self.process_batch(batch.listings).await;
            // The ticket may have been dropped.
            let _ = batch.done.send(report);
        }
        info!("Scroll worker stopped");
    }

    async fn process_batch(&self, listings: Vec<usize>) -> BatchReport {
        let mut report = BatchReport {
            claimed: listings.clone(),
            ..Default::default()
        };

        for (pos, &index) in listings.iter().enumerate() {
            match self.process_listing(index).await {
                Ok(()) => report.appended.push(index),
                Err(error) => {
                    warn!(index, error = %error, "Failed to add pet text to listing");
                    if self.config.retry_failed {
                        lock(&self.processed).release(index);
                    }
                    report.failed.push(ListingFailure { index, error });

                    if self.config.failure_policy == FailurePolicy::Abort {
                        let rest = &listings[pos + 1..];
                        let mut processed = lock(&self.processed);
                        for &later in rest {
                            processed.release(later);
                        }
                        report.released.extend_from_slice(rest);
                        break;
                    }
                }
            }
        }

        report
    }

    async fn process_listing(&self, index: usize) -> Result<()> {
        let href = self
            .page
            .listing_href(index)
            .ok_or(OrpetsError::MissingLink { index })?;
        let url = canonical_detail_url(&href);
        let pet_text = self.service.get_pet_text(url).await?;
        self.page.append_pet_list(index, &pet_text);
        debug!(index, url, "Appended pet text");
        Ok(())
    }
}
