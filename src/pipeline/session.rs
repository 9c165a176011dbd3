use tracing::{info, warn};

use crate::adapters::page::static_page::StaticPage;
use crate::pipeline::orchestrator::{ListingFailure, ScrollOrchestrator};
use crate::ports::page::Page;

/// Totals for one simulated page visit.
#[derive(Debug, Default)]
pub struct SessionSummary {
    pub events: usize,
    pub appended: usize,
    pub failed: Vec<ListingFailure>,
}

/// Replay a visit to `page`: one load event, then scroll events of `step`
/// pixels until the bottom of the document is in view.
///
/// Each event's batch is allowed to settle before the next scroll, like a
/// reader pausing on each screenful. A page whose geometry is not finite
/// only gets the load event.
pub async fn simulate_visit(orch: &ScrollOrchestrator<StaticPage>, step: f64) -> SessionSummary {
    let page = orch.page();
    let viewport = page.viewport_height();
    let scrollable = viewport.is_finite() && viewport > 0.0 && page.document_height().is_finite();
    let step = if step.is_finite() && step > 0.0 {
        step
    } else {
        viewport
    };

    if !scrollable {
        warn!(viewport, "Page geometry is not finite, skipping scroll events");
    }

    let mut summary = SessionSummary::default();
    page.scroll_to(0.0);

    loop {
        let report = orch.on_scroll_or_load().wait().await;
        summary.events += 1;
        summary.appended += report.appended.len();
        summary.failed.extend(report.failed);

        if !scrollable || page.at_bottom() {
            break;
        }
        page.scroll_by(step);
    }

    info!(
        events = summary.events,
        appended = summary.appended,
        failed = summary.failed.len(),
        "Finished scrolling page"
    );
    summary
}
