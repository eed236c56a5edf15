use crate::{Facet, RequestId, ScrapeResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the URL input box.
    UrlChanged(String),
    /// User clicked Fetch (or pressed Enter in the URL box).
    FetchClicked,
    /// User picked one of the facet buttons.
    FacetSelected(Facet),
    /// Loading animation timer fired.
    LoadingTick,
    /// Scraping service answered with a usable document.
    FetchSucceeded {
        request_id: RequestId,
        result: ScrapeResult,
        /// Wall-clock label for the status line, supplied by the platform.
        fetched_at: String,
    },
    /// Scraping request failed. The cause is logged by the platform.
    FetchFailed { request_id: RequestId },
}
