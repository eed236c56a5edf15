use crate::RequestId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Ask the scraping service for `url`; the reply must carry `request_id`.
    FetchScrape { request_id: RequestId, url: String },
    StartLoadingTicker,
    StopLoadingTicker,
}
