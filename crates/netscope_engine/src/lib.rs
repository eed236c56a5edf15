//! Netscope engine: scraping-service client and background execution.
mod client;
mod decode;
mod document;
mod engine;
mod request;
mod ticker;
mod types;

pub use client::{ReqwestScrapeClient, ScrapeClient, ScrapeSettings, DEFAULT_SERVICE_URL};
pub use decode::decode_body;
pub use document::{parse_document, FacetValue, ScrapeDocument};
pub use engine::{EngineEvents, EngineHandle};
pub use request::build_scrape_url;
pub use ticker::Ticker;
pub use types::{EngineEvent, FailureKind, FetchError, RequestId};
