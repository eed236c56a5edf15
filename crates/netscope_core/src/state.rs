use crate::view_model::{facet_buttons, render_display, status_line, AppViewModel};
use crate::{Facet, ScrapeResult};

pub type RequestId = u64;

/// The only message a failed fetch ever shows to the user.
pub const FETCH_ERROR_MESSAGE: &str = "Error fetching data";

const LOADING_FRAMES: [&str; 4] = ["loading", "loading.", "loading..", "loading..."];

/// Dot animation shown while a request is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadingAnimation {
    frame: usize,
}

impl LoadingAnimation {
    pub fn text(&self) -> &'static str {
        LOADING_FRAMES[self.frame]
    }

    pub fn advance(&mut self) {
        self.frame = (self.frame + 1) % LOADING_FRAMES.len();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchState {
    #[default]
    Idle,
    Loading(LoadingAnimation),
    Success(ScrapeResult),
    Failure(String),
}

impl FetchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    url_input: String,
    selected_facet: Facet,
    fetch: FetchState,
    /// Id of the most recently issued request; 0 before the first submit.
    latest_request: RequestId,
    /// URL of the most recently issued request, as sent.
    submitted_url: Option<String>,
    fetched_at: Option<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            url_input: self.url_input.clone(),
            facets: facet_buttons(&self.fetch, self.selected_facet),
            display: render_display(&self.fetch, self.selected_facet),
            status: status_line(
                &self.fetch,
                self.submitted_url.as_deref(),
                self.fetched_at.as_deref(),
            ),
            is_loading: self.fetch.is_loading(),
        }
    }

    pub fn url_input(&self) -> &str {
        &self.url_input
    }

    pub fn selected_facet(&self) -> Facet {
        self.selected_facet
    }

    pub fn fetch(&self) -> &FetchState {
        &self.fetch
    }

    pub fn latest_request(&self) -> RequestId {
        self.latest_request
    }

    /// True when a reply tagged `request_id` is the one the state is waiting for.
    pub fn awaits(&self, request_id: RequestId) -> bool {
        self.fetch.is_loading() && request_id == self.latest_request
    }

    /// Returns whether the state changed since the last call, clearing the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_url_input(&mut self, text: String) {
        if self.url_input != text {
            self.url_input = text;
            self.dirty = true;
        }
    }

    pub(crate) fn select_facet(&mut self, facet: Facet) {
        if self.selected_facet != facet {
            self.selected_facet = facet;
            self.dirty = true;
        }
    }

    /// Enters `Loading` for a new request and returns its id.
    pub(crate) fn begin_request(&mut self, url: String) -> RequestId {
        self.latest_request += 1;
        self.fetch = FetchState::Loading(LoadingAnimation::default());
        self.submitted_url = Some(url);
        self.fetched_at = None;
        self.dirty = true;
        self.latest_request
    }

    pub(crate) fn advance_loading(&mut self) -> bool {
        match &mut self.fetch {
            FetchState::Loading(animation) => {
                animation.advance();
                self.dirty = true;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn complete_success(&mut self, result: ScrapeResult, fetched_at: String) {
        self.fetch = FetchState::Success(result);
        self.fetched_at = Some(fetched_at);
        self.dirty = true;
    }

    pub(crate) fn complete_failure(&mut self) {
        self.fetch = FetchState::Failure(FETCH_ERROR_MESSAGE.to_string());
        self.dirty = true;
    }
}
