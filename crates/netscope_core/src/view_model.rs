use crate::{Facet, FacetData, FetchState};

pub const PLACEHOLDER_MESSAGE: &str = "No data available. Enter a URL and click Fetch.";
pub const NO_DATA_MESSAGE: &str = "No data for this facet.";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub url_input: String,
    pub facets: Vec<FacetButtonView>,
    pub display: DisplayContent,
    pub status: String,
    pub is_loading: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetButtonView {
    pub facet: Facet,
    pub label: String,
    pub selected: bool,
}

/// What the display region shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayContent {
    Loading(String),
    Error(String),
    Placeholder(String),
    /// Single blob, shown preformatted.
    Text(String),
    /// One line per item, keyed by position.
    List(Vec<String>),
    /// The service answered but left this facet out.
    NoData(Facet),
}

impl Default for DisplayContent {
    fn default() -> Self {
        DisplayContent::Placeholder(PLACEHOLDER_MESSAGE.to_string())
    }
}

/// Maps the fetch lifecycle and the selected facet to display content.
///
/// Depends on nothing else, so identical inputs always render identically.
pub fn render_display(fetch: &FetchState, facet: Facet) -> DisplayContent {
    match fetch {
        FetchState::Loading(animation) => DisplayContent::Loading(animation.text().to_string()),
        FetchState::Failure(message) => DisplayContent::Error(message.clone()),
        FetchState::Idle => DisplayContent::Placeholder(PLACEHOLDER_MESSAGE.to_string()),
        FetchState::Success(result) => match result.get(facet) {
            Some(FacetData::Text(text)) => DisplayContent::Text(text.clone()),
            Some(FacetData::Items(items)) => DisplayContent::List(items.clone()),
            None => DisplayContent::NoData(facet),
        },
    }
}

pub(crate) fn facet_buttons(fetch: &FetchState, selected: Facet) -> Vec<FacetButtonView> {
    Facet::ALL
        .into_iter()
        .map(|facet| {
            let count = match fetch {
                FetchState::Success(result) => match result.get(facet) {
                    Some(FacetData::Items(items)) => Some(items.len()),
                    _ => None,
                },
                _ => None,
            };
            let label = match count {
                Some(count) => format!("{} ({})", facet.label(), count),
                None => facet.label().to_string(),
            };
            FacetButtonView {
                facet,
                label,
                selected: facet == selected,
            }
        })
        .collect()
}

pub(crate) fn status_line(
    fetch: &FetchState,
    submitted_url: Option<&str>,
    fetched_at: Option<&str>,
) -> String {
    let url = submitted_url.unwrap_or_default();
    match fetch {
        FetchState::Idle => "Ready".to_string(),
        FetchState::Loading(_) => format!("Fetching {url}…"),
        FetchState::Success(result) => format!(
            "Fetched {url} at {at} ({count} facets)",
            at = fetched_at.unwrap_or("?"),
            count = result.len()
        ),
        FetchState::Failure(_) => format!("Fetch failed for {url}"),
    }
}
