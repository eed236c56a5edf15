//! Netscope core: pure state machine and view-model helpers.
mod effect;
mod facet;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use facet::{Facet, FacetData, ScrapeResult};
pub use msg::Msg;
pub use state::{AppState, FetchState, LoadingAnimation, RequestId, FETCH_ERROR_MESSAGE};
pub use update::update;
pub use view_model::{
    render_display, AppViewModel, DisplayContent, FacetButtonView, NO_DATA_MESSAGE,
    PLACEHOLDER_MESSAGE,
};
