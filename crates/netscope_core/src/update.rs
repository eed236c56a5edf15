use netscope_logging::{ns_debug, ns_trace};

use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::UrlChanged(text) => {
            state.set_url_input(text);
            Vec::new()
        }
        Msg::FetchClicked => {
            if state.url_input().trim().is_empty() {
                return (state, Vec::new());
            }
            let url = state.url_input().to_owned();

            // A submit while loading supersedes the request in flight; the ticker keeps running.
            let was_loading = state.fetch().is_loading();
            let request_id = state.begin_request(url.clone());
            let mut effects = Vec::with_capacity(2);
            if !was_loading {
                effects.push(Effect::StartLoadingTicker);
            }
            effects.push(Effect::FetchScrape { request_id, url });
            effects
        }
        Msg::FacetSelected(facet) => {
            state.select_facet(facet);
            Vec::new()
        }
        Msg::LoadingTick => {
            if !state.advance_loading() {
                ns_trace!("Loading tick outside Loading ignored");
            }
            Vec::new()
        }
        Msg::FetchSucceeded {
            request_id,
            result,
            fetched_at,
        } => {
            if !state.awaits(request_id) {
                ns_debug!(
                    "Dropping stale response request_id={} latest={}",
                    request_id,
                    state.latest_request()
                );
                return (state, Vec::new());
            }
            state.complete_success(result, fetched_at);
            vec![Effect::StopLoadingTicker]
        }
        Msg::FetchFailed { request_id } => {
            if !state.awaits(request_id) {
                ns_debug!(
                    "Dropping stale failure request_id={} latest={}",
                    request_id,
                    state.latest_request()
                );
                return (state, Vec::new());
            }
            state.complete_failure();
            vec![Effect::StopLoadingTicker]
        }
    };

    (state, effects)
}
