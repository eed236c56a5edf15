use url::Url;

use crate::{FailureKind, FetchError};

/// Builds `{base_url}/scrape?url={target}` with `target` form-encoded.
///
/// Any path on the base URL is kept; existing query and fragment are replaced.
pub fn build_scrape_url(base_url: &str, target: &str) -> Result<Url, FetchError> {
    let mut url = Url::parse(base_url)
        .map_err(|err| FetchError::new(FailureKind::InvalidBaseUrl, err.to_string()))?;
    url.path_segments_mut()
        .map_err(|()| FetchError::new(FailureKind::InvalidBaseUrl, "base url cannot have a path"))?
        .pop_if_empty()
        .push("scrape");
    url.query_pairs_mut().clear().append_pair("url", target);
    url.set_fragment(None);
    Ok(url)
}
