use encoding_rs::{Encoding, UTF_8};

use crate::{FailureKind, FetchError};

/// Decode a response body to UTF-8 using: BOM -> Content-Type charset -> UTF-8.
pub fn decode_body(bytes: &[u8], content_type: Option<&str>) -> Result<String, FetchError> {
    let encoding = Encoding::for_bom(bytes)
        .map(|(encoding, _)| encoding)
        .or_else(|| {
            content_type
                .and_then(extract_charset)
                .and_then(|label| Encoding::for_label(label.as_bytes()))
        })
        .unwrap_or(UTF_8);

    // `decode` strips a matching BOM itself.
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(FetchError::new(
            FailureKind::MalformedBody,
            format!("body is not valid {}", encoding.name()),
        ));
    }
    Ok(text.into_owned())
}

fn extract_charset(content_type: &str) -> Option<String> {
    content_type
        .split(';')
        .filter_map(|part| {
            let (name, value) = part.split_once('=')?;
            name.trim()
                .eq_ignore_ascii_case("charset")
                .then(|| value.trim_matches([' ', '"', '\'']).to_string())
        })
        .next()
}
