use snip_core::ShortenerError;
use url::Url;

/// Checks that `raw` is an absolute http(s) URL with a host.
///
/// The input is stored exactly as given and later sent back as a `Location`
/// header, so it must already be in its final form: no surrounding
/// whitespace and no control characters, which the URL parser would
/// otherwise strip silently.
pub fn validate_url(raw: &str) -> Result<(), ShortenerError> {
    if raw.trim().is_empty() {
        return Err(ShortenerError::InvalidUrl(
            "URL cannot be empty".to_string(),
        ));
    }

    if raw.trim() != raw {
        return Err(ShortenerError::InvalidUrl(format!(
            "URL must not have leading or trailing whitespace: {raw:?}"
        )));
    }

    if raw.chars().any(char::is_control) {
        return Err(ShortenerError::InvalidUrl(format!(
            "URL must not contain control characters: {raw:?}"
        )));
    }

    let parsed =
        Url::parse(raw).map_err(|e| ShortenerError::InvalidUrl(format!("{e}: {raw}")))?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ShortenerError::InvalidUrl(format!(
                "URL scheme must be http or https: {other}"
            )))
        }
    }

    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(ShortenerError::InvalidUrl(format!(
            "URL must have a host: {raw}"
        )));
    }

    Ok(())
}
