use crate::error::{FlavorError, Result};

/// Join `segments` onto `base` with exactly one `/` between parts.
///
/// Surrounding slashes on a segment are stripped; empty pieces and
/// characters that would end the path (`?`, `#`, whitespace) are rejected.
pub fn build_url<S: AsRef<str>>(base: &str, segments: &[S]) -> Result<String> {
    if segments.is_empty() {
        return Ok(base.to_string());
    }

    let mut url = base.trim_end_matches('/').to_string();
    for seg in segments {
        let seg = seg.as_ref();
        validate_segment(seg)?;
        url.push('/');
        url.push_str(seg.trim_matches('/'));
    }
    Ok(url)
}

fn validate_segment(seg: &str) -> Result<()> {
    let trimmed = seg.trim_matches('/');
    if trimmed.is_empty() {
        return Err(FlavorError::invalid(format!("empty path segment `{seg}`")));
    }
    if trimmed.split('/').any(str::is_empty) {
        return Err(FlavorError::invalid(format!(
            "path segment `{seg}` contains an empty component"
        )));
    }
    if let Some(bad) = trimmed
        .chars()
        .find(|c| matches!(c, '?' | '#') || c.is_whitespace())
    {
        return Err(FlavorError::invalid(format!(
            "path segment `{seg}` contains reserved character {bad:?}"
        )));
    }
    Ok(())
}

/// Serialize key/value pairs as a query string, percent-encoding both sides.
///
/// Spaces become `%20` rather than `+`.
pub fn encode_query<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}
