//! Bearer token extraction from request headers.

use http::header::AUTHORIZATION;
use http::HeaderMap;

/// Fallback header carrying a raw token.
pub const TOKEN_HEADER: &str = "token";

const BEARER_PREFIX: &str = "Bearer ";

/// Extracts the caller's token from the request headers.
///
/// `Authorization` wins when it yields a non-empty value; a leading
/// `Bearer ` is stripped, any other scheme is passed through verbatim.
/// Otherwise the raw `token` header is used. Empty and non-UTF-8 values
/// count as absent.
#[must_use]
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    let from_authorization = header_str(headers, AUTHORIZATION.as_str())
        .map(|value| value.strip_prefix(BEARER_PREFIX).unwrap_or(value))
        .filter(|token| !token.is_empty());

    from_authorization
        .or_else(|| header_str(headers, TOKEN_HEADER).filter(|token| !token.is_empty()))
        .map(str::to_string)
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}
