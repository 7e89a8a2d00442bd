use axum::http::header::COOKIE;
use axum::http::header::InvalidHeaderValue;
use axum::http::{HeaderMap, HeaderValue};

pub const TOKEN_COOKIE: &str = "token";

/// Value of the named cookie from the request's `Cookie` headers.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}

/// `Set-Cookie` value scoped to the whole site. An empty value clears it.
pub fn set_cookie(name: &str, value: &str) -> Result<HeaderValue, InvalidHeaderValue> {
    HeaderValue::from_str(&format!("{}={}; Path=/", name, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_token_among_other_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("theme=dark; token=mock-token"));

        assert_eq!(read_cookie(&headers, TOKEN_COOKIE).as_deref(), Some("mock-token"));
        assert_eq!(read_cookie(&headers, "session"), None);
    }

    #[test]
    fn cleared_cookie_has_empty_value() {
        let header = set_cookie(TOKEN_COOKIE, "").unwrap();
        assert_eq!(header, "token=; Path=/");
    }
}
