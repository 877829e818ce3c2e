//! Request authorization.
//!
//! Authorization is a single yes/no decision made from the request headers.

use axum::http::{header, HeaderMap};

/// Decides whether a request may proceed.
pub trait Authorizer: Send + Sync {
    fn is_authorized(&self, headers: &HeaderMap) -> bool;
}

/// Accepts requests carrying `Authorization: Bearer <token>` for one static token.
pub struct BearerTokenAuthorizer {
    token: String,
}

impl BearerTokenAuthorizer {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl Authorizer for BearerTokenAuthorizer {
    fn is_authorized(&self, headers: &HeaderMap) -> bool {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .is_some_and(|presented| !self.token.is_empty() && presented.trim() == self.token)
    }
}

impl std::fmt::Debug for BearerTokenAuthorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerTokenAuthorizer")
            .field("token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(auth: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(auth).unwrap());
        headers
    }

    #[test]
    fn test_accepts_matching_token() {
        let authorizer = BearerTokenAuthorizer::new("s3cret");
        assert!(authorizer.is_authorized(&headers_with("Bearer s3cret")));
    }

    #[test]
    fn test_rejects_missing_or_wrong_token() {
        let authorizer = BearerTokenAuthorizer::new("s3cret");
        assert!(!authorizer.is_authorized(&HeaderMap::new()));
        assert!(!authorizer.is_authorized(&headers_with("Bearer nope")));
        assert!(!authorizer.is_authorized(&headers_with("Basic s3cret")));
        assert!(!authorizer.is_authorized(&headers_with("s3cret")));
    }

    #[test]
    fn test_empty_token_rejects_everything() {
        let authorizer = BearerTokenAuthorizer::new("");
        assert!(!authorizer.is_authorized(&headers_with("Bearer ")));
    }

    #[test]
    fn test_debug_redacts_token() {
        let authorizer = BearerTokenAuthorizer::new("s3cret");
        assert!(!format!("{:?}", authorizer).contains("s3cret"));
    }
}
