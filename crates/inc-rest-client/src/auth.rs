//! Authentication for outgoing requests

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::error::{RestClientError, RestClientResult};

/// How a request authenticates against the backend
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthMethod {
    /// Session token sent as `Authorization: Bearer <token>`
    Bearer(String),
    /// No authentication
    #[default]
    None,
}

impl AuthMethod {
    /// Create bearer token authentication from a token string
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer(token.into())
    }

    /// Pick the method for a request given the stored session token.
    ///
    /// The token is only sent when attachment is enabled in the client config.
    pub fn from_session(token: Option<String>, attach: bool) -> Self {
        match token {
            Some(token) if attach => Self::Bearer(token),
            _ => Self::None,
        }
    }

    /// Apply authentication headers to a request
    pub fn apply_to_headers(&self, headers: &mut HeaderMap) -> RestClientResult<()> {
        if let AuthMethod::Bearer(token) = self {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| RestClientError::Auth(e.to_string()))?;
            headers.insert(HeaderName::from_static("authorization"), value);
        }
        Ok(())
    }

    /// Get headers for this authentication method
    pub fn headers(&self) -> RestClientResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        self.apply_to_headers(&mut headers)?;
        Ok(headers)
    }
}
