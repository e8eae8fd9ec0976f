//! Static token authentication

use reqwest::RequestBuilder;
use std::fmt;

/// Default header carrying the token
pub const DEFAULT_TOKEN_HEADER: &str = "token";

/// A token sent verbatim under a fixed header
#[derive(Clone, PartialEq, Eq)]
pub struct TokenAuth {
    header: String,
    token: String,
}

impl TokenAuth {
    /// Token under the default `token` header
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_header(DEFAULT_TOKEN_HEADER, token)
    }

    /// Token under a custom header
    pub fn with_header(header: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            token: token.into(),
        }
    }

    /// Header name
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Attach the token to a request
    pub fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        req.header(self.header.as_str(), self.token.as_str())
    }
}

impl fmt::Debug for TokenAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenAuth")
            .field("header", &self.header)
            .field("token", &"<redacted>")
            .finish()
    }
}
