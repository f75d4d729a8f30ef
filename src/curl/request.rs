use crate::http::HttpMethod;

/// Immutable request shape extracted from the curl command text.
///
/// `{uuid}` tokens survive parsing inside the URL, header values, and body;
/// they are only replaced when the template is resolved for a single send.
#[derive(Debug, Clone)]
pub struct RequestTemplate {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl RequestTemplate {
    #[must_use]
    pub const fn has_body(&self) -> bool {
        self.body.is_some()
    }
}

/// A template with all tokens replaced for exactly one in-flight request.
#[derive(Debug, Clone)]
pub struct ResolvedRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}
