use rand::Rng;

use super::request::{RequestTemplate, ResolvedRequest};

/// Token replaced with a per-request identifier anywhere it appears.
pub const UUID_TOKEN: &str = "{uuid}";
/// Header whose value rotates to a fresh identifier on every resolution.
pub const CORRELATION_HEADER: &str = "X-Correlation-Id";

const LOAD_ID_PREFIX: &str = "APPLOADID";
const CORRELATION_ID_PREFIX: &str = "APPCORRID";

/// Stamps a template into a request for exactly one send.
///
/// Every `{uuid}` occurrence in the URL, header values, and body receives
/// the same freshly generated identifier, so correlated fields match within
/// one request while differing across requests. Independently, the value of
/// a header named [`CORRELATION_HEADER`] (compared case-insensitively, name
/// case preserved) is replaced with a fresh identifier carrying a distinct
/// prefix. Only a thread-local RNG is shared state, so concurrent callers
/// never serialize on each other.
#[must_use]
pub fn resolve(template: &RequestTemplate) -> ResolvedRequest {
    let request_id = fresh_id(LOAD_ID_PREFIX);

    let url = substitute(&template.url, &request_id);
    let mut headers = Vec::with_capacity(template.headers.len());
    for (name, value) in &template.headers {
        let resolved = if name.eq_ignore_ascii_case(CORRELATION_HEADER) {
            fresh_id(CORRELATION_ID_PREFIX)
        } else {
            substitute(value, &request_id)
        };
        headers.push((name.clone(), resolved));
    }
    let body = template
        .body
        .as_ref()
        .map(|body| substitute(body, &request_id));

    ResolvedRequest {
        method: template.method.clone(),
        url,
        headers,
        body,
    }
}

fn substitute(input: &str, request_id: &str) -> String {
    input.replace(UUID_TOKEN, request_id)
}

/// Prefix plus six lowercase hex characters. Collisions over a run's
/// request volume are possible but acceptable; the identifier is a trace
/// aid, not a uniqueness guarantee.
fn fresh_id(prefix: &str) -> String {
    let fragment: u32 = rand::thread_rng().gen_range(0..0x0100_0000);
    format!("{}{:06x}", prefix, fragment)
}
