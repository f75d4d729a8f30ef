use url::Url;

use crate::error::TemplateError;
use crate::http::HttpMethod;

use super::request::RequestTemplate;

/// Parses a curl command into a [`RequestTemplate`].
///
/// Recognized pieces: `-X`/`--request` method (default `GET`), the first
/// non-flag token with an absolute `http://`/`https://` URL, `-H`/`--header`
/// pairs in `'Key: Value'` form (order preserved), and a
/// `-d`/`--data`/`--data-raw` body. Unknown flags are skipped without
/// consuming a value.
///
/// # Errors
///
/// Returns an error when the command text is empty, contains no absolute
/// URL, or the URL does not parse.
pub fn parse(raw: &str) -> Result<RequestTemplate, TemplateError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TemplateError::EmptyCommand);
    }

    let tokens = tokenize(trimmed);

    let mut method: Option<HttpMethod> = None;
    let mut url: Option<String> = None;
    let mut headers: Vec<(String, String)> = Vec::new();
    let mut body: Option<String> = None;

    let mut iter = tokens.iter();
    while let Some(token) = iter.next() {
        match token.as_str() {
            "curl" => {}
            "-X" | "--request" => {
                if let Some(value) = iter.next() {
                    method = Some(HttpMethod::from_token(value));
                }
            }
            "-H" | "--header" => {
                if let Some(value) = iter.next()
                    && let Some((name, header_value)) = value.split_once(':')
                {
                    headers.push((name.trim().to_owned(), header_value.trim().to_owned()));
                }
            }
            "-d" | "--data" | "--data-raw" => {
                body = iter.next().cloned();
            }
            candidate => {
                if url.is_none() && !candidate.starts_with('-') && is_absolute_url(candidate) {
                    url = Some(candidate.to_owned());
                }
            }
        }
    }

    let url = url.ok_or(TemplateError::MissingUrl)?;
    validate_url(&url)?;

    Ok(RequestTemplate {
        method: method.unwrap_or_default(),
        url,
        headers,
        body,
    })
}

fn is_absolute_url(token: &str) -> bool {
    token.starts_with("http://") || token.starts_with("https://")
}

fn validate_url(url: &str) -> Result<(), TemplateError> {
    // A {uuid} token inside the URL is legal template text; stand in a
    // plausible value so structural validation still applies.
    let candidate = url.replace(super::UUID_TOKEN, "uuid");
    Url::parse(&candidate)
        .map(|_| ())
        .map_err(|err| TemplateError::InvalidUrl {
            url: url.to_owned(),
            source: err,
        })
}

/// Splits the command text into shell-like tokens. Single- and
/// double-quoted runs group into one token with the quotes stripped;
/// there is no escape handling beyond that.
fn tokenize(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quote: Option<char> = None;

    for ch in input.chars() {
        match in_quote {
            Some(quote) => {
                if ch == quote {
                    in_quote = None;
                } else {
                    current.push(ch);
                }
            }
            None => {
                if ch == '\'' || ch == '"' {
                    in_quote = Some(ch);
                } else if ch.is_whitespace() {
                    if !current.is_empty() {
                        tokens.push(std::mem::take(&mut current));
                    }
                } else {
                    current.push(ch);
                }
            }
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}
