use thiserror::Error;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Curl command must not be empty.")]
    EmptyCommand,
    #[error("No absolute http:// or https:// URL found in curl command.")]
    MissingUrl,
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}
