use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Number of threads ({threads}) cannot exceed number of users ({users}).")]
    ThreadsExceedUsers { threads: u64, users: u64 },
    #[error("Value must be >= {min}.")]
    ValueTooSmall { min: u64 },
    #[error("Invalid value: {source}")]
    InvalidNumber {
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Failed to read curl command file '{path}': {source}")]
    CurlFileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Curl command file '{path}' is empty.")]
    CurlFileEmpty { path: String },
}
