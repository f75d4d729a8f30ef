mod app;
mod config;
mod http;
mod template;

pub use app::{AppError, AppResult};
pub use config::ConfigError;
pub use http::HttpError;
pub use template::TemplateError;
