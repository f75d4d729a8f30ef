//! HTTP transport: client construction and the send seam workers call.
mod client;
mod method;
mod transport;


pub use method::HttpMethod;
pub use transport::{HttpTransport, Transport};
