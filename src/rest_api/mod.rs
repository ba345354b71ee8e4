//! # REST API Module
//!
//! Read-only country endpoints: request parsing, lookup handlers, the
//! response envelope and the error body.

pub mod errors;
pub mod handler;
pub mod parser;
pub mod response;
pub mod server;

pub use errors::{ApiError, ApiResult};
pub use handler::CountryHandler;
pub use parser::{PageLimits, QueryOptions, RawQuery};
pub use response::{ApiResponse, Envelope, PageMeta};
pub use server::RestServer;
