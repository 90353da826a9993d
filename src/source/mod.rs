//! Access to the remote catalog API.
//!
//! - `rate_limiter`: process-wide minimum spacing between calls
//! - `client`: the `CatalogSource` seam and its HTTP implementation

pub mod client;
pub mod rate_limiter;

pub use client::{CatalogSource, SourceClient, extract_records};
pub use rate_limiter::{Clock, RateLimiter, TokioClock};
