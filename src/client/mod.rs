//! Client Module
//!
//! HTTP transport, request signing and rate limit tracking.

pub mod http;
pub mod limits;
pub mod signing;

pub use http::HttpClient;
pub use limits::{LimitCounter, RateLimitTracker, RateLimits};
pub use signing::verification_hash;
