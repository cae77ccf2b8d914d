//! Rate Limit Tracking
//!
//! Reads the Finstat quota headers from responses and keeps the latest snapshot.

use crate::error::{FinstatError, Result};
use parking_lot::RwLock;
use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};

pub const DAILY_CURRENT_HEADER: &str = "finstat-daily-limit-current";
pub const DAILY_MAX_HEADER: &str = "finstat-daily-limit-max";
pub const MONTHLY_CURRENT_HEADER: &str = "finstat-monthly-limit-current";
pub const MONTHLY_MAX_HEADER: &str = "finstat-monthly-limit-max";

/// Usage counter for one quota window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitCounter {
    /// Requests used so far in the window
    pub current: Option<u64>,

    /// Requests allowed in the window
    pub max: Option<u64>,
}

impl LimitCounter {
    /// Requests left in the window, when both values are known
    pub fn remaining(&self) -> Option<u64> {
        Some(self.max?.saturating_sub(self.current?))
    }
}

/// Quota state reported by a single response
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimits {
    pub daily: LimitCounter,
    pub monthly: LimitCounter,
}

impl RateLimits {
    /// Parse the quota headers; missing or non-numeric values become `None`
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            daily: LimitCounter {
                current: header_u64(headers, DAILY_CURRENT_HEADER),
                max: header_u64(headers, DAILY_MAX_HEADER),
            },
            monthly: LimitCounter {
                current: header_u64(headers, MONTHLY_CURRENT_HEADER),
                max: header_u64(headers, MONTHLY_MAX_HEADER),
            },
        }
    }
}

fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
}

/// Holds the limits of the most recently completed request.
///
/// Last write wins; callers that issue requests concurrently should read
/// `ApiResponse::limits` instead.
#[derive(Debug, Default)]
pub struct RateLimitTracker {
    last: RwLock<Option<RateLimits>>,
}

impl RateLimitTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the limits of a response and return them
    pub fn update_from_response(&self, headers: &HeaderMap) -> RateLimits {
        let limits = RateLimits::from_headers(headers);
        *self.last.write() = Some(limits);
        limits
    }

    /// Limits from the most recent response
    pub fn last(&self) -> Result<RateLimits> {
        (*self.last.read()).ok_or(FinstatError::LimitsUnavailable)
    }
}
