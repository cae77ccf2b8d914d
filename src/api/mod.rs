//! API Module
//!
//! Typed results for each Finstat endpoint and their XML decoding.

pub mod autocomplete;
pub mod daily_diff;
pub mod detail;
pub mod xml;

pub use autocomplete::{AutoCompleteResult, CompanySummary};
pub use daily_diff::{DailyDiff, DailyDiffList};
pub use detail::DetailResult;
