//! Derived views over a feed snapshot
//!
//! Both functions here are pure: same snapshot and term in, same output
//! out.

mod aggregator;
mod explore;

pub use aggregator::{rank, TrendMetric, TrendView, TREND_LIMIT};
pub use explore::{explore, ExploreMode};
