//! Launch statistics.
//!
//! The aggregator functions are re-exported at this level; site name
//! resolution lives in [`sites`].

pub mod aggregator;
pub mod sites;

pub use aggregator::*;
pub use sites::{LaunchIdResolver, SiteNameResolver};
