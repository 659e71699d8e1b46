//! Crawler module for web page fetching and traversal
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with a single normalized error kind
//! - The visited set that guarantees at-most-once visitation
//! - The depth-first scheduler with depth and page-count bounds

mod fetcher;
mod scheduler;
mod visited;

pub use fetcher::{build_http_client, FetchError, Fetcher};
pub use scheduler::{QueuedUrl, Scheduler};
pub use visited::VisitedSet;
