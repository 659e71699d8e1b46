//! URL handling module for Skraper
//!
//! This module provides URL canonicalization for the visited set, relative
//! link resolution and the site name used by the output layout.

mod domain;
mod normalize;

// Re-export main functions
pub use domain::site_name;
pub use normalize::{normalize_url, resolve_link};
