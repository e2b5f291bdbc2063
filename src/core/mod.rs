//! Core module - Data structures and shared helpers
//!
//! This module provides:
//! - Feed and cache entry model
//! - Rendering of cache reports for different output formats
//! - Duration parsing and formatting

pub mod model;
pub mod render;
pub mod util;
