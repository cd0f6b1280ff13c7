//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the crate:
//! - Math types and operations
//! - Handle-based collections
//! - Simulation time
//! - Logging utilities

pub mod math;
pub mod collections;
pub mod time;
pub mod logging;
