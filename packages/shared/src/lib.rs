//! Shared utilities for Ignition packages.

pub mod logger;
pub mod time;
