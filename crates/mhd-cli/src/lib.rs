//! CLI library components for the mental-health dataset explorer.

#![allow(missing_docs)]

pub mod config;
pub mod logging;
