//! Utility functions for the application

pub mod file;
pub mod host;
