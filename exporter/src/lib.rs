//! Export adapter that persists monitoring metric batches to MongoDB.

mod app;
pub mod core;
pub mod data;
pub mod domain;
pub mod utils;
