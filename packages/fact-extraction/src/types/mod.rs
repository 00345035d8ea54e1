//! Data types for the fact extraction library.

pub mod config;
pub mod fact;
pub mod page;
