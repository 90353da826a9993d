//! Extraction loop and resource runners.
//!
//! - `driver`: the generic pagination loop
//! - `resolvers`: per-resource wiring of descriptor and mapping rule
//! - `runner`: the `Pipeline` that runs resolvers in order

pub mod driver;
pub mod resolvers;
pub mod runner;

pub use driver::{
    DEFAULT_PAGE_SIZE, MapEach, PageEnd, PageHandler, PaginationDriver, PaginationReport,
    ResourceDescriptor,
};
pub use runner::{Pipeline, Resource, RunSummary};

#[cfg(test)]
pub mod tests;
