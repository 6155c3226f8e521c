//! ESPN core API client: reference resolution, record building, aggregation.

pub mod http;
pub mod leaders;
pub mod records;
pub mod standings;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;
