//! Type-safe wrappers for request parameters.

pub mod category;
pub mod season;

pub use category::StatCategory;
pub use season::Season;
