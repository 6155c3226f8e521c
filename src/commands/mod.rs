//! Command implementations for the NFL stats CLI
//!
//! Every command drives the real presentation controller: requests go
//! through the bridge and results are printed from the delivered snapshot.

pub mod common;
pub mod leaders;
pub mod render;
pub mod standings;
pub mod watch;
