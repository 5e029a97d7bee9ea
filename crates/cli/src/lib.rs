//! Public library modules for the CLI crate
pub mod report;
pub mod snapshot;
pub mod watch;
