//! Game library crate - headless session runner shared by the binary and tests

pub mod session;

pub use session::{run, RunSummary};
