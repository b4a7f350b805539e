//! Process-wide `tracing` subscriber setup shared by the mintwatch binaries.
pub mod logging;
