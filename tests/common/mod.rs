//! Common test infrastructure
//!
//! Each test spawns its own dashboard server wired to a fake analysis
//! service, both on random local ports.

mod fixtures;
mod server;

pub use fixtures::*;
pub use server::{TestServer, UpstreamReply};
