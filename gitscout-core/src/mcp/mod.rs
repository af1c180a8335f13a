//! MCP (Model Context Protocol) server implementation
//!
//! Exposes the gitscout tools to AI agents over newline-delimited JSON-RPC
//! on stdin/stdout.

mod protocol;
mod server;
mod transport;

pub mod tools;

pub use protocol::*;
pub use server::*;
pub use transport::*;
