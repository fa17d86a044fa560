//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external collaborators. The core domain
//! depends only on these traits, not on concrete implementations.

mod formatter;
mod transport;

pub use formatter::DisplayFormatter;
pub use transport::HttpTransport;
