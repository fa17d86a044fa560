//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - reqwest for the HttpTransport port
//! - Demo data transport for demo mode and testing
//! - StandardFormatter for the DisplayFormatter port
//!
//! The Lunch Money client composes its endpoints on top of any transport.

pub mod demo;
pub mod format;
pub mod http;
pub mod lunchmoney;
