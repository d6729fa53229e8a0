//! Inbound adapters translating external requests into domain port calls.
//!
//! HTTP is the only transport; framework details stay inside [`http`].

pub mod http;
