//! # Infrastructure Layer
//!
//! Adapters for external systems. The only external system this service
//! talks to is the routing provider.

pub mod routing;
