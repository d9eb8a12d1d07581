//! # API Layer
//!
//! External interfaces for the route service.

pub mod rest;
