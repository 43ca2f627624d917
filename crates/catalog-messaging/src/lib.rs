//! Video catalog admin — messaging infrastructure.
//!
//! The broker publish contract, the immutable integration-event routing
//! table, and the mediator handler bridging committed domain changes to
//! the external broker.

pub mod broker;
pub mod publisher;
pub mod routing;
