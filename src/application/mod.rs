//! Application layer - Command and query handlers.
//!
//! Handlers resolve the caller's tenant, load state through ports, build
//! write-sets with the domain and hand them to the store.

pub mod handlers;
