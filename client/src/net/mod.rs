//! Networking modules for the auth endpoints.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` defines the transport seam the submission controller calls, and
//! `types` defines the shared wire schema.

pub mod api;
pub mod types;
