//! Client-side state shared between screens.
//!
//! SYSTEM CONTEXT
//! ==============
//! `session` holds the authenticated user's record across screens; `toast`
//! is the per-screen notification slot.

pub mod session;
pub mod toast;
