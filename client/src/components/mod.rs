//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render feedback surfaces shared by the auth screens while
//! reading/writing state owned by the page.

pub mod toast;
