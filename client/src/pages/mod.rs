//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (form signals, the cancel token
//! for its in-flight submit, applying outcomes) and delegates the flow itself
//! to the submission controller.

pub mod home;
pub mod login;
pub mod signup;
