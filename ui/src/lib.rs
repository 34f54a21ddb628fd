//! Shared UI crate for the compatibility check. Detection logic and views live here.

pub mod core;
pub mod views;
