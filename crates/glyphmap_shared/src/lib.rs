//! Shared functionality
//!
//! This crate supplies the small set of types shared between the glyphmap crates.
//!

pub mod types;
