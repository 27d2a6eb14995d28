//! Core transport abstractions

pub mod traits;
